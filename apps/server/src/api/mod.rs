use std::sync::Arc;

use crate::{
    config::Config,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use anyhow::Context;
use axum::{extract::State, http::HeaderValue, routing::get, Router};
use helpdesk_storage_sqlite::db;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod events;
mod guides;
mod health_scores;

pub async fn healthz() -> &'static str {
    "ok"
}

/// Ready once the database answers.
pub async fn readyz(State(state): State<Arc<AppState>>) -> ApiResult<&'static str> {
    let pool = state.pool.clone();
    tokio::task::spawn_blocking(move || db::ping(&pool))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;
    Ok("ok")
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> anyhow::Result<Router> {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin '{}'", o))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        CorsLayer::new().allow_origin(origins)
    };

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .merge(guides::router())
        .merge(events::router())
        .merge(health_scores::router());

    Ok(Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http()))
}
