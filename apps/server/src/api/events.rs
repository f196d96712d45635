use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use helpdesk_core::analytics::{AnalyticsEvent, NewAnalyticsEvent};

async fn record_event(
    State(state): State<Arc<AppState>>,
    Json(event): Json<NewAnalyticsEvent>,
) -> ApiResult<(StatusCode, Json<AnalyticsEvent>)> {
    let recorded = state.analytics_service.record_event(event).await?;
    Ok((StatusCode::CREATED, Json(recorded)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/events", post(record_event))
}
