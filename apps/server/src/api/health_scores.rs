use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use helpdesk_core::health::{ConfusionTopic, HealthScore, TenantHealthReport};
use serde::Deserialize;

/// Trailing window in days; the configured default applies when absent.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PeriodQuery {
    period_days: Option<i64>,
}

async fn sub_account_health(
    Path((tenant_id, sub_account_id)): Path<(String, String)>,
    Query(query): Query<PeriodQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<HealthScore>> {
    let score = state
        .analytics_service
        .calculate_sub_account_health(&tenant_id, &sub_account_id, query.period_days)?;
    Ok(Json(score))
}

async fn confusion_topics(
    Path((tenant_id, sub_account_id)): Path<(String, String)>,
    Query(query): Query<PeriodQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ConfusionTopic>>> {
    let topics = state
        .analytics_service
        .get_confusion_topics(&tenant_id, &sub_account_id, query.period_days)?;
    Ok(Json(topics))
}

async fn tenant_health(
    Path(tenant_id): Path<String>,
    Query(query): Query<PeriodQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<TenantHealthReport>> {
    let report = state
        .analytics_service
        .calculate_tenant_health(&tenant_id, query.period_days)?;
    Ok(Json(report))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/tenants/{tenant}/sub-accounts/{id}/health",
            get(sub_account_health),
        )
        .route(
            "/tenants/{tenant}/sub-accounts/{id}/confusion-topics",
            get(confusion_topics),
        )
        .route("/tenants/{tenant}/health", get(tenant_health))
}
