use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use helpdesk_core::content::{
    ContentCategoryGroup, ContentItem, NewContentItem, ResolvedContentItem,
};
use serde::Deserialize;

#[derive(Deserialize)]
struct GuidesQuery {
    category: Option<String>,
}

async fn list_guides(
    Path(tenant_id): Path<String>,
    Query(query): Query<GuidesQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ResolvedContentItem>>> {
    let guides = state
        .content_service
        .get_guides(&tenant_id, query.category.as_deref().filter(|c| !c.is_empty()))?;
    Ok(Json(guides))
}

async fn get_guide(
    Path((tenant_id, guide_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ResolvedContentItem>> {
    let guide = state.content_service.get_guide(&tenant_id, &guide_id)?;
    Ok(Json(guide))
}

async fn list_guide_categories(
    Path(tenant_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ContentCategoryGroup>>> {
    let groups = state.content_service.get_guide_categories(&tenant_id)?;
    Ok(Json(groups))
}

async fn upsert_content(
    State(state): State<Arc<AppState>>,
    Json(item): Json<NewContentItem>,
) -> ApiResult<Json<ContentItem>> {
    let saved = state.content_service.upsert_content_item(item).await?;
    Ok(Json(saved))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tenants/{tenant}/guides", get(list_guides))
        .route("/tenants/{tenant}/guides/{id}", get(get_guide))
        .route("/tenants/{tenant}/guide-categories", get(list_guide_categories))
        .route("/content", post(upsert_content))
}
