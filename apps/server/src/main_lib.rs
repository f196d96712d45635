use std::sync::Arc;

use crate::config::Config;
use helpdesk_core::{
    analytics::{AnalyticsService, AnalyticsServiceTrait},
    content::{ContentService, ContentServiceTrait},
};
use helpdesk_storage_sqlite::{
    analytics::AnalyticsEventRepository, content::ContentRepository, db, DbPool,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub content_service: Arc<dyn ContentServiceTrait + Send + Sync>,
    pub analytics_service: Arc<dyn AnalyticsServiceTrait + Send + Sync>,
    pub pool: Arc<DbPool>,
}

pub fn init_tracing() {
    let log_format = std::env::var("HD_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let content_repository = Arc::new(ContentRepository::new(pool.clone(), writer.clone()));
    let content_service = Arc::new(ContentService::with_cache_ttl(
        content_repository,
        config.content_cache_ttl,
    ));

    let event_repository = Arc::new(AnalyticsEventRepository::new(pool.clone(), writer));
    let analytics_service = Arc::new(
        AnalyticsService::new(event_repository)
            .with_default_period_days(config.health_period_days)?,
    );

    tracing::info!("Database ready at {}", db_path);

    Ok(Arc::new(AppState {
        content_service,
        analytics_service,
        pool,
    }))
}
