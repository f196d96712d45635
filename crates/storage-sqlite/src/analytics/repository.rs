//! Analytics event repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use helpdesk_core::analytics::{AnalyticsEvent, AnalyticsEventRepositoryTrait, NewAnalyticsEvent};
use helpdesk_core::Result;

use super::model::AnalyticsEventDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::analytics_events;
use crate::schema::analytics_events::dsl::*;
use crate::utils::format_timestamp;

pub struct AnalyticsEventRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AnalyticsEventRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl AnalyticsEventRepositoryTrait for AnalyticsEventRepository {
    fn load_events_since(
        &self,
        tenant: &str,
        sub_account: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<AnalyticsEvent>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = analytics_events
            .filter(tenant_id.eq(tenant))
            .filter(sub_account_id.eq(sub_account))
            .filter(created_at.ge(format_timestamp(since)))
            .order((created_at.asc(), id.asc()))
            .select(AnalyticsEventDB::as_select())
            .load::<AnalyticsEventDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(AnalyticsEvent::from).collect())
    }

    fn list_sub_accounts(&self, tenant: &str) -> Result<Vec<String>> {
        let mut conn = get_connection(&self.pool)?;
        analytics_events
            .filter(tenant_id.eq(tenant))
            .select(sub_account_id)
            .distinct()
            .order(sub_account_id.asc())
            .load::<String>(&mut conn)
            .into_core()
    }

    async fn insert_event(&self, event: NewAnalyticsEvent) -> Result<AnalyticsEvent> {
        let stored = AnalyticsEvent {
            id: Uuid::now_v7().to_string(),
            tenant_id: event.tenant_id,
            sub_account_id: event.sub_account_id,
            event_type: event.event_type,
            event_data: event.event_data,
            created_at: event.created_at.unwrap_or_else(Utc::now),
        };
        let row = AnalyticsEventDB::from(&stored);

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<AnalyticsEvent> {
                diesel::insert_into(analytics_events::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(stored)
            })
            .await
    }
}
