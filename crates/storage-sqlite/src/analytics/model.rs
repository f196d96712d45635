//! Database models for analytics events.

use chrono::Utc;
use diesel::prelude::*;
use log::warn;
use serde_json::Value;

use helpdesk_core::analytics::{AnalyticsEvent, EventType};

use crate::utils::{format_timestamp, parse_timestamp};

/// Database model for analytics events.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::analytics_events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AnalyticsEventDB {
    pub id: String,
    pub tenant_id: String,
    pub sub_account_id: String,
    pub event_type: String,
    pub event_data: String,
    pub created_at: String,
}

// Rows written by older clients may carry unknown types or broken payloads;
// they load as `Other` / `null` instead of failing the read.
impl From<AnalyticsEventDB> for AnalyticsEvent {
    fn from(db: AnalyticsEventDB) -> Self {
        let event_type = db.event_type.parse().unwrap_or(EventType::Other);
        let event_data = serde_json::from_str(&db.event_data).unwrap_or_else(|e| {
            warn!("Event '{}' has unreadable event_data: {}", db.id, e);
            Value::Null
        });
        Self {
            created_at: parse_timestamp(&db.created_at).unwrap_or_else(Utc::now),
            id: db.id,
            tenant_id: db.tenant_id,
            sub_account_id: db.sub_account_id,
            event_type,
            event_data,
        }
    }
}

impl From<&AnalyticsEvent> for AnalyticsEventDB {
    fn from(event: &AnalyticsEvent) -> Self {
        Self {
            id: event.id.clone(),
            tenant_id: event.tenant_id.clone(),
            sub_account_id: event.sub_account_id.clone(),
            event_type: event.event_type.as_str().to_string(),
            event_data: event.event_data.to_string(),
            created_at: format_timestamp(event.created_at),
        }
    }
}
