//! Database models for content items.

use diesel::prelude::*;
use helpdesk_core::content::{ContentItem, ContentPayload};
use helpdesk_core::Result;

use crate::utils::parse_timestamp;

/// Database model for content items.
///
/// The display payload is stored as a JSON document in `payload`.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::content_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ContentItemDB {
    pub id: String,
    pub tenant_id: Option<String>,
    pub content_type: String,
    pub is_override: bool,
    pub overrides_id: Option<String>,
    pub category: Option<String>,
    pub display_order: i32,
    pub payload: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Columns rewritten when an existing item is upserted.
///
/// `created_at` is left alone so an edited item keeps its place in the
/// tenant layer. `tenant_id` is never rewritten; ownership is fixed at insert.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::content_items)]
#[diesel(treat_none_as_null = true)]
pub struct ContentItemUpdateDB {
    pub content_type: String,
    pub is_override: bool,
    pub overrides_id: Option<String>,
    pub category: Option<String>,
    pub display_order: i32,
    pub payload: String,
    pub updated_at: String,
}

impl From<&ContentItemDB> for ContentItemUpdateDB {
    fn from(db: &ContentItemDB) -> Self {
        Self {
            content_type: db.content_type.clone(),
            is_override: db.is_override,
            overrides_id: db.overrides_id.clone(),
            category: db.category.clone(),
            display_order: db.display_order,
            payload: db.payload.clone(),
            updated_at: db.updated_at.clone(),
        }
    }
}

impl TryFrom<ContentItemDB> for ContentItem {
    type Error = helpdesk_core::Error;

    fn try_from(db: ContentItemDB) -> Result<Self> {
        let payload: ContentPayload = serde_json::from_str(&db.payload)?;
        Ok(Self {
            id: db.id,
            tenant_id: db.tenant_id,
            content_type: db.content_type,
            is_override: db.is_override,
            overrides_id: db.overrides_id,
            category: db.category,
            display_order: db.display_order,
            payload,
            created_at: parse_timestamp(&db.created_at),
            updated_at: parse_timestamp(&db.updated_at),
        })
    }
}
