//! Content domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{DEFAULT_CATEGORY, GUIDE_CONTENT_TYPE};

fn default_content_type() -> String {
    GUIDE_CONTENT_TYPE.to_string()
}

/// Payload carried by a guide or article.
///
/// The resolver never inspects these fields. Unknown keys are kept in `extra`
/// so they round-trip to consumers unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContentPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_to_read: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default)]
    pub related_ids: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A content record as stored: base content, a tenant override, or tenant-custom content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    /// `None` marks base content visible to every tenant.
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default = "default_content_type")]
    pub content_type: String,
    #[serde(default)]
    pub is_override: bool,
    /// Base item replaced by this record. Only meaningful when `is_override` is set.
    #[serde(default)]
    pub overrides_id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(flatten)]
    pub payload: ContentPayload,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ContentItem {
    /// Category used for sorting and grouping.
    pub fn effective_category(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }

    pub fn is_base(&self) -> bool {
        self.tenant_id.is_none()
    }

    /// Target key when this record is an override carrying a target id.
    pub fn override_target(&self) -> Option<&str> {
        if self.is_override {
            self.overrides_id.as_deref()
        } else {
            None
        }
    }
}

/// Input model for creating or replacing a content record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContentItem {
    pub id: Option<String>,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default = "default_content_type")]
    pub content_type: String,
    #[serde(default)]
    pub is_override: bool,
    #[serde(default)]
    pub overrides_id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(flatten)]
    pub payload: ContentPayload,
}

/// A record in a tenant's resolved view.
///
/// `id` is the effective identifier: the base id for overrides, the record's
/// own id otherwise. `source_id` is the id of the record whose payload won.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedContentItem {
    pub id: String,
    pub source_id: String,
    pub tenant_id: Option<String>,
    pub content_type: String,
    pub category: String,
    pub display_order: i32,
    pub overridden: bool,
    #[serde(flatten)]
    pub payload: ContentPayload,
}

impl ResolvedContentItem {
    /// Resolved entry for base or tenant-custom content, keyed by its own id.
    pub fn from_own(item: &ContentItem) -> Self {
        Self {
            id: item.id.clone(),
            source_id: item.id.clone(),
            tenant_id: item.tenant_id.clone(),
            content_type: item.content_type.clone(),
            category: item.effective_category().to_string(),
            display_order: item.display_order,
            overridden: false,
            payload: item.payload.clone(),
        }
    }

    /// Resolved entry for a tenant override installed at `target_id`.
    pub fn from_override(item: &ContentItem, target_id: &str) -> Self {
        Self {
            id: target_id.to_string(),
            overridden: true,
            ..Self::from_own(item)
        }
    }
}

/// Resolved guides of one category, as shown on the library index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentCategoryGroup {
    pub id: String,
    pub title: String,
    pub description: String,
    pub guides: Vec<ResolvedContentItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_applies_defaults_and_keeps_unknown_fields() {
        let item: ContentItem = serde_json::from_value(json!({
            "id": "g1",
            "title": "Connect your calendar",
            "difficulty": "beginner"
        }))
        .unwrap();

        assert_eq!(item.tenant_id, None);
        assert_eq!(item.content_type, "guide");
        assert!(!item.is_override);
        assert_eq!(item.display_order, 0);
        assert_eq!(item.effective_category(), "general");
        assert_eq!(item.payload.extra.get("difficulty"), Some(&json!("beginner")));

        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["difficulty"], json!("beginner"));
        assert_eq!(back["displayOrder"], json!(0));
    }

    #[test]
    fn test_override_target_requires_flag() {
        let mut item: ContentItem = serde_json::from_value(json!({
            "id": "t1",
            "tenantId": "T",
            "overridesId": "a"
        }))
        .unwrap();
        assert_eq!(item.override_target(), None);

        item.is_override = true;
        assert_eq!(item.override_target(), Some("a"));
    }
}
