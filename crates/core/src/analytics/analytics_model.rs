//! Behavioral event models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::errors::{Error, ValidationError};

fn empty_object() -> Value {
    Value::Object(Default::default())
}

/// Kind of behavioral event emitted by the portal.
///
/// Event types the scoring engine does not know deserialize to `Other`; they
/// still count toward active days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    GuideView,
    GuideComplete,
    Search,
    AiChatStart,
    AiChatHelpful,
    AiChatNotHelpful,
    TicketSubmit,
    #[serde(other)]
    Other,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::GuideView => "guide_view",
            EventType::GuideComplete => "guide_complete",
            EventType::Search => "search",
            EventType::AiChatStart => "ai_chat_start",
            EventType::AiChatHelpful => "ai_chat_helpful",
            EventType::AiChatNotHelpful => "ai_chat_not_helpful",
            EventType::TicketSubmit => "ticket_submit",
            EventType::Other => "other",
        }
    }
}

impl FromStr for EventType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "guide_view" => Ok(EventType::GuideView),
            "guide_complete" => Ok(EventType::GuideComplete),
            "search" => Ok(EventType::Search),
            "ai_chat_start" => Ok(EventType::AiChatStart),
            "ai_chat_helpful" => Ok(EventType::AiChatHelpful),
            "ai_chat_not_helpful" => Ok(EventType::AiChatNotHelpful),
            "ticket_submit" => Ok(EventType::TicketSubmit),
            "other" => Ok(EventType::Other),
            _ => Err(ValidationError::InvalidInput(format!("Unknown event type: {}", s)).into()),
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable behavioral event for one sub-account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub id: String,
    pub tenant_id: String,
    pub sub_account_id: String,
    pub event_type: EventType,
    /// Free-form payload written by client instrumentation.
    #[serde(default = "empty_object")]
    pub event_data: Value,
    pub created_at: DateTime<Utc>,
}

impl AnalyticsEvent {
    /// String value stored under `key`, if the payload is an object holding a string there.
    pub fn data_str(&self, key: &str) -> Option<&str> {
        self.event_data.get(key).and_then(Value::as_str)
    }

    /// Query text of a search event.
    pub fn search_query(&self) -> Option<&str> {
        match self.event_type {
            EventType::Search => self.data_str("query"),
            _ => None,
        }
    }

    /// Free-text comment attached to "not helpful" AI feedback.
    pub fn feedback_text(&self) -> Option<&str> {
        match self.event_type {
            EventType::AiChatNotHelpful => self.data_str("feedback"),
            _ => None,
        }
    }

    pub fn is_critical_ticket(&self) -> bool {
        self.event_type == EventType::TicketSubmit && self.data_str("priority") == Some("critical")
    }
}

/// Input model for recording an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnalyticsEvent {
    pub tenant_id: String,
    pub sub_account_id: String,
    pub event_type: EventType,
    #[serde(default = "empty_object")]
    pub event_data: Value,
    /// Defaults to the time the event is recorded.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
