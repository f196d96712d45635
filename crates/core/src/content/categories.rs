//! Guide categories known to the library index.

use serde::{Deserialize, Serialize};

/// Description shown for categories without a dedicated entry.
pub const FALLBACK_CATEGORY_DESCRIPTION: &str = "Guides and resources for this topic";

/// Categories with a curated description.
///
/// Anything else stored in a content record maps to `Other` and receives the
/// fallback description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuideCategory {
    GettingStarted,
    Contacts,
    Conversations,
    Calendars,
    Opportunities,
    Automation,
    Marketing,
    Payments,
    Reporting,
    Integrations,
    Settings,
    General,
    Other,
}

impl GuideCategory {
    /// Maps a stored category key onto a known category.
    pub fn from_key(key: &str) -> Self {
        match key {
            "getting_started" => GuideCategory::GettingStarted,
            "contacts" => GuideCategory::Contacts,
            "conversations" => GuideCategory::Conversations,
            "calendars" => GuideCategory::Calendars,
            "opportunities" => GuideCategory::Opportunities,
            "automation" => GuideCategory::Automation,
            "marketing" => GuideCategory::Marketing,
            "payments" => GuideCategory::Payments,
            "reporting" => GuideCategory::Reporting,
            "integrations" => GuideCategory::Integrations,
            "settings" => GuideCategory::Settings,
            "general" => GuideCategory::General,
            _ => GuideCategory::Other,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GuideCategory::GettingStarted => "Set up your account and learn the basics",
            GuideCategory::Contacts => "Import, organize and segment your contacts",
            GuideCategory::Conversations => "Reply to customers across every channel from one inbox",
            GuideCategory::Calendars => "Configure calendars, availability and booking links",
            GuideCategory::Opportunities => "Track deals through your sales pipelines",
            GuideCategory::Automation => "Build workflows that follow up for you",
            GuideCategory::Marketing => "Run campaigns, emails and social posts",
            GuideCategory::Payments => "Send invoices and collect payments",
            GuideCategory::Reporting => "Measure results with dashboards and reports",
            GuideCategory::Integrations => "Connect the tools you already use",
            GuideCategory::Settings => "Manage users, permissions and business details",
            GuideCategory::General => "Tips and answers to common questions",
            GuideCategory::Other => FALLBACK_CATEGORY_DESCRIPTION,
        }
    }
}

/// Description for a stored category key, falling back for unknown keys.
pub fn category_description(key: &str) -> &'static str {
    GuideCategory::from_key(key).description()
}

/// Turns a snake_case category key into a display title.
///
/// `getting_started` becomes `Getting Started`. Empty segments are dropped.
pub fn category_title(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
