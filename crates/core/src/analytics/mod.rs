//! Analytics module - behavioral events, search pattern detection, and the
//! service that records events and scores sub-accounts from them.

mod analytics_model;
mod analytics_service;
mod analytics_traits;
mod search_patterns;


pub use analytics_model::{AnalyticsEvent, EventType, NewAnalyticsEvent};
pub use analytics_service::AnalyticsService;
pub use analytics_traits::{AnalyticsEventRepositoryTrait, AnalyticsServiceTrait};
pub use search_patterns::{
    normalize_query, SearchPattern, SearchPatternDetector, RAPID_SEARCH_THRESHOLD,
    RAPID_SEARCH_WINDOW_SECS, SEARCH_HISTORY_CAPACITY,
};
