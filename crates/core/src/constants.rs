/// Category applied to content items that do not carry one.
pub const DEFAULT_CATEGORY: &str = "general";

/// Content type served by the guides library.
pub const GUIDE_CONTENT_TYPE: &str = "guide";

/// Default trailing window, in days, used for health scoring.
pub const DEFAULT_PERIOD_DAYS: i64 = 30;

/// Maximum length of a tenant or sub-account identifier.
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Default lifetime of a cached resolved-content view, in seconds.
pub const DEFAULT_CONTENT_CACHE_SECS: u64 = 300;

/// A search detector with no search for this long is dropped, in seconds.
pub const DETECTOR_IDLE_SECS: i64 = 30 * 60;
