//! Repeat and rapid search detection over a bounded history.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::VecDeque;

/// Number of recent searches remembered per detector.
pub const SEARCH_HISTORY_CAPACITY: usize = 10;

/// Searches within this span count toward rapid searching.
pub const RAPID_SEARCH_WINDOW_SECS: i64 = 30;

/// Searches inside the window, including the current one, that make a burst.
pub const RAPID_SEARCH_THRESHOLD: usize = 3;

/// Lowercases and trims a query so equivalent searches compare equal.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Patterns observed for one recorded search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPattern {
    pub is_repeat: bool,
    pub is_rapid: bool,
}

impl SearchPattern {
    pub fn is_confused(&self) -> bool {
        self.is_repeat || self.is_rapid
    }
}

/// Remembers the last few searches of one sub-account.
///
/// The detector is owned by its caller; nothing is shared between instances.
#[derive(Debug, Clone)]
pub struct SearchPatternDetector {
    history: VecDeque<(String, DateTime<Utc>)>,
    capacity: usize,
}

impl SearchPatternDetector {
    pub fn new() -> Self {
        Self::with_capacity(SEARCH_HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Records a search made at `at` and reports what it looks like.
    ///
    /// Blank queries are ignored and report no pattern.
    pub fn record(&mut self, query: &str, at: DateTime<Utc>) -> SearchPattern {
        let normalized = normalize_query(query);
        if normalized.is_empty() {
            return SearchPattern::default();
        }

        let is_repeat = self.history.iter().any(|(q, _)| *q == normalized);

        let window_start = at - Duration::seconds(RAPID_SEARCH_WINDOW_SECS);
        let recent = self
            .history
            .iter()
            .filter(|(_, t)| *t >= window_start && *t <= at)
            .count();
        let is_rapid = recent + 1 >= RAPID_SEARCH_THRESHOLD;

        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back((normalized, at));

        SearchPattern {
            is_repeat,
            is_rapid,
        }
    }

    /// Time of the newest remembered search.
    pub fn last_search_at(&self) -> Option<DateTime<Utc>> {
        self.history.back().map(|(_, t)| *t)
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

impl Default for SearchPatternDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap() + Duration::seconds(secs)
    }

    #[test]
    fn test_repeat_detection_ignores_case_and_whitespace() {
        let mut detector = SearchPatternDetector::new();

        assert!(!detector.record("Reset password", at(0)).is_repeat);
        assert!(detector.record("  reset PASSWORD ", at(600)).is_repeat);
        assert!(!detector.record("invoices", at(1200)).is_repeat);
    }

    #[test]
    fn test_rapid_detection_needs_three_searches_in_window() {
        let mut detector = SearchPatternDetector::new();

        assert!(!detector.record("a", at(0)).is_rapid);
        assert!(!detector.record("b", at(10)).is_rapid);
        assert!(detector.record("c", at(20)).is_rapid);
        // Only "c" is within 30s of t=45.
        assert!(!detector.record("d", at(45)).is_rapid);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut detector = SearchPatternDetector::with_capacity(3);
        for (i, q) in ["one", "two", "three", "four"].iter().enumerate() {
            detector.record(q, at(i as i64 * 120));
        }

        assert_eq!(detector.len(), 3);
        // "one" was evicted.
        assert!(!detector.record("one", at(1000)).is_repeat);
        assert!(detector.record("four", at(1100)).is_repeat);
    }

    #[test]
    fn test_blank_queries_are_not_recorded() {
        let mut detector = SearchPatternDetector::new();
        assert_eq!(detector.record("   ", at(0)), SearchPattern::default());
        assert!(detector.is_empty());
        assert_eq!(detector.last_search_at(), None);
    }

    #[test]
    fn test_last_search_at_tracks_newest_entry() {
        let mut detector = SearchPatternDetector::new();
        detector.record("billing", at(0));
        detector.record("refunds", at(90));
        assert_eq!(detector.last_search_at(), Some(at(90)));
    }

    #[test]
    fn test_detectors_are_independent() {
        let mut first = SearchPatternDetector::new();
        let mut second = SearchPatternDetector::new();

        first.record("billing", at(0));
        assert!(!second.record("billing", at(5)).is_repeat);
        assert!(first.record("billing", at(5)).is_confused());
    }
}
