//! Confusion-topic extraction from searches and negative AI feedback.

use std::collections::HashMap;

use super::model::ConfusionTopic;
use crate::analytics::AnalyticsEvent;

/// Number of topics returned.
pub const MAX_CONFUSION_TOPICS: usize = 10;

/// Tokens must be longer than this many characters to count.
const MIN_TOKEN_CHARS: usize = 3;

/// Weight of a token taken from "not helpful" feedback.
const FEEDBACK_WEIGHT: u32 = 2;

/// Returns the most frequent words in search queries and "not helpful" feedback.
///
/// Text is lowercased and split on whitespace. Feedback words count double.
/// Ties keep the order in which words were first seen.
pub fn extract_confusion_topics(events: &[AnalyticsEvent]) -> Vec<ConfusionTopic> {
    let mut counts: HashMap<String, (u32, usize)> = HashMap::new();

    let mut tally = |text: &str, weight: u32| {
        for token in text.to_lowercase().split_whitespace() {
            if token.chars().count() <= MIN_TOKEN_CHARS {
                continue;
            }
            let first_seen = counts.len();
            let entry = counts.entry(token.to_string()).or_insert((0, first_seen));
            entry.0 += weight;
        }
    };

    for event in events {
        if let Some(query) = event.search_query() {
            tally(query, 1);
        } else if let Some(feedback) = event.feedback_text() {
            tally(feedback, FEEDBACK_WEIGHT);
        }
    }

    let mut topics: Vec<(String, u32, usize)> = counts
        .into_iter()
        .map(|(topic, (count, first_seen))| (topic, count, first_seen))
        .collect();
    topics.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    topics
        .into_iter()
        .take(MAX_CONFUSION_TOPICS)
        .map(|(topic, count, _)| ConfusionTopic { topic, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::EventType;
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::{json, Value};

    fn event(i: i64, event_type: EventType, data: Value) -> AnalyticsEvent {
        AnalyticsEvent {
            id: format!("e{}", i),
            tenant_id: "acme".to_string(),
            sub_account_id: "loc1".to_string(),
            event_type,
            event_data: data,
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap() + Duration::minutes(i),
        }
    }

    #[test]
    fn test_feedback_counts_double_and_short_tokens_are_dropped() {
        let events = vec![
            event(0, EventType::Search, json!({ "query": "How to connect Stripe" })),
            event(1, EventType::Search, json!({ "query": "stripe payouts" })),
            event(
                2,
                EventType::AiChatNotHelpful,
                json!({ "feedback": "Payouts never arrive" }),
            ),
            event(3, EventType::AiChatHelpful, json!({ "feedback": "stripe stripe stripe" })),
        ];

        let topics = extract_confusion_topics(&events);

        let as_pairs: Vec<(&str, u32)> = topics.iter().map(|t| (t.topic.as_str(), t.count)).collect();
        assert_eq!(
            as_pairs,
            vec![
                ("payouts", 3),
                ("stripe", 2),
                ("never", 2),
                ("arrive", 2),
                ("connect", 1)
            ]
        );
    }

    #[test]
    fn test_ties_keep_first_seen_order_and_limit_to_ten() {
        let words = [
            "alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel", "india",
            "juliet", "kilo", "lima",
        ];
        let events: Vec<AnalyticsEvent> = words
            .iter()
            .enumerate()
            .map(|(i, w)| event(i as i64, EventType::Search, json!({ "query": w })))
            .collect();

        let topics = extract_confusion_topics(&events);

        assert_eq!(topics.len(), MAX_CONFUSION_TOPICS);
        let names: Vec<&str> = topics.iter().map(|t| t.topic.as_str()).collect();
        assert_eq!(names, words[..10].to_vec());
    }

    #[test]
    fn test_malformed_payloads_are_skipped() {
        let events = vec![
            event(0, EventType::Search, json!({ "query": null })),
            event(1, EventType::AiChatNotHelpful, json!("confusing")),
            event(2, EventType::Search, json!({ "query": "calendar sync" })),
        ];

        let topics = extract_confusion_topics(&events);
        let names: Vec<&str> = topics.iter().map(|t| t.topic.as_str()).collect();
        assert_eq!(names, vec!["calendar", "sync"]);
    }
}
