//! Sub-account health scoring.
//!
//! Events are tallied once, then every rule in the table is evaluated in
//! order. Rules are not exclusive: each one that matches adds its delta to a
//! neutral baseline of 50 and records its signal. The total is clamped to
//! `0..=100` and mapped to a recommendation tier.
//!
//! Malformed `eventData` never aborts scoring. A lookup that fails reads as
//! absent for that one event and the remaining rules still run.

use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use std::collections::{HashMap, HashSet};

use super::model::{HealthMetrics, HealthScore, HealthSignal, RecommendationTier};
use crate::analytics::{normalize_query, AnalyticsEvent, EventType};
use crate::errors::Result;
use crate::utils::time_utils::{activity_date, validate_period_days};

/// Starting score before any rule fires.
pub const BASELINE_SCORE: i32 = 50;

/// Counts the scoring rules look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventTally {
    pub guide_views: u32,
    pub guide_completes: u32,
    pub searches: u32,
    pub ai_chats: u32,
    pub ai_helpful: u32,
    pub ai_not_helpful: u32,
    pub tickets: u32,
    pub critical_tickets: u32,
    /// Occurrences of a normalized query beyond its first.
    pub repeat_searches: u32,
    /// Distinct UTC dates with at least one event of any type.
    pub active_days: u32,
}

impl EventTally {
    pub fn from_events(events: &[AnalyticsEvent]) -> Self {
        let mut tally = EventTally::default();
        let mut days: HashSet<NaiveDate> = HashSet::new();

        for event in events {
            days.insert(activity_date(event.created_at));
            match event.event_type {
                EventType::GuideView => tally.guide_views += 1,
                EventType::GuideComplete => tally.guide_completes += 1,
                EventType::Search => tally.searches += 1,
                EventType::AiChatStart => tally.ai_chats += 1,
                EventType::AiChatHelpful => tally.ai_helpful += 1,
                EventType::AiChatNotHelpful => tally.ai_not_helpful += 1,
                EventType::TicketSubmit => {
                    tally.tickets += 1;
                    if event.is_critical_ticket() {
                        tally.critical_tickets += 1;
                    }
                }
                EventType::Other => {}
            }
        }

        tally.active_days = days.len() as u32;
        tally.repeat_searches = count_repeat_searches(events);
        tally
    }

    /// Share of AI chats marked helpful; 0 when there were no chats.
    pub fn ai_helpful_ratio(&self) -> f64 {
        if self.ai_chats == 0 {
            0.0
        } else {
            f64::from(self.ai_helpful) / f64::from(self.ai_chats)
        }
    }
}

/// Counts searches that repeat an earlier normalized query, in time order.
pub fn count_repeat_searches(events: &[AnalyticsEvent]) -> u32 {
    let mut searches: Vec<&AnalyticsEvent> = events
        .iter()
        .filter(|e| e.event_type == EventType::Search)
        .collect();
    searches.sort_by_key(|e| e.created_at);

    let mut seen: HashMap<String, u32> = HashMap::new();
    let mut repeats = 0;
    for event in searches {
        let Some(query) = event.search_query() else {
            debug!("Search event '{}' has no readable query; skipped", event.id);
            continue;
        };
        let normalized = normalize_query(query);
        if normalized.is_empty() {
            continue;
        }
        let count = seen.entry(normalized).or_insert(0);
        if *count > 0 {
            repeats += 1;
        }
        *count += 1;
    }
    repeats
}

/// Outcome of running the rule table over a tally.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleEvaluation {
    /// Sum of baseline and rule deltas, before clamping.
    pub raw_score: i32,
    pub metrics: HealthMetrics,
    /// Signals in rule-table order.
    pub fired: Vec<HealthSignal>,
}

impl RuleEvaluation {
    fn fire(&mut self, signal: HealthSignal, delta: i32) {
        self.raw_score += delta;
        self.fired.push(signal);
    }

    fn has_fired(&self, signal: HealthSignal) -> bool {
        self.fired.contains(&signal)
    }
}

fn percent(numerator: f64, denominator: f64) -> u32 {
    ((numerator / denominator) * 100.0).round().clamp(0.0, 100.0) as u32
}

/// Evaluates every scoring rule against `tally`, in table order.
pub fn evaluate_rules(tally: &EventTally, period_days: i64) -> RuleEvaluation {
    let mut eval = RuleEvaluation {
        raw_score: BASELINE_SCORE,
        ..Default::default()
    };

    // --- positive signals ---
    if tally.guide_views >= 10 {
        eval.fire(HealthSignal::ActiveLearner, 15);
        eval.metrics.learning_progress = percent(f64::from(tally.guide_views), 50.0);
    }
    if tally.guide_completes >= 5 {
        eval.fire(HealthSignal::CompletingGuides, 10);
    }
    if tally.ai_chats > 3 && tally.ai_chats < 30 {
        eval.fire(HealthSignal::HealthyAiUsage, 10);
    }
    if tally.ai_helpful_ratio() > 0.6 {
        eval.fire(HealthSignal::AiEffective, 10);
    }
    if tally.tickets < 3 {
        eval.fire(HealthSignal::LowTicketVolume, 10);
        eval.metrics.support_load = 100u32.saturating_sub(tally.tickets.saturating_mul(10));
    }
    if tally.active_days >= 7 {
        eval.fire(HealthSignal::ConsistentEngagement, 10);
        eval.metrics.engagement = percent(f64::from(tally.active_days), period_days as f64);
    }

    // --- negative signals ---
    if tally.searches > 20 {
        eval.fire(HealthSignal::ExcessiveSearching, -10);
        eval.metrics.confusion_signals += 30;
    }
    if tally.repeat_searches > 3 {
        eval.fire(HealthSignal::RepeatSearches, -15);
        eval.metrics.confusion_signals += 40;
    }
    if tally.ai_not_helpful > 5 {
        eval.fire(HealthSignal::AiNotHelping, -15);
        eval.metrics.confusion_signals += 20;
    }
    if tally.tickets > 5 {
        eval.fire(HealthSignal::HighTicketVolume, -20);
        eval.metrics.support_load = tally.tickets.saturating_mul(10).min(100);
    }
    if tally.critical_tickets > 0 {
        eval.fire(HealthSignal::CriticalTickets, -30);
    }
    if tally.guide_views < 3 && period_days >= 7 {
        eval.fire(HealthSignal::LowEngagement, -10);
        if !eval.has_fired(HealthSignal::ConsistentEngagement) {
            eval.metrics.engagement = 20;
        }
    }
    if tally.ai_chats > 30 && tally.guide_views < 5 {
        eval.fire(HealthSignal::AiSpamWithoutReading, -10);
    }

    eval
}

/// Scores one sub-account from its events over a `period_days` window.
///
/// The events are expected to already be limited to the window. The only
/// failure is a period shorter than one day.
pub fn calculate_health_score(
    sub_account_id: &str,
    events: &[AnalyticsEvent],
    period_days: i64,
    now: DateTime<Utc>,
) -> Result<HealthScore> {
    let period_days = validate_period_days(period_days)?;

    let tally = EventTally::from_events(events);
    let eval = evaluate_rules(&tally, period_days);

    let score = eval.raw_score.clamp(0, 100) as u8;
    let tier = RecommendationTier::from_score(score);

    let (positive, negative): (Vec<HealthSignal>, Vec<HealthSignal>) =
        eval.fired.iter().copied().partition(|s| s.is_positive());

    debug!(
        "Scored sub-account '{}': {} (raw {}, {} events, {} rules fired)",
        sub_account_id,
        score,
        eval.raw_score,
        events.len(),
        eval.fired.len()
    );

    Ok(HealthScore {
        sub_account_id: sub_account_id.to_string(),
        score,
        metrics: eval.metrics,
        positive_signals: positive.iter().map(|s| s.label().to_string()).collect(),
        negative_signals: negative.iter().map(|s| s.label().to_string()).collect(),
        tier,
        recommendation: tier.message().to_string(),
        last_calculated: now,
    })
}
