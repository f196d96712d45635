//! Sub-account health scoring.
//!
//! Scores are computed on demand from the behavioral event log:
//!
//! ```text
//! events ──► EventTally ──► rule table ──► clamp ──► tier + recommendation
//!                                  │
//!                                  └──► metrics, positive/negative signals
//! ```
//!
//! - **Models** (`model.rs`) - signals, tiers, scores, tenant rollups
//! - **Scoring** (`scoring.rs`) - the rule table and score calculation
//! - **Rollup** (`rollup.rs`) - tenant-wide aggregation
//! - **Topics** (`topics.rs`) - confusion topics from searches and feedback
//!
//! Rules are not mutually exclusive; every matching rule contributes.
//! Malformed event payloads never fail a calculation, they just match fewer
//! rules.

pub mod model;
pub mod rollup;
pub mod scoring;
pub mod topics;

pub use model::{
    ConfusionTopic, HealthMetrics, HealthScore, HealthSignal, RecommendationTier,
    TenantHealthReport, TenantHealthSummary,
};
pub use rollup::{summarize_tenant_health, AT_RISK_THRESHOLD, HEALTHY_THRESHOLD};
pub use scoring::{
    calculate_health_score, count_repeat_searches, evaluate_rules, EventTally, RuleEvaluation,
    BASELINE_SCORE,
};
pub use topics::{extract_confusion_topics, MAX_CONFUSION_TOPICS};
