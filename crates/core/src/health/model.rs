//! Health scoring domain models.
//!
//! This module contains the data structures produced by the scoring engine:
//! - Named signals and the recommendation tiers derived from a score
//! - Per-sub-account health scores and their component metrics
//! - Tenant-wide rollups and confusion topics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Signals
// =============================================================================

/// A behavioral pattern that moved the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthSignal {
    ActiveLearner,
    CompletingGuides,
    HealthyAiUsage,
    AiEffective,
    LowTicketVolume,
    ConsistentEngagement,
    ExcessiveSearching,
    RepeatSearches,
    AiNotHelping,
    HighTicketVolume,
    CriticalTickets,
    LowEngagement,
    AiSpamWithoutReading,
}

impl HealthSignal {
    /// Human-readable explanation shown next to a score.
    pub fn label(&self) -> &'static str {
        match self {
            HealthSignal::ActiveLearner => "Active learner",
            HealthSignal::CompletingGuides => "Completing guides",
            HealthSignal::HealthyAiUsage => "Healthy AI usage",
            HealthSignal::AiEffective => "AI assistant is effective",
            HealthSignal::LowTicketVolume => "Low support ticket volume",
            HealthSignal::ConsistentEngagement => "Consistent weekly engagement",
            HealthSignal::ExcessiveSearching => "Excessive searching",
            HealthSignal::RepeatSearches => "Repeat searches for the same topic",
            HealthSignal::AiNotHelping => "AI assistant not helping",
            HealthSignal::HighTicketVolume => "High support ticket volume",
            HealthSignal::CriticalTickets => "Critical tickets submitted",
            HealthSignal::LowEngagement => "Low engagement",
            HealthSignal::AiSpamWithoutReading => "Heavy AI usage without reading guides",
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(
            self,
            HealthSignal::ActiveLearner
                | HealthSignal::CompletingGuides
                | HealthSignal::HealthyAiUsage
                | HealthSignal::AiEffective
                | HealthSignal::LowTicketVolume
                | HealthSignal::ConsistentEngagement
        )
    }
}

impl std::fmt::Display for HealthSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// =============================================================================
// Recommendation Tier
// =============================================================================

/// Advisory band derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationTier {
    Healthy,
    NeedsAttention,
    AtRisk,
    Critical,
    Emergency,
}

impl RecommendationTier {
    /// Tier for a clamped score; the first threshold met wins.
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => RecommendationTier::Healthy,
            60..=79 => RecommendationTier::NeedsAttention,
            40..=59 => RecommendationTier::AtRisk,
            20..=39 => RecommendationTier::Critical,
            _ => RecommendationTier::Emergency,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecommendationTier::Healthy => "Healthy",
            RecommendationTier::NeedsAttention => "Needs Attention",
            RecommendationTier::AtRisk => "At Risk",
            RecommendationTier::Critical => "Critical",
            RecommendationTier::Emergency => "Emergency",
        }
    }

    /// Fixed advisory message for the tier.
    pub fn message(&self) -> &'static str {
        match self {
            RecommendationTier::Healthy => {
                "Healthy: this account is self-serving well. Keep content fresh and check in periodically."
            }
            RecommendationTier::NeedsAttention => {
                "Needs Attention: some friction detected. Review recent searches and consider a proactive check-in."
            }
            RecommendationTier::AtRisk => {
                "At Risk: this account is struggling to self-serve. Schedule a training session."
            }
            RecommendationTier::Critical => {
                "Critical: support load is high. Reach out directly and review open tickets."
            }
            RecommendationTier::Emergency => {
                "Emergency: immediate intervention required. Escalate to the account owner today."
            }
        }
    }
}

impl std::fmt::Display for RecommendationTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// =============================================================================
// Health Score
// =============================================================================

/// Component metrics reported alongside the score.
///
/// `confusion_signals` is a sum of rule contributions and may exceed 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetrics {
    pub engagement: u32,
    pub confusion_signals: u32,
    pub support_load: u32,
    pub learning_progress: u32,
}

/// Health of one sub-account over a trailing window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthScore {
    pub sub_account_id: String,
    /// Clamped to `0..=100`.
    pub score: u8,
    pub metrics: HealthMetrics,
    pub positive_signals: Vec<String>,
    pub negative_signals: Vec<String>,
    pub tier: RecommendationTier,
    pub recommendation: String,
    pub last_calculated: DateTime<Utc>,
}

// =============================================================================
// Tenant Rollup
// =============================================================================

/// Aggregate health of a tenant's sub-accounts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantHealthSummary {
    pub total_accounts: usize,
    /// Arithmetic mean of the scores; 0 when there are none.
    pub average_score: f64,
    /// Score >= 60.
    pub healthy_count: usize,
    /// 40 <= score < 60.
    pub at_risk_count: usize,
    /// Score < 40.
    pub critical_count: usize,
}

/// Rollup plus the per-account scores it was built from, worst first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantHealthReport {
    pub tenant_id: String,
    pub summary: TenantHealthSummary,
    pub scores: Vec<HealthScore>,
}

// =============================================================================
// Confusion Topics
// =============================================================================

/// A word that keeps coming up in searches and negative AI feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfusionTopic {
    pub topic: String,
    pub count: u32,
}
