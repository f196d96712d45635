//! Tenant-wide aggregation of sub-account scores.

use super::model::{HealthScore, TenantHealthSummary};

/// Scores at or above this count as healthy.
pub const HEALTHY_THRESHOLD: u8 = 60;

/// Scores below this count as critical; between the two is at-risk.
pub const AT_RISK_THRESHOLD: u8 = 40;

/// Averages scores and buckets accounts into healthy, at-risk and critical.
pub fn summarize_tenant_health(scores: &[HealthScore]) -> TenantHealthSummary {
    if scores.is_empty() {
        return TenantHealthSummary::default();
    }

    let mut summary = TenantHealthSummary {
        total_accounts: scores.len(),
        ..Default::default()
    };
    let mut total: u64 = 0;

    for score in scores {
        total += u64::from(score.score);
        match score.score {
            s if s >= HEALTHY_THRESHOLD => summary.healthy_count += 1,
            s if s >= AT_RISK_THRESHOLD => summary.at_risk_count += 1,
            _ => summary.critical_count += 1,
        }
    }

    summary.average_score = total as f64 / scores.len() as f64;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::model::{HealthMetrics, RecommendationTier};
    use chrono::Utc;

    fn score(id: &str, value: u8) -> HealthScore {
        let tier = RecommendationTier::from_score(value);
        HealthScore {
            sub_account_id: id.to_string(),
            score: value,
            metrics: HealthMetrics::default(),
            positive_signals: Vec::new(),
            negative_signals: Vec::new(),
            tier,
            recommendation: tier.message().to_string(),
            last_calculated: Utc::now(),
        }
    }

    #[test]
    fn test_empty_rollup() {
        let summary = summarize_tenant_health(&[]);
        assert_eq!(summary.total_accounts, 0);
        assert_eq!(summary.average_score, 0.0);
        assert_eq!(summary.healthy_count, 0);
    }

    #[test]
    fn test_bucket_boundaries() {
        let scores = vec![
            score("a", 100),
            score("b", 60),
            score("c", 59),
            score("d", 40),
            score("e", 39),
            score("f", 0),
        ];

        let summary = summarize_tenant_health(&scores);

        assert_eq!(summary.total_accounts, 6);
        assert_eq!(summary.healthy_count, 2);
        assert_eq!(summary.at_risk_count, 2);
        assert_eq!(summary.critical_count, 2);
        assert!((summary.average_score - 298.0 / 6.0).abs() < 1e-9);
    }
}
