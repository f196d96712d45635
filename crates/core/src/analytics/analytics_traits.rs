use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::analytics::analytics_model::{AnalyticsEvent, NewAnalyticsEvent};
use crate::errors::Result;
use crate::health::{ConfusionTopic, HealthScore, TenantHealthReport};

/// Trait for analytics event repository operations
#[async_trait]
pub trait AnalyticsEventRepositoryTrait: Send + Sync {
    /// Events of one tenant's sub-account created at or after `since`, oldest first.
    ///
    /// Sub-account ids are only unique within a tenant.
    fn load_events_since(
        &self,
        tenant_id: &str,
        sub_account_id: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<AnalyticsEvent>>;

    /// Distinct sub-accounts that have recorded events for a tenant.
    fn list_sub_accounts(&self, tenant_id: &str) -> Result<Vec<String>>;

    async fn insert_event(&self, event: NewAnalyticsEvent) -> Result<AnalyticsEvent>;
}

/// Trait for analytics service operations
///
/// `period_days` of `None` uses the service's configured default window.
#[async_trait]
pub trait AnalyticsServiceTrait: Send + Sync {
    async fn record_event(&self, event: NewAnalyticsEvent) -> Result<AnalyticsEvent>;

    fn calculate_sub_account_health(
        &self,
        tenant_id: &str,
        sub_account_id: &str,
        period_days: Option<i64>,
    ) -> Result<HealthScore>;

    fn calculate_tenant_health(
        &self,
        tenant_id: &str,
        period_days: Option<i64>,
    ) -> Result<TenantHealthReport>;

    fn get_confusion_topics(
        &self,
        tenant_id: &str,
        sub_account_id: &str,
        period_days: Option<i64>,
    ) -> Result<Vec<ConfusionTopic>>;
}
