use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use log::{debug, info};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::analytics_model::{AnalyticsEvent, EventType, NewAnalyticsEvent};
use super::analytics_traits::{AnalyticsEventRepositoryTrait, AnalyticsServiceTrait};
use super::search_patterns::{SearchPattern, SearchPatternDetector};
use crate::constants::{DEFAULT_PERIOD_DAYS, DETECTOR_IDLE_SECS};
use crate::errors::{Error, Result};
use crate::health::{
    calculate_health_score, extract_confusion_topics, summarize_tenant_health, ConfusionTopic,
    HealthScore, TenantHealthReport,
};
use crate::utils::time_utils::{validate_period_days, window_start};
use crate::utils::{validate_sub_account_id, validate_tenant_id};

/// Search detectors keyed by (tenant, sub-account).
type DetectorMap = HashMap<(String, String), SearchPatternDetector>;

/// Service recording behavioral events and scoring sub-accounts from them.
pub struct AnalyticsService {
    repository: Arc<dyn AnalyticsEventRepositoryTrait>,
    default_period_days: i64,
    detectors: Mutex<DetectorMap>,
}

impl AnalyticsService {
    pub fn new(repository: Arc<dyn AnalyticsEventRepositoryTrait>) -> Self {
        Self {
            repository,
            default_period_days: DEFAULT_PERIOD_DAYS,
            detectors: Mutex::new(HashMap::new()),
        }
    }

    /// Overrides the window used when a caller does not pass one.
    pub fn with_default_period_days(mut self, period_days: i64) -> Result<Self> {
        self.default_period_days = validate_period_days(period_days)?;
        Ok(self)
    }

    fn resolve_period(&self, period_days: Option<i64>) -> Result<i64> {
        validate_period_days(period_days.unwrap_or(self.default_period_days))
    }

    fn detect_search_pattern(
        &self,
        tenant_id: &str,
        sub_account_id: &str,
        query: &str,
        at: DateTime<Utc>,
    ) -> SearchPattern {
        let mut detectors = self
            .detectors
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        evict_idle_detectors(&mut detectors, at);
        detectors
            .entry((tenant_id.to_string(), sub_account_id.to_string()))
            .or_default()
            .record(query, at)
    }

    /// Number of sub-accounts with live search history.
    pub fn tracked_detectors(&self) -> usize {
        self.detectors
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    fn load_window(
        &self,
        tenant_id: &str,
        sub_account_id: &str,
        period_days: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<AnalyticsEvent>> {
        let since = window_start(now, period_days)?;
        self.repository
            .load_events_since(tenant_id, sub_account_id, since)
            .map_err(Error::into_data_unavailable)
    }

    fn score_sub_account(
        &self,
        tenant_id: &str,
        sub_account_id: &str,
        period_days: i64,
        now: DateTime<Utc>,
    ) -> Result<HealthScore> {
        let events = self.load_window(tenant_id, sub_account_id, period_days, now)?;
        calculate_health_score(sub_account_id, &events, period_days, now)
    }
}

/// Drops detectors whose newest search is older than the idle limit.
fn evict_idle_detectors(detectors: &mut DetectorMap, now: DateTime<Utc>) {
    let cutoff = now - Duration::seconds(DETECTOR_IDLE_SECS);
    let before = detectors.len();
    detectors.retain(|_, detector| detector.last_search_at().map_or(false, |t| t >= cutoff));
    if detectors.len() < before {
        debug!("Evicted {} idle search detectors", before - detectors.len());
    }
}

/// Adds `repeatSearch` / `rapidSearch` flags to an object payload.
///
/// Non-object payloads are stored untouched.
fn annotate_search(event_data: &mut Value, pattern: SearchPattern) {
    if let Value::Object(map) = event_data {
        map.insert("repeatSearch".to_string(), Value::Bool(pattern.is_repeat));
        map.insert("rapidSearch".to_string(), Value::Bool(pattern.is_rapid));
    }
}

#[async_trait]
impl AnalyticsServiceTrait for AnalyticsService {
    async fn record_event(&self, mut event: NewAnalyticsEvent) -> Result<AnalyticsEvent> {
        event.tenant_id = validate_tenant_id(&event.tenant_id)?.to_string();
        event.sub_account_id = validate_sub_account_id(&event.sub_account_id)?.to_string();
        let created_at = *event.created_at.get_or_insert_with(Utc::now);

        if event.event_type == EventType::Search {
            let query = event
                .event_data
                .get("query")
                .and_then(Value::as_str)
                .map(str::to_string);
            if let Some(query) = query {
                let pattern = self.detect_search_pattern(
                    &event.tenant_id,
                    &event.sub_account_id,
                    &query,
                    created_at,
                );
                if pattern.is_confused() {
                    debug!(
                        "Confused search by '{}': repeat={}, rapid={}",
                        event.sub_account_id, pattern.is_repeat, pattern.is_rapid
                    );
                }
                annotate_search(&mut event.event_data, pattern);
            }
        }

        self.repository.insert_event(event).await
    }

    fn calculate_sub_account_health(
        &self,
        tenant_id: &str,
        sub_account_id: &str,
        period_days: Option<i64>,
    ) -> Result<HealthScore> {
        let tenant_id = validate_tenant_id(tenant_id)?;
        let sub_account_id = validate_sub_account_id(sub_account_id)?;
        let period_days = self.resolve_period(period_days)?;
        self.score_sub_account(tenant_id, sub_account_id, period_days, Utc::now())
    }

    fn calculate_tenant_health(
        &self,
        tenant_id: &str,
        period_days: Option<i64>,
    ) -> Result<TenantHealthReport> {
        let tenant_id = validate_tenant_id(tenant_id)?;
        let period_days = self.resolve_period(period_days)?;
        let now = Utc::now();

        let sub_accounts = self
            .repository
            .list_sub_accounts(tenant_id)
            .map_err(Error::into_data_unavailable)?;

        let mut scores = sub_accounts
            .iter()
            .map(|id| self.score_sub_account(tenant_id, id, period_days, now))
            .collect::<Result<Vec<_>>>()?;
        scores.sort_by(|a, b| {
            a.score
                .cmp(&b.score)
                .then_with(|| a.sub_account_id.cmp(&b.sub_account_id))
        });

        let summary = summarize_tenant_health(&scores);
        info!(
            "Tenant '{}' health: {} accounts, average {:.1}, {} critical",
            tenant_id, summary.total_accounts, summary.average_score, summary.critical_count
        );

        Ok(TenantHealthReport {
            tenant_id: tenant_id.to_string(),
            summary,
            scores,
        })
    }

    fn get_confusion_topics(
        &self,
        tenant_id: &str,
        sub_account_id: &str,
        period_days: Option<i64>,
    ) -> Result<Vec<ConfusionTopic>> {
        let tenant_id = validate_tenant_id(tenant_id)?;
        let sub_account_id = validate_sub_account_id(sub_account_id)?;
        let period_days = self.resolve_period(period_days)?;
        let events = self.load_window(tenant_id, sub_account_id, period_days, Utc::now())?;
        Ok(extract_confusion_topics(&events))
    }
}
