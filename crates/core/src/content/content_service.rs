use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use log::{debug, info};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::content_model::{ContentCategoryGroup, ContentItem, NewContentItem, ResolvedContentItem};
use super::content_traits::{ContentRepositoryTrait, ContentServiceTrait};
use super::resolver::{filter_by_category, group_by_category, resolve_content};
use crate::constants::{DEFAULT_CONTENT_CACHE_SECS, GUIDE_CONTENT_TYPE};
use crate::errors::{DatabaseError, Error, Result, ValidationError};
use crate::utils::validate_tenant_id;

/// Resolved view of one tenant's guides.
struct CachedGuides {
    guides: Vec<ResolvedContentItem>,
    cached_at: DateTime<Utc>,
}

/// Service resolving the guide library for a tenant.
///
/// Resolved views are read-mostly, so each tenant's list is kept for a short
/// TTL and dropped whenever content touching that tenant is written.
pub struct ContentService {
    repository: Arc<dyn ContentRepositoryTrait>,
    cache_ttl: Duration,
    cache: RwLock<HashMap<String, CachedGuides>>,
}

impl ContentService {
    pub fn new(repository: Arc<dyn ContentRepositoryTrait>) -> Self {
        Self::with_cache_ttl(
            repository,
            std::time::Duration::from_secs(DEFAULT_CONTENT_CACHE_SECS),
        )
    }

    /// Creates a service with a custom cache lifetime. A zero TTL disables caching.
    pub fn with_cache_ttl(
        repository: Arc<dyn ContentRepositoryTrait>,
        cache_ttl: std::time::Duration,
    ) -> Self {
        Self {
            repository,
            cache_ttl: Duration::from_std(cache_ttl).unwrap_or_else(|_| Duration::zero()),
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn cached_guides(&self, tenant_id: &str) -> Option<Vec<ResolvedContentItem>> {
        if self.cache_ttl.is_zero() {
            return None;
        }
        let cache = self.cache.read().ok()?;
        let entry = cache.get(tenant_id)?;
        if Utc::now() - entry.cached_at < self.cache_ttl {
            Some(entry.guides.clone())
        } else {
            None
        }
    }

    fn store_guides(&self, tenant_id: &str, guides: &[ResolvedContentItem]) {
        if self.cache_ttl.is_zero() {
            return;
        }
        if let Ok(mut cache) = self.cache.write() {
            cache.insert(
                tenant_id.to_string(),
                CachedGuides {
                    guides: guides.to_vec(),
                    cached_at: Utc::now(),
                },
            );
        }
    }

    /// Owners never change, so a saved item only touches its owner's view.
    fn invalidate(&self, tenant_id: Option<&str>) {
        if let Ok(mut cache) = self.cache.write() {
            match tenant_id {
                Some(tenant_id) => {
                    cache.remove(tenant_id);
                }
                // Base content feeds every tenant's view.
                None => cache.clear(),
            }
        }
    }

    /// Full resolved guide list for a tenant, before any category filter.
    fn resolved_guides(&self, tenant_id: &str) -> Result<Vec<ResolvedContentItem>> {
        let tenant_id = validate_tenant_id(tenant_id)?;

        if let Some(guides) = self.cached_guides(tenant_id) {
            debug!("Serving {} cached guides for tenant '{}'", guides.len(), tenant_id);
            return Ok(guides);
        }

        let items = self
            .repository
            .load_for_tenant(tenant_id, Some(GUIDE_CONTENT_TYPE))
            .map_err(Error::into_data_unavailable)?;
        let guides = resolve_content(&items, tenant_id)?;

        self.store_guides(tenant_id, &guides);
        Ok(guides)
    }
}

/// Checks a record before it is written.
pub fn validate_new_content_item(item: &NewContentItem) -> Result<()> {
    if let Some(tenant_id) = item.tenant_id.as_deref() {
        validate_tenant_id(tenant_id)?;
    }
    if item.payload.title.trim().is_empty() {
        return Err(ValidationError::MissingField("title".to_string()).into());
    }
    if item.is_override {
        if item.tenant_id.is_none() {
            return Err(ValidationError::InvalidInput(
                "base content cannot be an override".to_string(),
            )
            .into());
        }
        if item
            .overrides_id
            .as_deref()
            .map_or(true, |target| target.trim().is_empty())
        {
            return Err(ValidationError::MissingField("overridesId".to_string()).into());
        }
    }
    Ok(())
}

#[async_trait]
impl ContentServiceTrait for ContentService {
    fn get_guides(
        &self,
        tenant_id: &str,
        category: Option<&str>,
    ) -> Result<Vec<ResolvedContentItem>> {
        let guides = self.resolved_guides(tenant_id)?;
        Ok(filter_by_category(guides, category))
    }

    fn get_guide(&self, tenant_id: &str, guide_id: &str) -> Result<ResolvedContentItem> {
        self.resolved_guides(tenant_id)?
            .into_iter()
            .find(|guide| guide.id == guide_id)
            .ok_or_else(|| {
                Error::Database(DatabaseError::NotFound(format!(
                    "Guide '{}' not found for tenant '{}'",
                    guide_id,
                    tenant_id.trim()
                )))
            })
    }

    fn get_guide_categories(&self, tenant_id: &str) -> Result<Vec<ContentCategoryGroup>> {
        let guides = self.resolved_guides(tenant_id)?;
        Ok(group_by_category(&guides))
    }

    async fn upsert_content_item(&self, mut item: NewContentItem) -> Result<ContentItem> {
        if let Some(tenant_id) = item.tenant_id.as_mut() {
            *tenant_id = tenant_id.trim().to_string();
        }
        validate_new_content_item(&item)?;

        let saved = self.repository.upsert_content_item(item).await?;
        self.invalidate(saved.tenant_id.as_deref());

        info!(
            "Saved content item '{}' (tenant: {})",
            saved.id,
            saved.tenant_id.as_deref().unwrap_or("base")
        );
        Ok(saved)
    }
}
