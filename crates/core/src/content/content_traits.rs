use async_trait::async_trait;

use crate::content::content_model::{
    ContentCategoryGroup, ContentItem, NewContentItem, ResolvedContentItem,
};
use crate::errors::Result;

/// Read/write access to stored content records.
#[async_trait]
pub trait ContentRepositoryTrait: Send + Sync {
    /// Loads base records plus the records owned by `tenant_id`.
    ///
    /// Rows come back in insertion order so the tenant layer is applied
    /// deterministically. `content_type` narrows the read when set.
    fn load_for_tenant(&self, tenant_id: &str, content_type: Option<&str>)
        -> Result<Vec<ContentItem>>;

    /// Inserts or updates a record by id.
    ///
    /// An id keeps the owner it was first written with; a write for the same
    /// id from another tenant (or between base and tenant) fails with a
    /// validation error and changes nothing.
    async fn upsert_content_item(&self, item: NewContentItem) -> Result<ContentItem>;
}

/// Tenant-scoped guide library operations.
#[async_trait]
pub trait ContentServiceTrait: Send + Sync {
    fn get_guides(&self, tenant_id: &str, category: Option<&str>)
        -> Result<Vec<ResolvedContentItem>>;

    fn get_guide(&self, tenant_id: &str, guide_id: &str) -> Result<ResolvedContentItem>;

    fn get_guide_categories(&self, tenant_id: &str) -> Result<Vec<ContentCategoryGroup>>;

    async fn upsert_content_item(&self, item: NewContentItem) -> Result<ContentItem>;
}
