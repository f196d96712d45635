//! Content module - three-tier guide inheritance, category grouping, and the
//! tenant-scoped content service.

mod categories;
mod content_model;
mod content_service;
mod content_traits;
mod resolver;

#[cfg(test)]
mod content_service_tests;

pub use categories::{
    category_description, category_title, GuideCategory, FALLBACK_CATEGORY_DESCRIPTION,
};
pub use content_model::{
    ContentCategoryGroup, ContentItem, ContentPayload, NewContentItem, ResolvedContentItem,
};
pub use content_service::{validate_new_content_item, ContentService};
pub use content_traits::{ContentRepositoryTrait, ContentServiceTrait};
pub use resolver::{filter_by_category, group_by_category, resolve_content};
