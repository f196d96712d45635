//! Three-tier content inheritance.
//!
//! Base content (no tenant) is seeded first, then the tenant layer is applied
//! in input order: overrides replace whatever sits at their target key,
//! custom content is added under its own id. The resolved view is sorted by
//! category, then display order, then first-insertion position.

use log::{debug, warn};
use std::collections::{HashMap, HashSet};

use super::categories::{category_description, category_title};
use super::content_model::{ContentCategoryGroup, ContentItem, ResolvedContentItem};
use crate::errors::Result;
use crate::utils::validate_tenant_id;

/// Resolves the items visible to `tenant_id`.
///
/// Records owned by other tenants are ignored, so callers may pass a wider
/// snapshot than strictly needed. An empty input yields an empty list.
pub fn resolve_content(items: &[ContentItem], tenant_id: &str) -> Result<Vec<ResolvedContentItem>> {
    let tenant_id = validate_tenant_id(tenant_id)?;

    let (base, tenant): (Vec<&ContentItem>, Vec<&ContentItem>) = items
        .iter()
        .filter(|item| item.tenant_id.as_deref().map_or(true, |t| t == tenant_id))
        .partition(|item| item.is_base());

    let mut slots: HashMap<String, usize> = HashMap::with_capacity(base.len() + tenant.len());
    let mut resolved: Vec<ResolvedContentItem> = Vec::with_capacity(base.len() + tenant.len());

    for item in &base {
        install(&mut slots, &mut resolved, ResolvedContentItem::from_own(item));
    }

    let base_ids: HashSet<&str> = base.iter().map(|item| item.id.as_str()).collect();
    for item in &tenant {
        match item.override_target() {
            Some(target) => {
                if !base_ids.contains(target) {
                    warn!(
                        "Override '{}' for tenant '{}' targets unknown base item '{}'; installing as new entry",
                        item.id, tenant_id, target
                    );
                }
                install(
                    &mut slots,
                    &mut resolved,
                    ResolvedContentItem::from_override(item, target),
                );
            }
            None => install(&mut slots, &mut resolved, ResolvedContentItem::from_own(item)),
        }
    }

    // Stable sort keeps first-insertion order for equal keys.
    resolved.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then(a.display_order.cmp(&b.display_order))
    });

    debug!(
        "Resolved {} items for tenant '{}' ({} base, {} tenant records)",
        resolved.len(),
        tenant_id,
        base.len(),
        tenant.len()
    );

    Ok(resolved)
}

/// Writes `entry` at its key. An existing key keeps its slot and is overwritten.
fn install(
    slots: &mut HashMap<String, usize>,
    resolved: &mut Vec<ResolvedContentItem>,
    entry: ResolvedContentItem,
) {
    match slots.get(&entry.id) {
        Some(&index) => resolved[index] = entry,
        None => {
            slots.insert(entry.id.clone(), resolved.len());
            resolved.push(entry);
        }
    }
}

/// Keeps only items whose resolved category equals `category`.
pub fn filter_by_category(
    items: Vec<ResolvedContentItem>,
    category: Option<&str>,
) -> Vec<ResolvedContentItem> {
    match category {
        Some(category) => items
            .into_iter()
            .filter(|item| item.category == category)
            .collect(),
        None => items,
    }
}

/// Groups a resolved list by category for the library index.
///
/// Guides keep their resolved order inside a group. Groups are ordered by
/// title, ignoring case.
pub fn group_by_category(items: &[ResolvedContentItem]) -> Vec<ContentCategoryGroup> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<ContentCategoryGroup> = Vec::new();

    for item in items {
        let index = *positions.entry(item.category.as_str()).or_insert_with(|| {
            groups.push(ContentCategoryGroup {
                id: item.category.clone(),
                title: category_title(&item.category),
                description: category_description(&item.category).to_string(),
                guides: Vec::new(),
            });
            groups.len() - 1
        });
        groups[index].guides.push(item.clone());
    }

    groups.sort_by_cached_key(|group| group.title.to_lowercase());
    groups
}
