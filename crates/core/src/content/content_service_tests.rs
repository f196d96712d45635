#[cfg(test)]
mod tests {
    use crate::content::{
        ContentItem, ContentPayload, ContentRepositoryTrait, ContentService, ContentServiceTrait,
        NewContentItem,
    };
    use crate::errors::{DatabaseError, Error, Result, ValidationError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    // --- Mock ContentRepository ---
    struct MockContentRepository {
        items: Mutex<Vec<ContentItem>>,
        loads: AtomicUsize,
        fail_reads: AtomicBool,
    }

    impl MockContentRepository {
        fn new(items: Vec<ContentItem>) -> Self {
            Self {
                items: Mutex::new(items),
                loads: AtomicUsize::new(0),
                fail_reads: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl ContentRepositoryTrait for MockContentRepository {
        fn load_for_tenant(
            &self,
            tenant_id: &str,
            content_type: Option<&str>,
        ) -> Result<Vec<ContentItem>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(Error::Database(DatabaseError::QueryFailed(
                    "connection reset".to_string(),
                )));
            }
            Ok(self
                .items
                .lock()
                .unwrap()
                .iter()
                .filter(|i| i.tenant_id.as_deref().map_or(true, |t| t == tenant_id))
                .filter(|i| content_type.map_or(true, |ct| i.content_type == ct))
                .cloned()
                .collect())
        }

        async fn upsert_content_item(&self, item: NewContentItem) -> Result<ContentItem> {
            let saved = ContentItem {
                id: item.id.unwrap_or_else(|| "generated".to_string()),
                tenant_id: item.tenant_id,
                content_type: item.content_type,
                is_override: item.is_override,
                overrides_id: item.overrides_id,
                category: item.category,
                display_order: item.display_order,
                payload: item.payload,
                created_at: None,
                updated_at: None,
            };
            let mut items = self.items.lock().unwrap();
            if let Some(existing) = items.iter().find(|i| i.id == saved.id) {
                if existing.tenant_id != saved.tenant_id {
                    return Err(ValidationError::InvalidInput(format!(
                        "Content item '{}' has another owner",
                        saved.id
                    ))
                    .into());
                }
            }
            items.retain(|i| i.id != saved.id);
            items.push(saved.clone());
            Ok(saved)
        }
    }

    fn item(id: &str, tenant: Option<&str>, category: &str, title: &str) -> ContentItem {
        ContentItem {
            id: id.to_string(),
            tenant_id: tenant.map(str::to_string),
            content_type: "guide".to_string(),
            is_override: false,
            overrides_id: None,
            category: Some(category.to_string()),
            display_order: 0,
            payload: ContentPayload {
                title: title.to_string(),
                ..Default::default()
            },
            created_at: None,
            updated_at: None,
        }
    }

    fn new_override(tenant: &str, target: &str, title: &str) -> NewContentItem {
        NewContentItem {
            id: Some(format!("{}-{}", tenant, target)),
            tenant_id: Some(tenant.to_string()),
            content_type: "guide".to_string(),
            is_override: true,
            overrides_id: Some(target.to_string()),
            category: Some("contacts".to_string()),
            display_order: 0,
            payload: ContentPayload {
                title: title.to_string(),
                ..Default::default()
            },
        }
    }

    fn seeded_repo() -> Arc<MockContentRepository> {
        let mut article = item("kb1", None, "contacts", "Knowledge base article");
        article.content_type = "article".to_string();
        Arc::new(MockContentRepository::new(vec![
            item("g1", None, "contacts", "Import contacts"),
            item("g2", None, "getting_started", "Welcome"),
            item("c1", Some("acme"), "getting_started", "Acme onboarding"),
            article,
        ]))
    }

    #[test]
    fn test_get_guides_resolves_and_filters() {
        let service = ContentService::new(seeded_repo());

        let all = service.get_guides("acme", None).unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|g| g.content_type == "guide"));

        let onboarding = service.get_guides("acme", Some("getting_started")).unwrap();
        let ids: Vec<&str> = onboarding.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["g2", "c1"]);

        let other_tenant = service.get_guides("globex", None).unwrap();
        assert_eq!(other_tenant.len(), 2);
    }

    #[test]
    fn test_resolved_view_is_cached_per_tenant() {
        let repo = seeded_repo();
        let service = ContentService::new(repo.clone());

        service.get_guides("acme", None).unwrap();
        service.get_guides("acme", Some("contacts")).unwrap();
        service.get_guide_categories("acme").unwrap();
        assert_eq!(repo.loads.load(Ordering::SeqCst), 1);

        service.get_guides("globex", None).unwrap();
        assert_eq!(repo.loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_zero_ttl_disables_cache() {
        let repo = seeded_repo();
        let service = ContentService::with_cache_ttl(repo.clone(), Duration::ZERO);

        service.get_guides("acme", None).unwrap();
        service.get_guides("acme", None).unwrap();
        assert_eq!(repo.loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_read_failure_is_data_unavailable() {
        let repo = seeded_repo();
        repo.fail_reads.store(true, Ordering::SeqCst);
        let service = ContentService::new(repo);

        let result = service.get_guides("acme", None);
        assert!(matches!(result, Err(Error::DataUnavailable(_))));
    }

    #[test]
    fn test_invalid_tenant_is_rejected_before_reading() {
        let repo = seeded_repo();
        let service = ContentService::new(repo.clone());

        assert!(matches!(
            service.get_guides("  ", None),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(repo.loads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_get_guide_by_effective_id() {
        let service = ContentService::new(seeded_repo());

        let guide = service.get_guide("acme", "c1").unwrap();
        assert_eq!(guide.payload.title, "Acme onboarding");

        assert!(matches!(
            service.get_guide("acme", "nope"),
            Err(Error::Database(DatabaseError::NotFound(_)))
        ));
    }

    #[test]
    fn test_guide_categories_are_grouped() {
        let service = ContentService::new(seeded_repo());

        let groups = service.get_guide_categories("acme").unwrap();
        let titles: Vec<&str> = groups.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, vec!["Contacts", "Getting Started"]);
        assert_eq!(groups[1].guides.len(), 2);
    }

    #[tokio::test]
    async fn test_upsert_invalidates_tenant_view() {
        let repo = seeded_repo();
        let service = ContentService::new(repo.clone());

        let before = service.get_guide("acme", "g1").unwrap();
        assert!(!before.overridden);

        service
            .upsert_content_item(new_override("acme", "g1", "Acme contact import"))
            .await
            .unwrap();

        let after = service.get_guide("acme", "g1").unwrap();
        assert!(after.overridden);
        assert_eq!(after.payload.title, "Acme contact import");
        assert_eq!(repo.loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_upsert_rejects_override_without_target() {
        let service = ContentService::new(seeded_repo());

        let mut bad = new_override("acme", "g1", "Broken");
        bad.overrides_id = None;
        assert!(matches!(
            service.upsert_content_item(bad).await,
            Err(Error::Validation(_))
        ));

        let mut base_override = new_override("acme", "g1", "Broken");
        base_override.tenant_id = None;
        assert!(matches!(
            service.upsert_content_item(base_override).await,
            Err(Error::Validation(_))
        ));

        let mut bad_tenant = new_override("acme", "g1", "Broken");
        bad_tenant.tenant_id = Some("acme corp!".to_string());
        assert!(matches!(
            service.upsert_content_item(bad_tenant).await,
            Err(Error::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_foreign_owner_write_leaves_other_tenants_untouched() {
        let repo = seeded_repo();
        let service = ContentService::new(repo.clone());

        assert_eq!(service.get_guide("acme", "g1").unwrap().payload.title, "Import contacts");

        let mut takeover = new_override("globex", "g1", "Globex import");
        takeover.id = Some("g1".to_string());
        takeover.is_override = false;
        takeover.overrides_id = None;
        assert!(matches!(
            service.upsert_content_item(takeover).await,
            Err(Error::Validation(_))
        ));

        let acme = service.get_guide("acme", "g1").unwrap();
        assert_eq!(acme.payload.title, "Import contacts");
        assert_eq!(service.get_guide("globex", "g1").unwrap().payload.title, "Import contacts");
    }

    #[tokio::test]
    async fn test_base_write_refreshes_every_tenant_view() {
        let repo = seeded_repo();
        let service = ContentService::new(repo.clone());

        service.get_guides("acme", None).unwrap();
        service.get_guides("globex", None).unwrap();
        assert_eq!(repo.loads.load(Ordering::SeqCst), 2);

        let mut edit = new_override("acme", "g1", "Import contacts v2");
        edit.id = Some("g1".to_string());
        edit.tenant_id = None;
        edit.is_override = false;
        edit.overrides_id = None;
        service.upsert_content_item(edit).await.unwrap();

        assert_eq!(service.get_guide("acme", "g1").unwrap().payload.title, "Import contacts v2");
        assert_eq!(service.get_guide("globex", "g1").unwrap().payload.title, "Import contacts v2");
        assert_eq!(repo.loads.load(Ordering::SeqCst), 4);
    }
}
