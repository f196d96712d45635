//! Content repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use helpdesk_core::content::{ContentItem, ContentRepositoryTrait, NewContentItem};
use helpdesk_core::errors::ValidationError;
use helpdesk_core::Result;

use super::model::{ContentItemDB, ContentItemUpdateDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::content_items;
use crate::utils::format_timestamp;

pub struct ContentRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ContentRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ContentRepositoryTrait for ContentRepository {
    fn load_for_tenant(
        &self,
        tenant_id: &str,
        content_type: Option<&str>,
    ) -> Result<Vec<ContentItem>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = content_items::table
            .filter(
                content_items::tenant_id
                    .is_null()
                    .or(content_items::tenant_id.eq(tenant_id)),
            )
            .into_boxed();
        if let Some(content_type) = content_type {
            query = query.filter(content_items::content_type.eq(content_type));
        }

        let rows = query
            .order((content_items::created_at.asc(), content_items::id.asc()))
            .select(ContentItemDB::as_select())
            .load::<ContentItemDB>(&mut conn)
            .map_err(StorageError::from)?;

        rows.into_iter().map(ContentItem::try_from).collect()
    }

    async fn upsert_content_item(&self, item: NewContentItem) -> Result<ContentItem> {
        let now = format_timestamp(Utc::now());
        let row = ContentItemDB {
            id: item.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            tenant_id: item.tenant_id,
            content_type: item.content_type,
            is_override: item.is_override,
            overrides_id: item.overrides_id,
            category: item.category,
            display_order: item.display_order,
            payload: serde_json::to_string(&item.payload)?,
            created_at: now.clone(),
            updated_at: now,
        };

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ContentItem> {
                let current_owner = content_items::table
                    .find(&row.id)
                    .select(content_items::tenant_id)
                    .first::<Option<String>>(conn)
                    .optional()
                    .map_err(StorageError::from)?;
                if let Some(owner) = current_owner {
                    if owner != row.tenant_id {
                        return Err(ValidationError::InvalidInput(format!(
                            "Content item '{}' belongs to {}",
                            row.id,
                            owner.as_deref().unwrap_or("the base library")
                        ))
                        .into());
                    }
                }

                let changes = ContentItemUpdateDB::from(&row);
                diesel::insert_into(content_items::table)
                    .values(&row)
                    .on_conflict(content_items::id)
                    .do_update()
                    .set(&changes)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let saved = content_items::table
                    .find(&row.id)
                    .select(ContentItemDB::as_select())
                    .first::<ContentItemDB>(conn)
                    .map_err(StorageError::from)?;
                ContentItem::try_from(saved)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use helpdesk_core::content::{resolve_content, ContentPayload};
    use tempfile::tempdir;

    async fn create_test_repository() -> (ContentRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());

        (ContentRepository::new(Arc::clone(&pool), writer), temp_dir)
    }

    fn new_item(id: &str, tenant: Option<&str>, overrides: Option<&str>, title: &str) -> NewContentItem {
        NewContentItem {
            id: Some(id.to_string()),
            tenant_id: tenant.map(str::to_string),
            content_type: "guide".to_string(),
            is_override: overrides.is_some(),
            overrides_id: overrides.map(str::to_string),
            category: Some("contacts".to_string()),
            display_order: 0,
            payload: ContentPayload {
                title: title.to_string(),
                tags: vec!["crm".to_string()],
                time_to_read: Some(4),
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn test_load_for_tenant_returns_base_and_own_rows() {
        let (repo, _temp_dir) = create_test_repository().await;

        repo.upsert_content_item(new_item("a-base", None, None, "Import contacts"))
            .await
            .unwrap();
        repo.upsert_content_item(new_item("b-acme", Some("acme"), Some("a-base"), "Acme import"))
            .await
            .unwrap();
        repo.upsert_content_item(new_item("c-globex", Some("globex"), None, "Globex only"))
            .await
            .unwrap();
        let mut article = new_item("d-article", None, None, "Release notes");
        article.content_type = "article".to_string();
        repo.upsert_content_item(article).await.unwrap();

        let acme = repo.load_for_tenant("acme", Some("guide")).unwrap();
        let ids: Vec<&str> = acme.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a-base", "b-acme"]);
        assert_eq!(acme[0].payload.tags, vec!["crm".to_string()]);
        assert_eq!(acme[0].payload.time_to_read, Some(4));
        assert!(acme[0].created_at.is_some());

        let everything = repo.load_for_tenant("acme", None).unwrap();
        assert_eq!(everything.len(), 3);

        let resolved = resolve_content(&acme, "acme").unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].payload.title, "Acme import");
    }

    #[tokio::test]
    async fn test_upsert_updates_in_place() {
        let (repo, _temp_dir) = create_test_repository().await;

        let first = repo
            .upsert_content_item(new_item("g1", None, None, "Draft"))
            .await
            .unwrap();
        let second = repo
            .upsert_content_item(new_item("g1", None, None, "Published"))
            .await
            .unwrap();

        assert_eq!(second.payload.title, "Published");
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(repo.load_for_tenant("acme", None).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_cannot_take_over_another_owners_item() {
        let (repo, _temp_dir) = create_test_repository().await;

        repo.upsert_content_item(new_item("a-base", None, None, "Import contacts"))
            .await
            .unwrap();
        repo.upsert_content_item(new_item("c-acme", Some("acme"), None, "Acme only"))
            .await
            .unwrap();

        let hijack_base = repo
            .upsert_content_item(new_item("a-base", Some("globex"), None, "Globex import"))
            .await;
        assert!(matches!(
            hijack_base,
            Err(helpdesk_core::Error::Validation(ValidationError::InvalidInput(_)))
        ));

        let hijack_tenant = repo
            .upsert_content_item(new_item("c-acme", Some("globex"), None, "Globex only"))
            .await;
        assert!(hijack_tenant.is_err());

        let demote_to_base = repo
            .upsert_content_item(new_item("c-acme", None, None, "Everyone"))
            .await;
        assert!(demote_to_base.is_err());

        let acme = repo.load_for_tenant("acme", Some("guide")).unwrap();
        let ids: Vec<&str> = acme.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a-base", "c-acme"]);
        assert_eq!(acme[0].payload.title, "Import contacts");
        assert_eq!(acme[1].payload.title, "Acme only");
        assert!(repo.load_for_tenant("globex", None).unwrap().iter().all(|i| i.id == "a-base"));
    }

    #[tokio::test]
    async fn test_upsert_generates_missing_id() {
        let (repo, _temp_dir) = create_test_repository().await;

        let mut item = new_item("unused", Some("acme"), None, "Custom guide");
        item.id = None;
        let saved = repo.upsert_content_item(item).await.unwrap();

        assert!(!saved.id.is_empty());
        assert_eq!(saved.tenant_id.as_deref(), Some("acme"));
    }
}
