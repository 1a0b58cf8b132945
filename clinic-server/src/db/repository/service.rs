//! Service Repository

use super::{BaseRepository, CountResult, RepoError, RepoResult};
use crate::db::models::{Service, ServiceCreate, ServiceStatus, ServiceUpdate};
use crate::utils::slug::slugify;
use shared::PageQuery;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use uuid::Uuid;

const TABLE: &str = "service";

/// Homepage shows at most 4 services
pub const HOMEPAGE_SERVICE_LIMIT: usize = 4;

#[derive(Clone)]
pub struct ServiceRepository {
    base: BaseRepository,
}

impl ServiceRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Paged listing with optional search and status filter
    pub async fn find_page(
        &self,
        page: &PageQuery,
        search: Option<&str>,
        status: Option<ServiceStatus>,
    ) -> RepoResult<(Vec<Service>, u64)> {
        let mut conditions = Vec::new();
        if search.is_some() {
            conditions
                .push("(string::lowercase(title) CONTAINS $search OR string::lowercase(titleEn ?? '') CONTAINS $search)");
        }
        if status.is_some() {
            conditions.push("status = $status");
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            "SELECT count() AS total FROM {TABLE}{where_clause} GROUP ALL; \
             SELECT * FROM {TABLE}{where_clause} ORDER BY createdAt DESC LIMIT {} START {}",
            page.limit(),
            page.offset()
        );

        let mut qb = self.base.db().query(sql);
        if let Some(search) = search {
            qb = qb.bind(("search", search.to_lowercase()));
        }
        if let Some(status) = status {
            qb = qb.bind(("status", status));
        }
        let mut result = qb.await?;

        let count: Vec<CountResult> = result.take(0)?;
        let total = count.first().map(|c| c.total).unwrap_or(0);
        let services: Vec<Service> = result.take(1)?;
        Ok((services, total))
    }

    /// Find a published service by slug (drafts stay hidden)
    pub async fn find_by_slug_published(&self, slug: &str) -> RepoResult<Option<Service>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM service WHERE slug = $slug AND status = 'PUBLISHED' LIMIT 1")
            .bind(("slug", slug_owned))
            .await?;
        let services: Vec<Service> = result.take(0)?;
        Ok(services.into_iter().next())
    }

    /// Published homepage services, newest first, capped at 4
    pub async fn find_homepage(&self) -> RepoResult<Vec<Service>> {
        let services: Vec<Service> = self
            .base
            .db()
            .query(format!(
                "SELECT * FROM service WHERE showOnHomepage = true AND status = 'PUBLISHED' \
                 ORDER BY createdAt DESC LIMIT {HOMEPAGE_SERVICE_LIMIT}"
            ))
            .await?
            .take(0)?;
        Ok(services)
    }

    /// Find service by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Service>> {
        let rid = self.base.parse_id(TABLE, id)?;
        let service: Option<Service> = self.base.db().select(rid).await?;
        Ok(service)
    }

    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Service>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM service WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug_owned))
            .await?;
        let services: Vec<Service> = result.take(0)?;
        Ok(services.into_iter().next())
    }

    /// Resolve the slug for a new record: explicit slugs must be free,
    /// generated ones get a short suffix on collision.
    async fn resolve_slug(
        &self,
        explicit: Option<String>,
        title: &str,
    ) -> RepoResult<String> {
        if let Some(slug) = explicit {
            if self.find_by_slug(&slug).await?.is_some() {
                return Err(RepoError::Duplicate(format!(
                    "Service slug '{}' already exists",
                    slug
                )));
            }
            return Ok(slug);
        }

        let base = slugify(title);
        if self.find_by_slug(&base).await?.is_none() {
            return Ok(base);
        }
        let suffix = Uuid::new_v4().simple().to_string();
        Ok(format!("{}-{}", base, &suffix[..6]))
    }

    /// Create a new service
    pub async fn create(&self, data: ServiceCreate) -> RepoResult<Service> {
        let title = data
            .title
            .ok_or_else(|| RepoError::Validation("title is required".to_string()))?;
        let slug = self.resolve_slug(data.slug, &title).await?;

        let now = shared::util::now_millis();
        let service = Service {
            id: None,
            slug,
            title,
            title_en: data.title_en,
            description: data.description,
            description_en: data.description_en,
            short_description: data.short_description,
            short_description_en: data.short_description_en,
            status: data.status.unwrap_or_default(),
            feature_image: data.feature_image,
            feature_image_en: data.feature_image_en,
            show_on_homepage: data.show_on_homepage.unwrap_or(false),
            created_at: now,
            updated_at: now,
        };

        let created: Option<Service> = self
            .base
            .db()
            .create((TABLE, shared::util::snowflake_id()))
            .content(service)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create service".to_string()))
    }

    /// Update a service (partial merge)
    pub async fn update(&self, id: &str, data: ServiceUpdate) -> RepoResult<Service> {
        let rid = self.base.parse_id(TABLE, id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Service {} not found", id)))?;

        // Check duplicate slug if changing
        if let Some(ref new_slug) = data.slug
            && new_slug != &existing.slug
            && self.find_by_slug(new_slug).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Service slug '{}' already exists",
                new_slug
            )));
        }

        let _ = self
            .base
            .db()
            .query("UPDATE $id SET updatedAt = $now")
            .bind(("id", rid.clone()))
            .bind(("now", shared::util::now_millis()))
            .await?;

        let updated: Option<Service> = self.base.db().update(rid).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Service {} not found", id)))
    }

    /// Hard delete a service; referenced media rows are retained
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = self.base.parse_id(TABLE, id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Service {} not found", id)))?;

        let _: Option<Service> = self.base.db().delete(rid).await?;
        Ok(true)
    }

    /// Total service count (dashboard)
    pub async fn count(&self) -> RepoResult<u64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() AS total FROM service GROUP ALL")
            .await?;
        let count: Vec<CountResult> = result.take(0)?;
        Ok(count.first().map(|c| c.total).unwrap_or(0))
    }
}
