//! Post Repository
//!
//! News CRUD plus the featured-post toggle. The featured cap is a
//! table-wide invariant: the count-and-update runs inside one transaction
//! and all toggles are serialized through a shared lock, so concurrent
//! admins cannot overshoot the cap.

use std::sync::Arc;

use super::{BaseRepository, CountResult, RepoError, RepoResult};
use crate::db::models::{Post, PostCreate, PostStatus, PostUpdate};
use crate::utils::slug::slugify;
use shared::PageQuery;
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use uuid::Uuid;

const TABLE: &str = "post";

/// At most this many posts may be featured at once
pub const MAX_FEATURED_POSTS: u64 = 5;

/// Homepage shows at most 3 posts
pub const HOMEPAGE_POST_LIMIT: usize = 3;

/// THROW marker raised inside the toggle transaction
const FEATURED_LIMIT_MARKER: &str = "featured_limit_reached";

#[derive(Clone)]
pub struct PostRepository {
    base: BaseRepository,
    /// Serializes featured toggles across requests
    featured_lock: Arc<tokio::sync::Mutex<()>>,
}

impl PostRepository {
    pub fn new(db: Surreal<Db>, featured_lock: Arc<tokio::sync::Mutex<()>>) -> Self {
        Self {
            base: BaseRepository::new(db),
            featured_lock,
        }
    }

    /// Paged listing with optional search, status and category filters
    pub async fn find_page(
        &self,
        page: &PageQuery,
        search: Option<&str>,
        status: Option<PostStatus>,
        category_id: Option<&RecordId>,
    ) -> RepoResult<(Vec<Post>, u64)> {
        let mut conditions = Vec::new();
        if search.is_some() {
            conditions
                .push("(string::lowercase(title) CONTAINS $search OR string::lowercase(titleEn ?? '') CONTAINS $search)");
        }
        if status.is_some() {
            conditions.push("status = $status");
        }
        if category_id.is_some() {
            conditions.push("categories CONTAINS $category");
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
        if let Some(category) = category_id {
            // Category links are stored in string form
            qb = qb.bind(("category", category.to_string()));
        }
        let mut result = qb.await?;

        let count: Vec<CountResult> = result.take(0)?;
        let total = count.first().map(|c| c.total).unwrap_or(0);
        let posts: Vec<Post> = result.take(1)?;
        Ok((posts, total))
    }

    /// Find a published post by slug
    pub async fn find_by_slug_published(&self, slug: &str) -> RepoResult<Option<Post>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM post WHERE slug = $slug AND status = 'PUBLISHED' LIMIT 1")
            .bind(("slug", slug_owned))
            .await?;
        let posts: Vec<Post> = result.take(0)?;
        Ok(posts.into_iter().next())
    }

    /// Homepage posts: pinned first, then newest, capped at 3
    pub async fn find_homepage(&self) -> RepoResult<Vec<Post>> {
        let posts: Vec<Post> = self
            .base
            .db()
            .query(format!(
                "SELECT * FROM post WHERE showOnHomepage = true AND status = 'PUBLISHED' \
                 ORDER BY pin DESC, createdAt DESC LIMIT {HOMEPAGE_POST_LIMIT}"
            ))
            .await?
            .take(0)?;
        Ok(posts)
    }

    /// Featured published posts, newest first
    pub async fn find_featured(&self, limit: usize) -> RepoResult<Vec<Post>> {
        let posts: Vec<Post> = self
            .base
            .db()
            .query(format!(
                "SELECT * FROM post WHERE featured = true AND status = 'PUBLISHED' \
                 ORDER BY createdAt DESC LIMIT {limit}"
            ))
            .await?
            .take(0)?;
        Ok(posts)
    }

    /// Find post by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Post>> {
        let rid = self.base.parse_id(TABLE, id)?;
        let post: Option<Post> = self.base.db().select(rid).await?;
        Ok(post)
    }

    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Post>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM post WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug_owned))
            .await?;
        let posts: Vec<Post> = result.take(0)?;
        Ok(posts.into_iter().next())
    }

    async fn resolve_slug(&self, explicit: Option<String>, title: &str) -> RepoResult<String> {
        if let Some(slug) = explicit {
            if self.find_by_slug(&slug).await?.is_some() {
                return Err(RepoError::Duplicate(format!(
                    "Post slug '{}' already exists",
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

    /// Create a new post
    ///
    /// `featured` requests go through the same capped path as the toggle.
    pub async fn create(&self, data: PostCreate, author: Option<RecordId>) -> RepoResult<Post> {
        let title = data
            .title
            .ok_or_else(|| RepoError::Validation("title is required".to_string()))?;
        let content = data
            .content
            .ok_or_else(|| RepoError::Validation("content is required".to_string()))?;
        let slug = self.resolve_slug(data.slug, &title).await?;

        let status = data.status.unwrap_or_default();
        let now = shared::util::now_millis();
        let published_at = data
            .published_at
            .or((status == PostStatus::Published).then_some(now));

        let post = Post {
            id: None,
            slug,
            title,
            title_en: data.title_en,
            content,
            content_en: data.content_en,
            excerpt: data.excerpt,
            excerpt_en: data.excerpt_en,
            status,
            featured: false,
            show_on_homepage: data.show_on_homepage.unwrap_or(false),
            pin: data.pin.unwrap_or(false),
            published_at,
            author,
            categories: data.categories,
            feature_image: data.feature_image,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Post> = self
            .base
            .db()
            .create((TABLE, shared::util::snowflake_id()))
            .content(post)
            .await?;
        let created =
            created.ok_or_else(|| RepoError::Database("Failed to create post".to_string()))?;

        // Honor a featured request under the cap
        if data.featured == Some(true) {
            let id = created
                .id
                .as_ref()
                .map(|r| r.to_string())
                .unwrap_or_default();
            return self.set_featured(&id, true).await;
        }

        Ok(created)
    }

    /// Update a post (partial merge; `featured` only changes via toggle)
    pub async fn update(&self, id: &str, data: PostUpdate) -> RepoResult<Post> {
        let rid = self.base.parse_id(TABLE, id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Post {} not found", id)))?;

        if let Some(ref new_slug) = data.slug
            && new_slug != &existing.slug
            && self.find_by_slug(new_slug).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Post slug '{}' already exists",
                new_slug
            )));
        }

        // Stamp publishedAt on the first transition to PUBLISHED
        let now = shared::util::now_millis();
        if data.status == Some(PostStatus::Published) && existing.published_at.is_none() {
            let _ = self
                .base
                .db()
                .query("UPDATE $id SET publishedAt = $now")
                .bind(("id", rid.clone()))
                .bind(("now", now))
                .await?;
        }

        let _ = self
            .base
            .db()
            .query("UPDATE $id SET updatedAt = $now")
            .bind(("id", rid.clone()))
            .bind(("now", now))
            .await?;

        let updated: Option<Post> = self.base.db().update(rid).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Post {} not found", id)))
    }

    /// Hard delete a post
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = self.base.parse_id(TABLE, id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Post {} not found", id)))?;

        let _: Option<Post> = self.base.db().delete(rid).await?;
        Ok(true)
    }

    /// Count of currently featured posts
    pub async fn featured_count(&self) -> RepoResult<u64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() AS total FROM post WHERE featured = true GROUP ALL")
            .await?;
        let count: Vec<CountResult> = result.take(0)?;
        Ok(count.first().map(|c| c.total).unwrap_or(0))
    }

    /// Flip the featured flag of a post.
    ///
    /// Enabling is rejected with `Conflict` once `MAX_FEATURED_POSTS` are
    /// already featured; disabling is always allowed.
    pub async fn toggle_featured(&self, id: &str) -> RepoResult<Post> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Post {} not found", id)))?;
        self.set_featured(id, !existing.featured).await
    }

    async fn set_featured(&self, id: &str, featured: bool) -> RepoResult<Post> {
        let rid = self.base.parse_id(TABLE, id)?;

        // Serialize check-then-act across concurrent toggles
        let _guard = self.featured_lock.lock().await;

        if featured {
            let result = self
                .base
                .db()
                .query(format!(
                    "BEGIN TRANSACTION; \
                     LET $count = (SELECT count() AS total FROM post WHERE featured = true GROUP ALL); \
                     IF ($count[0].total ?? 0) >= {MAX_FEATURED_POSTS} {{ THROW '{FEATURED_LIMIT_MARKER}' }}; \
                     UPDATE $id SET featured = true, updatedAt = $now; \
                     COMMIT TRANSACTION;"
                ))
                .bind(("id", rid.clone()))
                .bind(("now", shared::util::now_millis()))
                .await;

            // THROW may surface at the query level or as a statement error;
            // check() folds both into one Result
            let checked = result.and_then(|response| response.check());
            if let Err(e) = checked {
                if e.to_string().contains(FEATURED_LIMIT_MARKER) {
                    return Err(featured_limit_error());
                }
                return Err(e.into());
            }
        } else {
            let _ = self
                .base
                .db()
                .query("UPDATE $id SET featured = false, updatedAt = $now")
                .bind(("id", rid.clone()))
                .bind(("now", shared::util::now_millis()))
                .await?;
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Post {} not found", id)))
    }
}

fn featured_limit_error() -> RepoError {
    RepoError::Conflict(format!(
        "At most {} posts can be featured at once",
        MAX_FEATURED_POSTS
    ))
}
