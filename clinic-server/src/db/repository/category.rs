//! Category Repository

use super::{BaseRepository, CountResult, RepoError, RepoResult};
use crate::db::models::{Category, CategoryCreate, CategoryUpdate};
use crate::utils::slug::slugify;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "category";

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All categories ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category ORDER BY name")
            .await?
            .take(0)?;
        Ok(categories)
    }

    /// Find category by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Category>> {
        let rid = self.base.parse_id(TABLE, id)?;
        let category: Option<Category> = self.base.db().select(rid).await?;
        Ok(category)
    }

    /// Find category by name
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Category>> {
        let name_owned = name.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM category WHERE name = $name LIMIT 1")
            .bind(("name", name_owned))
            .await?;
        let categories: Vec<Category> = result.take(0)?;
        Ok(categories.into_iter().next())
    }

    /// Create a new category
    pub async fn create(&self, data: CategoryCreate) -> RepoResult<Category> {
        let name = data
            .name
            .ok_or_else(|| RepoError::Validation("name is required".to_string()))?;

        // Check duplicate name
        if self.find_by_name(&name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Category '{}' already exists",
                name
            )));
        }

        let category = Category {
            id: None,
            slug: data.slug.unwrap_or_else(|| slugify(&name)),
            name,
            name_en: data.name_en,
            created_at: shared::util::now_millis(),
        };

        let created: Option<Category> = self
            .base
            .db()
            .create((TABLE, shared::util::snowflake_id()))
            .content(category)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    /// Update a category
    pub async fn update(&self, id: &str, data: CategoryUpdate) -> RepoResult<Category> {
        let rid = self.base.parse_id(TABLE, id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))?;

        // Check duplicate name if changing
        if let Some(ref new_name) = data.name
            && new_name != &existing.name
            && self.find_by_name(new_name).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Category '{}' already exists",
                new_name
            )));
        }

        let updated: Option<Category> = self.base.db().update(rid).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))
    }

    /// Hard delete a category; refused while posts still reference it
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = self.base.parse_id(TABLE, id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))?;

        // Category links are stored in string form
        let mut result = self
            .base
            .db()
            .query("SELECT count() AS total FROM post WHERE categories CONTAINS $cat GROUP ALL")
            .bind(("cat", rid.to_string()))
            .await?;
        let count: Vec<CountResult> = result.take(0)?;
        if count.first().map(|c| c.total).unwrap_or(0) > 0 {
            return Err(RepoError::Validation(
                "Cannot delete category with posts".to_string(),
            ));
        }

        let _: Option<Category> = self.base.db().delete(rid).await?;
        Ok(true)
    }
}
