//! Team Member Repository

use super::{BaseRepository, CountResult, RepoError, RepoResult};
use crate::db::models::{ActiveStatus, TeamMember, TeamMemberCreate, TeamMemberUpdate};
use shared::PageQuery;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "team_member";

#[derive(Clone)]
pub struct TeamMemberRepository {
    base: BaseRepository,
}

impl TeamMemberRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Active members in display order (public team page)
    pub async fn find_active(&self) -> RepoResult<Vec<TeamMember>> {
        let members: Vec<TeamMember> = self
            .base
            .db()
            .query(
                "SELECT * FROM team_member WHERE status = 'ACTIVE' \
                 ORDER BY displayOrder, createdAt",
            )
            .await?
            .take(0)?;
        Ok(members)
    }

    /// Paged admin listing with optional search and status filter
    pub async fn find_page(
        &self,
        page: &PageQuery,
        search: Option<&str>,
        status: Option<ActiveStatus>,
    ) -> RepoResult<(Vec<TeamMember>, u64)> {
        let mut conditions = Vec::new();
        if search.is_some() {
            conditions
                .push("(string::lowercase(name) CONTAINS $search OR string::lowercase(nameEn ?? '') CONTAINS $search)");
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
             SELECT * FROM {TABLE}{where_clause} ORDER BY displayOrder, createdAt LIMIT {} START {}",
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
        let members: Vec<TeamMember> = result.take(1)?;
        Ok((members, total))
    }

    /// Find member by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<TeamMember>> {
        let rid = self.base.parse_id(TABLE, id)?;
        let member: Option<TeamMember> = self.base.db().select(rid).await?;
        Ok(member)
    }

    /// Create a new team member
    pub async fn create(&self, data: TeamMemberCreate) -> RepoResult<TeamMember> {
        let name = data
            .name
            .ok_or_else(|| RepoError::Validation("name is required".to_string()))?;
        let title = data
            .title
            .ok_or_else(|| RepoError::Validation("title is required".to_string()))?;
        let description = data
            .description
            .ok_or_else(|| RepoError::Validation("description is required".to_string()))?;

        let now = shared::util::now_millis();
        let member = TeamMember {
            id: None,
            name,
            name_en: data.name_en,
            title,
            title_en: data.title_en,
            description,
            description_en: data.description_en,
            display_order: data.display_order.unwrap_or(0),
            status: data.status.unwrap_or_default(),
            image: data.image,
            image_en: data.image_en,
            created_at: now,
            updated_at: now,
        };

        let created: Option<TeamMember> = self
            .base
            .db()
            .create((TABLE, shared::util::snowflake_id()))
            .content(member)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create team member".to_string()))
    }

    /// Update a team member (partial merge)
    pub async fn update(&self, id: &str, data: TeamMemberUpdate) -> RepoResult<TeamMember> {
        let rid = self.base.parse_id(TABLE, id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Team member {} not found", id)))?;

        let _ = self
            .base
            .db()
            .query("UPDATE $id SET updatedAt = $now")
            .bind(("id", rid.clone()))
            .bind(("now", shared::util::now_millis()))
            .await?;

        let updated: Option<TeamMember> = self.base.db().update(rid).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Team member {} not found", id)))
    }

    /// Hard delete a team member; referenced media rows are retained
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = self.base.parse_id(TABLE, id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Team member {} not found", id)))?;

        let _: Option<TeamMember> = self.base.db().delete(rid).await?;
        Ok(true)
    }

    /// Total member count (dashboard)
    pub async fn count(&self) -> RepoResult<u64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() AS total FROM team_member GROUP ALL")
            .await?;
        let count: Vec<CountResult> = result.take(0)?;
        Ok(count.first().map(|c| c.total).unwrap_or(0))
    }
}
