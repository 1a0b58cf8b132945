//! User Repository

use super::{BaseRepository, CountResult, RepoError, RepoResult};
use crate::db::models::{Role, User, UserCreate, UserUpdate};
use shared::PageQuery;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Paged listing with optional search on email/name
    pub async fn find_page(
        &self,
        page: &PageQuery,
        search: Option<&str>,
    ) -> RepoResult<(Vec<User>, u64)> {
        let where_clause = if search.is_some() {
            " WHERE (string::lowercase(email) CONTAINS $search \
              OR string::lowercase(name) CONTAINS $search)"
        } else {
            ""
        };

        let sql = format!(
            "SELECT count() AS total FROM {TABLE}{where_clause} GROUP ALL; \
             SELECT * FROM {TABLE}{where_clause} ORDER BY email LIMIT {} START {}",
            page.limit(),
            page.offset()
        );

        let mut qb = self.base.db().query(sql);
        if let Some(search) = search {
            qb = qb.bind(("search", search.to_lowercase()));
        }
        let mut result = qb.await?;

        let count: Vec<CountResult> = result.take(0)?;
        let total = count.first().map(|c| c.total).unwrap_or(0);
        let users: Vec<User> = result.take(1)?;
        Ok((users, total))
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let rid = self.base.parse_id(TABLE, id)?;
        let user: Option<User> = self.base.db().select(rid).await?;
        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let email_owned = email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email_owned))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Create a new user
    ///
    /// The password hash is write-only on the model, so the insert goes
    /// through an explicit CREATE ... SET query.
    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        let email = data
            .email
            .ok_or_else(|| RepoError::Validation("email is required".to_string()))?;
        let password = data
            .password
            .ok_or_else(|| RepoError::Validation("password is required".to_string()))?;
        let name = data
            .name
            .ok_or_else(|| RepoError::Validation("name is required".to_string()))?;
        let role = data.role.unwrap_or(Role::Editor);

        // Check duplicate email
        if self.find_by_email(&email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' is already registered",
                email
            )));
        }

        let password_hash = User::hash_password(&password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE type::thing('user', $new_id) SET
                    email = $email,
                    name = $name,
                    passwordHash = $password_hash,
                    role = $role,
                    isActive = true,
                    createdAt = $now,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("new_id", shared::util::snowflake_id()))
            .bind(("email", email))
            .bind(("name", name))
            .bind(("password_hash", password_hash))
            .bind(("role", role))
            .bind(("now", shared::util::now_millis()))
            .await?;

        let created: Option<User> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Update a user
    pub async fn update(&self, id: &str, data: UserUpdate) -> RepoResult<User> {
        let rid = self.base.parse_id(TABLE, id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))?;

        // Check duplicate email if changing
        if let Some(ref new_email) = data.email
            && new_email != &existing.email
            && self.find_by_email(new_email).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' is already registered",
                new_email
            )));
        }

        // Demoting or deactivating the last active SUPER_ADMIN would lock
        // everyone out of user management
        let loses_super_admin = existing.role == Role::SuperAdmin
            && (matches!(data.role, Some(r) if r != Role::SuperAdmin)
                || data.is_active == Some(false));
        if loses_super_admin && self.active_super_admin_count().await? <= 1 {
            return Err(RepoError::Validation(
                "Cannot demote the last active SUPER_ADMIN".to_string(),
            ));
        }

        let password_hash = match data.password {
            Some(ref password) => Some(
                User::hash_password(password)
                    .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?,
            ),
            None => None,
        };

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $id SET
                    email = $email OR email,
                    name = $name OR name,
                    passwordHash = $password_hash OR passwordHash,
                    role = IF $has_role THEN $role ELSE role END,
                    isActive = IF $has_is_active THEN $is_active ELSE isActive END,
                    updatedAt = $now
                RETURN AFTER"#,
            )
            .bind(("id", rid))
            .bind(("email", data.email))
            .bind(("name", data.name))
            .bind(("password_hash", password_hash))
            .bind(("has_role", data.role.is_some()))
            .bind(("role", data.role))
            .bind(("has_is_active", data.is_active.is_some()))
            .bind(("is_active", data.is_active))
            .bind(("now", shared::util::now_millis()))
            .await?;

        result
            .take::<Option<User>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Hard delete a user
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = self.base.parse_id(TABLE, id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))?;

        // Keep at least one active SUPER_ADMIN
        if existing.role == Role::SuperAdmin && self.active_super_admin_count().await? <= 1 {
            return Err(RepoError::Validation(
                "Cannot delete the last active SUPER_ADMIN".to_string(),
            ));
        }

        let _: Option<User> = self.base.db().delete(rid).await?;
        Ok(true)
    }

    /// Total user count
    pub async fn count(&self) -> RepoResult<u64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() AS total FROM user GROUP ALL")
            .await?;
        let count: Vec<CountResult> = result.take(0)?;
        Ok(count.first().map(|c| c.total).unwrap_or(0))
    }

    async fn active_super_admin_count(&self) -> RepoResult<u64> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT count() AS total FROM user \
                 WHERE role = 'SUPER_ADMIN' AND isActive = true GROUP ALL",
            )
            .await?;
        let count: Vec<CountResult> = result.take(0)?;
        Ok(count.first().map(|c| c.total).unwrap_or(0))
    }
}
