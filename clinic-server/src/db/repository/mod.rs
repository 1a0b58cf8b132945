//! Repository Module
//!
//! Provides CRUD operations over the embedded SurrealDB tables.

// Auth
pub mod user;

// Content Domain
pub mod banner;
pub mod category;
pub mod contact;
pub mod media;
pub mod post;
pub mod service;
pub mod team_member;

// Re-exports
pub use banner::BannerRepository;
pub use category::CategoryRepository;
pub use contact::ContactRepository;
pub use media::MediaRepository;
pub use post::PostRepository;
pub use service::ServiceRepository;
pub use team_member::TeamMemberRepository;
pub use user::UserRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("{0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// `SELECT count() ... GROUP ALL` row shape
#[derive(Debug, serde::Deserialize)]
pub(crate) struct CountResult {
    pub total: u64,
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// Parse a `table:id` string (or a bare key), validating the table
    pub fn parse_id(
        &self,
        table: &str,
        id: &str,
    ) -> RepoResult<surrealdb::RecordId> {
        let rid: surrealdb::RecordId = if id.contains(':') {
            id.parse()
                .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?
        } else if let Ok(numeric) = id.parse::<i64>() {
            // Records are keyed by snowflake ids; bare keys are numeric
            surrealdb::RecordId::from_table_key(table, numeric)
        } else {
            surrealdb::RecordId::from_table_key(table, id)
        };
        if rid.table() != table {
            return Err(RepoError::Validation(format!("Invalid ID: {}", id)));
        }
        Ok(rid)
    }
}
