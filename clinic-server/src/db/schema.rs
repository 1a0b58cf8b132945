//! Startup schema
//!
//! Tables are schemaless; the statements below pin down the uniqueness
//! constraints the application relies on. All statements are idempotent
//! (`IF NOT EXISTS`), so they run on every boot.

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS user SCHEMALESS;
DEFINE INDEX IF NOT EXISTS user_email ON user FIELDS email UNIQUE;

DEFINE TABLE IF NOT EXISTS service SCHEMALESS;
DEFINE INDEX IF NOT EXISTS service_slug ON service FIELDS slug UNIQUE;

DEFINE TABLE IF NOT EXISTS post SCHEMALESS;
DEFINE INDEX IF NOT EXISTS post_slug ON post FIELDS slug UNIQUE;
DEFINE INDEX IF NOT EXISTS post_featured ON post FIELDS featured;

DEFINE TABLE IF NOT EXISTS category SCHEMALESS;
DEFINE INDEX IF NOT EXISTS category_slug ON category FIELDS slug UNIQUE;

DEFINE TABLE IF NOT EXISTS team_member SCHEMALESS;
DEFINE TABLE IF NOT EXISTS banner SCHEMALESS;
DEFINE TABLE IF NOT EXISTS contact SCHEMALESS;
DEFINE TABLE IF NOT EXISTS media SCHEMALESS;

DEFINE TABLE IF NOT EXISTS audit_log SCHEMALESS;
DEFINE INDEX IF NOT EXISTS audit_sequence ON audit_log FIELDS sequence UNIQUE;
"#;

/// Apply the schema statements
pub async fn apply(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(SCHEMA)
        .await
        .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?
        .check()
        .map_err(|e| AppError::database(format!("Schema statement failed: {e}")))?;
    Ok(())
}
