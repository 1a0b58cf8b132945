//! Database Module
//!
//! Embedded SurrealDB (RocksDB) storage, startup schema and first-boot
//! seeding.

pub mod models;
pub mod repository;
pub mod schema;
pub mod seed;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "clinic";
const DATABASE: &str = "cms";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database and apply the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!("Database opened at {db_path} (ns={NAMESPACE}, db={DATABASE})");

        schema::apply(&db).await?;
        tracing::info!("Database schema applied");

        Ok(Self { db })
    }
}
