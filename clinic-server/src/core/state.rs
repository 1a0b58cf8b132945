//! Server state
//!
//! Process-wide service singletons, constructed once at startup and
//! shared by clone (everything heavy sits behind an Arc).

use std::path::PathBuf;
use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::audit::{AuditService, AuditWorker};
use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::services::MediaStorage;

/// Server state — holds shared references to every service
///
/// | Field | Purpose |
/// |-------|---------|
/// | config | configuration (immutable) |
/// | db | embedded SurrealDB handle |
/// | jwt_service | JWT auth |
/// | audit_service | append-only audit trail |
/// | media_storage | upload adapter (object storage or local disk) |
/// | featured_lock | serializes featured-post toggles |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    pub audit_service: Arc<AuditService>,
    pub media_storage: Arc<MediaStorage>,
    /// Shared by every PostRepository so the featured cap holds across
    /// concurrent requests
    pub featured_lock: Arc<tokio::sync::Mutex<()>>,
}

impl ServerState {
    /// Initialize the server state
    ///
    /// Order: work dir structure → database → services.
    ///
    /// # Panics
    ///
    /// Panics when the database cannot be opened; nothing useful can run
    /// without it.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("clinic.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .expect("Failed to initialize database");
        let db = db_service.db;

        crate::db::seed::seed_admin(&db, config).await;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let (audit_service, audit_rx) = AuditService::new(db.clone());
        let media_storage = Arc::new(MediaStorage::new(config));

        // Audit worker consumes the channel for the process lifetime; it
        // shares the service's storage so all appends serialize on one
        // chain-head lock
        let worker = AuditWorker::new(audit_service.storage().clone());
        tokio::spawn(worker.run(audit_rx));

        Self {
            config: config.clone(),
            db,
            jwt_service,
            audit_service,
            media_storage,
            featured_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// Database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Work directory
    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    /// JWT service
    pub fn jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
