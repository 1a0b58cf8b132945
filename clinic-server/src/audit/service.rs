//! Audit log service
//!
//! `AuditService` is the write/read front for the audit trail:
//! - writes go through an mpsc channel to the background worker
//! - queries and chain verification read storage directly

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::mpsc;

use super::storage::{AuditStorage, AuditStorageError};
use super::types::*;

/// Channel capacity for pending audit writes
const AUDIT_BUFFER_SIZE: usize = 256;

/// A log request sent to the worker
pub struct AuditLogRequest {
    pub action: AuditAction,
    pub resource_type: String,
    pub resource_id: String,
    pub operator_id: Option<String>,
    pub operator_name: Option<String>,
    pub details: serde_json::Value,
}

/// Audit log service
pub struct AuditService {
    storage: AuditStorage,
    tx: mpsc::Sender<AuditLogRequest>,
}

impl std::fmt::Debug for AuditService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditService").finish_non_exhaustive()
    }
}

impl AuditService {
    /// Create the service plus the receiver for its worker
    pub fn new(db: Surreal<Db>) -> (Arc<Self>, mpsc::Receiver<AuditLogRequest>) {
        let (tx, rx) = mpsc::channel(AUDIT_BUFFER_SIZE);
        let storage = AuditStorage::new(db);
        let service = Arc::new(Self { storage, tx });
        (service, rx)
    }

    /// Record an audit entry (non-blocking for the handler path)
    ///
    /// Sends to the background worker; if the channel is full this waits
    /// rather than dropping the entry.
    pub async fn log(
        &self,
        action: AuditAction,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        operator_id: Option<String>,
        operator_name: Option<String>,
        details: serde_json::Value,
    ) {
        let req = AuditLogRequest {
            action,
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            operator_id,
            operator_name,
            details,
        };

        if self.tx.send(req).await.is_err() {
            tracing::error!("Audit log channel closed — audit entry lost!");
        }
    }

    /// Write an entry directly (startup/shutdown paths)
    pub async fn log_sync(
        &self,
        action: AuditAction,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        details: serde_json::Value,
    ) -> Result<AuditEntry, AuditStorageError> {
        self.storage
            .append(
                action,
                resource_type.into(),
                resource_id.into(),
                None,
                None,
                details,
            )
            .await
    }

    /// Query the audit log
    pub async fn query(
        &self,
        q: &AuditQuery,
    ) -> Result<(Vec<AuditEntry>, u64), AuditStorageError> {
        self.storage.query(q).await
    }

    /// Verify chain integrity
    pub async fn verify_chain(
        &self,
        from: Option<i64>,
        to: Option<i64>,
    ) -> Result<AuditChainVerification, AuditStorageError> {
        self.storage.verify_chain(from, to).await
    }

    /// Storage reference
    pub fn storage(&self) -> &AuditStorage {
        &self.storage
    }
}
