//! Background writer for the audit trail
//!
//! Mutation handlers enqueue entries and move on; this worker drains the
//! channel and appends them to storage in arrival order. It stops when
//! every sender (the `AuditService`) has been dropped.

use super::service::AuditLogRequest;
use super::storage::AuditStorage;

pub struct AuditWorker {
    storage: AuditStorage,
}

impl AuditWorker {
    pub fn new(storage: AuditStorage) -> Self {
        Self { storage }
    }

    /// Drain the channel until it closes
    pub async fn run(self, mut rx: tokio::sync::mpsc::Receiver<AuditLogRequest>) {
        tracing::info!("📋 Audit log worker started");

        let mut written: u64 = 0;
        let mut failed: u64 = 0;

        while let Some(req) = rx.recv().await {
            let action = req.action;
            let outcome = self
                .storage
                .append(
                    req.action,
                    req.resource_type,
                    req.resource_id,
                    req.operator_id,
                    req.operator_name,
                    req.details,
                )
                .await;

            match outcome {
                Ok(entry) => {
                    written += 1;
                    tracing::debug!(
                        audit_id = entry.id,
                        action = %entry.action,
                        resource = %entry.resource_type,
                        "Audit entry recorded"
                    );
                }
                Err(e) => {
                    // The entry is lost; the chain itself stays intact
                    failed += 1;
                    tracing::error!(action = %action, error = ?e, "Failed to write audit entry");
                }
            }
        }

        tracing::info!(written, failed, "Audit log worker stopping");
    }
}
