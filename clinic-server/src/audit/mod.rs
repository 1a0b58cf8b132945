//! Audit log module — append-only, tamper-evident trail
//!
//! # Architecture
//!
//! ```text
//! mutation handler
//!   ├─ AuditService::log() → mpsc → AuditWorker → audit_log table
//!   └─ AuditService::query() / verify_chain() ← admin logs page
//!
//! SHA256 hash chain: genesis → entry₁ → entry₂ → ... → entryₙ
//! ```
//!
//! # Guarantees
//!
//! - **SHA256 hash chain**: every entry carries the previous entry's hash
//! - **Append-only**: no update/delete paths exist
//! - **Chain verification**: integrity can be checked at any time

pub mod service;
pub mod storage;
pub mod types;
pub mod worker;

pub use service::{AuditLogRequest, AuditService};
pub use storage::{AuditStorage, AuditStorageError};
pub use types::{
    AuditAction, AuditChainVerification, AuditEntry, AuditListResponse, AuditQuery,
};
pub use worker::AuditWorker;
