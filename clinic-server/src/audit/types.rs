//! Audit log type definitions
//!
//! Entries are immutable and undeletable; the SHA256 hash chain makes
//! silent edits detectable.

use serde::{Deserialize, Serialize};

/// Audit action type (enum, not free text)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    // ═══ Authentication ═══
    LoginSuccess,
    LoginFailed,
    Logout,

    // ═══ Content ═══
    ServiceCreated,
    ServiceUpdated,
    ServiceDeleted,
    PostCreated,
    PostUpdated,
    PostDeleted,
    PostFeatureToggled,
    CategoryCreated,
    CategoryUpdated,
    CategoryDeleted,
    TeamMemberCreated,
    TeamMemberUpdated,
    TeamMemberDeleted,

    // ═══ Site configuration ═══
    BannerUpserted,
    BannerDeleted,
    ContactUpdated,

    // ═══ Media ═══
    MediaUploaded,
    MediaDeleted,

    // ═══ User management ═══
    UserCreated,
    UserUpdated,
    UserDeleted,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Audit log entry (immutable)
///
/// - `prev_hash`: hash of the previous entry
/// - `curr_hash`: hash over `prev_hash` plus all stored fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    /// Globally increasing sequence number
    pub id: u64,
    /// Unix millis
    pub timestamp: i64,
    /// Action type
    pub action: AuditAction,
    /// Resource type ("service", "post", "auth", ...)
    pub resource_type: String,
    /// Resource id ("service:xyz", ...)
    pub resource_id: String,
    /// Operator id (None for system events)
    pub operator_id: Option<String>,
    /// Operator display name
    pub operator_name: Option<String>,
    /// Structured details (JSON)
    pub details: serde_json::Value,
    /// Hash of the previous entry
    pub prev_hash: String,
    /// Hash of this entry (SHA256)
    pub curr_hash: String,
}

/// Audit log query parameters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditQuery {
    /// Start timestamp (Unix millis, inclusive)
    pub from: Option<i64>,
    /// End timestamp (Unix millis, inclusive)
    pub to: Option<i64>,
    /// Action filter
    pub action: Option<AuditAction>,
    /// Operator filter
    pub operator_id: Option<String>,
    /// Resource type filter
    pub resource_type: Option<String>,
    /// Pagination offset
    #[serde(default)]
    pub offset: usize,
    /// Page size (default 50)
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    50
}

/// Audit log list response
#[derive(Debug, Serialize)]
pub struct AuditListResponse {
    pub items: Vec<AuditEntry>,
    pub total: u64,
}

/// Chain verification result
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditChainVerification {
    /// Number of entries checked
    pub total_entries: u64,
    /// Whether the chain is intact
    pub chain_intact: bool,
    /// Break points
    pub breaks: Vec<AuditChainBreak>,
}

/// A detected chain break
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditChainBreak {
    /// Sequence number at the break
    pub entry_id: u64,
    /// Expected prev_hash
    pub expected_prev_hash: String,
    /// Actual prev_hash
    pub actual_prev_hash: String,
}
