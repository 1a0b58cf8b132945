//! Audit trail handlers
//!
//! Read-only: the trail is written by the mutation handlers, never
//! through this API.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::audit::{AuditChainVerification, AuditListResponse, AuditQuery};
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/audit-log (ADMIN+)
///
/// Filterable by time window, action, operator and resource type; newest
/// entries first.
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<AuditQuery>,
) -> AppResult<Json<AuditListResponse>> {
    let (items, total) = state.audit_service.query(&query).await?;
    Ok(Json(AuditListResponse { items, total }))
}

/// Time window for chain verification (Unix millis, both ends optional)
#[derive(Debug, Deserialize)]
pub struct ChainWindow {
    pub from: Option<i64>,
    pub to: Option<i64>,
}

/// GET /api/audit-log/verify (SUPER_ADMIN)
///
/// Recomputes every hash in the window and reports any break points.
pub async fn verify_chain(
    State(state): State<ServerState>,
    Query(window): Query<ChainWindow>,
) -> AppResult<Json<AuditChainVerification>> {
    let report = state.audit_service.verify_chain(window.from, window.to).await?;
    Ok(Json(report))
}
