//! Banner API Handlers
//!
//! POST is create-or-replace keyed by placement type; at most one banner
//! row exists per type.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::api::convert::{BannerPublic, banner_public};
use crate::audit::AuditAction;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Banner, BannerType, BannerUpsert};
use crate::db::repository::BannerRepository;
use crate::utils::validation::{MAX_URL_LEN, validate_optional_text};
use crate::utils::AppResult;

const RESOURCE: &str = "banner";

/// GET /api/banners - all banners (authenticated)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Banner>>> {
    let repo = BannerRepository::new(state.db.clone());
    let banners = repo.find_all().await?;
    Ok(Json(banners))
}

#[derive(Debug, Deserialize)]
pub struct PublicQuery {
    #[serde(rename = "type")]
    banner_type: Option<BannerType>,
}

/// GET /api/banners/public?type= - active banners (public)
pub async fn list_public(
    State(state): State<ServerState>,
    Query(query): Query<PublicQuery>,
) -> AppResult<Json<Vec<BannerPublic>>> {
    let repo = BannerRepository::new(state.db.clone());
    let banners = repo.find_public(query.banner_type).await?;
    Ok(Json(banners.iter().map(banner_public).collect()))
}

/// POST /api/banners - create-or-replace by type (ADMIN+)
pub async fn upsert(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<BannerUpsert>,
) -> AppResult<Json<Banner>> {
    validate_optional_text(&payload.link, "link", MAX_URL_LEN)?;

    let repo = BannerRepository::new(state.db.clone());
    let banner = repo.upsert(payload).await?;

    let id = banner.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    state
        .audit_service
        .log(
            AuditAction::BannerUpserted,
            RESOURCE,
            id,
            Some(user.id.clone()),
            Some(user.name.clone()),
            serde_json::json!({"type": banner.banner_type}),
        )
        .await;

    Ok(Json(banner))
}

/// DELETE /api/banners/:id (ADMIN+)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = BannerRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;

    if result {
        state
            .audit_service
            .log(
                AuditAction::BannerDeleted,
                RESOURCE,
                id,
                Some(user.id.clone()),
                Some(user.name.clone()),
                serde_json::json!({}),
            )
            .await;
    }

    Ok(Json(result))
}
