//! Dashboard Handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::repository::{
    BannerRepository, MediaRepository, ServiceRepository, TeamMemberRepository,
};
use crate::utils::AppResult;

/// Aggregate counts for the admin dashboard
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_services: u64,
    pub total_team_members: u64,
    pub total_media: u64,
    pub total_banners: u64,
}

/// GET /api/dashboard/stats (authenticated)
pub async fn stats(State(state): State<ServerState>) -> AppResult<Json<DashboardStats>> {
    let db = state.db.clone();

    let total_services = ServiceRepository::new(db.clone()).count().await?;
    let total_team_members = TeamMemberRepository::new(db.clone()).count().await?;
    let total_media = MediaRepository::new(db.clone()).count().await?;
    let total_banners = BannerRepository::new(db).count().await?;

    Ok(Json(DashboardStats {
        total_services,
        total_team_members,
        total_media,
        total_banners,
    }))
}
