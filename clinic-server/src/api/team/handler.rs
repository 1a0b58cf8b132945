//! Team API Handlers
//!
//! Creation is a multipart form: profile fields plus optional `image` /
//! `imageEn` files, which run through the media upload pipeline before
//! the row is written.

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use crate::api::convert::{TeamMemberPublic, team_member_public};
use crate::api::media::store_and_record;
use crate::audit::AuditAction;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{ActiveStatus, TeamMember, TeamMemberCreate, TeamMemberUpdate};
use crate::db::repository::TeamMemberRepository;
use crate::locale::Locale;
use crate::utils::validation::{
    MAX_CONTENT_LEN, MAX_TITLE_LEN, validate_optional_text,
};
use crate::utils::{AppError, AppResult};
use shared::{PageMeta, PageQuery};

const RESOURCE: &str = "team_member";

/// Storage key prefix for team photos
const TEAM_IMAGE_PREFIX: &str = "team";

#[derive(Debug, Deserialize)]
pub struct LocaleQuery {
    #[serde(default)]
    locale: Locale,
}

/// GET /api/team - active members in display order (public)
pub async fn list_public(
    State(state): State<ServerState>,
    Query(query): Query<LocaleQuery>,
) -> AppResult<Json<Vec<TeamMemberPublic>>> {
    let repo = TeamMemberRepository::new(state.db.clone());
    let members = repo.find_active().await?;
    Ok(Json(
        members
            .iter()
            .map(|m| team_member_public(m, query.locale))
            .collect(),
    ))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    page: Option<u64>,
    limit: Option<u64>,
    search: Option<String>,
    status: Option<ActiveStatus>,
}

#[derive(Debug, Serialize)]
pub struct TeamListResponse {
    team: Vec<TeamMember>,
    meta: PageMeta,
}

/// GET /api/team/all - paged admin listing incl. inactive (EDITOR+)
pub async fn list_admin(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<TeamListResponse>> {
    let page = PageQuery::from_parts(query.page, query.limit);
    let repo = TeamMemberRepository::new(state.db.clone());
    let (team, total) = repo
        .find_page(&page, query.search.as_deref(), query.status)
        .await?;
    Ok(Json(TeamListResponse {
        team,
        meta: PageMeta::new(total, &page),
    }))
}

/// GET /api/team/:id - raw bilingual record (EDITOR+)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<TeamMember>> {
    let repo = TeamMemberRepository::new(state.db.clone());
    let member = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Team member {} not found", id)))?;
    Ok(Json(member))
}

fn parse_status(value: &str) -> AppResult<ActiveStatus> {
    match value {
        "ACTIVE" => Ok(ActiveStatus::Active),
        "INACTIVE" => Ok(ActiveStatus::Inactive),
        other => Err(AppError::validation(format!("Invalid status: {}", other))),
    }
}

/// POST /api/team - multipart create (EDITOR+)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    mut multipart: Multipart,
) -> AppResult<Json<TeamMember>> {
    let mut payload = TeamMemberCreate::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" | "imageEn" => {
                let original_name = field
                    .file_name()
                    .map(|s| s.to_string())
                    .ok_or_else(|| AppError::validation(format!("{name} must be a file")))?;
                let data = field.bytes().await?.to_vec();
                if data.is_empty() {
                    // Browsers submit empty file parts for untouched inputs
                    continue;
                }
                let uploaded =
                    store_and_record(&state, &user, data, &original_name, TEAM_IMAGE_PREFIX)
                        .await?;
                let media_ref = uploaded
                    .media_id
                    .as_deref()
                    .and_then(|id| id.parse::<RecordId>().ok());
                if name == "image" {
                    payload.image = media_ref;
                } else {
                    payload.image_en = media_ref;
                }
            }
            "name" => payload.name = Some(field.text().await?),
            "nameEn" => payload.name_en = Some(field.text().await?),
            "title" => payload.title = Some(field.text().await?),
            "titleEn" => payload.title_en = Some(field.text().await?),
            "description" => payload.description = Some(field.text().await?),
            "descriptionEn" => payload.description_en = Some(field.text().await?),
            "displayOrder" => {
                let raw = field.text().await?;
                payload.display_order = Some(raw.trim().parse().map_err(|_| {
                    AppError::validation(format!("Invalid displayOrder: {}", raw))
                })?);
            }
            "status" => {
                let raw = field.text().await?;
                payload.status = Some(parse_status(raw.trim())?);
            }
            _ => {}
        }
    }

    for (value, label) in [
        (&payload.name, "name"),
        (&payload.title, "title"),
        (&payload.description, "description"),
    ] {
        let v = value.as_deref().unwrap_or_default();
        if v.trim().is_empty() {
            return Err(AppError::validation(format!("{label} is required")));
        }
    }
    validate_optional_text(&payload.name, "name", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.title, "title", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_CONTENT_LEN)?;

    let repo = TeamMemberRepository::new(state.db.clone());
    let member = repo.create(payload).await?;

    let id = member.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    state
        .audit_service
        .log(
            AuditAction::TeamMemberCreated,
            RESOURCE,
            id,
            Some(user.id.clone()),
            Some(user.name.clone()),
            serde_json::json!({"name": &member.name}),
        )
        .await;

    Ok(Json(member))
}

/// PUT /api/team/:id - partial update (EDITOR+)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<TeamMemberUpdate>,
) -> AppResult<Json<TeamMember>> {
    validate_optional_text(&payload.name, "name", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.title, "title", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_CONTENT_LEN)?;

    let repo = TeamMemberRepository::new(state.db.clone());
    let member = repo.update(&id, payload).await?;

    state
        .audit_service
        .log(
            AuditAction::TeamMemberUpdated,
            RESOURCE,
            id,
            Some(user.id.clone()),
            Some(user.name.clone()),
            serde_json::json!({"name": &member.name}),
        )
        .await;

    Ok(Json(member))
}

/// DELETE /api/team/:id (EDITOR+)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = TeamMemberRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;

    if result {
        state
            .audit_service
            .log(
                AuditAction::TeamMemberDeleted,
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
