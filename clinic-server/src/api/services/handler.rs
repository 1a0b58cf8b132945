//! Service API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::api::convert::{ServicePublic, service_public};
use crate::audit::AuditAction;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Service, ServiceCreate, ServiceStatus, ServiceUpdate};
use crate::db::repository::ServiceRepository;
use crate::locale::Locale;
use crate::utils::validation::{
    MAX_CONTENT_LEN, MAX_EXCERPT_LEN, MAX_SLUG_LEN, MAX_TITLE_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::{PageMeta, PageQuery};

const RESOURCE: &str = "service";

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    page: Option<u64>,
    limit: Option<u64>,
    search: Option<String>,
    status: Option<ServiceStatus>,
}

#[derive(Debug, Serialize)]
pub struct ServiceListResponse {
    services: Vec<Service>,
    meta: PageMeta,
}

#[derive(Debug, Deserialize)]
pub struct LocaleQuery {
    #[serde(default)]
    locale: Locale,
}

/// GET /api/services - paged listing
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ServiceListResponse>> {
    let page = PageQuery::from_parts(query.page, query.limit);
    let repo = ServiceRepository::new(state.db.clone());
    let (services, total) = repo
        .find_page(&page, query.search.as_deref(), query.status)
        .await?;
    Ok(Json(ServiceListResponse {
        services,
        meta: PageMeta::new(total, &page),
    }))
}

/// GET /api/services/homepage - up to 4 published homepage services
pub async fn homepage(
    State(state): State<ServerState>,
    Query(query): Query<LocaleQuery>,
) -> AppResult<Json<Vec<ServicePublic>>> {
    let repo = ServiceRepository::new(state.db.clone());
    let services = repo.find_homepage().await?;
    Ok(Json(
        services
            .iter()
            .map(|s| service_public(s, query.locale))
            .collect(),
    ))
}

/// GET /api/services/by-slug/:slug - published only
pub async fn get_by_slug(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> AppResult<Json<ServicePublic>> {
    let repo = ServiceRepository::new(state.db.clone());
    let service = repo
        .find_by_slug_published(&slug)
        .await?
        .ok_or_else(|| AppError::not_found("Service not found"))?;
    Ok(Json(service_public(&service, query.locale)))
}

/// GET /api/services/:id - raw bilingual record (admin)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Service>> {
    let repo = ServiceRepository::new(state.db.clone());
    let service = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Service {} not found", id)))?;
    Ok(Json(service))
}

fn validate_create(payload: &ServiceCreate) -> AppResult<()> {
    let title = payload.title.as_deref().unwrap_or_default();
    validate_required_text(title, "title", MAX_TITLE_LEN)?;
    let description = payload.description.as_deref().unwrap_or_default();
    validate_required_text(description, "description", MAX_CONTENT_LEN)?;
    validate_optional_text(&payload.slug, "slug", MAX_SLUG_LEN)?;
    validate_optional_text(&payload.title_en, "titleEn", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.description_en, "descriptionEn", MAX_CONTENT_LEN)?;
    validate_optional_text(
        &payload.short_description,
        "shortDescription",
        MAX_EXCERPT_LEN,
    )?;
    validate_optional_text(
        &payload.short_description_en,
        "shortDescriptionEn",
        MAX_EXCERPT_LEN,
    )?;
    Ok(())
}

/// POST /api/services - create (EDITOR+)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ServiceCreate>,
) -> AppResult<Json<Service>> {
    validate_create(&payload)?;

    let repo = ServiceRepository::new(state.db.clone());
    let service = repo.create(payload).await?;

    let id = service.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    state
        .audit_service
        .log(
            AuditAction::ServiceCreated,
            RESOURCE,
            id,
            Some(user.id.clone()),
            Some(user.name.clone()),
            serde_json::json!({"slug": &service.slug, "title": &service.title}),
        )
        .await;

    Ok(Json(service))
}

/// PUT /api/services/:id - partial update (EDITOR+)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ServiceUpdate>,
) -> AppResult<Json<Service>> {
    validate_optional_text(&payload.title, "title", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.title_en, "titleEn", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.slug, "slug", MAX_SLUG_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_CONTENT_LEN)?;
    validate_optional_text(&payload.description_en, "descriptionEn", MAX_CONTENT_LEN)?;

    let repo = ServiceRepository::new(state.db.clone());
    let service = repo.update(&id, payload).await?;

    state
        .audit_service
        .log(
            AuditAction::ServiceUpdated,
            RESOURCE,
            id,
            Some(user.id.clone()),
            Some(user.name.clone()),
            serde_json::json!({"slug": &service.slug}),
        )
        .await;

    Ok(Json(service))
}

/// DELETE /api/services/:id (EDITOR+)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = ServiceRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;

    if result {
        state
            .audit_service
            .log(
                AuditAction::ServiceDeleted,
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
