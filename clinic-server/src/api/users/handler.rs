//! User Management Handlers (SUPER_ADMIN)

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::audit::AuditAction;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{User, UserCreate, UserUpdate};
use crate::db::repository::UserRepository;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_PASSWORD_LEN, MAX_TITLE_LEN, MIN_PASSWORD_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::{PageMeta, PageQuery};

const RESOURCE: &str = "user";

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    page: Option<u64>,
    limit: Option<u64>,
    search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    users: Vec<User>,
    meta: PageMeta,
}

/// GET /api/users - paged listing
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<UserListResponse>> {
    let page = PageQuery::from_parts(query.page, query.limit);
    let repo = UserRepository::new(state.db.clone());
    let (users, total) = repo.find_page(&page, query.search.as_deref()).await?;
    Ok(Json(UserListResponse {
        users,
        meta: PageMeta::new(total, &page),
    }))
}

/// GET /api/users/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", id)))?;
    Ok(Json(user))
}

fn validate_password(password: &str) -> AppResult<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation("password is too long"));
    }
    Ok(())
}

/// POST /api/users - create
pub async fn create(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<User>> {
    let email = payload.email.as_deref().unwrap_or_default();
    validate_required_text(email, "email", MAX_EMAIL_LEN)?;
    if !email.contains('@') {
        return Err(AppError::validation("email is not a valid address"));
    }
    let name = payload.name.as_deref().unwrap_or_default();
    validate_required_text(name, "name", MAX_TITLE_LEN)?;
    let password = payload.password.as_deref().unwrap_or_default();
    validate_required_text(password, "password", MAX_PASSWORD_LEN)?;
    validate_password(password)?;

    let repo = UserRepository::new(state.db.clone());
    let user = repo.create(payload).await?;

    let id = user.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    state
        .audit_service
        .log(
            AuditAction::UserCreated,
            RESOURCE,
            id,
            Some(current.id.clone()),
            Some(current.name.clone()),
            serde_json::json!({"email": &user.email, "role": user.role}),
        )
        .await;

    Ok(Json(user))
}

/// PUT /api/users/:id - update
pub async fn update(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<User>> {
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.name, "name", MAX_TITLE_LEN)?;
    if let Some(ref password) = payload.password {
        validate_password(password)?;
    }

    let repo = UserRepository::new(state.db.clone());
    let user = repo.update(&id, payload).await?;

    state
        .audit_service
        .log(
            AuditAction::UserUpdated,
            RESOURCE,
            id,
            Some(current.id.clone()),
            Some(current.name.clone()),
            serde_json::json!({"email": &user.email, "role": user.role}),
        )
        .await;

    Ok(Json(user))
}

/// DELETE /api/users/:id
pub async fn delete(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = UserRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;

    if result {
        state
            .audit_service
            .log(
                AuditAction::UserDeleted,
                RESOURCE,
                id,
                Some(current.id.clone()),
                Some(current.name.clone()),
                serde_json::json!({}),
            )
            .await;
    }

    Ok(Json(result))
}
