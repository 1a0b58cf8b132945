//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::audit::AuditAction;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Category, CategoryCreate, CategoryUpdate};
use crate::db::repository::CategoryRepository;
use crate::utils::AppResult;
use crate::utils::validation::{MAX_TITLE_LEN, validate_optional_text, validate_required_text};

const RESOURCE: &str = "category";

/// GET /api/categories - all categories
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    let repo = CategoryRepository::new(state.db.clone());
    let categories = repo.find_all().await?;
    Ok(Json(categories))
}

/// POST /api/categories - create (EDITOR+)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<Category>> {
    let name = payload.name.as_deref().unwrap_or_default();
    validate_required_text(name, "name", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.name_en, "nameEn", MAX_TITLE_LEN)?;

    let repo = CategoryRepository::new(state.db.clone());
    let category = repo.create(payload).await?;

    let id = category.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    state
        .audit_service
        .log(
            AuditAction::CategoryCreated,
            RESOURCE,
            id,
            Some(user.id.clone()),
            Some(user.name.clone()),
            serde_json::json!({"name": &category.name}),
        )
        .await;

    Ok(Json(category))
}

/// PUT /api/categories/:id - update (EDITOR+)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    validate_optional_text(&payload.name, "name", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.name_en, "nameEn", MAX_TITLE_LEN)?;

    let repo = CategoryRepository::new(state.db.clone());
    let category = repo.update(&id, payload).await?;

    state
        .audit_service
        .log(
            AuditAction::CategoryUpdated,
            RESOURCE,
            id,
            Some(user.id.clone()),
            Some(user.name.clone()),
            serde_json::json!({"name": &category.name}),
        )
        .await;

    Ok(Json(category))
}

/// DELETE /api/categories/:id (EDITOR+)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = CategoryRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;

    if result {
        state
            .audit_service
            .log(
                AuditAction::CategoryDeleted,
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
