//! News API Handlers
//!
//! The featured toggle returns 409 Conflict once five posts are already
//! featured; disabling always succeeds.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use crate::api::convert::{PostPublic, post_public};
use crate::audit::AuditAction;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Post, PostCreate, PostStatus, PostUpdate};
use crate::db::repository::PostRepository;
use crate::locale::Locale;
use crate::utils::validation::{
    MAX_CONTENT_LEN, MAX_EXCERPT_LEN, MAX_SLUG_LEN, MAX_TITLE_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::{PageMeta, PageQuery};

const RESOURCE: &str = "post";

/// Default size for GET /api/news/featured
const DEFAULT_FEATURED_LIMIT: usize = 5;

fn repo(state: &ServerState) -> PostRepository {
    PostRepository::new(state.db.clone(), state.featured_lock.clone())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    page: Option<u64>,
    limit: Option<u64>,
    search: Option<String>,
    status: Option<PostStatus>,
    category_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NewsListResponse {
    news: Vec<Post>,
    meta: PageMeta,
}

#[derive(Debug, Deserialize)]
pub struct LocaleQuery {
    #[serde(default)]
    locale: Locale,
}

#[derive(Debug, Deserialize)]
pub struct FeaturedQuery {
    limit: Option<usize>,
    #[serde(default)]
    locale: Locale,
}

/// GET /api/news - paged listing
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<NewsListResponse>> {
    let category = match query.category_id.as_deref() {
        Some(raw) => Some(
            raw.parse::<RecordId>()
                .map_err(|_| AppError::validation(format!("Invalid categoryId: {}", raw)))?,
        ),
        None => None,
    };

    let page = PageQuery::from_parts(query.page, query.limit);
    let (news, total) = repo(&state)
        .find_page(&page, query.search.as_deref(), query.status, category.as_ref())
        .await?;
    Ok(Json(NewsListResponse {
        news,
        meta: PageMeta::new(total, &page),
    }))
}

/// GET /api/news/homepage - at most 3, pinned first then newest
pub async fn homepage(
    State(state): State<ServerState>,
    Query(query): Query<LocaleQuery>,
) -> AppResult<Json<Vec<PostPublic>>> {
    let posts = repo(&state).find_homepage().await?;
    Ok(Json(
        posts.iter().map(|p| post_public(p, query.locale)).collect(),
    ))
}

/// GET /api/news/featured?limit= - featured published posts
pub async fn featured(
    State(state): State<ServerState>,
    Query(query): Query<FeaturedQuery>,
) -> AppResult<Json<Vec<PostPublic>>> {
    let limit = query.limit.unwrap_or(DEFAULT_FEATURED_LIMIT);
    let posts = repo(&state).find_featured(limit).await?;
    Ok(Json(
        posts.iter().map(|p| post_public(p, query.locale)).collect(),
    ))
}

/// GET /api/news/by-slug/:slug - published only
pub async fn get_by_slug(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> AppResult<Json<PostPublic>> {
    let post = repo(&state)
        .find_by_slug_published(&slug)
        .await?
        .ok_or_else(|| AppError::not_found("Post not found"))?;
    Ok(Json(post_public(&post, query.locale)))
}

/// GET /api/news/:id - raw bilingual record (admin)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Post>> {
    let post = repo(&state)
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Post {} not found", id)))?;
    Ok(Json(post))
}

fn validate_create(payload: &PostCreate) -> AppResult<()> {
    let title = payload.title.as_deref().unwrap_or_default();
    validate_required_text(title, "title", MAX_TITLE_LEN)?;
    let content = payload.content.as_deref().unwrap_or_default();
    validate_required_text(content, "content", MAX_CONTENT_LEN)?;
    validate_optional_text(&payload.slug, "slug", MAX_SLUG_LEN)?;
    validate_optional_text(&payload.title_en, "titleEn", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.content_en, "contentEn", MAX_CONTENT_LEN)?;
    validate_optional_text(&payload.excerpt, "excerpt", MAX_EXCERPT_LEN)?;
    validate_optional_text(&payload.excerpt_en, "excerptEn", MAX_EXCERPT_LEN)?;
    Ok(())
}

/// POST /api/news - create (EDITOR+)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<PostCreate>,
) -> AppResult<Json<Post>> {
    validate_create(&payload)?;

    let author = user.id.parse::<RecordId>().ok();
    let post = repo(&state).create(payload, author).await?;

    let id = post.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    state
        .audit_service
        .log(
            AuditAction::PostCreated,
            RESOURCE,
            id,
            Some(user.id.clone()),
            Some(user.name.clone()),
            serde_json::json!({"slug": &post.slug, "title": &post.title}),
        )
        .await;

    Ok(Json(post))
}

/// PUT /api/news/:id - partial update (EDITOR+)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<PostUpdate>,
) -> AppResult<Json<Post>> {
    validate_optional_text(&payload.title, "title", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.title_en, "titleEn", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.slug, "slug", MAX_SLUG_LEN)?;
    validate_optional_text(&payload.content, "content", MAX_CONTENT_LEN)?;
    validate_optional_text(&payload.content_en, "contentEn", MAX_CONTENT_LEN)?;
    validate_optional_text(&payload.excerpt, "excerpt", MAX_EXCERPT_LEN)?;

    let post = repo(&state).update(&id, payload).await?;

    state
        .audit_service
        .log(
            AuditAction::PostUpdated,
            RESOURCE,
            id,
            Some(user.id.clone()),
            Some(user.name.clone()),
            serde_json::json!({"slug": &post.slug}),
        )
        .await;

    Ok(Json(post))
}

/// POST /api/news/:id/toggle-featured (EDITOR+)
///
/// 409 when enabling would exceed the cap.
pub async fn toggle_featured(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Post>> {
    let post = repo(&state).toggle_featured(&id).await?;

    state
        .audit_service
        .log(
            AuditAction::PostFeatureToggled,
            RESOURCE,
            id,
            Some(user.id.clone()),
            Some(user.name.clone()),
            serde_json::json!({"featured": post.featured}),
        )
        .await;

    Ok(Json(post))
}

/// DELETE /api/news/:id (EDITOR+)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let result = repo(&state).delete(&id).await?;

    if result {
        state
            .audit_service
            .log(
                AuditAction::PostDeleted,
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
