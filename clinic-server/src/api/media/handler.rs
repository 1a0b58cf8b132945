//! Media Handlers
//!
//! Upload pipeline: validate → store (object storage or local disk) →
//! best-effort metadata row. A failed metadata insert does not fail the
//! upload; the response carries a warning instead.

use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, Path, Query, State},
    response::IntoResponse,
};
use http::header;
use serde::{Deserialize, Serialize};

use crate::audit::AuditAction;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Media;
use crate::db::repository::{MediaRepository, UserRepository};
use crate::services::MediaStorage;
use crate::utils::{AppError, AppResult};
use shared::{PageMeta, PageQuery};

const RESOURCE: &str = "media";

/// Upload response: `{url, mediaId}` on full success, `{url, warning}`
/// when the metadata row could not be written.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Validate, store and record one upload
pub async fn store_and_record(
    state: &ServerState,
    user: &CurrentUser,
    data: Vec<u8>,
    original_name: &str,
    prefix: &str,
) -> AppResult<UploadResponse> {
    let validated = MediaStorage::validate(&data, original_name)?;
    let file_size = data.len() as i64;

    let stored = state
        .media_storage
        .store(data, &validated, &user.id, prefix)
        .await?;

    // Link the uploader only while the row still exists (tokens can
    // outlive their user)
    let user_repo = UserRepository::new(state.db.clone());
    let uploaded_by = user_repo
        .find_by_id(&user.id)
        .await
        .ok()
        .flatten()
        .and_then(|u| u.id);

    let media = Media {
        id: None,
        url: stored.url.clone(),
        file_name: stored.file_name.clone(),
        original_name: original_name.to_string(),
        file_type: validated.mime.clone(),
        file_size,
        uploaded_by,
        created_at: shared::util::now_millis(),
    };

    let media_repo = MediaRepository::new(state.db.clone());
    let response = match media_repo.create(media).await {
        Ok(created) => {
            let media_id = created.id.as_ref().map(|r| r.to_string());
            state
                .audit_service
                .log(
                    AuditAction::MediaUploaded,
                    RESOURCE,
                    media_id.clone().unwrap_or_default(),
                    Some(user.id.clone()),
                    Some(user.name.clone()),
                    serde_json::json!({
                        "url": &stored.url,
                        "originalName": original_name,
                        "fileSize": file_size,
                    }),
                )
                .await;
            UploadResponse {
                url: stored.url,
                media_id,
                warning: None,
            }
        }
        Err(e) => {
            // The file is already stored; losing metadata must not fail
            // the whole request
            tracing::error!(error = %e, url = %stored.url, "Media metadata insert failed");
            UploadResponse {
                url: stored.url,
                media_id: None,
                warning: Some("Upload stored but metadata was not persisted".to_string()),
            }
        }
    };

    Ok(response)
}

/// POST /api/media/upload (and /api/upload_image) - multipart upload
pub async fn upload(
    State(state): State<ServerState>,
    user: CurrentUser,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut original_name: Option<String> = None;
    let mut prefix = "general".to_string();

    while let Some(field) = multipart.next_field().await? {
        match field.name().unwrap_or_default() {
            "file" | "" => {
                original_name = field.file_name().map(|s| s.to_string());
                file_data = Some(field.bytes().await?.to_vec());
            }
            "prefix" => {
                prefix = field.text().await?;
            }
            _ => {}
        }
    }

    let data = file_data.ok_or_else(|| {
        AppError::validation("No 'file' field found. Field name must be 'file'")
    })?;
    let original_name =
        original_name.ok_or_else(|| AppError::validation("No filename provided in file field"))?;

    let response = store_and_record(&state, &user, data, &original_name, &prefix).await?;
    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    page: Option<u64>,
    limit: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct MediaListResponse {
    media: Vec<Media>,
    meta: PageMeta,
}

/// GET /api/media - paged listing (ADMIN)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<MediaListResponse>> {
    let page = PageQuery::from_parts(query.page, query.limit);
    let repo = MediaRepository::new(state.db.clone());
    let (media, total) = repo.find_page(&page).await?;
    Ok(Json(MediaListResponse {
        media,
        meta: PageMeta::new(total, &page),
    }))
}

/// GET /api/media/:id (ADMIN)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Media>> {
    let repo = MediaRepository::new(state.db.clone());
    let media = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Media {} not found", id)))?;
    Ok(Json(media))
}

/// DELETE /api/media/:id (ADMIN) - refused while still referenced
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = MediaRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;

    if result {
        state
            .audit_service
            .log(
                AuditAction::MediaDeleted,
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

/// File-serving response for the local-disk fallback
enum UploadFileResponse {
    Ok(Bytes, String),
    NotFound,
    BadRequest(&'static str),
}

impl IntoResponse for UploadFileResponse {
    fn into_response(self) -> axum::response::Response {
        match self {
            UploadFileResponse::Ok(content, content_type) => (
                http::StatusCode::OK,
                [(header::CONTENT_TYPE, content_type)],
                content,
            )
                .into_response(),
            UploadFileResponse::NotFound => {
                (http::StatusCode::NOT_FOUND, "File not found").into_response()
            }
            UploadFileResponse::BadRequest(msg) => {
                (http::StatusCode::BAD_REQUEST, msg).into_response()
            }
        }
    }
}

/// GET /uploads/:filename - serve a locally stored upload
pub async fn serve_uploaded_file(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> impl IntoResponse {
    // Path traversal guard
    if filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
    {
        return UploadFileResponse::BadRequest("Invalid filename");
    }

    let file_path = state.config.uploads_dir().join(&filename);
    match tokio::fs::read(&file_path).await {
        Ok(content) => {
            let content_type = mime_guess::from_path(&filename)
                .first_or_octet_stream()
                .essence_str()
                .to_string();
            UploadFileResponse::Ok(content.into(), content_type)
        }
        Err(_) => UploadFileResponse::NotFound,
    }
}
