//! Media routes
//!
//! Uploads (any authenticated user), media management (ADMIN) and the
//! local-disk file serving route.

mod handler;

pub use handler::store_and_record;

use axum::{
    Router, middleware,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::auth::{Role, require_role};
use crate::core::ServerState;

/// Request body ceiling: 5 MiB file plus multipart framing headroom
pub const UPLOAD_BODY_LIMIT: usize = 8 * 1024 * 1024;

pub fn router() -> Router<ServerState> {
    Router::new()
        // Media management is ADMIN+; the role gate wraps only these
        .route("/api/media", get(handler::list))
        .route(
            "/api/media/{id}",
            get(handler::get_by_id).delete(handler::delete),
        )
        .route_layer(middleware::from_fn(require_role(Role::Admin)))
        // Uploads: any authenticated user (global auth middleware)
        .route("/api/media/upload", post(handler::upload))
        // Legacy path kept for the admin dashboard
        .route("/api/upload_image", post(handler::upload))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        // Local-fallback file serving, public
        .route("/uploads/{filename}", get(handler::serve_uploaded_file))
}
