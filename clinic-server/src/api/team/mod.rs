//! Team API module

mod handler;

use axum::{
    Router, middleware,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::auth::{Role, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/team", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Admin surface; create arrives as multipart (fields + vi/en images)
        .route("/", post(handler::create))
        .route("/all", get(handler::list_admin))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route_layer(middleware::from_fn(require_role(Role::Editor)))
        // Public surface
        .route("/", get(handler::list_public))
        .layer(DefaultBodyLimit::max(crate::api::media::UPLOAD_BODY_LIMIT))
}
