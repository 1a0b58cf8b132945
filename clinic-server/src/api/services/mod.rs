//! Service API module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{Role, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/services", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Admin surface; the role gate wraps only the routes above it
        .route("/", post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route_layer(middleware::from_fn(require_role(Role::Editor)))
        // Public surface
        .route("/", get(handler::list))
        .route("/homepage", get(handler::homepage))
        .route("/by-slug/{slug}", get(handler::get_by_slug))
}
