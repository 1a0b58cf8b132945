//! Banner API module

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::auth::{Role, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/banners", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Mutations are ADMIN+; the role gate wraps only the routes above it
        .route("/", post(handler::upsert))
        .route("/{id}", delete(handler::delete))
        .route_layer(middleware::from_fn(require_role(Role::Admin)))
        // Listing needs a session (global auth), no role gate
        .route("/", get(handler::list))
        // Active banners for the marketing pages
        .route("/public", get(handler::list_public))
}
