//! Contact API module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::{Role, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/contact", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Admin surface; the role gate wraps only the routes above it
        .route("/", put(handler::update))
        .route("/admin", get(handler::get_admin))
        .route_layer(middleware::from_fn(require_role(Role::Admin)))
        // Public surface
        .route("/", get(handler::get_public))
}
