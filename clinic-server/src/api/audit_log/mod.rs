//! Audit log API module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::{Role, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/audit-log", routes())
}

fn routes() -> Router<ServerState> {
    let admin = Router::new()
        .route("/", get(handler::list))
        .route_layer(middleware::from_fn(require_role(Role::Admin)));

    let super_admin = Router::new()
        .route("/verify", get(handler::verify_chain))
        .route_layer(middleware::from_fn(require_role(Role::SuperAdmin)));

    admin.merge(super_admin)
}
