//! API route module
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`auth`] - login / logout / me
//! - [`services`] - medical services
//! - [`news`] - news posts and featured toggle
//! - [`categories`] - news categories
//! - [`team`] - team members
//! - [`banners`] - page banners
//! - [`contact`] - clinic contact info
//! - [`media`] - uploads and media management
//! - [`users`] - user management
//! - [`dashboard`] - admin statistics
//! - [`audit_log`] - audit trail

pub mod convert;

pub mod audit_log;
pub mod auth;
pub mod banners;
pub mod categories;
pub mod contact;
pub mod dashboard;
pub mod health;
pub mod media;
pub mod news;
pub mod services;
pub mod team;
pub mod users;

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// Build the application router with the full middleware stack
pub fn build_app(state: ServerState) -> Router {
    Router::new()
        .merge(auth::router())
        .merge(health::router())
        .merge(services::router())
        .merge(news::router())
        .merge(categories::router())
        .merge(team::router())
        .merge(banners::router())
        .merge(contact::router())
        .merge(media::router())
        .merge(users::router())
        .merge(dashboard::router())
        .merge(audit_log::router())
        .with_state(state.clone())
        // JWT auth applies router-wide; require_auth skips the public table
        .layer(middleware::from_fn_with_state(state, require_auth))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
