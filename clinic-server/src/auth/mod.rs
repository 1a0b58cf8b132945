//! Authentication and authorization
//!
//! Provides JWT auth and role gates:
//! - [`JwtService`] - token service
//! - [`CurrentUser`] - authenticated user context
//! - [`require_auth`] - authentication middleware
//! - [`require_role`] - role-gate middleware factory

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use crate::db::models::Role;
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_auth, require_role};
