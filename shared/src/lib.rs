//! Shared types for the clinic CMS
//!
//! Common types used by the server and its API clients: auth DTOs,
//! the pagination envelope and small utility functions.

pub mod client;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{LoginRequest, LoginResponse, UserInfo};
pub use response::{PageMeta, PageQuery};
