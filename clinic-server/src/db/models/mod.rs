//! Database Models

// Serde helpers
pub mod serde_helpers;

// Auth
pub mod user;

// Content Domain
pub mod banner;
pub mod category;
pub mod contact;
pub mod media;
pub mod post;
pub mod service;
pub mod team_member;

use serde::{Deserialize, Serialize};

// Re-exports
pub use banner::{Banner, BannerType, BannerUpsert};
pub use category::{Category, CategoryCreate, CategoryUpdate};
pub use contact::{Contact, ContactUpdate};
pub use media::Media;
pub use post::{Post, PostCreate, PostStatus, PostUpdate};
pub use service::{Service, ServiceCreate, ServiceStatus, ServiceUpdate};
pub use team_member::{TeamMember, TeamMemberCreate, TeamMemberUpdate};
pub use user::{Role, User, UserCreate, UserUpdate};

/// Visibility status shared by team members, banners and contact info
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActiveStatus {
    Active,
    Inactive,
}

impl Default for ActiveStatus {
    fn default() -> Self {
        ActiveStatus::Active
    }
}

impl ActiveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveStatus::Active => "ACTIVE",
            ActiveStatus::Inactive => "INACTIVE",
        }
    }
}
