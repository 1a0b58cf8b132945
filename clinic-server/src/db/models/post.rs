//! Post Model
//!
//! News articles. Categories are record links into the category table;
//! `featured` is capped at 5 across the whole table, enforced by the
//! repository toggle.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

pub type PostId = RecordId;

/// Post publication status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostStatus {
    Draft,
    Published,
    PendingReview,
    Scheduled,
    Archived,
}

impl Default for PostStatus {
    fn default() -> Self {
        PostStatus::Draft
    }
}

/// Post model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<PostId>,
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    /// HTML body
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt_en: Option<String>,
    #[serde(default)]
    pub status: PostStatus,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub featured: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub show_on_homepage: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub pin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<i64>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub author: Option<RecordId>,
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub categories: Vec<RecordId>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub feature_image: Option<RecordId>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Create post payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCreate {
    pub title: Option<String>,
    pub title_en: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub content_en: Option<String>,
    pub excerpt: Option<String>,
    pub excerpt_en: Option<String>,
    pub status: Option<PostStatus>,
    pub featured: Option<bool>,
    pub show_on_homepage: Option<bool>,
    pub pin: Option<bool>,
    pub published_at: Option<i64>,
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub categories: Vec<RecordId>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub feature_image: Option<RecordId>,
}

/// Update post payload (partial merge)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_on_homepage: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<i64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_vec_record_id"
    )]
    pub categories: Option<Vec<RecordId>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub feature_image: Option<RecordId>,
}
