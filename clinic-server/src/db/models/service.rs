//! Service Model
//!
//! Medical services shown on the marketing site. Bilingual fields follow
//! the base/`...En` convention resolved at read time.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

pub type ServiceId = RecordId;

/// Publication status for services and posts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceStatus {
    Draft,
    Published,
}

impl Default for ServiceStatus {
    fn default() -> Self {
        ServiceStatus::Draft
    }
}

/// Service model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<ServiceId>,
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description_en: Option<String>,
    #[serde(default)]
    pub status: ServiceStatus,
    /// Feature image (vi) — reference into the media table
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub feature_image: Option<RecordId>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub feature_image_en: Option<RecordId>,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub show_on_homepage: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Create service payload
///
/// `title` and `description` are required; they stay optional here so the
/// handler can reject with a field-specific message instead of a generic
/// deserialization error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCreate {
    pub title: Option<String>,
    pub title_en: Option<String>,
    /// Generated from the title when absent
    pub slug: Option<String>,
    pub description: Option<String>,
    pub description_en: Option<String>,
    pub short_description: Option<String>,
    pub short_description_en: Option<String>,
    pub status: Option<ServiceStatus>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub feature_image: Option<RecordId>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub feature_image_en: Option<RecordId>,
    pub show_on_homepage: Option<bool>,
}

/// Update service payload (partial merge)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ServiceStatus>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub feature_image: Option<RecordId>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub feature_image_en: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_on_homepage: Option<bool>,
}
