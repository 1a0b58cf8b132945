//! Team Member Model

use super::{ActiveStatus, serde_helpers};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

pub type TeamMemberId = RecordId;

/// Doctor / staff profile shown on the team page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<TeamMemberId>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
    /// User-assigned display position; duplicates allowed
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub status: ActiveStatus,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub image: Option<RecordId>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub image_en: Option<RecordId>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Create team member payload
///
/// Arrives as multipart form fields (plus optional image files handled by
/// the upload adapter), so everything is optional here and validated in
/// the handler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberCreate {
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub title: Option<String>,
    pub title_en: Option<String>,
    pub description: Option<String>,
    pub description_en: Option<String>,
    pub display_order: Option<i32>,
    pub status: Option<ActiveStatus>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub image: Option<RecordId>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub image_en: Option<RecordId>,
}

/// Update team member payload (partial merge)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ActiveStatus>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub image: Option<RecordId>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub image_en: Option<RecordId>,
}
