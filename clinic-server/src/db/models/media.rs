//! Media Model
//!
//! Upload metadata. Rows are created only by the upload adapter and are
//! referenced (never owned) by content entities.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

pub type MediaId = RecordId;

/// Media record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<MediaId>,
    /// Public URL (absolute for object storage, `/uploads/...` for local)
    pub url: String,
    pub file_name: String,
    pub original_name: String,
    /// MIME type, e.g. `image/png`
    pub file_type: String,
    /// Size in bytes
    pub file_size: i64,
    /// Linked only when the uploading user still exists
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub uploaded_by: Option<RecordId>,
    #[serde(default)]
    pub created_at: i64,
}
