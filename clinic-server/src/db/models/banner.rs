//! Banner Model
//!
//! One banner per placement. The placement type doubles as the record key
//! (`banner:homepage`), which makes create-or-replace a real uniqueness
//! guarantee instead of a query convention.

use super::{ActiveStatus, serde_helpers};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Banner placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BannerType {
    Homepage,
    Service,
    News,
    About,
}

impl BannerType {
    /// Record key under the banner table
    pub fn record_key(&self) -> &'static str {
        match self {
            BannerType::Homepage => "homepage",
            BannerType::Service => "service",
            BannerType::News => "news",
            BannerType::About => "about",
        }
    }
}

/// Banner model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    #[serde(rename = "type")]
    pub banner_type: BannerType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub status: ActiveStatus,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub image: Option<RecordId>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Create-or-replace banner payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerUpsert {
    #[serde(rename = "type")]
    pub banner_type: Option<BannerType>,
    pub link: Option<String>,
    pub status: Option<ActiveStatus>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub image: Option<RecordId>,
}
