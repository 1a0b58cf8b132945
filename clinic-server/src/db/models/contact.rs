//! Contact Model (Singleton)
//!
//! Clinic contact details; one record per installation under a fixed key.

use super::{ActiveStatus, serde_helpers};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Contact info entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub phone: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_en: Option<String>,
    pub business_hours: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_hours_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zalo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_link: Option<String>,
    #[serde(default)]
    pub status: ActiveStatus,
    #[serde(default)]
    pub updated_at: i64,
}

impl Default for Contact {
    fn default() -> Self {
        Self {
            id: None,
            phone: String::new(),
            address: String::new(),
            address_en: None,
            business_hours: String::new(),
            business_hours_en: None,
            facebook_url: None,
            zalo_url: None,
            instagram_url: None,
            appointment_link: None,
            status: ActiveStatus::Active,
            updated_at: 0,
        }
    }
}

/// Update contact payload (partial merge)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_hours_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zalo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ActiveStatus>,
}
