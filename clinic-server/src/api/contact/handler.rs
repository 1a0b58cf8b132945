//! Contact API Handlers
//!
//! Singleton record: the public read localizes it, the admin update
//! merges into the fixed row.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::api::convert::{ContactPublic, contact_public, is_publicly_visible};
use crate::audit::AuditAction;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Contact, ContactUpdate};
use crate::db::repository::ContactRepository;
use crate::locale::Locale;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_URL_LEN, validate_optional_text,
};
use crate::utils::{AppError, AppResult};

const RESOURCE: &str = "contact";

#[derive(Debug, Deserialize)]
pub struct LocaleQuery {
    #[serde(default)]
    locale: Locale,
}

/// GET /api/contact - localized contact info (public)
pub async fn get_public(
    State(state): State<ServerState>,
    Query(query): Query<LocaleQuery>,
) -> AppResult<Json<ContactPublic>> {
    let repo = ContactRepository::new(state.db.clone());
    let contact = repo
        .get()
        .await?
        .filter(|c| is_publicly_visible(c.status))
        .ok_or_else(|| AppError::not_found("Contact info not found"))?;
    Ok(Json(contact_public(&contact, query.locale)))
}

/// GET /api/contact/admin - raw bilingual record (ADMIN+)
pub async fn get_admin(State(state): State<ServerState>) -> AppResult<Json<Contact>> {
    let repo = ContactRepository::new(state.db.clone());
    let contact = repo.get_or_create().await?;
    Ok(Json(contact))
}

/// PUT /api/contact - singleton update (ADMIN+)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ContactUpdate>,
) -> AppResult<Json<Contact>> {
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.address_en, "addressEn", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.business_hours, "businessHours", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.facebook_url, "facebookUrl", MAX_URL_LEN)?;
    validate_optional_text(&payload.zalo_url, "zaloUrl", MAX_URL_LEN)?;
    validate_optional_text(&payload.instagram_url, "instagramUrl", MAX_URL_LEN)?;
    validate_optional_text(&payload.appointment_link, "appointmentLink", MAX_URL_LEN)?;

    let repo = ContactRepository::new(state.db.clone());
    let contact = repo.update(payload).await?;

    state
        .audit_service
        .log(
            AuditAction::ContactUpdated,
            RESOURCE,
            "contact:main",
            Some(user.id.clone()),
            Some(user.name.clone()),
            serde_json::json!({}),
        )
        .await;

    Ok(Json(contact))
}
