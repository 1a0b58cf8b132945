//! Public response DTOs
//!
//! Marketing-page reads return single-language records: the bilingual
//! base/`...En` pairs collapse through the locale helper here, in one
//! place, for every public endpoint.

use serde::Serialize;

use crate::db::models::{ActiveStatus, Banner, Contact, Post, Service, TeamMember};
use crate::locale::{Locale, resolve, resolve_opt, resolve_ref};

fn id_string(id: &Option<surrealdb::RecordId>) -> String {
    id.as_ref().map(|r| r.to_string()).unwrap_or_default()
}

/// Localized service
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePublic {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_image: Option<String>,
    pub show_on_homepage: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

pub fn service_public(service: &Service, locale: Locale) -> ServicePublic {
    ServicePublic {
        id: id_string(&service.id),
        slug: service.slug.clone(),
        title: resolve(&service.title, service.title_en.as_deref(), locale),
        description: resolve_opt(
            service.description.as_deref(),
            service.description_en.as_deref(),
            locale,
        ),
        short_description: resolve_opt(
            service.short_description.as_deref(),
            service.short_description_en.as_deref(),
            locale,
        ),
        feature_image: resolve_ref(
            service.feature_image.as_ref(),
            service.feature_image_en.as_ref(),
            locale,
        )
        .map(|r| r.to_string()),
        show_on_homepage: service.show_on_homepage,
        created_at: service.created_at,
        updated_at: service.updated_at,
    }
}

/// Localized news post
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPublic {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    pub featured: bool,
    pub pin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<i64>,
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_image: Option<String>,
    pub created_at: i64,
}

pub fn post_public(post: &Post, locale: Locale) -> PostPublic {
    PostPublic {
        id: id_string(&post.id),
        slug: post.slug.clone(),
        title: resolve(&post.title, post.title_en.as_deref(), locale),
        content: resolve(&post.content, post.content_en.as_deref(), locale),
        excerpt: resolve_opt(post.excerpt.as_deref(), post.excerpt_en.as_deref(), locale),
        featured: post.featured,
        pin: post.pin,
        published_at: post.published_at,
        categories: post.categories.iter().map(|c| c.to_string()).collect(),
        feature_image: post.feature_image.as_ref().map(|r| r.to_string()),
        created_at: post.created_at,
    }
}

/// Localized team member
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberPublic {
    pub id: String,
    pub name: String,
    pub title: String,
    pub description: String,
    pub display_order: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

pub fn team_member_public(member: &TeamMember, locale: Locale) -> TeamMemberPublic {
    TeamMemberPublic {
        id: id_string(&member.id),
        name: resolve(&member.name, member.name_en.as_deref(), locale),
        title: resolve(&member.title, member.title_en.as_deref(), locale),
        description: resolve(
            &member.description,
            member.description_en.as_deref(),
            locale,
        ),
        display_order: member.display_order,
        image: resolve_ref(member.image.as_ref(), member.image_en.as_ref(), locale)
            .map(|r| r.to_string()),
    }
}

/// Public banner
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerPublic {
    pub id: String,
    #[serde(rename = "type")]
    pub banner_type: crate::db::models::BannerType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

pub fn banner_public(banner: &Banner) -> BannerPublic {
    BannerPublic {
        id: id_string(&banner.id),
        banner_type: banner.banner_type,
        link: banner.link.clone(),
        image: banner.image.as_ref().map(|r| r.to_string()),
    }
}

/// Localized contact info
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPublic {
    pub phone: String,
    pub address: String,
    pub business_hours: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zalo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_link: Option<String>,
}

pub fn contact_public(contact: &Contact, locale: Locale) -> ContactPublic {
    ContactPublic {
        phone: contact.phone.clone(),
        address: resolve(&contact.address, contact.address_en.as_deref(), locale),
        business_hours: resolve(
            &contact.business_hours,
            contact.business_hours_en.as_deref(),
            locale,
        ),
        facebook_url: contact.facebook_url.clone(),
        zalo_url: contact.zalo_url.clone(),
        instagram_url: contact.instagram_url.clone(),
        appointment_link: contact.appointment_link.clone(),
    }
}

/// Visible on the public site?
pub fn is_publicly_visible(status: ActiveStatus) -> bool {
    status == ActiveStatus::Active
}
