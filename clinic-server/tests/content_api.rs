//! End-to-end content API tests over the embedded database

mod common;

use common::*;
use http::StatusCode;
use serde_json::json;

use clinic_server::db::models::Role;

#[tokio::test]
async fn missing_slug_returns_404_with_error_body() {
    let (state, _tmp) = test_state().await;
    let app = test_app(&state);

    let (status, body) = get(&app, "/api/services/by-slug/nonexistent-slug").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Service not found");
}

#[tokio::test]
async fn create_service_without_title_is_rejected_and_not_persisted() {
    let (state, _tmp) = test_state().await;
    let app = test_app(&state);
    let token = token_for(&state, "editor@clinic.vn", Role::Editor).await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/services",
        Some(&token),
        json!({"description": "Mô tả dịch vụ"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"].as_str().unwrap().contains("title"),
        "error should name the missing field: {body}"
    );

    let (status, body) = get(&app, "/api/services").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 0);
    assert_eq!(body["services"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn drafts_are_hidden_from_slug_lookup() {
    let (state, _tmp) = test_state().await;
    let app = test_app(&state);
    let token = token_for(&state, "editor@clinic.vn", Role::Editor).await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/services",
        Some(&token),
        json!({
            "title": "Khám tim mạch",
            "description": "Tầm soát tim mạch",
            "slug": "kham-tim-mach",
            "status": "DRAFT",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&app, "/api/services/by-slug/kham-tim-mach").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Publish and look again
    let (status, body) = get(&app, "/api/services").await;
    assert_eq!(status, StatusCode::OK);
    let id = body["services"][0]["id"].as_str().unwrap().to_string();

    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/api/services/{id}"),
        Some(&token),
        json!({"status": "PUBLISHED"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&app, "/api/services/by-slug/kham-tim-mach").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slug"], "kham-tim-mach");
}

#[tokio::test]
async fn locale_resolution_falls_back_per_field() {
    let (state, _tmp) = test_state().await;
    let app = test_app(&state);
    let token = token_for(&state, "editor@clinic.vn", Role::Editor).await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/services",
        Some(&token),
        json!({
            "title": "Khám tổng quát",
            "titleEn": "General check-up",
            "description": "Gói khám đầy đủ",
            "slug": "kham-tong-quat",
            "status": "PUBLISHED",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // en: titleEn wins, description falls back to Vietnamese
    let (_, body) = get(&app, "/api/services/by-slug/kham-tong-quat?locale=en").await;
    assert_eq!(body["title"], "General check-up");
    assert_eq!(body["description"], "Gói khám đầy đủ");

    // vi: base fields always win
    let (_, body) = get(&app, "/api/services/by-slug/kham-tong-quat?locale=vi").await;
    assert_eq!(body["title"], "Khám tổng quát");

    // unknown locale behaves like vi
    let (_, body) = get(&app, "/api/services/by-slug/kham-tong-quat?locale=fr").await;
    assert_eq!(body["title"], "Khám tổng quát");
}

#[tokio::test]
async fn news_homepage_caps_at_3_pinned_first_then_newest() {
    let (state, _tmp) = test_state().await;
    let app = test_app(&state);
    let token = token_for(&state, "editor@clinic.vn", Role::Editor).await;

    for i in 1..=5 {
        let pinned = i == 2 || i == 4;
        let (status, _) = send_json(
            &app,
            "POST",
            "/api/news",
            Some(&token),
            json!({
                "title": format!("Bản tin {i}"),
                "content": "<p>Nội dung</p>",
                "slug": format!("ban-tin-{i}"),
                "status": "PUBLISHED",
                "showOnHomepage": true,
                "pin": pinned,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        // Distinct createdAt values keep the ordering deterministic
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let (status, body) = get(&app, "/api/news/homepage").await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 3);

    // Pinned posts first (newest pinned first), then the newest unpinned
    assert_eq!(items[0]["slug"], "ban-tin-4");
    assert_eq!(items[1]["slug"], "ban-tin-2");
    assert_eq!(items[2]["slug"], "ban-tin-5");
}

#[tokio::test]
async fn editor_cannot_mutate_banners() {
    let (state, _tmp) = test_state().await;
    let app = test_app(&state);
    let editor = token_for(&state, "editor@clinic.vn", Role::Editor).await;
    let admin = token_for(&state, "admin@clinic.vn", Role::Admin).await;

    // Admin seeds a banner
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/banners",
        Some(&admin),
        json!({"type": "HOMEPAGE", "link": "https://clinic.vn", "status": "ACTIVE"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["id"].as_str().unwrap().to_string();

    // Editor mutation is rejected with 401 and the row survives
    let (status, _) = send_empty(&app, "DELETE", &format!("/api/banners/{id}"), Some(&editor)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send_empty(&app, "GET", "/api/banners", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    // Admin delete works
    let (status, _) = send_empty(&app, "DELETE", &format!("/api/banners/{id}"), Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn banner_upsert_never_duplicates_a_type() {
    let (state, _tmp) = test_state().await;
    let app = test_app(&state);
    let admin = token_for(&state, "admin@clinic.vn", Role::Admin).await;

    for link in ["https://a.clinic.vn", "https://b.clinic.vn"] {
        let (status, _) = send_json(
            &app,
            "POST",
            "/api/banners",
            Some(&admin),
            json!({"type": "HOMEPAGE", "link": link, "status": "ACTIVE"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = send_empty(&app, "GET", "/api/banners", Some(&admin)).await;
    let banners = body.as_array().unwrap();
    assert_eq!(banners.len(), 1, "upsert must replace, not duplicate");
    assert_eq!(banners[0]["link"], "https://b.clinic.vn");

    // Public filter by type
    let (status, body) = get(&app, "/api/banners/public?type=HOMEPAGE").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn contact_is_a_singleton_updated_by_merge() {
    let (state, _tmp) = test_state().await;
    let app = test_app(&state);
    let admin = token_for(&state, "admin@clinic.vn", Role::Admin).await;

    let (status, _) = send_json(
        &app,
        "PUT",
        "/api/contact",
        Some(&admin),
        json!({
            "phone": "028 1234 5678",
            "address": "12 Nguyễn Huệ, Quận 1",
            "businessHours": "T2-T7 08:00-17:00",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Second update merges, it does not create a second row
    let (status, _) = send_json(
        &app,
        "PUT",
        "/api/contact",
        Some(&admin),
        json!({"addressEn": "12 Nguyen Hue, District 1"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&app, "/api/contact?locale=en").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phone"], "028 1234 5678");
    assert_eq!(body["address"], "12 Nguyen Hue, District 1");
    assert_eq!(body["businessHours"], "T2-T7 08:00-17:00");
}

#[tokio::test]
async fn mutations_without_token_are_unauthorized() {
    let (state, _tmp) = test_state().await;
    let app = test_app(&state);

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/services",
        None,
        json!({"title": "x", "description": "y"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send_empty(&app, "GET", "/api/dashboard/stats", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn dashboard_counts_track_content() {
    let (state, _tmp) = test_state().await;
    let app = test_app(&state);
    let editor = token_for(&state, "editor@clinic.vn", Role::Editor).await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/services",
        Some(&editor),
        json!({"title": "Khám nhi", "description": "Nhi khoa"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_empty(&app, "GET", "/api/dashboard/stats", Some(&editor)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalServices"], 1);
    assert_eq!(body["totalTeamMembers"], 0);
    assert_eq!(body["totalBanners"], 0);
}
