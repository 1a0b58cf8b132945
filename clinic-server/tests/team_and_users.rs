//! Team multipart creation and user-management gates

mod common;

use common::*;
use http::StatusCode;
use serde_json::json;

use clinic_server::db::models::Role;

#[tokio::test]
async fn team_create_accepts_multipart_with_images() {
    let (state, _tmp) = test_state().await;
    let app = test_app(&state);
    let editor = token_for(&state, "editor@clinic.vn", Role::Editor).await;

    let boundary = "clinic-team-boundary";
    let png = tiny_png();
    let body = multipart_body(
        boundary,
        &[
            MultipartPart::Text {
                name: "name",
                value: "BS. Trần Thị Lan",
            },
            MultipartPart::Text {
                name: "nameEn",
                value: "Dr. Tran Thi Lan",
            },
            MultipartPart::Text {
                name: "title",
                value: "Trưởng khoa Nội",
            },
            MultipartPart::Text {
                name: "description",
                value: "15 năm kinh nghiệm nội tổng quát",
            },
            MultipartPart::Text {
                name: "displayOrder",
                value: "1",
            },
            MultipartPart::File {
                name: "image",
                filename: "lan.png",
                content_type: "image/png",
                data: &png,
            },
        ],
    );

    let (status, member) = send_multipart(&app, "/api/team", &editor, boundary, body).await;
    assert_eq!(status, StatusCode::OK, "create failed: {member}");
    assert_eq!(member["name"], "BS. Trần Thị Lan");
    assert!(member["image"].as_str().unwrap().starts_with("media:"));

    // Public team page localizes the name
    let (status, body) = get(&app, "/api/team?locale=en").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Dr. Tran Thi Lan");
    // titleEn missing: falls back to Vietnamese
    assert_eq!(body[0]["title"], "Trưởng khoa Nội");
}

#[tokio::test]
async fn team_create_requires_profile_fields() {
    let (state, _tmp) = test_state().await;
    let app = test_app(&state);
    let editor = token_for(&state, "editor@clinic.vn", Role::Editor).await;

    let boundary = "clinic-team-boundary";
    let body = multipart_body(
        boundary,
        &[MultipartPart::Text {
            name: "name",
            value: "BS. Minh",
        }],
    );

    let (status, body) = send_multipart(&app, "/api/team", &editor, boundary, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("title"));
}

#[tokio::test]
async fn inactive_members_stay_off_the_public_page() {
    let (state, _tmp) = test_state().await;
    let app = test_app(&state);
    let editor = token_for(&state, "editor@clinic.vn", Role::Editor).await;

    let boundary = "clinic-team-boundary";
    let body = multipart_body(
        boundary,
        &[
            MultipartPart::Text {
                name: "name",
                value: "BS. Hùng",
            },
            MultipartPart::Text {
                name: "title",
                value: "Bác sĩ",
            },
            MultipartPart::Text {
                name: "description",
                value: "Đã nghỉ",
            },
            MultipartPart::Text {
                name: "status",
                value: "INACTIVE",
            },
        ],
    );
    let (status, _) = send_multipart(&app, "/api/team", &editor, boundary, body).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/api/team").await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    // The admin listing still sees it
    let (_, body) = send_empty(&app, "GET", "/api/team/all", Some(&editor)).await;
    assert_eq!(body["meta"]["total"], 1);
}

#[tokio::test]
async fn user_management_is_super_admin_only() {
    let (state, _tmp) = test_state().await;
    let app = test_app(&state);
    let admin = token_for(&state, "admin@clinic.vn", Role::Admin).await;
    let super_admin = token_for(&state, "root@clinic.vn", Role::SuperAdmin).await;

    let payload = json!({
        "email": "new.editor@clinic.vn",
        "password": "editor-pass-123",
        "name": "Biên tập viên",
        "role": "EDITOR",
    });

    let (status, _) = send_json(&app, "POST", "/api/users", Some(&admin), payload.clone()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, user) = send_json(&app, "POST", "/api/users", Some(&super_admin), payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["role"], "EDITOR");
    assert!(user.get("passwordHash").is_none());

    // Duplicate email conflicts
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/users",
        Some(&super_admin),
        json!({
            "email": "new.editor@clinic.vn",
            "password": "editor-pass-123",
            "name": "Trùng email",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn last_super_admin_is_protected() {
    let (state, _tmp) = test_state().await;
    let app = test_app(&state);
    let super_admin = token_for(&state, "root@clinic.vn", Role::SuperAdmin).await;

    let (_, body) = send_empty(&app, "GET", "/api/users", Some(&super_admin)).await;
    let id = body["users"][0]["id"].as_str().unwrap().to_string();

    let (status, body) = send_empty(
        &app,
        "DELETE",
        &format!("/api/users/{id}"),
        Some(&super_admin),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("SUPER_ADMIN"));
}

#[tokio::test]
async fn login_returns_token_and_me_reads_it_back() {
    let (state, _tmp) = test_state().await;
    let app = test_app(&state);
    let _ = token_for(&state, "bs.lan@clinic.vn", Role::Admin).await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        json!({"email": "bs.lan@clinic.vn", "password": "test-password-123"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(body["user"]["role"], "ADMIN");

    let (status, me) = send_empty(&app, "GET", "/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "bs.lan@clinic.vn");

    // Wrong password and unknown email produce the same message
    let (s1, b1) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        json!({"email": "bs.lan@clinic.vn", "password": "wrong"}),
    )
    .await;
    let (s2, b2) = send_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        json!({"email": "nobody@clinic.vn", "password": "wrong"}),
    )
    .await;
    assert_eq!(s1, StatusCode::BAD_REQUEST);
    assert_eq!(s2, StatusCode::BAD_REQUEST);
    assert_eq!(b1["error"], b2["error"]);
}
