//! Upload pipeline tests: validation boundaries and the local-disk path

mod common;

use common::*;
use http::StatusCode;

use clinic_server::db::models::Role;
use clinic_server::services::MediaStorage;
use clinic_server::services::storage::MAX_FILE_SIZE;

#[test]
fn upload_size_boundary_is_inclusive() {
    // Exactly 5_242_880 bytes: pad a valid PNG with trailing bytes the
    // decoder ignores
    let mut at_limit = tiny_png();
    at_limit.resize(MAX_FILE_SIZE, 0);
    assert!(MediaStorage::validate(&at_limit, "exact.png").is_ok());

    // One byte over is rejected before decoding
    let over = vec![0u8; MAX_FILE_SIZE + 1];
    let err = MediaStorage::validate(&over, "over.png").unwrap_err();
    assert!(err.to_string().contains("too large"));
}

#[test]
fn upload_rejects_non_image_payloads() {
    assert!(MediaStorage::validate(b"<svg></svg>", "img.svg").is_err());
    assert!(MediaStorage::validate(b"plain text", "img.png").is_err());
}

#[tokio::test]
async fn upload_round_trips_through_media_lookup() {
    let (state, _tmp) = test_state().await;
    let app = test_app(&state);
    let editor = token_for(&state, "editor@clinic.vn", Role::Editor).await;
    let admin = token_for(&state, "admin@clinic.vn", Role::Admin).await;

    let boundary = "clinic-test-boundary";
    let png = tiny_png();
    let body = multipart_body(
        boundary,
        &[
            MultipartPart::File {
                name: "file",
                filename: "banner.png",
                content_type: "image/png",
                data: &png,
            },
            MultipartPart::Text {
                name: "prefix",
                value: "banners",
            },
        ],
    );

    let (status, response) =
        send_multipart(&app, "/api/media/upload", &editor, boundary, body).await;
    assert_eq!(status, StatusCode::OK, "upload failed: {response}");

    let url = response["url"].as_str().expect("url").to_string();
    let media_id = response["mediaId"].as_str().expect("mediaId").to_string();
    assert!(url.starts_with("/uploads/"), "local fallback URL: {url}");
    assert!(response["warning"].is_null());

    // Media lookup returns the same URL (round-trip property)
    let (status, media) = send_empty(
        &app,
        "GET",
        &format!("/api/media/{media_id}"),
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(media["url"], url);
    assert_eq!(media["originalName"], "banner.png");
    assert_eq!(media["fileType"], "image/png");
    assert_eq!(media["fileSize"], png.len() as i64);

    // The stored file is served back on the public route
    let (status, _) = get(&app, &url).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn upload_requires_authentication() {
    let (state, _tmp) = test_state().await;
    let app = test_app(&state);

    let boundary = "clinic-test-boundary";
    let png = tiny_png();
    let body = multipart_body(
        boundary,
        &[MultipartPart::File {
            name: "file",
            filename: "x.png",
            content_type: "image/png",
            data: &png,
        }],
    );

    let req = http::Request::builder()
        .method("POST")
        .uri("/api/media/upload")
        .header(
            http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(axum::body::Body::from(body))
        .unwrap();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn uploads_route_blocks_path_traversal() {
    let (state, _tmp) = test_state().await;
    let app = test_app(&state);

    let (status, _) = get(&app, "/uploads/..%2Fsecrets.txt").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn referenced_media_cannot_be_deleted() {
    let (state, _tmp) = test_state().await;
    let app = test_app(&state);
    let editor = token_for(&state, "editor@clinic.vn", Role::Editor).await;
    let admin = token_for(&state, "admin@clinic.vn", Role::Admin).await;

    // Upload an image and attach it to a service
    let boundary = "clinic-test-boundary";
    let png = tiny_png();
    let body = multipart_body(
        boundary,
        &[MultipartPart::File {
            name: "file",
            filename: "feature.png",
            content_type: "image/png",
            data: &png,
        }],
    );
    let (_, response) = send_multipart(&app, "/api/media/upload", &editor, boundary, body).await;
    let media_id = response["mediaId"].as_str().expect("mediaId").to_string();

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/services",
        Some(&editor),
        serde_json::json!({
            "title": "Khám da liễu",
            "description": "Da liễu",
            "featureImage": media_id,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Delete is refused while referenced
    let (status, _) = send_empty(
        &app,
        "DELETE",
        &format!("/api/media/{media_id}"),
        Some(&admin),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
