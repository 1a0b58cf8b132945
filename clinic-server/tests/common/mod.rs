//! Shared test harness
//!
//! Each test gets its own embedded database in a tempdir and drives the
//! real router through `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::util::ServiceExt;

use clinic_server::auth::JwtConfig;
use clinic_server::db::models::{Role, UserCreate};
use clinic_server::db::repository::UserRepository;
use clinic_server::{Config, ServerState};

/// Build an isolated server state backed by a tempdir database
pub async fn test_state() -> (ServerState, TempDir) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = Config {
        work_dir: tmp.path().to_string_lossy().to_string(),
        http_port: 0,
        environment: "test".to_string(),
        base_url: "http://localhost".to_string(),
        jwt: JwtConfig {
            secret: "integration-test-secret-integration-test".to_string(),
            expiration_minutes: 60,
            issuer: "clinic-server".to_string(),
            audience: "clinic-admin".to_string(),
        },
        storage: None,
        admin_email: None,
        admin_password: None,
    };
    let state = ServerState::initialize(&config).await;
    (state, tmp)
}

/// Build the full application router for a state
pub fn test_app(state: &ServerState) -> Router {
    clinic_server::api::build_app(state.clone())
}

/// Create a user with the given role and return a bearer token for it
pub async fn token_for(state: &ServerState, email: &str, role: Role) -> String {
    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .create(UserCreate {
            email: Some(email.to_string()),
            password: Some("test-password-123".to_string()),
            name: Some(format!("Test {}", role)),
            role: Some(role),
        })
        .await
        .expect("create test user");

    let user_id = user.id.as_ref().map(|r| r.to_string()).unwrap_or_default();
    state
        .jwt_service
        .generate_token(&user_id, &user.email, &user.name, user.role)
        .expect("generate token")
}

/// Fire one request and return (status, parsed JSON body)
pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(req).await.expect("infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}

/// GET without auth
pub async fn get(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, req).await
}

/// Request with a JSON body and optional bearer token
pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = builder.body(Body::from(body.to_string())).unwrap();
    send(app, req).await
}

/// Bodyless request (DELETE / POST toggle) with optional bearer token
pub async fn send_empty(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = builder.body(Body::empty()).unwrap();
    send(app, req).await
}

/// Minimal multipart encoder for upload tests
pub fn multipart_body(boundary: &str, parts: &[MultipartPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        match part {
            MultipartPart::File {
                name,
                filename,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
                body.extend_from_slice(b"\r\n");
            }
            MultipartPart::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
        }
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

pub enum MultipartPart<'a> {
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

/// Multipart request with bearer token
pub async fn send_multipart(
    app: &Router,
    uri: &str,
    token: &str,
    boundary: &str,
    body: Vec<u8>,
) -> (StatusCode, serde_json::Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    send(app, req).await
}

/// A tiny valid PNG for upload tests
pub fn tiny_png() -> Vec<u8> {
    let mut buf = Vec::new();
    let img = image::RgbaImage::new(2, 2);
    image::DynamicImage::ImageRgba8(img)
        .write_to(
            &mut std::io::Cursor::new(&mut buf),
            image::ImageFormat::Png,
        )
        .unwrap();
    buf
}
