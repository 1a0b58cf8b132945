//! Audit trail: chained writes, queries and tamper detection

mod common;

use common::*;
use http::StatusCode;
use serde_json::json;

use clinic_server::audit::AuditAction;
use clinic_server::db::models::Role;

#[tokio::test]
async fn entries_chain_and_verify_intact() {
    let (state, _tmp) = test_state().await;

    for i in 0..4 {
        state
            .audit_service
            .log_sync(
                AuditAction::ServiceCreated,
                "service",
                format!("service:{i}"),
                json!({"slug": format!("dich-vu-{i}")}),
            )
            .await
            .expect("append");
    }

    let verification = state
        .audit_service
        .verify_chain(None, None)
        .await
        .expect("verify");
    assert_eq!(verification.total_entries, 4);
    assert!(verification.chain_intact);
    assert!(verification.breaks.is_empty());
}

#[tokio::test]
async fn first_entry_links_to_genesis_and_sequences_increase() {
    let (state, _tmp) = test_state().await;

    let first = state
        .audit_service
        .log_sync(AuditAction::Logout, "auth", "user:a", json!({}))
        .await
        .unwrap();
    let second = state
        .audit_service
        .log_sync(AuditAction::Logout, "auth", "user:b", json!({}))
        .await
        .unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(first.prev_hash, "genesis");
    assert_eq!(second.id, 2);
    assert_eq!(second.prev_hash, first.curr_hash);
}

#[tokio::test]
async fn tampering_breaks_verification() {
    let (state, _tmp) = test_state().await;

    for i in 0..3 {
        state
            .audit_service
            .log_sync(
                AuditAction::UserUpdated,
                "user",
                format!("user:{i}"),
                json!({"n": i}),
            )
            .await
            .unwrap();
    }

    // Edit an entry's details behind the storage API's back
    state
        .db
        .query("UPDATE audit_log SET details = {\"n\": 99} WHERE sequence = 2")
        .await
        .unwrap();

    let verification = state
        .audit_service
        .verify_chain(None, None)
        .await
        .unwrap();
    assert!(!verification.chain_intact);
    assert!(
        verification
            .breaks
            .iter()
            .any(|b| b.entry_id == 2)
    );
}

#[tokio::test]
async fn mutations_feed_the_audit_trail() {
    let (state, _tmp) = test_state().await;
    let app = test_app(&state);
    let admin = token_for(&state, "admin@clinic.vn", Role::Admin).await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/services",
        Some(&admin),
        json!({"title": "Khám mắt", "description": "Nhãn khoa"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // The audit write goes through the worker; give it a moment
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;

    let (status, body) = send_empty(&app, "GET", "/api/audit-log", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["total"].as_u64().unwrap() >= 1);
    let items = body["items"].as_array().unwrap();
    assert!(
        items
            .iter()
            .any(|e| e["action"] == "service_created"),
        "audit trail should record the create: {body}"
    );

    // Chain verification is SUPER_ADMIN-only
    let (status, _) = send_empty(&app, "GET", "/api/audit-log/verify", Some(&admin)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let super_admin = token_for(&state, "root@clinic.vn", Role::SuperAdmin).await;
    let (status, body) = send_empty(&app, "GET", "/api/audit-log/verify", Some(&super_admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["chainIntact"], true);
}
