//! Authentication Handlers
//!
//! Login, logout and current-user lookup.

use std::time::Duration;

use axum::{Json, extract::State};

use crate::AppError;
use crate::audit::AuditAction;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::UserRepository;

// Shared DTOs keep the wire format in one place
use shared::client::{LoginRequest, LoginResponse, UserInfo};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Login handler
///
/// Verifies credentials and returns a JWT. Unknown email and wrong
/// password produce the same error to prevent account enumeration.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let repo = UserRepository::new(state.db.clone());
    let email = req.email.clone();

    let user = repo.find_by_email(&email).await?;

    // Fixed delay before inspecting the result
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let user = match user {
        Some(u) => {
            if !u.is_active {
                return Err(AppError::forbidden("Account has been disabled"));
            }

            let password_valid = u
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                state
                    .audit_service
                    .log(
                        AuditAction::LoginFailed,
                        "auth",
                        format!("user:{}", email),
                        None,
                        None,
                        serde_json::json!({"reason": "invalid_credentials"}),
                    )
                    .await;
                tracing::warn!(email = %email, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            u
        }
        None => {
            state
                .audit_service
                .log(
                    AuditAction::LoginFailed,
                    "auth",
                    format!("user:{}", email),
                    None,
                    None,
                    serde_json::json!({"reason": "user_not_found"}),
                )
                .await;
            tracing::warn!(email = %email, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let user_id = user.id.as_ref().map(|r| r.to_string()).unwrap_or_default();

    let token = state
        .jwt_service()
        .generate_token(&user_id, &user.email, &user.name, user.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    state
        .audit_service
        .log(
            AuditAction::LoginSuccess,
            "auth",
            user_id.clone(),
            Some(user_id.clone()),
            Some(user.name.clone()),
            serde_json::json!({"email": &user.email}),
        )
        .await;

    tracing::info!(
        user_id = %user_id,
        email = %user.email,
        role = %user.role,
        "User logged in successfully"
    );

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: user_id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role.to_string(),
            is_active: user.is_active,
            created_at: user.created_at,
        },
    }))
}

/// Current user info
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Result<Json<UserInfo>, AppError> {
    // Fresh row for is_active / created_at; the token only carries identity
    let repo = UserRepository::new(state.db.clone());
    let db_user = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::unauthorized())?;

    Ok(Json(UserInfo {
        id: user.id,
        email: db_user.email,
        name: db_user.name,
        role: db_user.role.to_string(),
        is_active: db_user.is_active,
        created_at: db_user.created_at,
    }))
}

/// Logout handler
///
/// Stateless tokens have nothing to revoke server-side; the call is
/// idempotent and exists for the audit trail.
pub async fn logout(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Result<Json<()>, AppError> {
    state
        .audit_service
        .log(
            AuditAction::Logout,
            "auth",
            user.id.clone(),
            Some(user.id.clone()),
            Some(user.name.clone()),
            serde_json::json!({"email": &user.email}),
        )
        .await;

    tracing::info!(user_id = %user.id, email = %user.email, "User logged out");

    Ok(Json(()))
}
