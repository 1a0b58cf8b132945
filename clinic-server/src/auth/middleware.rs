//! Auth middleware
//!
//! Axum middleware for JWT authentication and role gates.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::Method;

use crate::AppError;
use crate::auth::{CurrentUser, JwtService, Role};
use crate::core::ServerState;
use crate::security_log;

/// Public route table
///
/// The auth middleware skips exactly these. Everything else under `/api/`
/// requires a valid bearer token; new admin routes are protected by
/// default instead of relying on per-handler checks.
///
/// | Method | Path | Purpose |
/// |--------|------|---------|
/// | POST | `/api/auth/login` | login |
/// | GET | `/api/health` | health check |
/// | GET | `/api/services`, `/homepage`, `/by-slug/*` | public service reads |
/// | GET | `/api/news`, `/homepage`, `/featured`, `/by-slug/*` | public news reads |
/// | GET | `/api/team` | public team page |
/// | GET | `/api/categories` | public category list |
/// | GET | `/api/banners/public` | active banners |
/// | GET | `/api/contact` | clinic contact info |
/// | GET | `/uploads/*` | locally stored media |
///
/// Admin reads like `GET /api/services/{id}` are intentionally absent:
/// they pass through token validation so the role gates can see the user.
pub fn is_public_route(method: &Method, path: &str) -> bool {
    if method == Method::POST {
        return path == "/api/auth/login";
    }
    if method != Method::GET {
        return false;
    }

    matches!(
        path,
        "/api/health"
            | "/api/services"
            | "/api/services/homepage"
            | "/api/news"
            | "/api/news/homepage"
            | "/api/news/featured"
            | "/api/team"
            | "/api/categories"
            | "/api/banners/public"
            | "/api/contact"
    ) || path.starts_with("/api/services/by-slug/")
        || path.starts_with("/api/news/by-slug/")
        || path.starts_with("/uploads/")
}

/// Authentication middleware
///
/// Extracts and validates the JWT from `Authorization: Bearer <token>`,
/// then injects [`CurrentUser`] into request extensions. Public routes
/// and CORS preflights pass through untouched.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // CORS preflight
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // Non-API paths fall through to their own handlers (or 404)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if is_public_route(req.method(), path) {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    match jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// Role-gate middleware factory
///
/// # Usage
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/api/banners", post(handler::upsert))
///     .route_layer(middleware::from_fn(require_role(Role::Admin)));
/// ```
///
/// Both a missing user and an insufficient role fail with 401
/// Unauthorized; the role hierarchy makes SUPER_ADMIN pass every gate.
pub fn require_role(
    min_role: Role,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or(AppError::unauthorized())?;

            if !user.has_role(min_role) {
                security_log!(
                    "WARN",
                    "role_denied",
                    user_id = user.id.clone(),
                    user_role = user.role.as_str(),
                    required_role = min_role.as_str()
                );
                return Err(AppError::unauthorized());
            }

            Ok(next.run(req).await)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_is_the_only_public_post() {
        assert!(is_public_route(&Method::POST, "/api/auth/login"));
        assert!(!is_public_route(&Method::POST, "/api/services"));
        assert!(!is_public_route(&Method::POST, "/api/team"));
    }

    #[test]
    fn public_reads_skip_auth() {
        assert!(is_public_route(&Method::GET, "/api/services"));
        assert!(is_public_route(&Method::GET, "/api/services/by-slug/kham-tong-quat"));
        assert!(is_public_route(&Method::GET, "/api/news/homepage"));
        assert!(is_public_route(&Method::GET, "/api/banners/public"));
        assert!(is_public_route(&Method::GET, "/uploads/abc.png"));
    }

    #[test]
    fn admin_reads_require_auth() {
        assert!(!is_public_route(&Method::GET, "/api/banners"));
        assert!(!is_public_route(&Method::GET, "/api/media"));
        assert!(!is_public_route(&Method::GET, "/api/users"));
        assert!(!is_public_route(&Method::GET, "/api/dashboard/stats"));
        assert!(!is_public_route(&Method::GET, "/api/audit-log"));
        assert!(!is_public_route(&Method::GET, "/api/services/service:x"));
        assert!(!is_public_route(&Method::GET, "/api/team/team_member:x"));
        assert!(!is_public_route(&Method::DELETE, "/api/services/service:x"));
    }
}
