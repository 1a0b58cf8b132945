//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SurrealDB TEXT fields have no built-in length enforcement, so the
//! handlers check lengths before persisting.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity titles and names: service, post, team member, category
pub const MAX_TITLE_LEN: usize = 200;

/// Short descriptions, excerpts
pub const MAX_EXCERPT_LEN: usize = 500;

/// Long descriptions and HTML post content
pub const MAX_CONTENT_LEN: usize = 200_000;

/// URL slugs
pub const MAX_SLUG_LEN: usize = 200;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 8;

/// URLs / links / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Addresses, business hours
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_empty_and_whitespace() {
        assert!(validate_required_text("", "title", MAX_TITLE_LEN).is_err());
        assert!(validate_required_text("   ", "title", MAX_TITLE_LEN).is_err());
        assert!(validate_required_text("Khám tổng quát", "title", MAX_TITLE_LEN).is_ok());
    }

    #[test]
    fn required_error_names_the_field() {
        let err = validate_required_text("", "title", MAX_TITLE_LEN).unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn optional_accepts_none() {
        assert!(validate_optional_text(&None, "excerpt", MAX_EXCERPT_LEN).is_ok());
        let too_long = Some("x".repeat(MAX_EXCERPT_LEN + 1));
        assert!(validate_optional_text(&too_long, "excerpt", MAX_EXCERPT_LEN).is_err());
    }
}
