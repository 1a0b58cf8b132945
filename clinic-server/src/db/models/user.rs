//! User Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// User ID type
pub type UserId = RecordId;

/// Staff role, ordered by privilege
///
/// `SUPER_ADMIN` is a superset of `ADMIN`, which is a superset of
/// `EDITOR` — the derive order makes `Role::SuperAdmin > Role::Admin >
/// Role::Editor` hold for gate checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Editor,
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Editor => "EDITOR",
            Role::Admin => "ADMIN",
            Role::SuperAdmin => "SUPER_ADMIN",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EDITOR" => Ok(Role::Editor),
            "ADMIN" => Ok(Role::Admin),
            "SUPER_ADMIN" => Ok(Role::SuperAdmin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User model matching the `user` table
///
/// The password hash never serializes, so rows can be returned from the
/// admin API directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<UserId>,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_true() -> bool {
    true
}

impl User {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.password_hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

/// Create user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub role: Option<Role>,
}

/// Update user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_ordering_matches_privilege() {
        assert!(Role::SuperAdmin > Role::Admin);
        assert!(Role::Admin > Role::Editor);
    }

    #[test]
    fn role_wire_format_is_screaming_snake() {
        assert_eq!(serde_json::to_string(&Role::SuperAdmin).unwrap(), "\"SUPER_ADMIN\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"EDITOR\"").unwrap(),
            Role::Editor
        );
        assert!(serde_json::from_str::<Role>("\"OWNER\"").is_err());
    }

    #[test]
    fn password_hash_round_trip() {
        let hash = User::hash_password("s3cret-pass").unwrap();
        let user = User {
            id: None,
            email: "a@b.vn".into(),
            name: "A".into(),
            password_hash: hash,
            role: Role::Editor,
            is_active: true,
            created_at: 0,
            updated_at: 0,
        };
        assert!(user.verify_password("s3cret-pass").unwrap());
        assert!(!user.verify_password("wrong").unwrap());
    }

    #[test]
    fn password_hash_never_serializes() {
        let user = User {
            id: None,
            email: "a@b.vn".into(),
            name: "A".into(),
            password_hash: "argon2-hash".into(),
            role: Role::Admin,
            is_active: true,
            created_at: 0,
            updated_at: 0,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2-hash"));
        assert!(!json.contains("passwordHash"));
    }
}
