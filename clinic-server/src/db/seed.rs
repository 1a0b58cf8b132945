//! First-boot seeding
//!
//! An empty user table would leave the admin dashboard unreachable, so
//! the first boot creates a SUPER_ADMIN from `ADMIN_EMAIL` /
//! `ADMIN_PASSWORD` when both are configured.

use crate::core::Config;
use crate::db::models::{Role, UserCreate};
use crate::db::repository::UserRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Seed the initial SUPER_ADMIN if the user table is empty
pub async fn seed_admin(db: &Surreal<Db>, config: &Config) {
    let repo = UserRepository::new(db.clone());

    let user_count = match repo.count().await {
        Ok(n) => n,
        Err(e) => {
            tracing::error!("Failed to count users for seeding: {}", e);
            return;
        }
    };
    if user_count > 0 {
        return;
    }

    let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) else {
        tracing::warn!(
            "⚠️  No users exist and ADMIN_EMAIL/ADMIN_PASSWORD are not set — \
             the admin API will be unreachable until a user is seeded"
        );
        return;
    };

    match repo
        .create(UserCreate {
            email: Some(email.clone()),
            password: Some(password.clone()),
            name: Some("Administrator".to_string()),
            role: Some(Role::SuperAdmin),
        })
        .await
    {
        Ok(user) => {
            tracing::info!(email = %user.email, "Seeded initial SUPER_ADMIN user");
        }
        Err(e) => {
            tracing::error!("Failed to seed initial admin user: {}", e);
        }
    }
}
