//! Clinic CMS backend
//!
//! # Architecture overview
//!
//! Bilingual (vi/en) content-management backend for a healthcare clinic.
//! Public marketing endpoints resolve locale at read time; the admin API
//! is role-gated (EDITOR / ADMIN / SUPER_ADMIN).
//!
//! # Module structure
//!
//! ```text
//! clinic-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT auth, role gates
//! ├── audit/         # append-only hash-chained audit log
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # embedded SurrealDB models and repositories
//! ├── locale/        # bilingual field resolution
//! ├── services/      # media storage adapter
//! └── utils/         # errors, logging, validation, slugs
//! ```

pub mod api;
pub mod audit;
pub mod auth;
pub mod core;
pub mod db;
pub mod locale;
pub mod services;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService, Role};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};
pub use utils::logger::init_logger;

// Security logging macro - structured tracing fields
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load .env and initialize logging
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    utils::logger::init_logger();
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ____ _ _       _         ____ __  __ ____
  / ___| (_)_ __ (_) ___   / ___|  \/  / ___|
 | |   | | | '_ \| |/ __| | |   | |\/| \___ \
 | |___| | | | | | | (__  | |___| |  | |___) |
  \____|_|_|_| |_|_|\___|  \____|_|  |_|____/
    "#
    );
}
