//! Server configuration
//!
//! # Environment variables
//!
//! | Variable | Default | Purpose |
//! |----------|---------|---------|
//! | WORK_DIR | /var/lib/clinic-cms | data directory (database, uploads, logs) |
//! | HTTP_PORT | 3000 | HTTP port |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | BASE_URL | http://localhost:3000 | absolute-URL base for server-side fetches |
//! | JWT_SECRET | (generated in dev) | token signing secret, min 32 chars |
//! | JWT_EXPIRATION_MINUTES | 1440 | token lifetime |
//! | ADMIN_EMAIL / ADMIN_PASSWORD | unset | first-boot SUPER_ADMIN seed |
//! | STORAGE_ENDPOINT | unset | object storage endpoint |
//! | STORAGE_BUCKET | unset | object storage bucket |
//! | STORAGE_ACCESS_KEY | unset | object storage access key |
//! | STORAGE_PUBLIC_BASE_URL | unset | public URL prefix for stored objects |
//!
//! Object storage turns on only when all four STORAGE_* variables are
//! present; otherwise uploads fall back to local disk under
//! `WORK_DIR/uploads`.

use std::path::PathBuf;

use crate::auth::JwtConfig;

/// Object storage credentials (all-or-nothing)
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Endpoint, e.g. `https://sgp1.storage.example.com`
    pub endpoint: String,
    /// Bucket name
    pub bucket: String,
    /// Pre-shared access key
    pub access_key: String,
    /// Public URL prefix, e.g. `https://cdn.clinic.vn`
    pub public_base_url: String,
}

impl StorageConfig {
    /// Load from env; Some only when all four credentials are present
    pub fn from_env() -> Option<Self> {
        let endpoint = std::env::var("STORAGE_ENDPOINT").ok()?;
        let bucket = std::env::var("STORAGE_BUCKET").ok()?;
        let access_key = std::env::var("STORAGE_ACCESS_KEY").ok()?;
        let public_base_url = std::env::var("STORAGE_PUBLIC_BASE_URL").ok()?;
        Some(Self {
            endpoint,
            bucket,
            access_key,
            public_base_url,
        })
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Data directory for database, uploads and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Base URL used when building absolute URLs
    pub base_url: String,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Object storage credentials (None = local-disk fallback)
    pub storage: Option<StorageConfig>,
    /// First-boot admin seed
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/clinic-cms".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            jwt: JwtConfig::default(),
            storage: StorageConfig::from_env(),
            admin_email: std::env::var("ADMIN_EMAIL").ok(),
            admin_password: std::env::var("ADMIN_PASSWORD").ok(),
        }
    }

    /// Override work dir and port (test harness)
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Database directory: `<work_dir>/database`
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// Local uploads directory: `<work_dir>/uploads`
    pub fn uploads_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("uploads")
    }

    /// Create the work directory structure
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.uploads_dir())?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
