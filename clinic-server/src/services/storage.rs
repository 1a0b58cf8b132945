//! Media storage adapter
//!
//! Validates uploads and stores them either in object storage (when all
//! four STORAGE_* credentials are configured) or on local disk under
//! `<work_dir>/uploads`.
//!
//! Object keys are namespaced per uploader:
//! `images/<app>/<user>/<prefix>/<timestamp>-<random><ext>`.

use std::path::PathBuf;

use http::header;
use uuid::Uuid;

use crate::core::{Config, StorageConfig};
use crate::utils::AppError;

/// Maximum upload size: 5 MiB (5_242_880 bytes, boundary inclusive)
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Accepted image formats
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Key namespace segment identifying this application
const APP_NAMESPACE: &str = "clinic-cms";

/// Far-future cache header for immutable uploads
const CACHE_CONTROL_VALUE: &str = "public, max-age=31536000, immutable";

/// Outcome of a successful store
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Public URL (absolute for object storage, `/uploads/...` locally)
    pub url: String,
    /// Final file name (key tail)
    pub file_name: String,
}

/// A validated upload, ready to store
#[derive(Debug, Clone)]
pub struct ValidatedImage {
    /// Normalized extension without the dot
    pub ext: String,
    /// MIME type derived from the extension
    pub mime: String,
}

/// Media storage backend
pub enum MediaStorage {
    /// Object storage over HTTP PUT
    Remote {
        config: StorageConfig,
        client: reqwest::Client,
    },
    /// Local-disk fallback
    Local { uploads_dir: PathBuf },
}

impl std::fmt::Debug for MediaStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaStorage::Remote { config, .. } => f
                .debug_struct("MediaStorage::Remote")
                .field("bucket", &config.bucket)
                .finish_non_exhaustive(),
            MediaStorage::Local { uploads_dir } => f
                .debug_struct("MediaStorage::Local")
                .field("uploads_dir", uploads_dir)
                .finish(),
        }
    }
}

impl MediaStorage {
    /// Pick the backend from configuration
    pub fn new(config: &Config) -> Self {
        match &config.storage {
            Some(storage) => {
                tracing::info!(bucket = %storage.bucket, "Media storage: object storage");
                MediaStorage::Remote {
                    config: storage.clone(),
                    client: reqwest::Client::new(),
                }
            }
            None => {
                let uploads_dir = config.uploads_dir();
                tracing::info!(dir = %uploads_dir.display(), "Media storage: local disk");
                MediaStorage::Local { uploads_dir }
            }
        }
    }

    /// Validate an upload: size limit, extension allow-list, and the
    /// bytes must actually decode as an image of that kind.
    pub fn validate(data: &[u8], original_name: &str) -> Result<ValidatedImage, AppError> {
        if data.is_empty() {
            return Err(AppError::validation("Empty file provided"));
        }
        if data.len() > MAX_FILE_SIZE {
            return Err(AppError::validation(format!(
                "File too large. Maximum size is {} bytes ({}MB)",
                MAX_FILE_SIZE,
                MAX_FILE_SIZE / 1024 / 1024
            )));
        }

        let ext = PathBuf::from(original_name)
            .extension()
            .and_then(|ext| ext.to_str().map(|s| s.to_lowercase()))
            .ok_or_else(|| {
                AppError::validation(format!("Invalid file extension for: {}", original_name))
            })?;

        if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
            return Err(AppError::validation(format!(
                "Unsupported file format '{}'. Supported: {}",
                ext,
                ALLOWED_EXTENSIONS.join(", ")
            )));
        }

        // The content must be a real image, not just a renamed file
        if let Err(e) = image::load_from_memory(data) {
            return Err(AppError::validation(format!(
                "Invalid image file ({}): {}",
                ext, e
            )));
        }

        let mime = mime_guess::from_ext(&ext).first_or_octet_stream();
        Ok(ValidatedImage {
            ext,
            mime: mime.essence_str().to_string(),
        })
    }

    /// Store a validated upload and return its public URL
    pub async fn store(
        &self,
        data: Vec<u8>,
        validated: &ValidatedImage,
        user_id: &str,
        prefix: &str,
    ) -> Result<StoredFile, AppError> {
        let file_name = format!(
            "{}-{}.{}",
            shared::util::now_millis(),
            Uuid::new_v4().simple(),
            validated.ext
        );

        match self {
            MediaStorage::Remote { config, client } => {
                let key = format!(
                    "images/{}/{}/{}/{}",
                    APP_NAMESPACE,
                    sanitize_segment(user_id),
                    sanitize_segment(prefix),
                    file_name
                );
                let put_url = format!(
                    "{}/{}/{}",
                    config.endpoint.trim_end_matches('/'),
                    config.bucket,
                    key
                );

                let response = client
                    .put(&put_url)
                    .header(
                        header::AUTHORIZATION,
                        format!("Bearer {}", config.access_key),
                    )
                    .header("x-amz-acl", "public-read")
                    .header(header::CACHE_CONTROL, CACHE_CONTROL_VALUE)
                    .header(header::CONTENT_TYPE, &validated.mime)
                    .body(data)
                    .send()
                    .await
                    .map_err(|e| AppError::internal(format!("Storage write failed: {}", e)))?;

                if !response.status().is_success() {
                    return Err(AppError::internal(format!(
                        "Storage write failed with status {}",
                        response.status()
                    )));
                }

                let url = format!(
                    "{}/{}",
                    config.public_base_url.trim_end_matches('/'),
                    key
                );
                Ok(StoredFile { url, file_name })
            }
            MediaStorage::Local { uploads_dir } => {
                tokio::fs::create_dir_all(uploads_dir).await.map_err(|e| {
                    AppError::internal(format!("Failed to create uploads directory: {}", e))
                })?;

                let path = uploads_dir.join(&file_name);
                tokio::fs::write(&path, data)
                    .await
                    .map_err(|e| AppError::internal(format!("Failed to save file: {}", e)))?;

                let url = format!("/uploads/{}", file_name);
                Ok(StoredFile { url, file_name })
            }
        }
    }
}

/// Keep storage key segments to a safe character set
fn sanitize_segment(segment: &str) -> String {
    let cleaned: String = segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "general".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Smallest valid PNG (1x1 transparent pixel)
    fn tiny_png() -> Vec<u8> {
        let mut buf = Vec::new();
        let img = image::RgbaImage::new(1, 1);
        image::DynamicImage::ImageRgba8(img)
            .write_to(
                &mut std::io::Cursor::new(&mut buf),
                image::ImageFormat::Png,
            )
            .unwrap();
        buf
    }

    #[test]
    fn accepts_valid_png() {
        let validated = MediaStorage::validate(&tiny_png(), "photo.png").unwrap();
        assert_eq!(validated.ext, "png");
        assert_eq!(validated.mime, "image/png");
    }

    #[test]
    fn rejects_empty_and_renamed_files() {
        assert!(MediaStorage::validate(&[], "a.png").is_err());
        assert!(MediaStorage::validate(b"not an image at all", "a.png").is_err());
    }

    #[test]
    fn rejects_disallowed_extension() {
        assert!(MediaStorage::validate(&tiny_png(), "a.svg").is_err());
        assert!(MediaStorage::validate(&tiny_png(), "noext").is_err());
    }

    #[test]
    fn size_boundary_is_inclusive() {
        // Build a PNG then pad a raw buffer check: validate() checks the
        // byte length before decoding, so boundary behavior is testable
        // with the length alone on a decodable image.
        let png = tiny_png();
        assert!(png.len() < MAX_FILE_SIZE);
        assert!(MediaStorage::validate(&png, "a.png").is_ok());

        let oversized = vec![0u8; MAX_FILE_SIZE + 1];
        let err = MediaStorage::validate(&oversized, "a.png").unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn sanitizes_key_segments() {
        assert_eq!(sanitize_segment("user:123"), "user-123");
        assert_eq!(sanitize_segment("../etc"), "---etc");
        assert_eq!(sanitize_segment(""), "general");
    }
}
