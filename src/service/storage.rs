//! Image Storage
//!
//! Persists uploaded product images under a configurable directory and
//! serves them back through the static `/images` route. Filenames are
//! random-UUID-prefixed so concurrent uploads of the same file never
//! collide, and the original extension is preserved.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::utils::error::{AppError, AppResult};

/// Content types accepted for product images
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/jpg"];

/// An image payload extracted from a multipart request
#[derive(Debug, Clone)]
pub struct UploadedImage {
    /// Client-supplied filename
    pub filename: String,
    /// Declared content type of the part
    pub content_type: String,
    /// Raw file bytes
    pub data: Vec<u8>,
}

/// File-system backed store for uploaded images
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { root: dir.into() }
    }

    /// Create the storage directory if it does not exist yet
    pub async fn ensure_dir(&self) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::Internal(format!("creating image directory failed: {}", e)))
    }

    /// Directory images are written to; the static route serves from here
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the declared content type is an accepted image format
    pub fn is_allowed_type(content_type: &str) -> bool {
        ALLOWED_IMAGE_TYPES.contains(&content_type)
    }

    /// Build a collision-resistant stored name from the client filename
    pub fn generate_filename(original: &str) -> String {
        // Only the final path component, with anything shady replaced.
        let base = Path::new(original)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload");
        let sanitized: String = base
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        format!("{}-{}", Uuid::new_v4(), sanitized)
    }

    /// Write the image to disk and return the relative URL it is served
    /// under (`images/<stored-name>`).
    pub async fn save(&self, image: &UploadedImage) -> AppResult<String> {
        let stored_name = Self::generate_filename(&image.filename);
        let path = self.root.join(&stored_name);

        tokio::fs::write(&path, &image.data)
            .await
            .map_err(|e| AppError::Internal(format!("writing image failed: {}", e)))?;

        Ok(format!("images/{}", stored_name))
    }

    /// Best-effort deletion of a previously stored image.
    ///
    /// Failures are logged and swallowed; they never surface to the caller.
    /// Only the final path component of `image_url` is used, so a stored
    /// URL can never point deletion outside the image root.
    pub async fn delete_best_effort(&self, image_url: &str) {
        let Some(name) = Path::new(image_url).file_name() else {
            log::warn!("refusing to delete image with no file name: {}", image_url);
            return;
        };

        let path = self.root.join(name);
        if let Err(err) = tokio::fs::remove_file(&path).await {
            log::warn!("failed to delete image {}: {}", path.display(), err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> ImageStore {
        ImageStore::new(std::env::temp_dir().join(format!("image-store-test-{}", Uuid::new_v4())))
    }

    fn sample_image() -> UploadedImage {
        UploadedImage {
            filename: "lamp photo.png".to_string(),
            content_type: "image/png".to_string(),
            data: vec![0x89, 0x50, 0x4e, 0x47],
        }
    }

    #[test]
    fn test_allowed_types() {
        assert!(ImageStore::is_allowed_type("image/jpeg"));
        assert!(ImageStore::is_allowed_type("image/jpg"));
        assert!(ImageStore::is_allowed_type("image/png"));
        assert!(!ImageStore::is_allowed_type("image/gif"));
        assert!(!ImageStore::is_allowed_type("application/pdf"));
        assert!(!ImageStore::is_allowed_type(""));
    }

    #[test]
    fn test_generated_names_preserve_extension_and_differ() {
        let first = ImageStore::generate_filename("photo.png");
        let second = ImageStore::generate_filename("photo.png");

        assert!(first.ends_with("photo.png"));
        assert_ne!(first, second);
    }

    #[test]
    fn test_generated_names_strip_path_components() {
        let name = ImageStore::generate_filename("../../etc/passwd");
        assert!(!name.contains('/'));
        assert!(!name.contains(".."));
    }

    #[tokio::test]
    async fn test_save_and_delete_round_trip() {
        let store = temp_store();
        store.ensure_dir().await.unwrap();

        let url = store.save(&sample_image()).await.unwrap();
        assert!(url.starts_with("images/"));

        let stored_name = url.strip_prefix("images/").unwrap();
        let on_disk = store.root().join(stored_name);
        assert!(on_disk.exists());

        store.delete_best_effort(&url).await;
        assert!(!on_disk.exists());
    }

    #[tokio::test]
    async fn test_delete_of_missing_file_is_swallowed() {
        let store = temp_store();
        store.ensure_dir().await.unwrap();

        // Must not panic or error.
        store.delete_best_effort("images/does-not-exist.png").await;
    }
}
