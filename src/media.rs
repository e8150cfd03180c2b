//! Uploaded image storage.
//!
//! Images are kept as opaque files under the media root and referenced from
//! rows by their relative path (`references/<uuid>.png`). The public URL of a
//! stored file is that path under [`MEDIA_URL`].

use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio::fs;
use uuid::Uuid;

pub const MEDIA_URL: &str = "/media/";

/// Maximum accepted size of a single uploaded image (5MB)
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];

pub const PRODUCT_DIR: &str = "products";
pub const REFERENCE_DIR: &str = "references";

/// An image received in a multipart form, not yet validated.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub field: String,
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Check size, extension and that the bytes actually decode as an image.
/// Returns the normalized extension to store the file under.
pub fn validate_image(upload: &ImageUpload) -> Result<String, String> {
    if upload.data.is_empty() {
        return Err("The submitted file is empty.".to_string());
    }
    if upload.data.len() > MAX_IMAGE_BYTES {
        return Err(format!(
            "File too large. Maximum size is {}MB.",
            MAX_IMAGE_BYTES / 1024 / 1024
        ));
    }

    let ext = Path::new(&upload.file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| "File name has no extension.".to_string())?;
    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(format!(
            "Unsupported file format '{}'. Supported: {}",
            ext,
            SUPPORTED_EXTENSIONS.join(", ")
        ));
    }

    image::load_from_memory(&upload.data)
        .map_err(|_| "Upload a valid image. The file is either not an image or corrupted.".to_string())?;

    Ok(ext)
}

pub fn media_url(path: &str) -> String {
    format!("{MEDIA_URL}{}", path.trim_start_matches('/'))
}

#[derive(Debug, Clone)]
pub struct MediaStorage {
    root: PathBuf,
}

impl MediaStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `data` under `dir` with a fresh name; returns the relative path.
    pub async fn save(&self, dir: &str, ext: &str, data: &[u8]) -> anyhow::Result<String> {
        let target_dir = self.root.join(dir);
        fs::create_dir_all(&target_dir)
            .await
            .with_context(|| format!("failed to create media dir {}", target_dir.display()))?;

        let file_name = format!("{}.{}", Uuid::new_v4(), ext);
        let path = target_dir.join(&file_name);
        fs::write(&path, data)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;

        Ok(format!("{dir}/{file_name}"))
    }

    pub async fn remove(&self, relative: &str) {
        let path = self.root.join(relative);
        if let Err(err) = fs::remove_file(&path).await {
            tracing::warn!(error = %err, path = %path.display(), "failed to remove media file");
        }
    }

    pub async fn remove_all(&self, relatives: &[String]) {
        for relative in relatives {
            self.remove(relative).await;
        }
    }
}
