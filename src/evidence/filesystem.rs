//! Filesystem-based evidence storage.
//!
//! Stores photos as files in a sharded directory structure:
//! ```text
//! {base_path}/
//!   {hash[0:2]}/
//!     {hash}.{ext}
//! ```
//!
//! The first two characters of the hash create a subdirectory to avoid
//! having too many files in a single directory. The returned reference is
//! `{base_url}/uploads/{hash[0:2]}/{hash}.{ext}`, served by the static file
//! mount at the transport boundary.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::{check_extension, compute_hash, EvidenceStore, Result};

/// Content-addressed filesystem store for activity photos.
pub struct FilesystemEvidenceStore {
    base_path: PathBuf,
    base_url: String,
}

impl FilesystemEvidenceStore {
    /// Create a new filesystem evidence store.
    ///
    /// Creates the base directory if it doesn't exist.
    pub async fn new(base_path: impl AsRef<Path>, base_url: impl Into<String>) -> Result<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).await?;
        Ok(Self {
            base_path,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn relative_path(hex: &str, extension: &str) -> String {
        format!("{}/{}.{}", &hex[0..2], hex, extension)
    }
}

#[async_trait]
impl EvidenceStore for FilesystemEvidenceStore {
    async fn put(&self, content: &[u8], extension: &str) -> Result<String> {
        check_extension(extension)?;

        let hex = hex::encode(compute_hash(content));
        let relative = Self::relative_path(&hex, extension);
        let path = self.base_path.join(&relative);

        if path.exists() {
            debug!(hash = %hex, "evidence already stored, returning existing reference");
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).await?;
            }

            // Write atomically using temp file + rename
            let temp_path = path.with_extension("tmp");
            fs::write(&temp_path, content).await?;
            fs::rename(&temp_path, &path).await?;

            debug!(hash = %hex, size = content.len(), "stored evidence photo");
        }

        Ok(format!("{}/uploads/{}", self.base_url, relative))
    }
}
