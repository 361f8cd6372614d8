//! Attendance evidence storage.
//!
//! Teachers attach a photo when recording attendance. The core never keeps
//! the bytes; it stores the stable reference URL returned by the backend on
//! the schedule. Files are content-addressed with SHA-256 so re-uploading
//! the same photo yields the same reference.

mod filesystem;

pub use filesystem::FilesystemEvidenceStore;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

/// Errors that can occur while storing evidence.
#[derive(Debug, thiserror::Error)]
pub enum EvidenceError {
    #[error("failed to store evidence: {0}")]
    StoreFailed(String),

    #[error("unsupported file extension: {0}")]
    UnsupportedExtension(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for evidence operations.
pub type Result<T> = std::result::Result<T, EvidenceError>;

/// Storage backend for attendance photos (consumed collaborator).
///
/// `put` accepts the raw upload and returns the reference URL the schedule
/// will carry.
#[async_trait]
pub trait EvidenceStore: Send + Sync {
    async fn put(&self, content: &[u8], extension: &str) -> Result<String>;
}

/// Compute the SHA-256 hash of an upload.
pub(crate) fn compute_hash(content: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hasher.finalize().to_vec()
}

/// Extensions accepted for activity photos.
const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

pub(crate) fn check_extension(extension: &str) -> Result<()> {
    if ALLOWED_EXTENSIONS.contains(&extension) {
        Ok(())
    } else {
        Err(EvidenceError::UnsupportedExtension(extension.to_string()))
    }
}
