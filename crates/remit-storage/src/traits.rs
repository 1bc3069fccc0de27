//! Storage abstraction trait
//!
//! This module defines the Storage trait that all receipt storage backends
//! must implement.

use async_trait::async_trait;
use remit_core::{AppError, StorageBackend};
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UploadFailed(msg) => AppError::ServiceUnavailable(msg),
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            StorageError::BackendError(msg) => AppError::ServiceUnavailable(msg),
            StorageError::IoError(err) => AppError::Internal(format!("IO error: {}", err)),
            StorageError::ConfigError(msg) => AppError::Configuration(msg),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A stored receipt: the backend key plus the viewing link recorded in the
/// spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredReceipt {
    pub key: String,
    pub url: String,
}

/// Storage abstraction trait
///
/// Both backends (S3-compatible, local filesystem) implement this trait so
/// the submission pipeline can archive receipts without coupling to a
/// specific provider. Receipts are write-once: the pipeline never deletes or
/// rewrites an uploaded file, and a failed submission leaves any
/// already-uploaded receipts in place.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload one receipt under the configured folder and return its key and
    /// viewing link.
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<StoredReceipt>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
