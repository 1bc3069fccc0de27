//! Remit Storage Library
//!
//! Receipt archive abstraction and implementations: the `Storage` trait plus
//! S3-compatible and local-filesystem backends.
//!
//! # Storage key format
//!
//! Keys live under the configured receipts folder: `{folder}/{filename}`.
//! Keys must not contain `..` or a leading `/`. Key generation is
//! centralized in the `keys` module so both backends stay consistent.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use remit_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult, StoredReceipt};
