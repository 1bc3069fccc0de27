//! Remit Core Library
//!
//! This crate provides the domain models, form validation, identifier
//! generation, configuration, and error types shared across all Remit
//! components.

pub mod backends;
pub mod config;
pub mod error;
pub mod ids;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use backends::{SheetsBackend, StorageBackend};
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
