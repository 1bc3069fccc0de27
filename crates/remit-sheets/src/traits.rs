//! Spreadsheet abstraction trait
//!
//! This module defines the Spreadsheet trait that all spreadsheet backends
//! must implement.

use async_trait::async_trait;
use remit_core::models::SubmissionRow;
use remit_core::{AppError, SheetsBackend};
use thiserror::Error;

/// Spreadsheet operation errors
#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("Spreadsheet unavailable: {0}")]
    Unavailable(String),

    #[error("Append failed: {0}")]
    AppendFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<SheetsError> for AppError {
    fn from(err: SheetsError) -> Self {
        match err {
            SheetsError::Unavailable(msg) => AppError::ServiceUnavailable(msg),
            SheetsError::AppendFailed(msg) => AppError::ServiceUnavailable(msg),
            SheetsError::ConfigError(msg) => AppError::Configuration(msg),
        }
    }
}

/// Result type for spreadsheet operations
pub type SheetsResult<T> = Result<T, SheetsError>;

/// Spreadsheet abstraction trait
///
/// The destination sheet is pre-identified by configuration; the only
/// operations the pipeline needs are a reachability/credential check before
/// any receipt leaves the process, and an append of one submission row.
/// Rows are append-only: there is no update or delete lifecycle.
#[async_trait]
pub trait Spreadsheet: Send + Sync {
    /// Obtain/verify the handle to the destination sheet.
    async fn open(&self) -> SheetsResult<()>;

    /// Append one submission row.
    async fn append_row(&self, row: &SubmissionRow) -> SheetsResult<()>;

    /// Get the spreadsheet backend type
    fn backend_type(&self) -> SheetsBackend;
}
