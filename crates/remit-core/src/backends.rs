//! Backend selectors for the external spreadsheet and storage services.

use std::fmt;
use std::str::FromStr;

/// Receipt storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    Local,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "s3" => Ok(StorageBackend::S3),
            "local" => Ok(StorageBackend::Local),
            other => Err(format!("Unknown storage backend '{}'", other)),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::S3 => write!(f, "s3"),
            StorageBackend::Local => write!(f, "local"),
        }
    }
}

/// Spreadsheet backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetsBackend {
    Http,
    Csv,
}

impl FromStr for SheetsBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(SheetsBackend::Http),
            "csv" => Ok(SheetsBackend::Csv),
            other => Err(format!("Unknown sheets backend '{}'", other)),
        }
    }
}

impl fmt::Display for SheetsBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetsBackend::Http => write!(f, "http"),
            SheetsBackend::Csv => write!(f, "csv"),
        }
    }
}
