//! Remit Sheets Library
//!
//! Spreadsheet client abstraction and implementations: the `Spreadsheet`
//! trait, a REST backend for a hosted sheets service, and an append-only
//! local CSV backend for development.
//!
//! Rows are sparse string-keyed mappings; each backend projects them onto
//! the canonical column set (`SubmissionRow::HEADERS`), blank-filling the
//! columns a given submission does not use.

#[cfg(feature = "sheets-csv")]
pub mod csv_file;
pub mod factory;
#[cfg(feature = "sheets-http")]
pub mod http;
pub mod traits;

// Re-export commonly used types
#[cfg(feature = "sheets-csv")]
pub use csv_file::CsvSpreadsheet;
pub use factory::create_spreadsheet;
#[cfg(feature = "sheets-http")]
pub use http::HttpSpreadsheet;
pub use remit_core::SheetsBackend;
pub use traits::{SheetsError, SheetsResult, Spreadsheet};
