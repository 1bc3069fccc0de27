//! Append-only local CSV backend, for development and testing.
//!
//! `open` creates the file with a header row if it does not exist yet;
//! `append_row` projects the sparse row onto the canonical header set and
//! appends one CSV record.

use std::path::PathBuf;

use async_trait::async_trait;
use remit_core::models::SubmissionRow;
use remit_core::SheetsBackend;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::traits::{SheetsError, SheetsResult, Spreadsheet};

#[derive(Clone)]
pub struct CsvSpreadsheet {
    path: PathBuf,
}

impl CsvSpreadsheet {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvSpreadsheet { path: path.into() }
    }

    /// Encode one record as a CSV line.
    fn encode_record<I, S>(cells: I) -> SheetsResult<Vec<u8>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer
            .write_record(cells)
            .map_err(|e| SheetsError::AppendFailed(format!("CSV encoding failed: {}", e)))?;
        writer
            .into_inner()
            .map_err(|e| SheetsError::AppendFailed(format!("CSV encoding failed: {}", e)))
    }

    async fn ensure_file(&self) -> SheetsResult<()> {
        if fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                SheetsError::Unavailable(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let header = Self::encode_record(SubmissionRow::HEADERS)?;
        fs::write(&self.path, header).await.map_err(|e| {
            SheetsError::Unavailable(format!(
                "Failed to create spreadsheet file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        tracing::info!(path = %self.path.display(), "Created CSV spreadsheet with header row");
        Ok(())
    }
}

#[async_trait]
impl Spreadsheet for CsvSpreadsheet {
    async fn open(&self) -> SheetsResult<()> {
        self.ensure_file().await
    }

    async fn append_row(&self, row: &SubmissionRow) -> SheetsResult<()> {
        self.ensure_file().await?;

        let cells = row.project(&SubmissionRow::HEADERS);
        let record = Self::encode_record(&cells)?;

        let mut file = fs::OpenOptions::new()
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| {
                SheetsError::Unavailable(format!(
                    "Failed to open spreadsheet file {}: {}",
                    self.path.display(),
                    e
                ))
            })?;

        file.write_all(&record)
            .await
            .map_err(|e| SheetsError::AppendFailed(format!("Failed to append row: {}", e)))?;
        file.flush()
            .await
            .map_err(|e| SheetsError::AppendFailed(format!("Failed to append row: {}", e)))?;

        tracing::info!(path = %self.path.display(), "Spreadsheet row appended");
        Ok(())
    }

    fn backend_type(&self) -> SheetsBackend {
        SheetsBackend::Csv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use chrono::NaiveDate;
    use remit_core::models::{BasicInfo, ReceiptFile, ReimbursementMethod};
    use tempfile::tempdir;

    fn sample_row() -> SubmissionRow {
        let basic = BasicInfo {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.org".to_string(),
            item_description: "Glue, \"extra strong\"".to_string(),
            item_price: 12.5,
            purchase_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            receipts: vec![ReceiptFile {
                original_filename: "r.png".to_string(),
                content_type: "image/png".to_string(),
                data: Bytes::from_static(b"png"),
            }],
        };
        let method = ReimbursementMethod::Paypal {
            paypal_email: "ada.pay@example.org".to_string(),
        };
        SubmissionRow::from_submission(&basic, &method)
            .with_files(&["http://localhost/receipts/a.png".to_string()])
    }

    #[tokio::test]
    async fn open_creates_file_with_header_row() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sheets/submissions.csv");
        let sheet = CsvSpreadsheet::new(&path);

        sheet.open().await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Name,Email,Item Description"));
        assert_eq!(content.lines().count(), 1);
    }

    #[tokio::test]
    async fn append_adds_one_record_per_call() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("submissions.csv");
        let sheet = CsvSpreadsheet::new(&path);

        sheet.open().await.unwrap();
        sheet.append_row(&sample_row()).await.unwrap();
        sheet.append_row(&sample_row()).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        // Header plus two independent rows, no deduplication.
        assert_eq!(content.lines().count(), 3);
        assert!(content.contains("Ada Lovelace"));
        assert!(content.contains("ada.pay@example.org"));
        // Values containing quotes survive CSV encoding.
        assert!(content.contains("\"Glue, \"\"extra strong\"\"\""));
    }

    #[tokio::test]
    async fn absent_columns_are_blank_filled() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("submissions.csv");
        let sheet = CsvSpreadsheet::new(&path);

        sheet.append_row(&sample_row()).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let row_line = content.lines().nth(1).unwrap();
        // A paypal row leaves the check and direct-deposit columns empty.
        assert!(row_line.split(',').count() >= SubmissionRow::HEADERS.len());
        assert!(row_line.contains(",,"));
    }
}
