//! Test harness: an axum TestServer wired to in-memory fakes for the
//! spreadsheet, storage, and mail-relay seams.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;

use remit_api::services::email::{Mailer, OutgoingEmail};
use remit_api::setup::routes::build_router;
use remit_api::state::AppState;
use remit_core::models::SubmissionRow;
use remit_core::{AppError, Config, SheetsBackend, StorageBackend};
use remit_sheets::{SheetsError, SheetsResult, Spreadsheet};
use remit_storage::{Storage, StorageError, StorageResult, StoredReceipt};

/// Spreadsheet fake: records appended rows, optionally refuses to open.
#[derive(Default)]
pub struct RecordingSpreadsheet {
    pub rows: Mutex<Vec<SubmissionRow>>,
    pub fail_open: bool,
}

#[async_trait]
impl Spreadsheet for RecordingSpreadsheet {
    async fn open(&self) -> SheetsResult<()> {
        if self.fail_open {
            return Err(SheetsError::Unavailable("spreadsheet offline".to_string()));
        }
        Ok(())
    }

    async fn append_row(&self, row: &SubmissionRow) -> SheetsResult<()> {
        self.rows.lock().unwrap().push(row.clone());
        Ok(())
    }

    fn backend_type(&self) -> SheetsBackend {
        SheetsBackend::Csv
    }
}

/// Storage fake: records uploads, optionally fails destination filenames
/// containing a marker.
#[derive(Default)]
pub struct RecordingStorage {
    pub uploads: Mutex<Vec<StoredReceipt>>,
    pub fail_on: Option<String>,
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn upload(
        &self,
        filename: &str,
        _content_type: &str,
        _data: Vec<u8>,
    ) -> StorageResult<StoredReceipt> {
        if let Some(marker) = &self.fail_on {
            if filename.contains(marker.as_str()) {
                return Err(StorageError::UploadFailed("connection reset".to_string()));
            }
        }
        let stored = StoredReceipt {
            key: format!("receipts/{}", filename),
            url: format!("https://files.test/receipts/{}", filename),
        };
        self.uploads.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

/// Mailer fake: records outgoing messages.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingEmail>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub spreadsheet: Arc<RecordingSpreadsheet>,
    pub storage: Arc<RecordingStorage>,
    pub mailer: Arc<RecordingMailer>,
}

pub fn test_config() -> Config {
    Config {
        server_port: 0,
        environment: "development".to_string(),
        cors_origins: vec!["*".to_string()],
        sheets_backend: SheetsBackend::Csv,
        sheets_endpoint: "https://sheets.test".to_string(),
        sheets_spreadsheet_id: None,
        sheets_api_token: None,
        sheets_tab_name: "Submissions".to_string(),
        sheets_csv_path: Some("/tmp/remit-test/submissions.csv".to_string()),
        storage_backend: StorageBackend::Local,
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        local_storage_path: Some("/tmp/remit-test/receipts".to_string()),
        local_storage_base_url: Some("https://files.test".to_string()),
        receipts_folder: "receipts".to_string(),
        max_receipt_size_bytes: 10 * 1024 * 1024,
        receipt_allowed_content_types: vec![
            "image/jpeg".to_string(),
            "image/png".to_string(),
            "image/gif".to_string(),
            "application/pdf".to_string(),
        ],
        smtp_host: Some("smtp.test".to_string()),
        smtp_port: 587,
        smtp_user: Some("mailer".to_string()),
        smtp_password: Some("secret".to_string()),
        smtp_from: Some("expense-reports@example.org".to_string()),
        smtp_tls: true,
        confirmation_cc: Some("expense-reports@example.org".to_string()),
    }
}

/// Setup a test application with default (always succeeding) fakes.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(RecordingStorage::default(), RecordingSpreadsheet::default())
}

/// Setup a test application with specific fake behavior.
pub fn setup_test_app_with(
    storage: RecordingStorage,
    spreadsheet: RecordingSpreadsheet,
) -> TestApp {
    let spreadsheet = Arc::new(spreadsheet);
    let storage = Arc::new(storage);
    let mailer = Arc::new(RecordingMailer::default());

    let state = Arc::new(AppState::new(
        test_config(),
        spreadsheet.clone(),
        storage.clone(),
        mailer.clone(),
    ));
    let server = TestServer::new(build_router(state)).expect("test server");

    TestApp {
        server,
        spreadsheet,
        storage,
        mailer,
    }
}

const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00];

fn receipt_part() -> Part {
    Part::bytes(PNG_BYTES.to_vec())
        .file_name("receipt.png")
        .mime_type("image/png")
}

/// A complete, valid form with the given reimbursement-method fields.
pub fn form_with_method(fields: &[(&str, &str)]) -> MultipartForm {
    let mut form = MultipartForm::new()
        .add_text("name", "Ada Lovelace")
        .add_text("email", "ada@example.org")
        .add_text("item_description", "Wood glue for the workshop")
        .add_text("item_price", "12.50")
        .add_text("purchase_date", "2024-03-01")
        .add_part("receipts", receipt_part());
    for (name, value) in fields {
        form = form.add_text(name.to_string(), value.to_string());
    }
    form
}

pub fn paypal_form() -> MultipartForm {
    form_with_method(&[
        ("reimbursement_method", "paypal"),
        ("paypal_email", "ada.pay@example.org"),
    ])
}

pub fn direct_deposit_form() -> MultipartForm {
    form_with_method(&[
        ("reimbursement_method", "direct_deposit"),
        ("routing_number", "021000021"),
        ("account_number", "000123456789"),
    ])
}
