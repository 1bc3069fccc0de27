//! Configuration module
//!
//! Environment-backed configuration for the submission service. All required
//! settings are checked at process start; a missing or malformed required
//! setting is a fatal startup error.

use std::env;

use crate::backends::{SheetsBackend, StorageBackend};

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_MAX_RECEIPT_SIZE_MB: usize = 10;
const DEFAULT_SHEETS_ENDPOINT: &str = "https://sheets.googleapis.com";
const DEFAULT_RECEIPT_CONTENT_TYPES: &str = "image/jpeg,image/png,image/gif,application/pdf";

/// Upper bound on receipt files accepted per submission, used to size the
/// request body limit.
pub const MAX_RECEIPTS_PER_SUBMISSION: usize = 10;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    // Spreadsheet configuration
    pub sheets_backend: SheetsBackend,
    pub sheets_endpoint: String,
    pub sheets_spreadsheet_id: Option<String>,
    pub sheets_api_token: Option<String>,
    pub sheets_tab_name: String,
    pub sheets_csv_path: Option<String>,
    // Receipt storage configuration
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    pub receipts_folder: String,
    // Receipt limits
    pub max_receipt_size_bytes: usize,
    pub receipt_allowed_content_types: Vec<String>,
    // Mail relay
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_from: Option<String>,
    pub smtp_tls: bool,
    pub confirmation_cc: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let sheets_backend = env::var("SHEETS_BACKEND")
            .unwrap_or_else(|_| "http".to_string())
            .parse::<SheetsBackend>()
            .map_err(|e| anyhow::anyhow!("SHEETS_BACKEND: {}", e))?;

        let storage_backend = env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "s3".to_string())
            .parse::<StorageBackend>()
            .map_err(|e| anyhow::anyhow!("STORAGE_BACKEND: {}", e))?;

        let max_receipt_size_mb = env::var("MAX_RECEIPT_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_RECEIPT_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(DEFAULT_MAX_RECEIPT_SIZE_MB);

        let receipt_allowed_content_types = env::var("RECEIPT_ALLOWED_CONTENT_TYPES")
            .unwrap_or_else(|_| DEFAULT_RECEIPT_CONTENT_TYPES.to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            cors_origins,
            sheets_backend,
            sheets_endpoint: env::var("SHEETS_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_SHEETS_ENDPOINT.to_string()),
            sheets_spreadsheet_id: env::var("SHEETS_SPREADSHEET_ID").ok().filter(|s| !s.is_empty()),
            sheets_api_token: env::var("SHEETS_API_TOKEN").ok().filter(|s| !s.is_empty()),
            sheets_tab_name: env::var("SHEETS_TAB_NAME")
                .unwrap_or_else(|_| "Submissions".to_string()),
            sheets_csv_path: env::var("SHEETS_CSV_PATH").ok().filter(|s| !s.is_empty()),
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").ok().filter(|s| !s.is_empty()),
            s3_region: env::var("S3_REGION")
                .or_else(|_| env::var("AWS_REGION"))
                .ok()
                .filter(|s| !s.is_empty()),
            s3_endpoint: env::var("S3_ENDPOINT").ok().filter(|s| !s.is_empty()),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok().filter(|s| !s.is_empty()),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL")
                .ok()
                .filter(|s| !s.is_empty()),
            receipts_folder: env::var("RECEIPTS_FOLDER").unwrap_or_else(|_| "receipts".to_string()),
            max_receipt_size_bytes: max_receipt_size_mb * 1024 * 1024,
            receipt_allowed_content_types,
            smtp_host: env::var("SMTP_HOST").ok().filter(|s| !s.is_empty()),
            smtp_port: env::var("SMTP_PORT")
                .unwrap_or_else(|_| DEFAULT_SMTP_PORT.to_string())
                .parse()
                .unwrap_or(DEFAULT_SMTP_PORT),
            smtp_user: env::var("SMTP_USER").ok().filter(|s| !s.is_empty()),
            smtp_password: env::var("SMTP_PASSWORD").ok().filter(|s| !s.is_empty()),
            smtp_from: env::var("SMTP_FROM").ok().filter(|s| !s.is_empty()),
            smtp_tls: env::var("SMTP_TLS")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(true),
            confirmation_cc: env::var("CONFIRMATION_CC").ok().filter(|s| !s.is_empty()),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.cors_origins.iter().any(|o| o.trim() == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        match self.sheets_backend {
            SheetsBackend::Http => {
                if self.sheets_spreadsheet_id.is_none() {
                    return Err(anyhow::anyhow!(
                        "SHEETS_SPREADSHEET_ID must be set when using the http sheets backend"
                    ));
                }
                if self.sheets_api_token.is_none() {
                    return Err(anyhow::anyhow!(
                        "SHEETS_API_TOKEN must be set when using the http sheets backend"
                    ));
                }
            }
            SheetsBackend::Csv => {
                if self.sheets_csv_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "SHEETS_CSV_PATH must be set when using the csv sheets backend"
                    ));
                }
            }
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using the S3 storage backend"
                    ));
                }
                if self.s3_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using the S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using the local storage backend"
                    ));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using the local storage backend"
                    ));
                }
            }
        }

        if self.smtp_host.is_none() {
            return Err(anyhow::anyhow!("SMTP_HOST must be set"));
        }
        if self.smtp_user.is_none() || self.smtp_password.is_none() {
            return Err(anyhow::anyhow!("SMTP_USER and SMTP_PASSWORD must be set"));
        }
        if self.smtp_from.is_none() {
            return Err(anyhow::anyhow!("SMTP_FROM must be set"));
        }

        if self.max_receipt_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_RECEIPT_SIZE_MB must be greater than 0"));
        }
        if self.receipt_allowed_content_types.is_empty() {
            return Err(anyhow::anyhow!(
                "RECEIPT_ALLOWED_CONTENT_TYPES must list at least one MIME type"
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Request body ceiling for a whole multipart submission.
    pub fn max_request_body_bytes(&self) -> usize {
        // All receipts plus slack for the text fields and multipart framing.
        self.max_receipt_size_bytes * MAX_RECEIPTS_PER_SUBMISSION + 64 * 1024
    }
}
