#[cfg(feature = "sheets-csv")]
use crate::CsvSpreadsheet;
#[cfg(feature = "sheets-http")]
use crate::HttpSpreadsheet;
use crate::{SheetsBackend, SheetsError, SheetsResult, Spreadsheet};
use remit_core::Config;
use std::sync::Arc;

/// Create a spreadsheet backend based on configuration
pub fn create_spreadsheet(config: &Config) -> SheetsResult<Arc<dyn Spreadsheet>> {
    match config.sheets_backend {
        #[cfg(feature = "sheets-http")]
        SheetsBackend::Http => {
            let spreadsheet_id = config.sheets_spreadsheet_id.clone().ok_or_else(|| {
                SheetsError::ConfigError("SHEETS_SPREADSHEET_ID not configured".to_string())
            })?;
            let api_token = config.sheets_api_token.clone().ok_or_else(|| {
                SheetsError::ConfigError("SHEETS_API_TOKEN not configured".to_string())
            })?;

            let sheet = HttpSpreadsheet::new(
                config.sheets_endpoint.clone(),
                spreadsheet_id,
                config.sheets_tab_name.clone(),
                api_token,
            )?;
            Ok(Arc::new(sheet))
        }

        #[cfg(not(feature = "sheets-http"))]
        SheetsBackend::Http => Err(SheetsError::ConfigError(
            "HTTP sheets backend not available (sheets-http feature not enabled)".to_string(),
        )),

        #[cfg(feature = "sheets-csv")]
        SheetsBackend::Csv => {
            let path = config.sheets_csv_path.clone().ok_or_else(|| {
                SheetsError::ConfigError("SHEETS_CSV_PATH not configured".to_string())
            })?;
            Ok(Arc::new(CsvSpreadsheet::new(path)))
        }

        #[cfg(not(feature = "sheets-csv"))]
        SheetsBackend::Csv => Err(SheetsError::ConfigError(
            "CSV sheets backend not available (sheets-csv feature not enabled)".to_string(),
        )),
    }
}
