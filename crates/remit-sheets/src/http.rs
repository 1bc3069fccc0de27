//! REST spreadsheet backend.
//!
//! Talks to a Google-Sheets-style values API: a metadata GET to verify the
//! handle, and `values/{tab}:append` to add rows. The sheet is identified by
//! configuration; credentials are a bearer token.

use std::time::Duration;

use async_trait::async_trait;
use remit_core::models::SubmissionRow;
use remit_core::SheetsBackend;

use crate::traits::{SheetsError, SheetsResult, Spreadsheet};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct HttpSpreadsheet {
    client: reqwest::Client,
    endpoint: String,
    spreadsheet_id: String,
    tab_name: String,
    api_token: String,
}

impl HttpSpreadsheet {
    pub fn new(
        endpoint: String,
        spreadsheet_id: String,
        tab_name: String,
        api_token: String,
    ) -> SheetsResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SheetsError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(HttpSpreadsheet {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            spreadsheet_id,
            tab_name,
            api_token,
        })
    }

    fn metadata_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}?fields=spreadsheetId",
            self.endpoint, self.spreadsheet_id
        )
    }

    fn append_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}:append?valueInputOption=RAW&insertDataOption=INSERT_ROWS",
            self.endpoint, self.spreadsheet_id, self.tab_name
        )
    }
}

#[async_trait]
impl Spreadsheet for HttpSpreadsheet {
    async fn open(&self) -> SheetsResult<()> {
        let response = self
            .client
            .get(self.metadata_url())
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| SheetsError::Unavailable(format!("Spreadsheet unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(SheetsError::Unavailable(format!(
                "Spreadsheet metadata request failed with status {}",
                response.status()
            )));
        }

        tracing::debug!(spreadsheet_id = %self.spreadsheet_id, "Spreadsheet handle verified");
        Ok(())
    }

    async fn append_row(&self, row: &SubmissionRow) -> SheetsResult<()> {
        let cells = row.project(&SubmissionRow::HEADERS);
        let body = serde_json::json!({ "values": [cells] });

        let start = std::time::Instant::now();

        let response = self
            .client
            .post(self.append_url())
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| SheetsError::Unavailable(format!("Spreadsheet unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SheetsError::AppendFailed(format!(
                "Append request failed with status {}",
                status
            )));
        }

        tracing::info!(
            spreadsheet_id = %self.spreadsheet_id,
            tab = %self.tab_name,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Spreadsheet row appended"
        );

        Ok(())
    }

    fn backend_type(&self) -> SheetsBackend {
        SheetsBackend::Http
    }
}
