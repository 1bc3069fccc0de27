//! The submission pipeline.
//!
//! Stateless per call: validate -> open spreadsheet -> assign receipt ids ->
//! upload receipts concurrently -> append row -> send confirmation email.
//! The first failure aborts the remaining steps and is surfaced verbatim;
//! completed steps are never rolled back and nothing is retried.

use std::sync::Arc;

use chrono::Utc;
use futures::future::try_join_all;
use serde::Serialize;
use utoipa::ToSchema;

use remit_core::ids::{assign_receipt_ids, submission_id};
use remit_core::models::{
    confirmation_body, BasicInfo, ReceiptFile, ReceiptUpload, SubmissionRow,
};
use remit_core::validation::{validate_submission, RawBasicInfo, RawReimbursementMethod};
use remit_core::AppError;

use crate::services::email::{EmailAttachment, OutgoingEmail};
use crate::state::AppState;

const CONFIRMATION_SUBJECT: &str = "Your Expense Report Submission";

/// Response for an accepted submission.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubmissionResponse {
    /// Identifier shared by this submission's uploaded receipts
    pub submission_id: String,
    /// Viewing links for the archived receipts
    pub files: Vec<String>,
}

/// Orchestrates one expense submission end to end.
pub struct SubmissionService {
    state: Arc<AppState>,
}

impl SubmissionService {
    pub fn new(state: &Arc<AppState>) -> Self {
        SubmissionService {
            state: state.clone(),
        }
    }

    pub async fn submit(
        &self,
        basic: RawBasicInfo,
        method: RawReimbursementMethod,
        receipts: Vec<ReceiptFile>,
    ) -> Result<SubmissionResponse, AppError> {
        // 1. Re-validate everything server-side; the client cannot be trusted.
        let (basic, method) =
            validate_submission(&basic, &method, receipts, &self.state.receipts)
                .map_err(AppError::Validation)?;

        // 2. Verify the spreadsheet handle before any receipt leaves the process.
        self.state.spreadsheet.open().await?;

        // 3. Deterministic identifiers from submitter name + UTC timestamp.
        let now = Utc::now();
        let submission = submission_id(&basic.name, now);
        let uploads = assign_receipt_ids(basic.receipts.clone(), &basic.name, now);

        tracing::info!(
            submission_id = %submission,
            receipts = uploads.len(),
            method = method.method_name(),
            "Processing expense submission"
        );

        // 4. Upload all receipts concurrently; the first failure wins and
        // already-uploaded files stay where they are.
        let stored = try_join_all(uploads.iter().map(|upload| {
            let storage = self.state.storage.clone();
            async move {
                storage
                    .upload(
                        &upload.filename(),
                        &upload.file.content_type,
                        upload.file.data.to_vec(),
                    )
                    .await
                    .map_err(|e| AppError::Upload {
                        filename: upload.file.original_filename.clone(),
                        message: e.to_string(),
                    })
            }
        }))
        .await?;

        // 5. One append-only row, unmasked, with the receipt links.
        let row = SubmissionRow::from_submission(&basic, &method);
        let links: Vec<String> = stored.iter().map(|s| s.url.clone()).collect();
        self.state.spreadsheet.append_row(&row.with_files(&links)).await?;

        // 6. Confirmation email: masked account number, receipts attached,
        // links deliberately omitted from the body.
        let email = confirmation_email(
            &basic,
            &row,
            &uploads,
            self.state.config.confirmation_cc.clone(),
        );
        self.state.mailer.send(email).await?;

        tracing::info!(submission_id = %submission, "Expense submission complete");

        Ok(SubmissionResponse {
            submission_id: submission,
            files: links,
        })
    }
}

fn confirmation_email(
    basic: &BasicInfo,
    row: &SubmissionRow,
    uploads: &[ReceiptUpload],
    cc: Option<String>,
) -> OutgoingEmail {
    OutgoingEmail {
        to: basic.email.clone(),
        cc: cc.into_iter().collect(),
        subject: CONFIRMATION_SUBJECT.to_string(),
        body: confirmation_body(row),
        attachments: uploads
            .iter()
            .map(|upload| EmailAttachment {
                filename: upload.filename(),
                content_type: upload.file.content_type.clone(),
                data: upload.file.data.to_vec(),
            })
            .collect(),
    }
}
