use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};

use crate::error::{ErrorResponse, HttpAppError};
use crate::multipart;
use crate::services::submission::{SubmissionResponse, SubmissionService};
use crate::state::AppState;

/// Submit an expense-reimbursement request
///
/// Accepts the form as multipart/form-data: the basic-info and
/// reimbursement-method fields plus one or more `receipts` file parts.
/// Validation failures report every violated constraint at once.
///
/// # Errors
/// - `AppError::Validation` - Invalid form input (all violations listed)
/// - `AppError::ServiceUnavailable` - Spreadsheet or storage unreachable
/// - `AppError::Upload` - A named receipt failed to upload
/// - `AppError::Email` - Confirmation email could not be sent
#[utoipa::path(
    post,
    path = "/api/v0/submissions",
    tag = "submissions",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Submission recorded", body = SubmissionResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 413, description = "Receipts too large", body = ErrorResponse),
        (status = 502, description = "External service failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, multipart),
    fields(
        request_id = %uuid::Uuid::new_v4(),
        operation = "submit_expense"
    )
)]
pub async fn submit_expense(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<SubmissionResponse>), HttpAppError> {
    let (basic, method, receipts) = multipart::extract_submission(multipart)
        .await
        .map_err(HttpAppError::from)?;

    let service = SubmissionService::new(&state);
    let response = service
        .submit(basic, method, receipts)
        .await
        .map_err(HttpAppError::from)?;

    Ok((StatusCode::CREATED, Json(response)))
}
