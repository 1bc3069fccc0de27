//! Multipart form extraction.
//!
//! Pulls the raw text fields and receipt file parts out of the posted
//! multipart body. No validation happens here beyond well-formedness of the
//! multipart stream itself; field-level rules live in
//! `remit_core::validation` so they apply regardless of transport.

use axum::extract::Multipart;
use remit_core::models::ReceiptFile;
use remit_core::validation::{RawBasicInfo, RawReimbursementMethod};
use remit_core::AppError;

/// Name of the repeated file field carrying receipt uploads.
pub const RECEIPTS_FIELD: &str = "receipts";

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Extract the raw submission from a multipart request.
pub async fn extract_submission(
    mut multipart: Multipart,
) -> Result<(RawBasicInfo, RawReimbursementMethod, Vec<ReceiptFile>), AppError> {
    let mut basic = RawBasicInfo::default();
    let mut method = RawReimbursementMethod::default();
    let mut receipts = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed multipart request: {}", e)))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == RECEIPTS_FIELD {
            let original_filename = field
                .file_name()
                .map(str::to_string)
                .unwrap_or_else(|| "receipt".to_string());
            let content_type = field
                .content_type()
                .map(str::to_string)
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
            let data = field.bytes().await.map_err(|e| {
                AppError::InvalidInput(format!(
                    "Failed to read receipt '{}': {}",
                    original_filename, e
                ))
            })?;

            receipts.push(ReceiptFile {
                original_filename,
                content_type,
                data,
            });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read field '{}': {}", name, e)))?;

        match name.as_str() {
            "name" => basic.name = Some(value),
            "email" => basic.email = Some(value),
            "item_description" => basic.item_description = Some(value),
            "item_price" => basic.item_price = Some(value),
            "purchase_date" => basic.purchase_date = Some(value),
            "reimbursement_method" => method.method = Some(value),
            "paypal_email" => method.paypal_email = Some(value),
            "check_address" => method.check_address = Some(value),
            "check_phone" => method.check_phone = Some(value),
            "routing_number" => method.routing_number = Some(value),
            "account_number" => method.account_number = Some(value),
            other => {
                tracing::debug!(field = %other, "Ignoring unknown form field");
            }
        }
    }

    Ok((basic, method, receipts))
}
