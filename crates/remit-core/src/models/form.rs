//! Typed form records.
//!
//! `BasicInfo` and `ReimbursementMethod` only exist in validated form: they
//! are produced by `crate::validation` and are immutable once constructed.
//! Partial or invalid state lives in the raw input types, never here.

use bytes::Bytes;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A receipt file as received from the form.
#[derive(Debug, Clone)]
pub struct ReceiptFile {
    pub original_filename: String,
    pub content_type: String,
    pub data: Bytes,
}

impl ReceiptFile {
    /// File extension from the original filename, lowercased.
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.original_filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }
}

/// A receipt paired with its generated identifier. Lives only for the
/// duration of one submission.
#[derive(Debug, Clone)]
pub struct ReceiptUpload {
    pub id: String,
    pub file: ReceiptFile,
}

impl ReceiptUpload {
    /// Destination filename: the generated id plus the original extension.
    pub fn filename(&self) -> String {
        match self.file.extension() {
            Some(ext) => format!("{}.{}", self.id, ext),
            None => self.id.clone(),
        }
    }
}

/// Validated submitter and purchase information.
#[derive(Debug, Clone)]
pub struct BasicInfo {
    pub name: String,
    pub email: String,
    pub item_description: String,
    pub item_price: f64,
    pub purchase_date: NaiveDate,
    pub receipts: Vec<ReceiptFile>,
}

/// The payout channel chosen by the submitter. Exactly one variant is
/// active per submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reimbursement_method", rename_all = "snake_case")]
pub enum ReimbursementMethod {
    Paypal {
        paypal_email: String,
    },
    Check {
        check_address: String,
        check_phone: String,
    },
    DirectDeposit {
        routing_number: String,
        account_number: String,
    },
    AlreadyKnown,
}

impl ReimbursementMethod {
    /// Method tag as recorded in the spreadsheet.
    pub fn method_name(&self) -> &'static str {
        match self {
            ReimbursementMethod::Paypal { .. } => "paypal",
            ReimbursementMethod::Check { .. } => "check",
            ReimbursementMethod::DirectDeposit { .. } => "direct_deposit",
            ReimbursementMethod::AlreadyKnown => "already_known",
        }
    }
}
