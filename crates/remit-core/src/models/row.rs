//! Spreadsheet row assembly and the confirmation-email body.
//!
//! A `SubmissionRow` is an ordered, flat string-keyed mapping. Only the
//! columns relevant to the chosen reimbursement method are present; backends
//! that need a fixed column set project the row onto `SubmissionRow::HEADERS`
//! with blanks for absent columns.

use super::form::{BasicInfo, ReimbursementMethod};

pub const NAME: &str = "Name";
pub const EMAIL: &str = "Email";
pub const ITEM_DESCRIPTION: &str = "Item Description";
pub const ITEM_PRICE: &str = "Item Price";
pub const PURCHASE_DATE: &str = "Purchase Date";
pub const REIMBURSEMENT_METHOD: &str = "Reimbursement Method";
pub const PAYPAL_EMAIL: &str = "PayPal Email";
pub const CHECK_ADDRESS: &str = "Check Address";
pub const CHECK_PHONE: &str = "Check Phone";
pub const ROUTING_NUMBER: &str = "Routing Number";
pub const ACCOUNT_NUMBER: &str = "Account Number";
pub const FILES: &str = "Files";

/// One append-only spreadsheet record for a single expense submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRow {
    columns: Vec<(String, String)>,
}

impl SubmissionRow {
    /// The full canonical column set, in sheet order.
    pub const HEADERS: [&'static str; 12] = [
        NAME,
        EMAIL,
        ITEM_DESCRIPTION,
        ITEM_PRICE,
        PURCHASE_DATE,
        REIMBURSEMENT_METHOD,
        PAYPAL_EMAIL,
        CHECK_ADDRESS,
        CHECK_PHONE,
        ROUTING_NUMBER,
        ACCOUNT_NUMBER,
        FILES,
    ];

    /// Build the row for a validated submission, without the `Files` column.
    /// Account numbers appear unmasked; masking is applied only to the email
    /// copy by `confirmation_body`.
    pub fn from_submission(basic: &BasicInfo, method: &ReimbursementMethod) -> Self {
        let mut columns = vec![
            (NAME.to_string(), basic.name.clone()),
            (EMAIL.to_string(), basic.email.clone()),
            (ITEM_DESCRIPTION.to_string(), basic.item_description.clone()),
            (ITEM_PRICE.to_string(), format!("{}", basic.item_price)),
            (
                PURCHASE_DATE.to_string(),
                basic.purchase_date.format("%Y-%m-%d").to_string(),
            ),
            (
                REIMBURSEMENT_METHOD.to_string(),
                method.method_name().to_string(),
            ),
        ];

        match method {
            ReimbursementMethod::Paypal { paypal_email } => {
                columns.push((PAYPAL_EMAIL.to_string(), paypal_email.clone()));
            }
            ReimbursementMethod::Check {
                check_address,
                check_phone,
            } => {
                columns.push((CHECK_ADDRESS.to_string(), check_address.clone()));
                columns.push((CHECK_PHONE.to_string(), check_phone.clone()));
            }
            ReimbursementMethod::DirectDeposit {
                routing_number,
                account_number,
            } => {
                columns.push((ROUTING_NUMBER.to_string(), routing_number.clone()));
                columns.push((ACCOUNT_NUMBER.to_string(), account_number.clone()));
            }
            ReimbursementMethod::AlreadyKnown => {}
        }

        SubmissionRow { columns }
    }

    /// Return a copy of this row with the `Files` column appended: the
    /// uploaded-receipt links joined by a single space.
    pub fn with_files(&self, links: &[String]) -> Self {
        let mut columns = self.columns.clone();
        columns.push((FILES.to_string(), links.join(" ")));
        SubmissionRow { columns }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Project the row onto a fixed header set, blank-filling absent columns.
    pub fn project(&self, headers: &[&str]) -> Vec<String> {
        headers
            .iter()
            .map(|header| self.get(header).unwrap_or_default().to_string())
            .collect()
    }
}

/// Mask an account number down to its last four characters.
pub fn mask_account_number(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let start = chars.len().saturating_sub(4);
    let tail: String = chars[start..].iter().collect();
    format!("********{}", tail)
}

/// Plain-text confirmation-email body: a thank-you line followed by the row
/// as `Key: Value` lines, with the account number masked and receipt links
/// deliberately omitted.
pub fn confirmation_body(row: &SubmissionRow) -> String {
    let mut body = String::from("Thanks for submitting your expense report!\n");
    for (name, value) in row.columns() {
        if name == FILES {
            continue;
        }
        body.push('\n');
        body.push_str(name);
        body.push_str(": ");
        if name == ACCOUNT_NUMBER {
            body.push_str(&mask_account_number(value));
        } else {
            body.push_str(value);
        }
    }
    body
}
