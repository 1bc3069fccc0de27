//! Server-side form validation.
//!
//! Raw user-entered values are re-validated here regardless of any
//! client-side checks. Validation either yields fully-typed records or a
//! list of human-readable messages, one per violated constraint — ALL
//! violations are collected, across both records and every receipt file.

use chrono::Utc;
use validator::ValidateEmail;

use crate::models::{BasicInfo, ReceiptFile, ReimbursementMethod};

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 100;
const DESCRIPTION_MIN: usize = 2;
const DESCRIPTION_MAX: usize = 500;
const MIN_ITEM_PRICE: f64 = 1.0;
const MIN_ACCOUNT_NUMBER_LEN: usize = 4;

/// Unvalidated submitter and purchase fields, exactly as posted.
#[derive(Debug, Clone, Default)]
pub struct RawBasicInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub item_description: Option<String>,
    pub item_price: Option<String>,
    pub purchase_date: Option<String>,
}

/// Unvalidated reimbursement-method fields, exactly as posted.
#[derive(Debug, Clone, Default)]
pub struct RawReimbursementMethod {
    pub method: Option<String>,
    pub paypal_email: Option<String>,
    pub check_address: Option<String>,
    pub check_phone: Option<String>,
    pub routing_number: Option<String>,
    pub account_number: Option<String>,
}

/// Receipt acceptance rules, sourced from configuration.
#[derive(Debug, Clone)]
pub struct ReceiptPolicy {
    pub max_size_bytes: usize,
    pub allowed_content_types: Vec<String>,
}

impl ReceiptPolicy {
    fn allows(&self, content_type: &str) -> bool {
        let normalized = content_type.to_lowercase();
        self.allowed_content_types.iter().any(|ct| *ct == normalized)
    }
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Validate the whole submission. Returns the typed records, or every
/// violated constraint across both records and all receipts.
pub fn validate_submission(
    basic: &RawBasicInfo,
    method: &RawReimbursementMethod,
    receipts: Vec<ReceiptFile>,
    policy: &ReceiptPolicy,
) -> Result<(BasicInfo, ReimbursementMethod), Vec<String>> {
    let mut errors = Vec::new();

    let basic_info = validate_basic_info(basic, receipts, policy, &mut errors);
    let reimbursement = validate_reimbursement_method(method, &mut errors);

    match (basic_info, reimbursement) {
        (Some(basic_info), Some(reimbursement)) if errors.is_empty() => {
            Ok((basic_info, reimbursement))
        }
        _ => Err(errors),
    }
}

fn validate_basic_info(
    raw: &RawBasicInfo,
    receipts: Vec<ReceiptFile>,
    policy: &ReceiptPolicy,
    errors: &mut Vec<String>,
) -> Option<BasicInfo> {
    let name = match trimmed(&raw.name) {
        Some(name) if (NAME_MIN..=NAME_MAX).contains(&name.chars().count()) => {
            Some(name.to_string())
        }
        Some(_) => {
            errors.push(format!(
                "Name must be between {} and {} characters",
                NAME_MIN, NAME_MAX
            ));
            None
        }
        None => {
            errors.push("Name is required".to_string());
            None
        }
    };

    let email = match trimmed(&raw.email) {
        Some(email) if email.validate_email() => Some(email.to_string()),
        _ => {
            errors.push("A valid email is required".to_string());
            None
        }
    };

    let item_description = match trimmed(&raw.item_description) {
        Some(desc) if (DESCRIPTION_MIN..=DESCRIPTION_MAX).contains(&desc.chars().count()) => {
            Some(desc.to_string())
        }
        Some(_) => {
            errors.push(format!(
                "Item description must be between {} and {} characters",
                DESCRIPTION_MIN, DESCRIPTION_MAX
            ));
            None
        }
        None => {
            errors.push("Item description is required".to_string());
            None
        }
    };

    let item_price = match trimmed(&raw.item_price) {
        Some(price) => match price.parse::<f64>() {
            Ok(price) if price.is_finite() && price >= MIN_ITEM_PRICE => Some(price),
            Ok(_) => {
                errors.push("Item price must be at least 1".to_string());
                None
            }
            Err(_) => {
                errors.push("Item price must be a number".to_string());
                None
            }
        },
        None => {
            errors.push("Item price is required".to_string());
            None
        }
    };

    let purchase_date = match trimmed(&raw.purchase_date) {
        Some(date) => match chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(date) if date <= Utc::now().date_naive() => Some(date),
            Ok(_) => {
                errors.push("Purchase date must not be in the future".to_string());
                None
            }
            Err(_) => {
                errors.push("Purchase date must be a valid date (YYYY-MM-DD)".to_string());
                None
            }
        },
        None => {
            errors.push("Purchase date is required".to_string());
            None
        }
    };

    if receipts.is_empty() {
        errors.push("At least one receipt is required".to_string());
    }
    for receipt in &receipts {
        validate_receipt(receipt, policy, errors);
    }

    match (name, email, item_description, item_price, purchase_date) {
        (Some(name), Some(email), Some(item_description), Some(item_price), Some(purchase_date))
            if !receipts.is_empty() =>
        {
            Some(BasicInfo {
                name,
                email,
                item_description,
                item_price,
                purchase_date,
                receipts,
            })
        }
        _ => None,
    }
}

fn validate_receipt(receipt: &ReceiptFile, policy: &ReceiptPolicy, errors: &mut Vec<String>) {
    if receipt.data.is_empty() {
        errors.push(format!("Receipt '{}' is empty", receipt.original_filename));
    }
    if receipt.data.len() > policy.max_size_bytes {
        errors.push(format!(
            "Receipt '{}' exceeds the maximum size of {} MB",
            receipt.original_filename,
            policy.max_size_bytes / 1024 / 1024
        ));
    }
    if !policy.allows(&receipt.content_type) {
        errors.push(format!(
            "Receipt '{}' has unsupported content type '{}' (allowed: {})",
            receipt.original_filename,
            receipt.content_type,
            policy.allowed_content_types.join(", ")
        ));
    }
}

fn validate_reimbursement_method(
    raw: &RawReimbursementMethod,
    errors: &mut Vec<String>,
) -> Option<ReimbursementMethod> {
    match trimmed(&raw.method) {
        Some("paypal") => match trimmed(&raw.paypal_email) {
            Some(email) if email.validate_email() => Some(ReimbursementMethod::Paypal {
                paypal_email: email.to_string(),
            }),
            _ => {
                errors.push("A valid PayPal email is required".to_string());
                None
            }
        },
        Some("check") => {
            let address = trimmed(&raw.check_address);
            let phone = trimmed(&raw.check_phone);
            if address.is_none() {
                errors.push("Check address is required".to_string());
            }
            if phone.is_none() {
                errors.push("Check phone is required".to_string());
            }
            match (address, phone) {
                (Some(address), Some(phone)) => Some(ReimbursementMethod::Check {
                    check_address: address.to_string(),
                    check_phone: phone.to_string(),
                }),
                _ => None,
            }
        }
        Some("direct_deposit") => {
            let routing = trimmed(&raw.routing_number);
            if routing.is_none() {
                errors.push("Routing number is required".to_string());
            }
            let account = match trimmed(&raw.account_number) {
                Some(account) if account.chars().count() >= MIN_ACCOUNT_NUMBER_LEN => Some(account),
                Some(_) => {
                    errors.push(format!(
                        "Account number must be at least {} characters",
                        MIN_ACCOUNT_NUMBER_LEN
                    ));
                    None
                }
                None => {
                    errors.push("Account number is required".to_string());
                    None
                }
            };
            match (routing, account) {
                (Some(routing), Some(account)) => Some(ReimbursementMethod::DirectDeposit {
                    routing_number: routing.to_string(),
                    account_number: account.to_string(),
                }),
                _ => None,
            }
        }
        Some("already_known") => Some(ReimbursementMethod::AlreadyKnown),
        Some(other) => {
            errors.push(format!("Unknown reimbursement method '{}'", other));
            None
        }
        None => {
            errors.push("Reimbursement method is required".to_string());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn policy() -> ReceiptPolicy {
        ReceiptPolicy {
            max_size_bytes: 10 * 1024 * 1024,
            allowed_content_types: vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/gif".to_string(),
                "application/pdf".to_string(),
            ],
        }
    }

    fn receipt() -> ReceiptFile {
        ReceiptFile {
            original_filename: "receipt.png".to_string(),
            content_type: "image/png".to_string(),
            data: Bytes::from_static(b"not really a png"),
        }
    }

    fn valid_basic() -> RawBasicInfo {
        RawBasicInfo {
            name: Some("Ada Lovelace".to_string()),
            email: Some("ada@example.org".to_string()),
            item_description: Some("Wood glue for the workshop".to_string()),
            item_price: Some("12.50".to_string()),
            purchase_date: Some("2024-03-01".to_string()),
        }
    }

    fn paypal_method() -> RawReimbursementMethod {
        RawReimbursementMethod {
            method: Some("paypal".to_string()),
            paypal_email: Some("ada.pay@example.org".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn valid_submission_produces_typed_records() {
        let (basic, method) =
            validate_submission(&valid_basic(), &paypal_method(), vec![receipt()], &policy())
                .expect("valid submission");
        assert_eq!(basic.name, "Ada Lovelace");
        assert_eq!(basic.item_price, 12.5);
        assert_eq!(basic.receipts.len(), 1);
        assert_eq!(
            method,
            ReimbursementMethod::Paypal {
                paypal_email: "ada.pay@example.org".to_string()
            }
        );
    }

    #[test]
    fn price_below_one_fails_and_names_the_price_field() {
        let mut basic = valid_basic();
        basic.item_price = Some("0.99".to_string());
        let errors =
            validate_submission(&basic, &paypal_method(), vec![receipt()], &policy()).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("Item price")), "{errors:?}");
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let mut basic = valid_basic();
        basic.item_price = Some("twelve".to_string());
        let errors =
            validate_submission(&basic, &paypal_method(), vec![receipt()], &policy()).unwrap_err();
        assert!(errors.iter().any(|e| e == "Item price must be a number"));
    }

    #[test]
    fn future_purchase_date_is_rejected() {
        let mut basic = valid_basic();
        let tomorrow = Utc::now().date_naive() + chrono::Days::new(1);
        basic.purchase_date = Some(tomorrow.format("%Y-%m-%d").to_string());
        let errors =
            validate_submission(&basic, &paypal_method(), vec![receipt()], &policy()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e == "Purchase date must not be in the future"));
    }

    #[test]
    fn short_account_number_fails_direct_deposit() {
        let method = RawReimbursementMethod {
            method: Some("direct_deposit".to_string()),
            routing_number: Some("021000021".to_string()),
            account_number: Some("123".to_string()),
            ..Default::default()
        };
        let errors =
            validate_submission(&valid_basic(), &method, vec![receipt()], &policy()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e == "Account number must be at least 4 characters"));
    }

    #[test]
    fn check_requires_address_and_phone() {
        let method = RawReimbursementMethod {
            method: Some("check".to_string()),
            ..Default::default()
        };
        let errors =
            validate_submission(&valid_basic(), &method, vec![receipt()], &policy()).unwrap_err();
        assert!(errors.iter().any(|e| e == "Check address is required"));
        assert!(errors.iter().any(|e| e == "Check phone is required"));
    }

    #[test]
    fn missing_receipts_are_rejected() {
        let errors =
            validate_submission(&valid_basic(), &paypal_method(), vec![], &policy()).unwrap_err();
        assert_eq!(errors, vec!["At least one receipt is required".to_string()]);
    }

    #[test]
    fn oversized_and_wrong_type_receipts_are_rejected() {
        let policy = ReceiptPolicy {
            max_size_bytes: 4,
            ..policy()
        };
        let big = ReceiptFile {
            original_filename: "big.png".to_string(),
            content_type: "image/png".to_string(),
            data: Bytes::from_static(b"too large"),
        };
        let exe = ReceiptFile {
            original_filename: "virus.exe".to_string(),
            content_type: "application/x-msdownload".to_string(),
            data: Bytes::from_static(b"mz"),
        };
        let errors =
            validate_submission(&valid_basic(), &paypal_method(), vec![big, exe], &policy)
                .unwrap_err();
        assert!(errors.iter().any(|e| e.contains("big.png")));
        assert!(errors.iter().any(|e| e.contains("virus.exe")));
    }

    #[test]
    fn all_violations_are_reported_together() {
        let basic = RawBasicInfo {
            name: Some("A".to_string()),
            email: Some("not-an-email".to_string()),
            item_description: None,
            item_price: Some("0".to_string()),
            purchase_date: None,
        };
        let method = RawReimbursementMethod {
            method: Some("direct_deposit".to_string()),
            account_number: Some("12".to_string()),
            ..Default::default()
        };
        let errors = validate_submission(&basic, &method, vec![], &policy()).unwrap_err();

        // One message per violated constraint, across both records.
        assert!(errors.len() >= 7, "{errors:?}");
        assert!(errors.iter().any(|e| e.contains("Name")));
        assert!(errors.iter().any(|e| e.contains("email")));
        assert!(errors.iter().any(|e| e.contains("Item description")));
        assert!(errors.iter().any(|e| e.contains("Item price")));
        assert!(errors.iter().any(|e| e.contains("Purchase date")));
        assert!(errors.iter().any(|e| e.contains("receipt")));
        assert!(errors.iter().any(|e| e.contains("Routing number")));
        assert!(errors.iter().any(|e| e.contains("Account number")));
    }

    #[test]
    fn unknown_method_is_rejected() {
        let method = RawReimbursementMethod {
            method: Some("cash".to_string()),
            ..Default::default()
        };
        let errors =
            validate_submission(&valid_basic(), &method, vec![receipt()], &policy()).unwrap_err();
        assert_eq!(errors, vec!["Unknown reimbursement method 'cash'".to_string()]);
    }

    #[test]
    fn already_known_needs_no_extra_fields() {
        let method = RawReimbursementMethod {
            method: Some("already_known".to_string()),
            ..Default::default()
        };
        let (_, method) =
            validate_submission(&valid_basic(), &method, vec![receipt()], &policy()).unwrap();
        assert_eq!(method, ReimbursementMethod::AlreadyKnown);
    }
}
