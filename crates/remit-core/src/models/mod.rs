pub mod form;
pub mod row;

pub use form::{BasicInfo, ReceiptFile, ReceiptUpload, ReimbursementMethod};
pub use row::{confirmation_body, mask_account_number, SubmissionRow};
