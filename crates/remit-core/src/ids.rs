//! Submission and receipt identifier generation.
//!
//! Identifiers are deterministic: the submitter name (non-alphanumeric
//! characters replaced with `_`) plus a UTC timestamp, with a per-receipt
//! index suffix. Uniqueness is best-effort only; two submissions with the
//! same name in the same second collide.

use chrono::{DateTime, Utc};

use crate::models::{ReceiptFile, ReceiptUpload};

/// Replace every character that is not ASCII-alphanumeric with `_`.
pub fn clean_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Identifier for one submission: `<cleaned_name>_<YYYY-MM-DD_HH-MM-SS>` in UTC.
pub fn submission_id(submitter_name: &str, at: DateTime<Utc>) -> String {
    format!(
        "{}_{}",
        clean_name(submitter_name),
        at.format("%Y-%m-%d_%H-%M-%S")
    )
}

/// Pair each receipt with its identifier: `<submission_id>_<index>`.
pub fn assign_receipt_ids(
    receipts: Vec<ReceiptFile>,
    submitter_name: &str,
    at: DateTime<Utc>,
) -> Vec<ReceiptUpload> {
    let submission = submission_id(submitter_name, at);
    receipts
        .into_iter()
        .enumerate()
        .map(|(index, file)| ReceiptUpload {
            id: format!("{}_{}", submission, index),
            file,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use chrono::TimeZone;

    fn receipt(name: &str) -> ReceiptFile {
        ReceiptFile {
            original_filename: name.to_string(),
            content_type: "image/png".to_string(),
            data: Bytes::from_static(b"png"),
        }
    }

    #[test]
    fn clean_name_replaces_non_alphanumerics() {
        assert_eq!(clean_name("Ada Lovelace"), "Ada_Lovelace");
        assert_eq!(clean_name("J. O'Neill-Smith"), "J___O_Neill_Smith");
        assert_eq!(clean_name("plain"), "plain");
    }

    #[test]
    fn submission_id_is_deterministic() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 5, 7).unwrap();
        let id = submission_id("Ada Lovelace", at);
        assert_eq!(id, "Ada_Lovelace_2024-03-01_09-05-07");
        assert_eq!(submission_id("Ada Lovelace", at), id);
    }

    #[test]
    fn receipt_ids_are_indexed() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 5, 7).unwrap();
        let uploads = assign_receipt_ids(
            vec![receipt("a.png"), receipt("b.png")],
            "Ada Lovelace",
            at,
        );
        assert_eq!(uploads.len(), 2);
        assert_eq!(uploads[0].id, "Ada_Lovelace_2024-03-01_09-05-07_0");
        assert_eq!(uploads[1].id, "Ada_Lovelace_2024-03-01_09-05-07_1");
        assert_eq!(uploads[1].file.original_filename, "b.png");
    }
}
