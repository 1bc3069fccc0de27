//! Storage key generation shared by all backends.

use crate::traits::{StorageError, StorageResult};

/// Build the storage key for a receipt: `{folder}/{filename}`.
///
/// Filenames are derived from user input (the submitter name feeds the
/// receipt identifier), so keys are validated against path traversal here
/// before any backend touches them.
pub fn receipt_key(folder: &str, filename: &str) -> StorageResult<String> {
    if filename.is_empty() {
        return Err(StorageError::InvalidKey("Filename is empty".to_string()));
    }
    let key = format!("{}/{}", folder.trim_matches('/'), filename);
    if key.contains("..") || key.starts_with('/') || filename.contains('/') {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_folder_scoped() {
        assert_eq!(
            receipt_key("receipts", "Ada_2024-03-01_10-00-00_0.png").unwrap(),
            "receipts/Ada_2024-03-01_10-00-00_0.png"
        );
        assert_eq!(receipt_key("receipts/", "a.pdf").unwrap(), "receipts/a.pdf");
    }

    #[test]
    fn traversal_and_nested_filenames_are_rejected() {
        assert!(matches!(
            receipt_key("receipts", "../secret.png"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(
            receipt_key("receipts", "nested/secret.png"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(
            receipt_key("receipts", ""),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
