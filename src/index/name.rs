//! Index name validation.
//!
//! Index names become file names directly under the storage root, so a name
//! must be a single plain path component.

use crate::error::{Result, StorageError};
use crate::types::MAX_INDEX_NAME_LEN;

/// Check that `name` can be used verbatim as a file name under the root
pub fn validate_index_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(StorageError::invalid_name(name, "name is empty"));
    }
    if name.len() > MAX_INDEX_NAME_LEN {
        return Err(StorageError::invalid_name(name, "name is too long"));
    }
    if name == "." || name == ".." {
        return Err(StorageError::invalid_name(name, "name is a relative path"));
    }
    if name.contains(['/', '\\']) {
        return Err(StorageError::invalid_name(name, "name contains a path separator"));
    }
    if name.contains('\0') {
        return Err(StorageError::invalid_name(name, "name contains a NUL byte"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        for name in ["catalog", "users.idx", "a", "with space", "..hidden", "ñandú"] {
            assert!(validate_index_name(name).is_ok(), "{name} should be valid");
        }
        assert!(validate_index_name(&"x".repeat(MAX_INDEX_NAME_LEN)).is_ok());
    }

    #[test]
    fn test_invalid_names() {
        let too_long = "x".repeat(MAX_INDEX_NAME_LEN + 1);
        for name in ["", ".", "..", "../etc/passwd", "a/b", "a\\b", "nul\0byte", too_long.as_str()] {
            let err = validate_index_name(name).unwrap_err();
            assert!(
                matches!(err, StorageError::InvalidIndexName { .. }),
                "{name:?} should be rejected"
            );
        }
    }
}
