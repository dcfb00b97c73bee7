//! Key convention: `<owner><separator><file name>`.
//!
//! A key names exactly one owner and one file. The separator must occur
//! exactly once; the owner part must be non-empty; neither part may contain
//! path separators (the derived location must stay inside the storage root).
//! The file name may carry an extension (`.pdf`, `.txt`, ...), which the CAS
//! strategy preserves on the stored name.

use crate::error::{StorageError, StorageResult};

/// Separator between the owner and the file name in a key.
pub const KEY_SEPARATOR: char = '^';

/// Split a key into its `(owner, file_name)` parts.
///
/// # Examples
///
/// ```
/// use cask_store::split_key;
///
/// assert_eq!(split_key("user1^abc.pdf").unwrap(), ("user1", "abc.pdf"));
/// assert!(split_key("no-separator").is_err());
/// assert!(split_key("a^b^c").is_err());
/// ```
pub fn split_key(key: &str) -> StorageResult<(&str, &str)> {
    let mut parts = key.split(KEY_SEPARATOR);
    let (owner, file_name) = match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(file_name), None) => (owner, file_name),
        _ => {
            return Err(StorageError::malformed(
                key,
                format!("expected exactly one {KEY_SEPARATOR:?} separator"),
            ));
        }
    };

    if owner.is_empty() {
        return Err(StorageError::malformed(key, "owner part must not be empty"));
    }
    if owner.contains(['/', '\\']) || file_name.contains(['/', '\\']) {
        return Err(StorageError::malformed(
            key,
            "parts must not contain path separators",
        ));
    }

    Ok((owner, file_name))
}
