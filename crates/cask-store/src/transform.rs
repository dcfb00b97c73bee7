//! Path transform strategies.
//!
//! A [`PathTransform`] maps `(storage root, key)` to a [`PathKey`]. Two
//! strategies exist, selected at configuration time:
//!
//! - [`DefaultTransform`] keeps the key parts verbatim: files for `user1`
//!   land in `<root>/user1/` under their original names.
//! - [`CasTransform`] derives the location from digests: the directory path
//!   is the owner's SHA-1 digest split into [`DIR_DEPTH`] blocks of
//!   [`DIR_BLOCK_LEN`] hex characters, and the stored name is the MD5 digest
//!   of the file name with the original extension re-appended. Placement
//!   depends only on the owner, the stored name only on the file name.

use md5::Md5;
use sha1::{Digest, Sha1};

use crate::error::StorageResult;
use crate::key::split_key;
use crate::path_key::PathKey;

/// Hex characters per directory level under the CAS strategy.
pub const DIR_BLOCK_LEN: usize = 8;

/// Directory levels below the root under the CAS strategy.
/// A SHA-1 digest is 40 hex characters: five blocks of eight.
pub const DIR_DEPTH: usize = 5;

/// Strategy mapping a key to its filesystem location.
///
/// Implementations must be pure and deterministic: the same root and key
/// always yield the same [`PathKey`], with no side effects.
pub trait PathTransform: Send + Sync {
    fn transform(&self, root: &str, key: &str) -> StorageResult<PathKey>;
}

/// Flat, human-readable layout: `<root>/<owner>/<file name>`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultTransform;

impl PathTransform for DefaultTransform {
    fn transform(&self, root: &str, key: &str) -> StorageResult<PathKey> {
        let (owner, file_name) = split_key(key)?;
        Ok(PathKey::new(format!("{root}/{owner}"), file_name))
    }
}

/// Content-addressed layout: hash-sharded directories, hashed file names.
#[derive(Clone, Copy, Debug, Default)]
pub struct CasTransform;

impl PathTransform for CasTransform {
    fn transform(&self, root: &str, key: &str) -> StorageResult<PathKey> {
        let (owner, file_name) = split_key(key)?;

        let owner_hex = hex::encode(Sha1::digest(owner.as_bytes()));
        let mut directory = String::with_capacity(root.len() + owner_hex.len() + DIR_DEPTH);
        directory.push_str(root);
        for block in 0..DIR_DEPTH {
            directory.push('/');
            directory.push_str(&owner_hex[block * DIR_BLOCK_LEN..(block + 1) * DIR_BLOCK_LEN]);
        }

        let name_hex = hex::encode(Md5::digest(file_name.as_bytes()));
        Ok(PathKey::new(
            directory,
            format!("{name_hex}{}", file_ext(file_name)),
        ))
    }
}

/// Extension of `name` including the leading dot, or `""` if there is none.
fn file_ext(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[idx..],
        None => "",
    }
}
