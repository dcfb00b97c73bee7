//! Content-addressable file storage for Cask.
//!
//! This crate owns the mapping from logical keys to filesystem locations and
//! the streaming read/write/delete operations against a configured storage
//! root. A key names an owner and a file (`user1^report.pdf`); a
//! [`PathTransform`] turns it into a [`PathKey`] (directory path + stored
//! file name), and [`Storage`] performs the filesystem work.
//!
//! # Path Strategies
//!
//! - [`DefaultTransform`] — flat, human-readable: `<root>/<owner>/<file>`.
//! - [`CasTransform`] — hash-sharded: the owner's SHA-1 digest is split into
//!   fixed-width hex blocks forming the directory path, and the file is
//!   stored under the MD5 digest of its name (original extension kept).
//!
//! # Design Rules
//!
//! 1. Path derivation is pure: same root and key always yield the same
//!    location, and nothing is cached between calls — the filesystem is the
//!    sole source of truth.
//! 2. Reads and writes stream through a bounded buffer; memory use is O(1)
//!    in file size.
//! 3. [`Storage`] holds no mutable state, so concurrent use needs no
//!    locking. Same-key races are delegated to the filesystem:
//!    last-write-wins, and read-while-write may observe partial content.
//! 4. Deletion prunes emptied shard directories but never the storage root,
//!    and only prunes trees whose shape passes [`Storage::clean_path`].
//! 5. All I/O errors are propagated, never retried internally.

pub mod error;
pub mod key;
pub mod path_key;
pub mod storage;
pub mod transform;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StorageError, StorageResult};
pub use key::{split_key, KEY_SEPARATOR};
pub use path_key::PathKey;
pub use storage::{Storage, StorageOptions};
pub use transform::{CasTransform, DefaultTransform, PathTransform, DIR_BLOCK_LEN, DIR_DEPTH};
