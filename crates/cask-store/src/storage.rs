//! Filesystem operations over transform-derived locations.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Component, Path};
use std::sync::Arc;

use crate::error::{StorageError, StorageResult};
use crate::path_key::PathKey;
use crate::transform::{PathTransform, DIR_BLOCK_LEN, DIR_DEPTH};

/// Storage configuration. Set once at construction, immutable thereafter.
#[derive(Clone)]
pub struct StorageOptions {
    /// Base directory all derived paths live under. Never pruned.
    pub root: String,
    /// Strategy mapping keys to locations.
    pub transform: Arc<dyn PathTransform>,
}

impl StorageOptions {
    pub fn new(root: impl Into<String>, transform: Arc<dyn PathTransform>) -> Self {
        Self {
            root: root.into(),
            transform,
        }
    }
}

/// Content-addressable file storage rooted at a configured directory.
///
/// Stateless beyond its immutable options: every operation derives the
/// location fresh and touches only the filesystem, so a `Storage` may be
/// shared across threads without locking. Consistency under concurrent
/// access to the same key is delegated to the filesystem — concurrent
/// writes race last-write-wins, and a read overlapping a write may observe
/// partial content.
#[derive(Clone)]
pub struct Storage {
    options: StorageOptions,
}

impl Storage {
    pub fn new(options: StorageOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &StorageOptions {
        &self.options
    }

    fn derive(&self, key: &str) -> StorageResult<PathKey> {
        self.options.transform.transform(&self.options.root, key)
    }

    /// Stream all bytes from `reader` into the file derived for `key`,
    /// returning the number of bytes written.
    ///
    /// The directory path is created as needed (no error if it already
    /// exists) and an existing file at the target is truncated. The copy
    /// goes through a fixed-size buffer, so memory use is bounded
    /// regardless of payload size; the file handle is closed on every exit
    /// path. A failed write may leave a truncated or zero-length file at
    /// the target — no rollback is attempted.
    pub fn write_stream<R: Read>(&self, key: &str, reader: &mut R) -> StorageResult<u64> {
        let path_key = self.derive(key)?;
        fs::create_dir_all(&path_key.directory)?;

        let path = path_key.full_path();
        let mut file = File::create(&path)?;
        let written = io::copy(reader, &mut file)?;
        tracing::debug!(path = %path.display(), bytes = written, "stored file");
        Ok(written)
    }

    /// Open the file derived for `key` and hand the readable handle to the
    /// caller, who is responsible for closing it after consumption.
    pub fn read_stream(&self, key: &str) -> StorageResult<File> {
        let path = self.derive(key)?.full_path();
        match File::open(&path) {
            Ok(file) => Ok(file),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StorageError::NotFound {
                key: key.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove the file derived for `key`, then prune emptied ancestor
    /// directories up to (never including) the storage root.
    ///
    /// The pruning walk only runs when the derived directory path passes
    /// [`Storage::clean_path`]; a tree that does not match the expected
    /// hash-sharded shape — the root coinciding with unrelated content, or
    /// a transform inconsistent with what is on disk — loses only the leaf
    /// file. The walk stops at the first non-empty directory.
    pub fn delete(&self, key: &str) -> StorageResult<()> {
        let path_key = self.derive(key)?;
        let path = path_key.full_path();
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound {
                    key: key.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        }
        tracing::debug!(path = %path.display(), "deleted file");
        self.prune_empty_ancestors(&path_key)
    }

    fn prune_empty_ancestors(&self, path_key: &PathKey) -> StorageResult<()> {
        if !self.clean_path(&path_key.directory) {
            tracing::debug!(
                directory = %path_key.directory,
                "directory shape not prunable, leaving ancestors in place"
            );
            return Ok(());
        }
        let root = Path::new(&self.options.root);
        let Some(top) = path_key.top_level_dir(&self.options.root) else {
            return Ok(());
        };

        for dir in Path::new(&path_key.directory).ancestors() {
            if dir == root || !dir.starts_with(root) {
                break;
            }
            if fs::read_dir(dir)?.next().is_some() {
                break;
            }
            fs::remove_dir(dir)?;
            tracing::debug!(path = %dir.display(), "pruned empty directory");
            if dir == top {
                break;
            }
        }
        Ok(())
    }

    /// Structural validator for prunable directory paths.
    ///
    /// Relative to the storage root, the path must decompose into exactly
    /// [`DIR_DEPTH`] segments of exactly [`DIR_BLOCK_LEN`] lowercase hex
    /// characters each — the shape [`crate::CasTransform`] produces. Any
    /// deviation yields `false`; in particular the single-segment owner
    /// paths of [`crate::DefaultTransform`] never validate.
    pub fn clean_path(&self, path: impl AsRef<Path>) -> bool {
        let Ok(rel) = path.as_ref().strip_prefix(&self.options.root) else {
            return false;
        };
        let mut segments = 0;
        for component in rel.components() {
            let Component::Normal(segment) = component else {
                return false;
            };
            let Some(segment) = segment.to_str() else {
                return false;
            };
            if segment.len() != DIR_BLOCK_LEN
                || !segment.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f'))
            {
                return false;
            }
            segments += 1;
        }
        segments == DIR_DEPTH
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("root", &self.options.root)
            .finish_non_exhaustive()
    }
}
