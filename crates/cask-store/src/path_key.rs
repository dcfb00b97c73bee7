use std::path::{Path, PathBuf};

/// The derived location for a key: a directory path plus a stored file name.
///
/// Produced fresh by a [`crate::PathTransform`] on every operation and never
/// cached. The directory path always begins with the storage root it was
/// derived against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathKey {
    /// `/`-joined directory path, starting with the storage root.
    pub directory: String,
    /// File name within `directory`.
    pub file_name: String,
}

impl PathKey {
    pub fn new(directory: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            file_name: file_name.into(),
        }
    }

    /// Full path of the stored file.
    pub fn full_path(&self) -> PathBuf {
        Path::new(&self.directory).join(&self.file_name)
    }

    /// The first directory below `root` on this key's path, as a full path
    /// (`<root>/<first segment>`). This is the outermost directory the
    /// pruning walk in delete may remove; `None` if the directory path is
    /// not under `root` or has no segment below it.
    pub fn top_level_dir(&self, root: &str) -> Option<PathBuf> {
        let rel = Path::new(&self.directory).strip_prefix(root).ok()?;
        let first = rel.components().next()?;
        Some(Path::new(root).join(first))
    }
}
