//! Project text storage collaborators.
//!
//! # Responsibility
//! - Define the read/write contract the session saves and opens through.
//! - Keep filesystem details out of codecs and the dirty-state engine.
//!
//! # Invariants
//! - Stores move whole UTF-8 documents; they never inspect content.
//! - A failed write leaves any previous file content in place.

pub mod fs_store;
pub mod memory_store;

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

pub use fs_store::FsProjectStore;
pub use memory_store::MemoryProjectStore;

/// Default project file extension.
pub const PROJECT_EXTENSION: &str = "mnproj";
/// Extension accepted when opening in addition to [`PROJECT_EXTENSION`].
pub const ALTERNATE_READABLE_EXTENSION: &str = "xml";
/// File stem used when the user never named the project.
pub const DEFAULT_FILE_STEM: &str = "Untitled";

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage failure surfaced to the host unchanged.
#[derive(Debug)]
pub enum StoreError {
    /// Path has no file name or no parent directory to write into.
    InvalidPath(PathBuf),
    NotFound(PathBuf),
    Read { path: PathBuf, source: io::Error },
    Write { path: PathBuf, source: io::Error },
    /// File bytes are not valid UTF-8.
    Encoding(PathBuf),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPath(path) => write!(f, "invalid project path: {}", path.display()),
            Self::NotFound(path) => write!(f, "project file not found: {}", path.display()),
            Self::Read { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "failed to write {}: {source}", path.display())
            }
            Self::Encoding(path) => write!(f, "project file is not UTF-8: {}", path.display()),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => Some(source),
            Self::InvalidPath(_) | Self::NotFound(_) | Self::Encoding(_) => None,
        }
    }
}

/// Whole-document text storage.
pub trait ProjectStore {
    fn read_text(&self, path: &Path) -> StoreResult<String>;
    fn write_text(&self, path: &Path, text: &str) -> StoreResult<()>;
    fn exists(&self, path: &Path) -> bool;

    /// `path` itself when free, otherwise the first free `stem (N).ext`.
    fn unique_path(&self, path: &Path) -> PathBuf {
        if !self.exists(path) {
            return path.to_path_buf();
        }
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path.extension().map(|e| e.to_string_lossy().into_owned());
        let mut index = 1u32;
        loop {
            let mut name = format!("{stem} ({index})");
            if let Some(extension) = &extension {
                name.push('.');
                name.push_str(extension);
            }
            let candidate = path.with_file_name(name);
            if !self.exists(&candidate) {
                return candidate;
            }
            index += 1;
        }
    }
}

/// Appends `extension` when `path` has none.
pub fn ensure_extension(path: &Path, extension: &str) -> PathBuf {
    if path.extension().map_or(true, |e| e.is_empty()) {
        path.with_extension(extension)
    } else {
        path.to_path_buf()
    }
}

/// Whether `path` carries an extension the open flow accepts.
pub fn is_project_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            e.eq_ignore_ascii_case(PROJECT_EXTENSION)
                || e.eq_ignore_ascii_case(ALTERNATE_READABLE_EXTENSION)
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::{ensure_extension, is_project_path};
    use std::path::{Path, PathBuf};

    #[test]
    fn ensure_extension_only_fills_missing_extension() {
        assert_eq!(
            ensure_extension(Path::new("/tmp/novel"), "mnproj"),
            PathBuf::from("/tmp/novel.mnproj")
        );
        assert_eq!(
            ensure_extension(Path::new("/tmp/novel.xml"), "mnproj"),
            PathBuf::from("/tmp/novel.xml")
        );
    }

    #[test]
    fn project_paths_accept_both_extensions() {
        assert!(is_project_path(Path::new("a.MNPROJ")));
        assert!(is_project_path(Path::new("a.xml")));
        assert!(!is_project_path(Path::new("a.txt")));
    }
}
