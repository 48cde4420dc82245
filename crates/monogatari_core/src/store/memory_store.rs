//! In-memory project store for hosts without a filesystem and for tests.

use crate::store::{ProjectStore, StoreError, StoreResult};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct MemoryProjectStore {
    files: RefCell<HashMap<PathBuf, String>>,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.files.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.borrow().is_empty()
    }
}

impl ProjectStore for MemoryProjectStore {
    fn read_text(&self, path: &Path) -> StoreResult<String> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(path.to_path_buf()))
    }

    fn write_text(&self, path: &Path, text: &str) -> StoreResult<()> {
        if path.file_name().is_none() {
            return Err(StoreError::InvalidPath(path.to_path_buf()));
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), text.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }
}
