//! Filesystem-backed project store.

use crate::store::{ProjectStore, StoreError, StoreResult};
use log::{error, info};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Reads and writes project files on the local filesystem.
///
/// Writes go to a sibling temporary file that is renamed over the target, so
/// readers never observe a half-written project.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProjectStore;

impl FsProjectStore {
    pub fn new() -> Self {
        Self
    }
}

fn temp_sibling(path: &Path) -> StoreResult<PathBuf> {
    let name = path
        .file_name()
        .ok_or_else(|| StoreError::InvalidPath(path.to_path_buf()))?;
    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(name);
    temp_name.push(".tmp");
    Ok(path.with_file_name(temp_name))
}

impl ProjectStore for FsProjectStore {
    fn read_text(&self, path: &Path) -> StoreResult<String> {
        let bytes = fs::read(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound(path.to_path_buf()),
            _ => StoreError::Read {
                path: path.to_path_buf(),
                source: err,
            },
        })?;
        String::from_utf8(bytes).map_err(|_| StoreError::Encoding(path.to_path_buf()))
    }

    fn write_text(&self, path: &Path, text: &str) -> StoreResult<()> {
        let started_at = Instant::now();
        let temp = temp_sibling(path)?;
        let write_err = |source: io::Error| StoreError::Write {
            path: path.to_path_buf(),
            source,
        };

        let outcome = fs::File::create(&temp)
            .and_then(|mut file| {
                file.write_all(text.as_bytes())?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&temp, path));

        match outcome {
            Ok(()) => {
                info!(
                    "event=project_write module=store status=ok bytes={} duration_ms={}",
                    text.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                let _ = fs::remove_file(&temp);
                error!(
                    "event=project_write module=store status=error duration_ms={} error_code=write_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(write_err(err))
            }
        }
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
