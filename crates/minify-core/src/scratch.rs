//! Scratch files for staging submitted source.
//!
//! Each request stages its input as a uniquely named file that exists only
//! between `acquire` and `release`. Names come from tempfile's
//! collision-resistant generator, so concurrent requests never share a
//! path and no locking is needed beyond that uniqueness.

use camino::{Utf8Path, Utf8PathBuf};
use std::path::PathBuf;
use tempfile::TempPath;
use tracing::warn;

/// Errors from scratch file allocation or writes.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to allocate scratch file: {0}")]
    Allocate(std::io::Error),

    #[error("scratch path is not valid UTF-8: {0}")]
    NonUtf8Path(String),

    #[error("failed to write scratch file: {0}")]
    Write(std::io::Error),
}

/// A uniquely named scratch file, exclusively owned by one request between
/// acquisition and release.
///
/// Dropping an unreleased unit still deletes the file, so a request that is
/// aborted mid-pipeline cannot leak its staged source.
#[derive(Debug)]
pub struct ScratchUnit {
    path: Utf8PathBuf,
    guard: Option<TempPath>,
}

impl ScratchUnit {
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

/// Allocates uniquely named `.js` scratch files under one root directory.
#[derive(Debug, Clone)]
pub struct ScratchStore {
    root: PathBuf,
}

impl ScratchStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Store rooted at the OS temp directory.
    pub fn in_temp_dir() -> Self {
        Self::new(std::env::temp_dir())
    }

    /// Allocate a fresh, process-unique scratch file. The file is created
    /// empty to reserve the name; content comes with [`ScratchStore::write`].
    pub fn acquire(&self) -> Result<ScratchUnit, StorageError> {
        let file = tempfile::Builder::new()
            .prefix("minify-")
            .suffix(".js")
            .tempfile_in(&self.root)
            .map_err(StorageError::Allocate)?;
        let guard = file.into_temp_path();
        let path = Utf8PathBuf::from_path_buf(guard.to_path_buf())
            .map_err(|p| StorageError::NonUtf8Path(p.display().to_string()))?;
        Ok(ScratchUnit {
            path,
            guard: Some(guard),
        })
    }

    /// Write the submitted source into an acquired unit.
    pub async fn write(&self, unit: &ScratchUnit, text: &str) -> Result<(), StorageError> {
        tokio::fs::write(unit.path(), text)
            .await
            .map_err(StorageError::Write)
    }

    /// Best-effort delete. Never fails; a unit that cannot be removed is
    /// logged and left to the OS temp cleaner.
    pub async fn release(&self, mut unit: ScratchUnit) {
        let Some(guard) = unit.guard.take() else {
            return;
        };
        if let Err(err) = tokio::fs::remove_file(&unit.path).await {
            warn!("failed to remove scratch file {}: {err}", unit.path);
        }
        // The file is gone (or undeletable); the guard must not try again
        // with blocking I/O at drop.
        let _ = guard.keep();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn store() -> (tempfile::TempDir, ScratchStore) {
        let dir = tempfile::Builder::new()
            .prefix("minify-scratch-test-")
            .tempdir()
            .expect("create temp dir");
        let store = ScratchStore::new(dir.path().to_path_buf());
        (dir, store)
    }

    #[test]
    fn acquire_allocates_distinct_paths() {
        let (_dir, store) = store();
        let units: Vec<_> = (0..8).map(|_| store.acquire().expect("acquire")).collect();
        let paths: HashSet<_> = units.iter().map(|u| u.path().to_owned()).collect();
        assert_eq!(paths.len(), 8, "every unit must get its own path");
        for unit in &units {
            assert!(unit.path().as_str().ends_with(".js"));
        }
    }

    #[test_log::test(tokio::test)]
    async fn write_then_read_back() {
        let (_dir, store) = store();
        let unit = store.acquire().expect("acquire");
        store.write(&unit, "const x = 1;").await.expect("write");
        let text = tokio::fs::read_to_string(unit.path()).await.expect("read");
        assert_eq!(text, "const x = 1;");
        store.release(unit).await;
    }

    #[test_log::test(tokio::test)]
    async fn release_removes_the_file() {
        let (_dir, store) = store();
        let unit = store.acquire().expect("acquire");
        let path = unit.path().to_owned();
        store.write(&unit, "x").await.expect("write");
        store.release(unit).await;
        assert!(!path.exists(), "released unit must be gone from storage");
    }

    #[test]
    fn dropping_an_unreleased_unit_removes_the_file() {
        let (_dir, store) = store();
        let unit = store.acquire().expect("acquire");
        let path = unit.path().to_owned();
        drop(unit);
        assert!(!path.exists(), "drop guard must delete an abandoned unit");
    }

    #[test_log::test(tokio::test)]
    async fn write_fails_when_storage_vanishes() {
        let (dir, store) = store();
        let unit = store.acquire().expect("acquire");
        // Take the whole root away between allocation and write.
        drop(dir);
        let err = store.write(&unit, "x").await.expect_err("write must fail");
        assert!(matches!(err, StorageError::Write(_)));
        // Release stays silent even though there is nothing left to delete.
        store.release(unit).await;
    }

    #[test]
    fn acquire_fails_for_missing_root() {
        let store = ScratchStore::new(PathBuf::from("/nonexistent/minify-scratch"));
        let err = store.acquire().expect_err("acquire must fail");
        assert!(matches!(err, StorageError::Allocate(_)));
    }
}
