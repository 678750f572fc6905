//! Flat on-disk store for materialized images.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};

use bytes::Bytes;
use parking_lot::Mutex;
use tokio::fs;
use tokio::sync::OwnedMutexGuard;
use tracing::{debug, trace};

use crate::domain::errors::MaterializeError;
use crate::domain::ports::MaterializeResult;

/// Directory of materialized images, one file per (source, tier) pair.
///
/// There is no index: a file on disk is the cache entry. Entries are never
/// evicted here; clearing the directory is the only invalidation.
pub struct AssetStore {
    dir: PathBuf,
    locks: Mutex<HashMap<String, Weak<tokio::sync::Mutex<()>>>>,
}

impl std::fmt::Debug for AssetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetStore")
            .field("dir", &self.dir)
            .finish_non_exhaustive()
    }
}

impl AssetStore {
    /// Creates a store rooted at `dir`. Nothing is touched on disk until the
    /// first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the store directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the on-disk path for `filename`.
    #[must_use]
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    /// Checks whether `filename` has already been written. Only a regular
    /// file counts.
    pub async fn contains(&self, filename: &str) -> bool {
        let path = self.path_for(filename);
        let exists = fs::metadata(&path)
            .await
            .is_ok_and(|metadata| metadata.is_file());
        trace!(path = %path.display(), exists, "Asset existence check");
        exists
    }

    /// Creates the store directory and its parents.
    ///
    /// Safe to race: a directory created concurrently by another task is not
    /// an error.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created.
    pub async fn ensure_dir(&self) -> MaterializeResult<()> {
        match fs::create_dir_all(&self.dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && self.dir.is_dir() => Ok(()),
            Err(source) => Err(MaterializeError::DirectoryCreate {
                path: self.dir.clone(),
                source,
            }),
        }
    }

    /// Writes `bytes` to `filename`.
    ///
    /// The body goes to a temporary file in the same directory first and is
    /// renamed into place, so a reader never observes a partial image.
    ///
    /// # Errors
    /// Returns error if the file cannot be written or renamed.
    pub async fn write(&self, filename: &str, bytes: Bytes) -> MaterializeResult<PathBuf> {
        let dir = self.dir.clone();
        let path = self.path_for(filename);
        let target = path.clone();

        tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            let mut temp = tempfile::NamedTempFile::new_in(&dir)?;
            temp.write_all(&bytes)?;
            temp.flush()?;
            temp.persist(&target).map_err(|e| e.error)?;
            Ok(())
        })
        .await
        .map_err(|e| MaterializeError::persist(&path, std::io::Error::other(e)))?
        .map_err(|e| MaterializeError::persist(&path, e))?;

        debug!(path = %path.display(), "Stored asset");
        Ok(path)
    }

    /// Acquires the in-process lock for `filename`.
    ///
    /// Holding the guard across check, download and write makes concurrent
    /// requests for the same output wait for the first one instead of
    /// downloading twice.
    pub async fn lock(&self, filename: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock();
            locks.retain(|_, weak| weak.strong_count() > 0);

            if let Some(existing) = locks.get(filename).and_then(Weak::upgrade) {
                existing
            } else {
                let fresh = Arc::new(tokio::sync::Mutex::new(()));
                locks.insert(filename.to_string(), Arc::downgrade(&fresh));
                fresh
            }
        };
        lock.lock_owned().await
    }
}
