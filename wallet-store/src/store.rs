//! File-backed store for the single wallet record.
//!
//! Writes go to a uniquely named temporary file in the same directory, are
//! synced, then renamed over the record file. A reader therefore opens
//! either the old file or the fully written new one, never a partial write,
//! even when the reader lives in another process.

use crate::error::{Result, StoreError};
use crate::record::WalletRecord;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;

/// Durable, atomic storage for exactly one [`WalletRecord`].
///
/// `set` and `clear` are serialized by an internal lock. `get` takes no
/// lock: the rename (or unlink) is the point at which a write becomes
/// visible, so every operation appears to happen at a single instant.
///
/// Mutations run to completion on the blocking pool once they hold the
/// lock, even if the calling future is dropped.
#[derive(Debug)]
pub struct StateStore {
    path: PathBuf,
    dir: PathBuf,
    file_name: String,
    write_lock: Arc<Mutex<()>>,
}

impl StateStore {
    /// Bind a store to `path`, creating its parent directory if needed.
    ///
    /// The record file itself is not created until the first `set`.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                StoreError::InvalidArgument(format!(
                    "state file path has no file name: {}",
                    path.display()
                ))
            })?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        fs::create_dir_all(&dir)
            .await
            .map_err(|e| StoreError::storage(&dir, e))?;

        tracing::debug!(path = ?path, "Opened wallet state store");

        Ok(Self {
            path,
            dir,
            file_name,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Location of the record file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current record.
    ///
    /// Returns the default (disconnected) record when nothing is stored.
    pub async fn get(&self) -> Result<WalletRecord> {
        let contents = match fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(WalletRecord::default());
            }
            Err(e) => return Err(StoreError::storage(&self.path, e)),
        };

        let record: WalletRecord = serde_json::from_slice(&contents).map_err(|e| {
            StoreError::corrupt(&self.path, format!("failed to decode wallet record: {}", e))
        })?;

        if !record.is_valid() {
            return Err(StoreError::corrupt(
                &self.path,
                "stored record is connected without an address",
            ));
        }

        Ok(record)
    }

    /// Persist `address` as the connected wallet, replacing any prior record.
    ///
    /// Fails with `InvalidArgument` for an empty address, in which case the
    /// stored record is left untouched. Any other error means the record was
    /// not replaced. A failed directory sync after the rename is only logged.
    pub async fn set(&self, address: &str) -> Result<()> {
        if address.is_empty() {
            return Err(StoreError::InvalidArgument(
                "wallet address must not be empty".to_string(),
            ));
        }

        let contents = serde_json::to_vec(&WalletRecord::connected(address))
            .map_err(|e| StoreError::storage(&self.path, e.into()))?;

        let guard = Arc::clone(&self.write_lock).lock_owned().await;
        let temp_path = self.temp_path();
        let path = self.path.clone();
        let dir = self.dir.clone();

        self.run_blocking(move || {
            let _guard = guard;
            replace(&dir, &temp_path, &path, &contents)
        })
        .await?;

        tracing::debug!(path = ?self.path, "Saved wallet record");
        Ok(())
    }

    /// Remove the stored record. Succeeds when nothing is stored.
    ///
    /// An error means the record is still in place. A failed directory sync
    /// after the unlink is only logged.
    pub async fn clear(&self) -> Result<()> {
        let guard = Arc::clone(&self.write_lock).lock_owned().await;
        let path = self.path.clone();
        let dir = self.dir.clone();

        let removed = self
            .run_blocking(move || {
                let _guard = guard;
                match std::fs::remove_file(&path) {
                    Ok(()) => {
                        sync_dir(&dir);
                        Ok(true)
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
                    Err(e) => Err(StoreError::storage(&path, e)),
                }
            })
            .await?;

        if removed {
            tracing::debug!(path = ?self.path, "Cleared wallet record");
        } else {
            tracing::debug!(path = ?self.path, "Wallet record already clear");
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let suffix: u64 = rand::random();
        self.dir
            .join(format!(".{}.{:016x}.tmp", self.file_name, suffix))
    }

    async fn run_blocking<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(f)
            .await
            .map_err(|e| StoreError::storage(&self.path, io::Error::other(e)))?
    }
}

/// Write `contents` to `temp_path` and rename it over `path`.
///
/// The temporary file is removed on every failure path.
fn replace(dir: &Path, temp_path: &Path, path: &Path, contents: &[u8]) -> Result<()> {
    if let Err(e) = write_synced(temp_path, contents) {
        discard(temp_path);
        return Err(StoreError::storage(temp_path, e));
    }

    if let Err(e) = std::fs::rename(temp_path, path) {
        discard(temp_path);
        return Err(StoreError::storage(path, e));
    }

    sync_dir(dir);
    Ok(())
}

fn write_synced(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

fn discard(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        if e.kind() != io::ErrorKind::NotFound {
            tracing::warn!(path = ?path, error = %e, "Failed to remove temporary file");
        }
    }
}

/// Make a completed rename or unlink durable.
///
/// The change is already visible to readers, so a failure here is logged
/// rather than reported as a failed write.
#[cfg(unix)]
fn sync_dir(dir: &Path) {
    if let Err(e) = File::open(dir).and_then(|d| d.sync_all()) {
        tracing::warn!(path = ?dir, error = %e, "Failed to sync state directory");
    }
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) {}
