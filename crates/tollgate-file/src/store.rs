//! Filesystem-backed session store.

use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, instrument, trace};
use uuid::Uuid;

use tollgate_core::error::{Error, InvalidInputError, StorageError};
use tollgate_core::{Origin, Result, SessionStore};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

pub(crate) fn map_io(err: io::Error) -> Error {
    let storage = match err.kind() {
        ErrorKind::PermissionDenied | ErrorKind::ReadOnlyFilesystem => StorageError::Unavailable {
            message: err.to_string(),
        },
        ErrorKind::StorageFull => StorageError::QuotaExceeded {
            key: String::new(),
        },
        _ => StorageError::from(err),
    };
    Error::Storage(storage)
}

/// Write `content` to `path` atomically: temp file in the same directory, then rename.
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(map_io)?;

    let temp_path = parent.join(format!(".{}.tmp", Uuid::new_v4().simple()));

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let written = options
        .open(&temp_path)
        .and_then(|mut file| file.write_all(content.as_bytes()));
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(map_io(e));
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(map_io(e));
    }

    Ok(())
}

/// Hold an exclusive advisory lock on `lock_path` while `f` runs.
pub(crate) fn with_lock<T>(lock_path: &Path, f: impl FnOnce() -> Result<T>) -> Result<T> {
    if let Some(parent) = lock_path.parent() {
        fs::create_dir_all(parent).map_err(map_io)?;
    }

    let lock_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(lock_path)
        .map_err(map_io)?;

    lock_file.lock_exclusive().map_err(map_io)?;
    let result = f();
    lock_file.unlock().map_err(map_io)?;

    result
}

/// Durable session storage: one directory per origin, one file per key.
///
/// Layout under the root:
///
/// ```text
/// origins/<origin>/<key>
/// origins/<origin>/.lock
/// ```
///
/// Writes are atomic (temp file + rename) and serialized across processes
/// with an advisory lock; reads take no lock. Files are created with mode
/// 0600 on Unix.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
    origin: Origin,
}

impl FileSessionStore {
    /// Create a store for `origin` under `root`.
    pub fn new(root: impl AsRef<Path>, origin: Origin) -> Self {
        let dir = root.as_ref().join("origins").join(origin.dir_name());
        Self { dir, origin }
    }

    /// The origin this store is scoped to.
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// The directory holding this origin's keys.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn lock_path(&self) -> PathBuf {
        self.dir.join(".lock")
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

        if !valid {
            return Err(InvalidInputError::StorageKey {
                value: key.to_string(),
                reason: "must be non-empty ASCII [A-Za-z0-9_.-] and not start with '.'"
                    .to_string(),
            }
            .into());
        }

        Ok(self.dir.join(key))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;

        match fs::read_to_string(&path) {
            Ok(value) => {
                trace!(key, "Read session key");
                Ok(Some(value))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(map_io(e)),
        }
    }

    #[instrument(skip(self, value), fields(origin = %self.origin))]
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;

        with_lock(&self.lock_path(), || write_atomic(&path, value)).map_err(|e| match e {
            Error::Storage(StorageError::QuotaExceeded { .. }) => {
                Error::Storage(StorageError::QuotaExceeded {
                    key: key.to_string(),
                })
            }
            other => other,
        })?;

        debug!(key, "Wrote session key");
        Ok(())
    }

    #[instrument(skip(self), fields(origin = %self.origin))]
    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;

        if !self.dir.exists() {
            return Ok(());
        }

        with_lock(&self.lock_path(), || match fs::remove_file(&path) {
            Ok(()) => {
                debug!(key, "Removed session key");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_io(e)),
        })
    }
}
