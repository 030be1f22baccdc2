//! Flat-file record store.
//!
//! Each record type persists as one JSON array at `<root>/<FILE_STEM>.json`;
//! resume blobs live under `<root>/resumes/`. Loads fail open: a missing or
//! unreadable file behaves like an empty collection, so first use needs no
//! setup step. Saves replace the whole file through a temp file + rename, so
//! a reader never observes a half-written array. Read-modify-write cycles go
//! through [`JsonStore::update`], which holds a per-collection lock for the
//! duration of the closure.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{error, info};

const RESUME_DIR: &str = "resumes";

/// A record type persisted as a JSON array in its own file.
pub trait Record: Serialize + DeserializeOwned {
    /// Lower-cased, pluralized collection name; the backing file is
    /// `<FILE_STEM>.json`.
    const FILE_STEM: &'static str;
}

/// Persistence failure inside the store. Never surfaces past the engine:
/// write paths log and swallow it, so HTTP callers only ever observe an
/// empty collection or a silently dropped write. Tests assert on it
/// directly via [`JsonStore::save`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON encoding failed for {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// File-backed store for typed record collections and resume blobs.
///
/// Constructed once in `main` and injected through `AppState`; tests build
/// their own over a temp directory.
pub struct JsonStore {
    root: PathBuf,
    /// One lock per collection file, created on first touch. Serializes
    /// whole-collection rewrites so concurrent read-check-append cycles
    /// cannot drop each other's records.
    locks: Mutex<HashMap<&'static str, Arc<Mutex<()>>>>,
}

impl JsonStore {
    /// Opens (and if necessary creates) the store root and its `resumes/`
    /// subdirectory. Safe to call on an already-populated directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .with_context(|| format!("failed to create data folder {}", root.display()))?;
        fs::create_dir_all(root.join(RESUME_DIR))
            .with_context(|| format!("failed to create resume folder under {}", root.display()))?;
        info!("Data folder ready at {}", root.display());
        Ok(Self {
            root,
            locks: Mutex::new(HashMap::new()),
        })
    }

    /// Loads a full collection. A missing file is an empty collection; an
    /// unreadable or unparseable file is logged and also treated as empty.
    /// On-disk order is preserved.
    pub fn load<R: Record>(&self) -> Vec<R> {
        let path = self.collection_path(R::FILE_STEM);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                error!("Error reading {}: {e}", path.display());
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                error!("Error parsing {}: {e}", path.display());
                Vec::new()
            }
        }
    }

    /// Replaces a collection wholesale. This is a full-file rewrite, not an
    /// append; callers that need read-modify-write should use [`update`]
    /// instead so the cycle runs under the collection lock.
    ///
    /// [`update`]: JsonStore::update
    pub fn save<R: Record>(&self, records: &[R]) -> Result<(), StoreError> {
        let lock = self.lock_for(R::FILE_STEM);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.write_collection(R::FILE_STEM, records)
    }

    /// Read-modify-write of a whole collection under its lock.
    ///
    /// The closure may mutate the records; when it returns `Ok`, the
    /// collection is rewritten. When it returns `Err`, nothing is written.
    /// A rewrite failure is logged and swallowed and the closure's value is
    /// still returned, matching the fire-and-forget write contract callers
    /// rely on.
    pub fn update<R, T, E, F>(&self, f: F) -> Result<T, E>
    where
        R: Record,
        F: FnOnce(&mut Vec<R>) -> Result<T, E>,
    {
        let lock = self.lock_for(R::FILE_STEM);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut records = self.load::<R>();
        let value = f(&mut records)?;
        if let Err(e) = self.write_collection(R::FILE_STEM, &records) {
            error!("Error writing {}.json: {e}", R::FILE_STEM);
        }
        Ok(value)
    }

    /// Stores an uploaded resume under `<epoch-millis>_<original-name>` and
    /// returns the stored name, or `None` on failure. Existing blobs are
    /// never overwritten or deleted.
    pub fn save_resume(&self, bytes: &[u8], original_name: &str) -> Option<String> {
        let file_name = Path::new(original_name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume");
        let stored_name = format!("{}_{}", Utc::now().timestamp_millis(), file_name);

        let dir = self.root.join(RESUME_DIR);
        if let Err(e) = fs::create_dir_all(&dir) {
            error!("Error creating resume folder: {e}");
            return None;
        }
        match fs::write(dir.join(&stored_name), bytes) {
            Ok(()) => Some(stored_name),
            Err(e) => {
                error!("Error saving resume {stored_name}: {e}");
                None
            }
        }
    }

    /// Reads back a stored resume, or `None` if it is absent or unreadable.
    pub fn load_resume(&self, stored_name: &str) -> Option<Vec<u8>> {
        // Stored names never contain separators; anything else is not ours.
        if stored_name.contains('/') || stored_name.contains('\\') || stored_name.contains("..") {
            return None;
        }
        let path = self.root.join(RESUME_DIR).join(stored_name);
        match fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                error!("Error reading resume {}: {e}", path.display());
                None
            }
        }
    }

    fn collection_path(&self, stem: &str) -> PathBuf {
        self.root.join(format!("{stem}.json"))
    }

    fn lock_for(&self, stem: &'static str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(stem).or_default())
    }

    fn write_collection<R: Record>(&self, stem: &str, records: &[R]) -> Result<(), StoreError> {
        let path = self.collection_path(stem);
        let json = serde_json::to_vec_pretty(records).map_err(|source| StoreError::Encode {
            path: path.clone(),
            source,
        })?;

        let io_err = |source| StoreError::Io {
            path: path.clone(),
            source,
        };
        fs::create_dir_all(&self.root).map_err(io_err)?;
        let mut tmp = NamedTempFile::new_in(&self.root).map_err(io_err)?;
        tmp.write_all(&json).map_err(io_err)?;
        tmp.persist(&path)
            .map_err(|e| io_err(e.error))
            .map(|_| ())
    }
}
