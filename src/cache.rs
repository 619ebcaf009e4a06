//! Local snapshot storage for previously fetched app records.
//!
//! Each app's last API response is kept along with the one before it, so
//! later lookups can report what changed. Freshness decisions are made by the
//! caller; stores only load and save.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::app_id::AppId;
use crate::config;
use crate::error::{GamalyticError, Result};
use crate::models::RawRecord;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// The stored state of one app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Most recent API response.
    pub record: RawRecord,
    /// When `record` was fetched, in unix milliseconds.
    pub saved_at: i64,
    /// The response stored before `record`, if any.
    #[serde(default)]
    pub previous: Option<RawRecord>,
}

impl Snapshot {
    /// Milliseconds elapsed since the record was fetched.
    pub fn age(&self, now_ms: i64) -> i64 {
        now_ms.saturating_sub(self.saved_at)
    }

    /// Build the snapshot that replaces `self` after a new fetch.
    pub fn succeed(self, record: RawRecord, now_ms: i64) -> Snapshot {
        Snapshot {
            record,
            saved_at: now_ms,
            previous: Some(self.record),
        }
    }
}

/// Lookup and persistence of [`Snapshot`]s by app id.
pub trait SnapshotStore: Send {
    fn load(&self, app_id: AppId) -> Result<Option<Snapshot>>;

    fn save(&self, app_id: AppId, snapshot: &Snapshot) -> Result<()>;

    /// Forget every stored snapshot.
    fn clear(&self) -> Result<()>;
}

/// A shared store, so the caller can keep a handle to what the SDK saves.
impl<S: SnapshotStore + Sync> SnapshotStore for Arc<S> {
    fn load(&self, app_id: AppId) -> Result<Option<Snapshot>> {
        (**self).load(app_id)
    }

    fn save(&self, app_id: AppId, snapshot: &Snapshot) -> Result<()> {
        (**self).save(app_id, snapshot)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}

// ---------------------------------------------------------------------------
// FileSnapshotStore
// ---------------------------------------------------------------------------

/// Stores one JSON file per app in a cache directory.
pub struct FileSnapshotStore {
    /// Directory where snapshot files are stored.
    pub cache_dir: PathBuf,
}

impl FileSnapshotStore {
    /// Create a store rooted at `cache_dir`.
    ///
    /// If `cache_dir` is `None`, uses the platform-appropriate default cache directory.
    /// Creates the cache directory if it does not exist.
    pub fn new(cache_dir: Option<PathBuf>) -> Result<Self> {
        let dir = cache_dir.unwrap_or_else(config::default_cache_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self { cache_dir: dir })
    }

    /// Path of the snapshot file for `app_id`.
    pub fn path_for(&self, app_id: AppId) -> PathBuf {
        self.cache_dir.join(format!("{}.json", app_id))
    }

    /// Write to a temp file and rename, so a crash never leaves half a file.
    fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
        let tmp = path.with_extension("json.tmp");
        let result = (|| -> Result<()> {
            fs::write(&tmp, contents)?;
            fs::rename(&tmp, path)?;
            Ok(())
        })();
        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }
}

impl SnapshotStore for FileSnapshotStore {
    /// Corrupt snapshot files are deleted and treated as missing.
    fn load(&self, app_id: AppId) -> Result<Option<Snapshot>> {
        let path = self.path_for(app_id);
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        match serde_json::from_str::<Snapshot>(&contents) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                log::warn!("Corrupt snapshot {}: {} -- removing", path.display(), e);
                let _ = fs::remove_file(&path);
                Ok(None)
            }
        }
    }

    fn save(&self, app_id: AppId, snapshot: &Snapshot) -> Result<()> {
        let bytes = serde_json::to_vec(snapshot)?;
        Self::write_atomic(&self.path_for(app_id), &bytes)
    }

    fn clear(&self) -> Result<()> {
        if self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemorySnapshotStore
// ---------------------------------------------------------------------------

/// Keeps snapshots in memory for the lifetime of the process.
#[derive(Default)]
pub struct MemorySnapshotStore {
    entries: Mutex<HashMap<AppId, Snapshot>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> GamalyticError {
        GamalyticError::InvalidArgument("snapshot store lock poisoned".into())
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self, app_id: AppId) -> Result<Option<Snapshot>> {
        let entries = self.entries.lock().map_err(|_| Self::poisoned())?;
        Ok(entries.get(&app_id).cloned())
    }

    fn save(&self, app_id: AppId, snapshot: &Snapshot) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| Self::poisoned())?;
        entries.insert(app_id, snapshot.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.entries.lock().map_err(|_| Self::poisoned())?.clear();
        Ok(())
    }
}
