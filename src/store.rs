//! Persistence seam for game snapshots.
//!
//! Stores are keyed by game id and guarded by the snapshot's version: a write
//! only lands if the caller saw the version that is currently stored.

use crate::types::GameId;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Game {id} changed concurrently (expected version {expected:?}, found {found:?})")]
    VersionConflict {
        id: GameId,
        expected: Option<u64>,
        found: Option<u64>,
    },

    #[error("Invalid game id: {0}")]
    InvalidId(String),

    #[error("Stored snapshot for {id} is unreadable: {reason}")]
    Corrupt { id: GameId, reason: String },

    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::VersionConflict { .. } => "VERSION_CONFLICT",
            StoreError::InvalidId(_) => "INVALID_ARGUMENT",
            StoreError::Corrupt { .. } => "CORRUPT_SNAPSHOT",
            StoreError::Io(_) => "STORAGE_ERROR",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSnapshot {
    pub version: u64,
    pub document: String,
}

pub trait SnapshotStore {
    fn load(&self, id: &str) -> StoreResult<Option<StoredSnapshot>>;

    /// Write `snapshot` if the stored version equals `expected`.
    ///
    /// `expected == None` means the game must not exist yet.
    fn compare_and_swap(
        &mut self,
        id: &str,
        expected: Option<u64>,
        snapshot: StoredSnapshot,
    ) -> StoreResult<()>;
}

fn check_expected(id: &str, expected: Option<u64>, found: Option<u64>) -> StoreResult<()> {
    if expected != found {
        tracing::warn!(game_id = id, ?expected, ?found, "Version conflict");
        return Err(StoreError::VersionConflict {
            id: id.to_string(),
            expected,
            found,
        });
    }
    Ok(())
}

/// Snapshots held in a map, for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    games: HashMap<GameId, StoredSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, id: &str) -> StoreResult<Option<StoredSnapshot>> {
        Ok(self.games.get(id).cloned())
    }

    fn compare_and_swap(
        &mut self,
        id: &str,
        expected: Option<u64>,
        snapshot: StoredSnapshot,
    ) -> StoreResult<()> {
        check_expected(id, expected, self.games.get(id).map(|s| s.version))?;
        self.games.insert(id.to_string(), snapshot);
        Ok(())
    }
}

/// One `<id>.json` file per game inside a directory.
///
/// The version is read back from the stored document's `version` field. The
/// check-then-write is not atomic across processes.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) the store directory
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        tracing::debug!(dir = %dir.display(), "File store opened");
        Ok(Self { dir })
    }

    fn path_for(&self, id: &str) -> StoreResult<PathBuf> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidId(id.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", id)))
    }
}

impl SnapshotStore for FileStore {
    fn load(&self, id: &str) -> StoreResult<Option<StoredSnapshot>> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Ok(None);
        }

        let document = fs::read_to_string(&path)?;
        let value: serde_json::Value =
            serde_json::from_str(&document).map_err(|e| StoreError::Corrupt {
                id: id.to_string(),
                reason: e.to_string(),
            })?;
        let version = value["version"].as_u64().ok_or_else(|| StoreError::Corrupt {
            id: id.to_string(),
            reason: "missing numeric version".to_string(),
        })?;

        Ok(Some(StoredSnapshot { version, document }))
    }

    fn compare_and_swap(
        &mut self,
        id: &str,
        expected: Option<u64>,
        snapshot: StoredSnapshot,
    ) -> StoreResult<()> {
        let found = self.load(id)?.map(|s| s.version);
        check_expected(id, expected, found)?;

        let path = self.path_for(id)?;
        write_atomically(&path, snapshot.document.as_bytes())?;
        Ok(())
    }
}

/// Write through a sibling tmp file, removing it if the write or rename fails
fn write_atomically(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = path.with_extension("json.tmp");
    let result = fs::write(&tmp, bytes).and_then(|_| fs::rename(&tmp, path));
    if let Err(e) = &result {
        tracing::warn!(path = %path.display(), error = %e, "Snapshot write failed");
        let _ = fs::remove_file(&tmp);
    }
    result
}
