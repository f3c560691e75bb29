// store.rs — GoalStore trait, JsonFileStore, and MemoryStore.
//
// The GoalStore trait is the abstraction for loading and saving a whole
// Dataset snapshot. JsonFileStore keeps the snapshot as a single JSON
// document on disk; MemoryStore keeps it in a string and is mainly useful
// in tests.
//
// Both go through the same decode path, which:
//   - treats a missing snapshot as an empty dataset
//   - drops empty index buckets (older snapshots could contain them)
//   - rejects snapshots whose indexes disagree with the goal table

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::dataset::Dataset;
use crate::error::GoalError;

/// Trait for loading and persisting the full dataset.
///
/// Persistence is always a full replace of the previous snapshot, never an
/// incremental update.
pub trait GoalStore {
    /// Load the stored dataset, or an empty one if nothing was stored yet.
    fn load(&self) -> Result<Dataset, GoalError>;

    /// Replace the stored snapshot with `dataset`.
    fn persist(&mut self, dataset: &Dataset) -> Result<(), GoalError>;

    /// Human-readable location of the snapshot, for messages.
    fn describe(&self) -> String;
}

/// Decode a snapshot document and check it before handing it out.
pub fn decode_snapshot(json: &str) -> Result<Dataset, GoalError> {
    let mut dataset: Dataset = serde_json::from_str(json)?;
    dataset.prune_empty_buckets();
    dataset.check_consistency()?;
    Ok(dataset)
}

/// Encode a dataset as a snapshot document.
pub fn encode_snapshot(dataset: &Dataset) -> Result<String, GoalError> {
    Ok(serde_json::to_string_pretty(dataset)?)
}

/// Snapshot stored as one JSON file.
///
/// Writes go to a temporary file in the same directory which is then
/// renamed over the snapshot, so a failed write leaves the old snapshot
/// intact.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for the snapshot at `path`. Nothing is touched on disk
    /// until the first load or persist.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> GoalError {
        GoalError::IoError {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl GoalStore for JsonFileStore {
    fn load(&self) -> Result<Dataset, GoalError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no snapshot yet, starting empty");
                return Ok(Dataset::new());
            }
            Err(source) => return Err(self.io_error(source)),
        };

        let dataset = decode_snapshot(&json)?;
        tracing::info!(path = %self.path.display(), goals = dataset.len(), "snapshot loaded");
        Ok(dataset)
    }

    fn persist(&mut self, dataset: &Dataset) -> Result<(), GoalError> {
        let json = encode_snapshot(dataset)?;

        // An empty parent means a bare file name in the current directory.
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|source| GoalError::IoError {
            path: dir.display().to_string(),
            source,
        })?;

        let mut tmp = NamedTempFile::new_in(&dir).map_err(|source| GoalError::IoError {
            path: dir.display().to_string(),
            source,
        })?;
        tmp.write_all(json.as_bytes())
            .map_err(|source| self.io_error(source))?;
        tmp.persist(&self.path)
            .map_err(|e| self.io_error(e.error))?;

        tracing::info!(path = %self.path.display(), goals = dataset.len(), "snapshot persisted");
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Snapshot held in memory as its encoded JSON text.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: Option<String>,
    persist_count: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `json` as its snapshot.
    pub fn with_snapshot(json: impl Into<String>) -> Self {
        Self {
            snapshot: Some(json.into()),
            persist_count: 0,
        }
    }

    /// The last persisted snapshot text, if any.
    pub fn snapshot(&self) -> Option<&str> {
        self.snapshot.as_deref()
    }

    /// How many times `persist` has been called.
    pub fn persist_count(&self) -> usize {
        self.persist_count
    }
}

impl GoalStore for MemoryStore {
    fn load(&self) -> Result<Dataset, GoalError> {
        match &self.snapshot {
            Some(json) => decode_snapshot(json),
            None => Ok(Dataset::new()),
        }
    }

    fn persist(&mut self, dataset: &Dataset) -> Result<(), GoalError> {
        self.snapshot = Some(encode_snapshot(dataset)?);
        self.persist_count += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory snapshot".to_string()
    }
}
