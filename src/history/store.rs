//! Persistence backends for the history log.

use super::HistoryEntry;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// File name used under the data directory.
pub const HISTORY_FILE_NAME: &str = "calc_history_v1.json";

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("history serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage for the history log.
///
/// `load` never fails: missing or unreadable data yields an empty history.
pub trait HistoryStore {
    fn load(&self) -> Vec<HistoryEntry>;

    fn save(&mut self, entries: &[HistoryEntry]) -> Result<(), HistoryError>;
}

/// History persisted as a JSON array in a single file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$XDG_DATA_HOME/calcpad/calc_history_v1.json` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("calcpad").join(HISTORY_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonFileStore {
    fn load(&self) -> Vec<HistoryEntry> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no history file yet");
                return Vec::new();
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to read history, starting empty");
                return Vec::new();
            }
        };

        if raw.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "corrupt history file, starting empty");
                Vec::new()
            }
        }
    }

    fn save(&mut self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string(entries)?;

        // Write-then-rename so a crash mid-write leaves the old file intact.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        debug!(path = %self.path.display(), count = entries.len(), "history saved");
        Ok(())
    }
}

/// In-process store; nothing survives the process.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Vec<HistoryEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<HistoryEntry>) -> Self {
        Self { entries }
    }

    /// The last saved snapshot.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}

impl HistoryStore for MemoryStore {
    fn load(&self) -> Vec<HistoryEntry> {
        self.entries.clone()
    }

    fn save(&mut self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        self.entries = entries.to_vec();
        Ok(())
    }
}
