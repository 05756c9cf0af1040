//! File-based TOML persistence for snapshots.
//!
//! The snapshot file is the local stand-in for the store: something else
//! dumps the current Todoist state into it, this crate reads it, and in
//! execute mode writes the mutated state back.

use crate::model::Snapshot;
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads and saves a snapshot at a fixed path.
pub struct Storage {
    file_path: PathBuf,
}

impl Storage {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    /// Load the snapshot, or an empty one if the file does not exist yet.
    pub fn load(&self) -> Result<Snapshot> {
        if !self.file_path.exists() {
            return Ok(Snapshot::new());
        }

        let content = fs::read_to_string(&self.file_path)?;
        let snapshot: Snapshot = toml::from_str(&content)?;
        Ok(snapshot)
    }

    /// Write the snapshot back to disk.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let content = toml::to_string_pretty(snapshot)?;
        fs::write(&self.file_path, content)?;
        Ok(())
    }
}
