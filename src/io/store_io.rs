use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::task::Task;

/// Error type for task-list persistence. Only writes can fail; reads
/// degrade to an empty list.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not serialize task list: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not persist {path}: {source}")]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Whole-list persistence against a single JSON file. The store only ever
/// hands this full snapshots; there is no partial update path.
#[derive(Debug, Clone)]
pub struct StoreFile {
    path: PathBuf,
}

impl StoreFile {
    /// The task list file inside the given data directory
    pub fn new(data_dir: &Path) -> Self {
        StoreFile {
            path: data_dir.join("todos.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored list. Missing, unreadable, or unparsable data is
    /// an empty list — corruption never surfaces as an error.
    pub fn load(&self) -> Vec<Task> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default()
    }

    /// Replace the stored list with `tasks`. The write goes through a temp
    /// file in the same directory and a rename, so a crash mid-write never
    /// leaves a torn file behind.
    pub fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(tasks)?;
        let dir = self
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| StoreError::Persist {
            path: self.path.clone(),
            source: e.error,
        })?;
        Ok(())
    }
}
