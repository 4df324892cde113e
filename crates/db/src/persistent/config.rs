//! This module contains all the configuration types used in the persistence layer.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::constants::{DEFAULT_DB_PATH, DEFAULT_TREE_NAME};

/// The configuration for the sled database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SledConfig {
    path: PathBuf,
    temporary: bool,
    tree_name: String,
    flush_on_commit: bool,
}

impl Default for SledConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_PATH),
            temporary: false,
            tree_name: DEFAULT_TREE_NAME.to_string(),
            flush_on_commit: true,
        }
    }
}

impl SledConfig {
    /// Sets the directory of the database.
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..self
        }
    }

    /// Sets whether the database is deleted when dropped.
    pub fn with_temporary(self, temporary: bool) -> Self {
        Self { temporary, ..self }
    }

    /// Sets the name of the tree holding module state.
    pub fn with_tree_name(self, tree_name: impl Into<String>) -> Self {
        Self {
            tree_name: tree_name.into(),
            ..self
        }
    }

    /// Sets whether every committed batch is flushed to disk.
    pub fn with_flush_on_commit(self, flush_on_commit: bool) -> Self {
        Self {
            flush_on_commit,
            ..self
        }
    }

    /// Returns the directory of the database.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns whether the database is deleted when dropped.
    pub fn temporary(&self) -> bool {
        self.temporary
    }

    /// Returns the name of the tree holding module state.
    pub fn tree_name(&self) -> &str {
        &self.tree_name
    }

    /// Returns whether every committed batch is flushed to disk.
    pub fn flush_on_commit(&self) -> bool {
        self.flush_on_commit
    }
}
