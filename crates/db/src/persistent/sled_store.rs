//! [`KvStore`] backed by a sled tree.

use tracing::{debug, trace};

use super::{config::SledConfig, errors::StorageError};
use crate::{
    errors::DbResult,
    kv::{KvPair, KvStore, WriteOp},
};

/// A [`KvStore`] persisted in a sled tree.
#[derive(Debug, Clone)]
pub struct SledStore {
    db: sled::Db,
    tree: sled::Tree,
    flush_on_commit: bool,
}

impl SledStore {
    /// Opens (or creates) the database described by `config`.
    pub fn open(config: &SledConfig) -> DbResult<Self> {
        if config.tree_name().is_empty() {
            return Err(StorageError::InvalidConfig("tree name must not be empty".to_string()).into());
        }

        let db = sled::Config::new()
            .path(config.path())
            .temporary(config.temporary())
            .open()
            .map_err(StorageError::from)?;
        let tree = db
            .open_tree(config.tree_name())
            .map_err(StorageError::from)?;

        debug!(path = %config.path().display(), tree = config.tree_name(), "opened sled store");

        Ok(Self {
            db,
            tree,
            flush_on_commit: config.flush_on_commit(),
        })
    }

    /// Flushes all dirty pages to disk.
    pub fn flush(&self) -> DbResult<()> {
        self.db.flush().map_err(StorageError::from)?;

        Ok(())
    }
}

impl KvStore for SledStore {
    fn get(&self, key: &[u8]) -> DbResult<Option<Vec<u8>>> {
        let value = self.tree.get(key).map_err(StorageError::from)?;

        Ok(value.map(|v| v.to_vec()))
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) -> DbResult<()> {
        trace!(key = %String::from_utf8_lossy(key), len = value.len(), "sled set");
        self.tree.insert(key, value).map_err(StorageError::from)?;

        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> DbResult<()> {
        trace!(key = %String::from_utf8_lossy(key), "sled delete");
        self.tree.remove(key).map_err(StorageError::from)?;

        Ok(())
    }

    fn iter_prefix(&self, prefix: &[u8]) -> DbResult<Vec<KvPair>> {
        self.tree
            .scan_prefix(prefix)
            .map(|entry| -> DbResult<KvPair> {
                let (k, v) = entry.map_err(StorageError::from)?;
                Ok((k.to_vec(), v.to_vec()))
            })
            .collect()
    }

    fn write_batch(&mut self, batch: Vec<WriteOp>) -> DbResult<()> {
        let mut sled_batch = sled::Batch::default();
        for op in batch {
            match op {
                WriteOp::Put(key, value) => sled_batch.insert(key, value),
                WriteOp::Delete(key) => sled_batch.remove(key),
            }
        }

        self.tree
            .apply_batch(sled_batch)
            .map_err(StorageError::from)?;

        if self.flush_on_commit {
            self.tree.flush().map_err(StorageError::from)?;
        }

        Ok(())
    }
}
