//! A store that layers uncommitted writes over a base store.
//!
//! Every [`CacheStore::branch`] pushes a fresh write layer. Reads consult the layers from the
//! newest to the oldest before falling through to the base store. [`CacheStore::commit`] folds
//! the newest layer into its parent (or into the base store as a single batch when it is the last
//! layer) and [`CacheStore::rollback`] discards it. Branches nest, so a scoped operation can run
//! inside a transaction that is itself discarded later.

use std::collections::BTreeMap;

use tracing::trace;

use crate::{
    errors::{DbError, DbResult},
    kv::{KvPair, KvStore, WriteOp},
};

/// Pending writes of one branch. `None` marks a deletion.
type Layer = BTreeMap<Vec<u8>, Option<Vec<u8>>>;

/// A [`KvStore`] with nested, discardable write layers.
#[derive(Debug, Clone, Default)]
pub struct CacheStore<S> {
    base: S,
    layers: Vec<Layer>,
}

impl<S: KvStore> CacheStore<S> {
    /// Wraps a base store with no open branch.
    pub const fn new(base: S) -> Self {
        Self {
            base,
            layers: Vec::new(),
        }
    }

    /// Returns the base store.
    pub const fn base(&self) -> &S {
        &self.base
    }

    /// Returns the base store, discarding any uncommitted layers.
    pub fn into_inner(self) -> S {
        self.base
    }

    /// Returns the number of open branches.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Opens a new branch.
    pub fn branch(&mut self) {
        self.layers.push(Layer::new());
        trace!(depth = self.layers.len(), "opened branch");
    }

    /// Commits the newest branch into its parent, or into the base store if it is the only one.
    pub fn commit(&mut self) -> DbResult<()> {
        let top = self.layers.pop().ok_or(DbError::NoOpenBranch("commit"))?;

        match self.layers.last_mut() {
            Some(parent) => parent.extend(top),
            None => {
                let batch = top
                    .into_iter()
                    .map(|(key, value)| match value {
                        Some(value) => WriteOp::Put(key, value),
                        None => WriteOp::Delete(key),
                    })
                    .collect::<Vec<_>>();
                trace!(writes = batch.len(), "flushing branch to base store");
                self.base.write_batch(batch)?;
            }
        }

        Ok(())
    }

    /// Discards the newest branch.
    pub fn rollback(&mut self) -> DbResult<()> {
        let top = self.layers.pop().ok_or(DbError::NoOpenBranch("rollback"))?;
        trace!(
            discarded = top.len(),
            depth = self.layers.len(),
            "rolled back branch"
        );

        Ok(())
    }
}

impl<S: KvStore> KvStore for CacheStore<S> {
    fn get(&self, key: &[u8]) -> DbResult<Option<Vec<u8>>> {
        for layer in self.layers.iter().rev() {
            if let Some(value) = layer.get(key) {
                return Ok(value.clone());
            }
        }

        self.base.get(key)
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) -> DbResult<()> {
        match self.layers.last_mut() {
            Some(layer) => {
                layer.insert(key.to_vec(), Some(value));
                Ok(())
            }
            None => self.base.set(key, value),
        }
    }

    fn delete(&mut self, key: &[u8]) -> DbResult<()> {
        match self.layers.last_mut() {
            Some(layer) => {
                layer.insert(key.to_vec(), None);
                Ok(())
            }
            None => self.base.delete(key),
        }
    }

    fn iter_prefix(&self, prefix: &[u8]) -> DbResult<Vec<KvPair>> {
        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> =
            self.base.iter_prefix(prefix)?.into_iter().collect();

        for layer in &self.layers {
            let pending = layer
                .range(prefix.to_vec()..)
                .take_while(|(k, _)| k.starts_with(prefix));
            for (key, value) in pending {
                match value {
                    Some(value) => merged.insert(key.clone(), value.clone()),
                    None => merged.remove(key),
                };
            }
        }

        Ok(merged.into_iter().collect())
    }
}
