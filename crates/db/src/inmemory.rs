//! In-memory implementation of [`KvStore`].

use std::collections::BTreeMap;

use tracing::trace;

use crate::{
    errors::DbResult,
    kv::{KvPair, KvStore},
};

/// An ordered in-memory store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryStore {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for InMemoryStore {
    fn get(&self, key: &[u8]) -> DbResult<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) -> DbResult<()> {
        trace!(key = %String::from_utf8_lossy(key), len = value.len(), "in-memory set");
        self.entries.insert(key.to_vec(), value);

        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> DbResult<()> {
        trace!(key = %String::from_utf8_lossy(key), "in-memory delete");
        self.entries.remove(key);

        Ok(())
    }

    fn iter_prefix(&self, prefix: &[u8]) -> DbResult<Vec<KvPair>> {
        Ok(self
            .entries
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}
