//! The byte-keyed ordered store the module is built on.

use crate::errors::DbResult;

/// A single write in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    /// Insert or overwrite a key.
    Put(Vec<u8>, Vec<u8>),
    /// Remove a key.
    Delete(Vec<u8>),
}

/// A key-value pair returned by prefix iteration.
pub type KvPair = (Vec<u8>, Vec<u8>);

/// A byte-keyed ordered store with prefix iteration.
pub trait KvStore {
    /// Gets the value stored under `key`, if any.
    fn get(&self, key: &[u8]) -> DbResult<Option<Vec<u8>>>;

    /// Stores `value` under `key`, overwriting any previous value.
    fn set(&mut self, key: &[u8], value: Vec<u8>) -> DbResult<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn delete(&mut self, key: &[u8]) -> DbResult<()>;

    /// Returns every pair whose key starts with `prefix`, in ascending key order.
    fn iter_prefix(&self, prefix: &[u8]) -> DbResult<Vec<KvPair>>;

    /// Applies a batch of writes.
    ///
    /// Backends that support atomic batches override this so that either every write lands or
    /// none does.
    fn write_batch(&mut self, batch: Vec<WriteOp>) -> DbResult<()> {
        for op in batch {
            match op {
                WriteOp::Put(key, value) => self.set(&key, value)?,
                WriteOp::Delete(key) => self.delete(&key)?,
            }
        }

        Ok(())
    }

    /// Returns `true` if a value is stored under `key`.
    fn contains(&self, key: &[u8]) -> DbResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}
