//! Value encoding for the store.

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::DbResult;

/// Encodes a value for storage.
pub fn encode<T: Serialize>(value: &T) -> DbResult<Vec<u8>> {
    Ok(bincode::serialize(value)?)
}

/// Decodes a stored value.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> DbResult<T> {
    Ok(bincode::deserialize(bytes)?)
}
