//! Errors for the storage layer.

use thiserror::Error;

use crate::persistent::errors::StorageError;

/// Errors returned by the storage layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// The persistent backend failed.
    #[error("sled: {0}")]
    Storage(#[from] StorageError),

    /// A value could not be encoded or decoded.
    #[error("codec: {0}")]
    Codec(#[from] bincode::Error),

    /// A key under a known prefix does not have the expected layout.
    #[error("corrupt key: {0}")]
    CorruptKey(String),

    /// A commit or rollback was requested with no open branch.
    #[error("no open branch to {0}")]
    NoOpenBranch(&'static str),
}

/// Result alias for storage operations.
pub type DbResult<T> = Result<T, DbError>;
