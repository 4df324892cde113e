//! Persistent database errors.

use thiserror::Error;

/// Errors that can occur when interacting with the database.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An error occurred when interacting with the sled database.
    #[error("sled: {0}")]
    Driver(#[from] sled::Error),

    /// The configuration cannot be used to open a database.
    #[error("config: {0}")]
    InvalidConfig(String),
}
