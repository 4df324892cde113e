//! This module contains all the constants used in the persistence layer.

/// The default path of the database directory.
pub const DEFAULT_DB_PATH: &str = "stzone-db";

/// The default name of the tree holding module state.
pub const DEFAULT_TREE_NAME: &str = "stzone";
