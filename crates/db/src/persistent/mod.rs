//! Sled-backed persistence.

pub mod config;
pub mod constants;
pub mod errors;
pub mod sled_store;
