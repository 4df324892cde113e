//! This crate contains the parameters that dictate how the liquid staking module schedules its
//! work and validates user input.
//!
//! Parameters are loaded from TOML; every field falls back to the value in [`default`] when it is
//! omitted.

pub mod default;
pub mod errors;
pub mod prelude;
pub mod types;
