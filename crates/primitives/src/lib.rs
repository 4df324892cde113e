//! This crate contains the types, validation rules and pure functions shared across the liquid
//! staking workspace.
//!
//! It lies at the bottom of the crate hierarchy: the storage layer, the record state machines and
//! the keeper all build on the [`HostZone`](host_zone::HostZone) and record types defined here.

pub mod dec;
pub mod denom;
pub mod errors;
pub mod host_zone;
pub mod prelude;
pub mod records;
pub mod types;
