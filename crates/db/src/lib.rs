//! Storage for the liquid staking module.
//!
//! The module only assumes a byte-keyed ordered store with prefix iteration ([`kv::KvStore`]).
//! This crate provides an in-memory and a sled-backed implementation, a [`cache::CacheStore`]
//! that layers uncommitted writes on top of either so that a failed operation can be discarded
//! wholesale, and typed accessors for the host zone and each record family.

pub mod cache;
pub mod codec;
pub mod errors;
pub mod inmemory;
pub mod keys;
pub mod kv;
pub mod pagination;
pub mod persistent;
pub mod records;
pub mod redemption;
pub mod transfer;
