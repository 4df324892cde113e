//! The coordination core of a liquid staking module for a single host zone.
//!
//! Users stake a native token held locally as an IBC denomination and receive stTokens at the
//! current redemption rate. The deposits are periodically transferred to the host and delegated
//! by an operator. Redemptions accumulate in an unbonding record that is periodically frozen,
//! undelegated, swept back and distributed to the redeemers.
//!
//! The [`keeper::Keeper`] owns the state and drives every step. It consumes the collaborators in
//! [`expected_keepers`] (bank, transfer, rate limiter, oracle, callback registry, ack parser)
//! and runs each message, packet callback and epoch step in a scope that is discarded on error.

pub mod ack;
pub mod admin;
pub mod context;
mod delegation;
pub mod errors;
pub mod events;
pub mod expected_keepers;
pub mod genesis;
pub mod hooks;
mod invariants;
pub mod keeper;
mod msg_server;
pub mod msgs;
pub mod query;
pub mod redemption_rate;
pub mod transfer_callback;
mod unbonding;

#[cfg(test)]
pub(crate) mod testing;
#[cfg(test)]
mod tests;
