//! The state machine for managing the lifecycle of an unbonding record.
//!
//! An unbonding record accumulates redemptions for one epoch window and then moves through the
//! following statuses:
//!
//! - `ACCUMULATING_REDEMPTIONS` while redemptions are being added.
//! - `UNBONDING_QUEUE` once the window is frozen and the native total is fixed.
//! - `UNBONDING_IN_PROGRESS` after the operator confirms the undelegation on the host.
//! - `UNBONDED` after the host's unbonding period has elapsed.
//! - `CLAIMABLE` after the operator confirms the sweep of unbonded tokens.
//! - `CLAIMED` after every redeemer has been paid. This status only exists in the archive.

pub mod config;
pub mod duties;
pub mod errors;
pub mod events;
pub mod machine;
#[cfg(test)]
pub mod tests;
pub mod transitions;
