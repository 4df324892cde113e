//! This crate implements the state machines that drive the lifecycle of delegation and unbonding
//! records.
//!
//! Each machine owns one record and reacts to events posted by the keeper (transfer acks, operator
//! confirmations, epoch ticks). A transition either changes the record or fails; it never touches
//! storage or balances itself. Side effects that must accompany a transition, such as archiving
//! the record or adjusting the delegated balance, are returned as duties for the keeper to
//! execute.

pub mod delegation;
pub mod errors;
pub mod state_machine;
pub mod unbonding;

#[cfg(test)]
pub(crate) mod testing;
