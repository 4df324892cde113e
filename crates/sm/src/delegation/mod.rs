//! The state machine for managing the lifecycle of a delegation record.
//!
//! A delegation record is created when an epoch's deposits are sent to the host zone. It then
//! moves through the following statuses:
//!
//! - `TRANSFER_IN_PROGRESS` until the transfer is acknowledged or fails.
//! - `DELEGATION_QUEUE` until the operator confirms the delegation on the host.
//! - `DELEGATION_COMPLETE` or `TRANSFER_FAILED`, both of which only exist in the archive.

pub mod duties;
pub mod errors;
pub mod events;
pub mod machine;
#[cfg(test)]
pub mod tests;
pub mod transitions;
