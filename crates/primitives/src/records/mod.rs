//! The record families tracked by the module.
//!
//! Delegation and unbonding records are keyed by the epoch number that created them and live in
//! either an active or an archive store. Redemption records are keyed by their parent unbonding
//! record and the redeemer. Slash records form an append-only audit trail.

mod delegation;
mod redemption;
mod slash;
mod unbonding;
pub mod validation;

pub use delegation::{DelegationRecord, DelegationRecordStatus};
pub use redemption::RedemptionRecord;
pub use slash::SlashRecord;
pub use unbonding::{UnbondingRecord, UnbondingRecordStatus};

/// Placeholder returned for an unset transaction hash.
pub(crate) const UNSET_TX_HASH: &str = "<unset>";

pub(crate) fn display_tx_hash(tx_hash: &str) -> &str {
    if tx_hash.is_empty() {
        UNSET_TX_HASH
    } else {
        tx_hash
    }
}
