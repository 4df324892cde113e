use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{SignedAmount, UnixSeconds};

/// Audit entry created when the safe admin adjusts the delegated balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlashRecord {
    /// Monotonic identifier.
    pub id: u64,
    /// Block time of the adjustment.
    pub time: UnixSeconds,
    /// The signed offset applied to the delegated balance.
    pub native_amount: SignedAmount,
    /// The validator the adjustment relates to.
    pub validator_address: String,
}

impl fmt::Display for SlashRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SlashRecord(id: {}, time: {}, offset: {}, validator: {})",
            self.id, self.time, self.native_amount, self.validator_address
        )
    }
}
