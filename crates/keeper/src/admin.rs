//! Admin roles and the capability check guarding admin messages.

use std::fmt;

use stzone_primitives::{host_zone::HostZone, types::Address};
use tracing::warn;

use crate::errors::{KeeperError, KeeperResult};

/// An admin capability held by an address on the host zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminRole {
    /// Confirms routine lifecycle events.
    Operator,
    /// Performs corrective and configuration changes. Holds every operator capability too.
    Safe,
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operator => f.write_str("operator"),
            Self::Safe => f.write_str("safe"),
        }
    }
}

/// Checks that `sender` holds `role` on `host_zone`.
pub fn check_role(host_zone: &HostZone, sender: &Address, role: AdminRole) -> KeeperResult<()> {
    let authorized = match role {
        AdminRole::Operator => {
            sender == &host_zone.operator_address || sender == &host_zone.safe_address
        }
        AdminRole::Safe => sender == &host_zone.safe_address,
    };

    if !authorized {
        warn!(%sender, %role, "rejected unauthorized admin message");
        return Err(KeeperError::Unauthorized {
            sender: sender.to_string(),
            role,
        });
    }

    Ok(())
}
