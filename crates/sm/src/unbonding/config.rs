//! Configuration for the Unbonding State Machine.

use stzone_primitives::host_zone::HostZone;

/// Static configuration consulted by unbonding transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnbondingSMCfg {
    /// The host zone's unbonding period in seconds.
    pub unbonding_period_seconds: u64,
}

impl From<&HostZone> for UnbondingSMCfg {
    fn from(host_zone: &HostZone) -> Self {
        Self {
            unbonding_period_seconds: host_zone.unbonding_period_seconds,
        }
    }
}
