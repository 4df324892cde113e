//! Halting of the host zone.

use stzone_db::kv::KvStore;
use tracing::{debug, error};

use crate::{errors::KeeperResult, events::StakingEvent, keeper::Keeper};

impl<S: KvStore> Keeper<S> {
    /// Halts the host zone and blacklists its stToken.
    ///
    /// Halting a halted zone does nothing. Only [`Self::resume_host_zone`] lifts the halt.
    pub fn halt_zone(&mut self) -> KeeperResult<()> {
        let mut host_zone = self.host_zone()?;
        if host_zone.halted {
            debug!(chain_id = %host_zone.chain_id, "host zone already halted");
            return Ok(());
        }

        host_zone.halted = true;
        self.set_host_zone(&host_zone)?;

        let st_denom = host_zone.st_denom();
        self.collaborators
            .rate_limit
            .add_denom_to_blacklist(&st_denom);

        error!(
            chain_id = %host_zone.chain_id,
            redemption_rate = %host_zone.redemption_rate,
            min = %host_zone.bounds.min,
            min_inner = %host_zone.bounds.min_inner,
            max_inner = %host_zone.bounds.max_inner,
            max = %host_zone.bounds.max,
            "halting host zone"
        );
        self.emit(StakingEvent::HaltZone {
            host_zone: host_zone.chain_id,
            redemption_rate: host_zone.redemption_rate,
        });

        Ok(())
    }
}
