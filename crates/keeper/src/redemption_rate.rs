//! Computation, bounds checking and oracle posting of the redemption rate.

use stzone_db::{kv::KvStore, records::DelegationRecordDb};
use stzone_primitives::{
    dec::Dec,
    errors::HostZoneError,
    host_zone::{HostZone, RedemptionRateBounds},
};
use tracing::{debug, info};

use crate::{
    errors::{KeeperError, KeeperResult},
    events::StakingEvent,
    expected_keepers::MetricUpdate,
    keeper::Keeper,
};

/// Metric type of redemption rate oracle updates.
pub const REDEMPTION_RATE_METRIC_TYPE: &str = "redemption_rate";

/// Returns the oracle metric key of the redemption rate of `st_denom`.
pub fn redemption_rate_metric_key(st_denom: &str) -> String {
    format!("{st_denom}_{REDEMPTION_RATE_METRIC_TYPE}")
}

/// Checks the host zone's redemption rate against both its inner and outer bounds.
pub fn check_redemption_rate_within_bounds(host_zone: &HostZone) -> KeeperResult<()> {
    let rate = host_zone.redemption_rate;
    let bounds = &host_zone.bounds;

    let crossed = if rate < bounds.min {
        Some(format!("below min outer bound {}", bounds.min))
    } else if rate > bounds.max {
        Some(format!("above max outer bound {}", bounds.max))
    } else if rate < bounds.min_inner {
        Some(format!("below min inner bound {}", bounds.min_inner))
    } else if rate > bounds.max_inner {
        Some(format!("above max inner bound {}", bounds.max_inner))
    } else {
        None
    };

    match crossed {
        Some(reason) => Err(KeeperError::RedemptionRateOutOfBounds { rate, reason }),
        None => Ok(()),
    }
}

impl<S: KvStore> Keeper<S> {
    /// Recomputes the redemption rate from the deposit balance, the in-flight delegations, the
    /// delegated balance and the stToken supply.
    ///
    /// Leaves the rate untouched if nothing has been staked yet.
    pub fn update_redemption_rate(&mut self) -> KeeperResult<()> {
        let mut host_zone = self.host_zone()?;

        let deposit = self
            .bank()
            .balance(&host_zone.deposit_address, &host_zone.native_token_ibc_denom);
        let in_flight = self
            .store
            .all_active_delegation_records()?
            .iter()
            .try_fold(0u128, |total, r| total.checked_add(r.native_amount))
            .ok_or(KeeperError::Overflow("in-flight delegations"))?;
        let st_supply = self.bank().supply(&host_zone.st_denom());

        let native_locked = deposit
            .checked_add(in_flight)
            .and_then(|total| total.checked_add(host_zone.delegated_balance))
            .ok_or(KeeperError::Overflow("native tokens locked"))?;

        if st_supply == 0 && native_locked == 0 {
            debug!(chain_id = %host_zone.chain_id, "nothing staked, keeping redemption rate");
            return Ok(());
        }
        if st_supply == 0 || native_locked == 0 {
            return Err(KeeperError::InconsistentRedemptionRate {
                native_locked,
                st_supply,
            });
        }

        let rate = Dec::from_ratio(native_locked, st_supply)
            .ok_or(KeeperError::Overflow("redemption rate"))?;

        host_zone.last_redemption_rate = host_zone.redemption_rate;
        host_zone.redemption_rate = rate;
        self.set_host_zone(&host_zone)?;

        info!(
            chain_id = %host_zone.chain_id,
            %deposit,
            %in_flight,
            delegated = %host_zone.delegated_balance,
            %st_supply,
            %rate,
            "updated redemption rate"
        );

        Ok(())
    }

    /// Fails if the current redemption rate is outside its bounds.
    pub fn check_redemption_rate_exceeds_bounds(&self) -> KeeperResult<()> {
        check_redemption_rate_within_bounds(&self.host_zone()?)
    }

    /// Queues the redemption rate for the oracles.
    ///
    /// Nothing is posted while the rate is out of bounds.
    pub fn post_redemption_rate_to_oracle(&mut self) -> KeeperResult<()> {
        let host_zone = self.host_zone()?;
        check_redemption_rate_within_bounds(&host_zone)?;

        let st_denom = host_zone.st_denom();
        let attributes = serde_json::json!({ "sttoken_denom": st_denom }).to_string();
        let update = MetricUpdate {
            key: redemption_rate_metric_key(&st_denom),
            value: host_zone.redemption_rate.to_string(),
            metric_type: REDEMPTION_RATE_METRIC_TYPE.to_string(),
            attributes,
        };

        info!(key = %update.key, value = %update.value, "queueing redemption rate oracle update");
        self.emit(StakingEvent::UpdateOracle {
            metric_key: update.key.clone(),
            metric_value: update.value.clone(),
        });
        self.collaborators.oracle.queue_metric_update(update);

        Ok(())
    }

    /// Replaces the inner redemption rate bounds.
    ///
    /// The new bounds must be positive, ordered and within the outer bounds.
    pub fn update_inner_redemption_rate_bounds(
        &mut self,
        min_inner: Dec,
        max_inner: Dec,
    ) -> KeeperResult<()> {
        let mut host_zone = self.host_zone()?;

        let bounds = RedemptionRateBounds {
            min_inner,
            max_inner,
            ..host_zone.bounds
        };
        bounds.validate().map_err(|err| match err {
            HostZoneError::InvalidBounds(reason) => KeeperError::InvalidBounds(reason),
            other => KeeperError::InvalidBounds(other.to_string()),
        })?;

        host_zone.bounds = bounds;
        self.set_host_zone(&host_zone)?;

        info!(%min_inner, %max_inner, "updated inner redemption rate bounds");

        Ok(())
    }
}
