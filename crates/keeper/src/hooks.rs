//! The epoch hook driving the periodic steps of the module.

use std::time::Duration;

use stzone_db::kv::KvStore;
use stzone_primitives::types::EpochNumber;
use tracing::{error, info, warn};

use crate::{context::BlockCtx, keeper::Keeper};

/// An epoch that is about to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpochInfo {
    /// The epoch identifier, matched against the cadences in the params.
    pub identifier: String,
    /// The number of the epoch that is starting.
    pub current_epoch: EpochNumber,
    /// The length of the epoch.
    pub duration: Duration,
}

impl<S: KvStore> Keeper<S> {
    /// Runs the steps scheduled for the start of `epoch`.
    ///
    /// Steps never fail the hook. A failed step is logged and its changes are discarded.
    pub fn before_epoch_start(&mut self, ctx: &BlockCtx, epoch: &EpochInfo) {
        let params = &self.params;
        if epoch.identifier == params.day_epoch {
            let undelegate = epoch
                .current_epoch
                .checked_rem(params.undelegation_frequency)
                .is_some_and(|rem| rem == 0);
            self.on_day_epoch(ctx, epoch, undelegate);
        } else if epoch.identifier == params.hour_epoch {
            self.on_hour_epoch(ctx);
        } else if epoch.identifier == params.mint_epoch {
            if let Err(err) = self.safely_liquid_stake_and_distribute_fees() {
                error!(%err, "unable to liquid stake fees");
            }
        }
    }

    fn on_day_epoch(&mut self, ctx: &BlockCtx, epoch: &EpochInfo, undelegate: bool) {
        info!(epoch = %epoch.current_epoch, "starting day epoch");

        if let Err(err) = self.apply_if_no_error(|keeper| keeper.update_redemption_rate()) {
            error!(%err, "unable to update redemption rate");
            return;
        }

        if let Err(err) = self.post_redemption_rate_to_oracle() {
            warn!(%err, "unable to post redemption rate to oracle");
        }

        if let Err(err) =
            self.safely_prepare_delegation(ctx, epoch.current_epoch, epoch.duration)
        {
            error!(%err, epoch = %epoch.current_epoch, "unable to prepare delegation");
        }

        if undelegate {
            if let Err(err) = self.safely_prepare_undelegation(epoch.current_epoch) {
                error!(%err, epoch = %epoch.current_epoch, "unable to prepare undelegation");
            }
        }
    }

    fn on_hour_epoch(&mut self, ctx: &BlockCtx) {
        if let Err(err) = self.apply_if_no_error(|keeper| keeper.mark_finished_unbondings(ctx)) {
            error!(%err, "unable to mark finished unbondings");
        }

        if let Err(err) = self.safely_distribute_claims() {
            error!(%err, "unable to distribute claims");
        }
    }
}
