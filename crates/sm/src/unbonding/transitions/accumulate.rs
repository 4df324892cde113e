use stzone_primitives::{records::UnbondingRecordStatus, types::Amount};
use tracing::debug;

use crate::unbonding::{
    duties::UnbondingDuty,
    errors::{UnbondingSMError, UnbondingSMResult},
    events::UnbondingEvent,
    machine::{UnbondingSM, UnbondingSMOutput},
};

impl UnbondingSM {
    /// Adds a redemption to the accumulating record's totals.
    pub(crate) fn process_redemption_added(
        &mut self,
        native_amount: Amount,
        st_token_amount: Amount,
    ) -> UnbondingSMResult<UnbondingSMOutput> {
        let event = UnbondingEvent::RedemptionAdded {
            native_amount,
            st_token_amount,
        };

        if self.record().status != UnbondingRecordStatus::AccumulatingRedemptions {
            return Err(UnbondingSMError::invalid_event(
                self.record().clone(),
                event,
                Some("redemptions can only be added to the accumulating record".to_string()),
            ));
        }

        if st_token_amount == 0 {
            return Err(UnbondingSMError::rejected(
                self.record().clone(),
                event,
                "redemption must escrow a positive stToken amount",
            ));
        }

        let record = self.record();
        let (Some(native_total), Some(st_total)) = (
            record.native_amount.checked_add(native_amount),
            record.st_token_amount.checked_add(st_token_amount),
        ) else {
            return Err(UnbondingSMError::rejected(
                record.clone(),
                event,
                "unbonding totals overflow",
            ));
        };

        let record = self.record_mut();
        record.native_amount = native_total;
        record.st_token_amount = st_total;

        Ok(UnbondingSMOutput::new())
    }

    /// Closes the accumulation window.
    ///
    /// A record whose recomputed native total is zero never enters the unbonding queue and is
    /// archived as is. Otherwise the total is stored and the record is queued for undelegation.
    pub(crate) fn process_frozen(
        &mut self,
        native_amount: Amount,
    ) -> UnbondingSMResult<UnbondingSMOutput> {
        if self.record().status != UnbondingRecordStatus::AccumulatingRedemptions {
            return Err(UnbondingSMError::invalid_event(
                self.record().clone(),
                UnbondingEvent::Frozen { native_amount },
                Some("only the accumulating record can be frozen".to_string()),
            ));
        }

        if native_amount == 0 {
            debug!(record = %self.record(), "archiving empty unbonding record");
            return Ok(UnbondingSMOutput::with_duties(vec![
                UnbondingDuty::ArchiveRecord,
            ]));
        }

        let record = self.record_mut();
        record.native_amount = native_amount;
        record.status = UnbondingRecordStatus::UnbondingQueue;
        debug!(record = %self.record(), "unbonding record frozen");

        Ok(UnbondingSMOutput::new())
    }
}
