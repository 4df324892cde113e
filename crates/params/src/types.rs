//! Types for the module parameters.

use serde::{Deserialize, Serialize};

use crate::{default, errors::ParamsError};

/// Parameters of the liquid staking module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleParams {
    /// Identifier of the daily epoch.
    pub day_epoch: String,
    /// Identifier of the hourly epoch.
    pub hour_epoch: String,
    /// Identifier of the fee minting epoch.
    pub mint_epoch: String,
    /// Number of day epochs between freezes of the accumulating unbonding record.
    pub undelegation_frequency: u64,
    /// Smallest native amount accepted by a liquid stake.
    pub min_liquid_stake_amount: u128,
    /// Smallest stToken amount accepted by a redemption.
    pub min_redeem_amount: u128,
    /// Page size used when none is requested.
    pub default_page_limit: u64,
    /// Largest page size that may be requested.
    pub max_page_limit: u64,
    /// Human readable prefix of local addresses.
    pub address_prefix: String,
    /// Port used for token transfers.
    pub transfer_port: String,
    /// Name of this module's account.
    pub module_account: String,
    /// Name of the fee collector module account.
    pub fee_collector_module: String,
    /// Buffer added to completion estimates of records that are not yet undelegated.
    pub unbonding_estimate_buffer_seconds: u64,
}

impl Default for ModuleParams {
    fn default() -> Self {
        Self {
            day_epoch: default::DAY_EPOCH.to_string(),
            hour_epoch: default::HOUR_EPOCH.to_string(),
            mint_epoch: default::MINT_EPOCH.to_string(),
            undelegation_frequency: default::UNDELEGATION_FREQUENCY,
            min_liquid_stake_amount: default::MIN_LIQUID_STAKE_AMOUNT,
            min_redeem_amount: default::MIN_REDEEM_AMOUNT,
            default_page_limit: default::DEFAULT_PAGE_LIMIT,
            max_page_limit: default::MAX_PAGE_LIMIT,
            address_prefix: default::ADDRESS_PREFIX.to_string(),
            transfer_port: default::TRANSFER_PORT.to_string(),
            module_account: default::MODULE_ACCOUNT.to_string(),
            fee_collector_module: default::FEE_COLLECTOR_MODULE.to_string(),
            unbonding_estimate_buffer_seconds: default::UNBONDING_ESTIMATE_BUFFER_SECONDS,
        }
    }
}

impl ModuleParams {
    /// Checks that the parameters are usable.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let strings = [
            ("day epoch", &self.day_epoch),
            ("hour epoch", &self.hour_epoch),
            ("mint epoch", &self.mint_epoch),
            ("address prefix", &self.address_prefix),
            ("transfer port", &self.transfer_port),
            ("module account", &self.module_account),
            ("fee collector module", &self.fee_collector_module),
        ];
        if let Some((name, _)) = strings.iter().find(|(_, value)| value.is_empty()) {
            return Err(ParamsError::Empty(*name));
        }

        if self.undelegation_frequency == 0 {
            return Err(ParamsError::Zero("undelegation frequency"));
        }
        if self.default_page_limit == 0 {
            return Err(ParamsError::Zero("default page limit"));
        }
        if self.default_page_limit > self.max_page_limit {
            return Err(ParamsError::PageLimit {
                default: self.default_page_limit,
                max: self.max_page_limit,
            });
        }

        let epochs = [&self.day_epoch, &self.hour_epoch, &self.mint_epoch];
        for (i, epoch) in epochs.iter().enumerate() {
            if epochs[i + 1..].contains(epoch) {
                return Err(ParamsError::DuplicateEpochIdentifier(epoch.to_string()));
            }
        }

        Ok(())
    }

    /// Returns the page limit to use for a request, clamped to the maximum.
    pub fn page_limit(&self, requested: Option<u64>) -> u64 {
        match requested {
            Some(0) | None => self.default_page_limit,
            Some(limit) => limit.min(self.max_page_limit),
        }
    }
}
