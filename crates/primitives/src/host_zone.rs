//! The host zone: the single remote chain this module stakes on.

use serde::{Deserialize, Serialize};

use crate::{
    dec::Dec,
    denom::{ibc_denom, st_denom},
    errors::HostZoneError,
    types::{Address, Amount, ChannelId},
};

/// Outer and inner bounds on the redemption rate.
///
/// The outer bounds are set at genesis and guard the implied rate of undelegations. The inner
/// bounds are tightened by the safe admin and gate user flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedemptionRateBounds {
    /// Hard lower bound.
    pub min: Dec,
    /// Soft lower bound.
    pub min_inner: Dec,
    /// Soft upper bound.
    pub max_inner: Dec,
    /// Hard upper bound.
    pub max: Dec,
}

impl RedemptionRateBounds {
    /// Checks that all bounds are positive and nested as `min ≤ min_inner ≤ max_inner ≤ max`.
    pub fn validate(&self) -> Result<(), HostZoneError> {
        if !self.min.is_positive()
            || !self.min_inner.is_positive()
            || !self.max_inner.is_positive()
            || !self.max.is_positive()
        {
            return Err(HostZoneError::InvalidBounds(
                "min outer, max outer, min inner, and max inner redemption rates must be set"
                    .to_string(),
            ));
        }

        if self.min_inner < self.min {
            return Err(HostZoneError::InvalidBounds(format!(
                "min inner ({}) must be >= min outer ({})",
                self.min_inner, self.min
            )));
        }

        if self.max_inner > self.max {
            return Err(HostZoneError::InvalidBounds(format!(
                "max inner ({}) must be <= max outer ({})",
                self.max_inner, self.max
            )));
        }

        if self.min_inner > self.max_inner {
            return Err(HostZoneError::InvalidBounds(format!(
                "min inner ({}) must be <= max inner ({})",
                self.min_inner, self.max_inner
            )));
        }

        Ok(())
    }

    /// Returns `true` if `rate` lies within both the outer and inner bounds.
    pub fn contains(&self, rate: Dec) -> bool {
        rate >= self.min && rate <= self.max && rate >= self.min_inner && rate <= self.max_inner
    }

    /// Returns `true` if `rate` lies within the outer bounds.
    pub fn outer_contains(&self, rate: Dec) -> bool {
        rate >= self.min && rate <= self.max
    }
}

/// The global configuration and accounting state for the remote chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostZone {
    /// Chain identifier of the remote chain.
    pub chain_id: String,
    /// Native denom on the remote chain.
    pub native_token_denom: String,
    /// IBC denom of the native token on this chain.
    pub native_token_ibc_denom: String,
    /// Transfer channel from this chain to the remote chain.
    pub transfer_channel_id: ChannelId,

    /// Delegation account on the remote chain.
    pub delegation_address: Address,
    /// Reward account on the remote chain.
    pub reward_address: Address,

    /// Module account holding deposits until they are transferred.
    pub deposit_address: Address,
    /// Module account escrowing stTokens of pending redemptions.
    pub redemption_address: Address,
    /// Module account receiving swept native tokens for distribution.
    pub claim_address: Address,
    /// Module account receiving fees to be liquid staked.
    pub fee_address: Address,

    /// Address allowed to confirm routine lifecycle events.
    pub operator_address: Address,
    /// Address allowed to perform corrective and configuration changes.
    pub safe_address: Address,

    /// Redemption rate before the most recent update.
    pub last_redemption_rate: Dec,
    /// Current redemption rate, native tokens per stToken.
    pub redemption_rate: Dec,
    /// Bounds on the redemption rate.
    pub bounds: RedemptionRateBounds,

    /// Native tokens confirmed as delegated on the remote chain.
    pub delegated_balance: Amount,
    /// Unbonding period of the remote chain, in seconds.
    pub unbonding_period_seconds: u64,
    /// Whether user flows are halted.
    pub halted: bool,
}

impl HostZone {
    /// Returns the stToken denom minted against this host zone.
    pub fn st_denom(&self) -> String {
        st_denom(&self.native_token_denom)
    }

    /// Validates the host zone as it must look at genesis.
    pub fn validate(&self, transfer_port: &str) -> Result<(), HostZoneError> {
        if self.chain_id.is_empty() {
            return Err(HostZoneError::MissingField("chain-id"));
        }
        if self.transfer_channel_id.as_str().is_empty() {
            return Err(HostZoneError::MissingField("transfer channel-id"));
        }
        if !self.transfer_channel_id.is_valid() {
            return Err(HostZoneError::MissingField("valid transfer channel-id"));
        }
        if self.native_token_denom.is_empty() {
            return Err(HostZoneError::MissingField("native token denom"));
        }
        if self.native_token_ibc_denom.is_empty() {
            return Err(HostZoneError::MissingField("native token ibc denom"));
        }

        let expected = ibc_denom(
            transfer_port,
            self.transfer_channel_id.as_str(),
            &self.native_token_denom,
        );
        if self.native_token_ibc_denom != expected {
            return Err(HostZoneError::IbcDenomMismatch {
                channel: self.transfer_channel_id.to_string(),
                denom: self.native_token_denom.clone(),
            });
        }

        for (field, address) in self.addresses() {
            if address.is_empty() {
                return Err(HostZoneError::MissingField(field));
            }
            Address::parse(address.as_str())
                .map_err(|source| HostZoneError::InvalidAddress { field, source })?;
        }

        if !self.redemption_rate.is_positive() {
            return Err(HostZoneError::NonPositiveRedemptionRate);
        }

        self.bounds.validate()?;

        if self.unbonding_period_seconds == 0 {
            return Err(HostZoneError::MissingUnbondingPeriod);
        }

        Ok(())
    }

    /// Returns every address on the host zone along with its field name.
    pub fn addresses(&self) -> [(&'static str, &Address); 8] {
        [
            ("delegation address", &self.delegation_address),
            ("reward address", &self.reward_address),
            ("deposit address", &self.deposit_address),
            ("redemption address", &self.redemption_address),
            ("claim address", &self.claim_address),
            ("fee address", &self.fee_address),
            ("operator address", &self.operator_address),
            ("safe address", &self.safe_address),
        ]
    }
}
