//! Events emitted for off-chain indexers.

use std::fmt;

use stzone_primitives::{
    dec::Dec,
    types::{Address, Amount, RecordId},
};

use crate::expected_keepers::AckStatus;

/// An event emitted by the keeper.
///
/// Events are buffered together with the store writes of the scope that produced them and are
/// dropped if that scope is rolled back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StakingEvent {
    /// Native tokens were staked and stTokens minted.
    SuccessfulLiquidStake {
        /// The staker.
        staker: Address,
        /// The host chain.
        host_zone: String,
        /// The native denom on the host.
        native_base_denom: String,
        /// The native denom on this chain.
        native_ibc_denom: String,
        /// Native tokens staked.
        native_amount: Amount,
        /// stTokens minted.
        st_token_amount: Amount,
    },

    /// stTokens were escrowed for redemption.
    SuccessfulRedeemStake {
        /// The redeemer.
        redeemer: Address,
        /// The host chain.
        host_zone: String,
        /// The unbonding record the redemption was added to.
        unbonding_record_id: RecordId,
        /// Estimated native tokens owed.
        native_amount: Amount,
        /// stTokens escrowed.
        st_token_amount: Amount,
    },

    /// A delegation was confirmed on the host.
    ConfirmDelegation {
        /// The host chain.
        host_zone: String,
        /// The delegation record.
        record_id: RecordId,
        /// Native tokens delegated.
        native_amount: Amount,
        /// The delegation transaction.
        tx_hash: String,
        /// The confirming admin.
        sender: Address,
    },

    /// An undelegation was confirmed on the host.
    ConfirmUndelegation {
        /// The host chain.
        host_zone: String,
        /// The unbonding record.
        record_id: RecordId,
        /// Native tokens undelegated.
        native_amount: Amount,
        /// stTokens burned.
        st_token_amount: Amount,
        /// The undelegation transaction.
        tx_hash: String,
        /// The confirming admin.
        sender: Address,
    },

    /// The sweep of unbonded tokens was confirmed.
    ConfirmSweep {
        /// The host chain.
        host_zone: String,
        /// The unbonding record.
        record_id: RecordId,
        /// Native tokens swept.
        native_amount: Amount,
        /// The sweep transaction.
        tx_hash: String,
        /// The confirming admin.
        sender: Address,
    },

    /// A redemption rate update was queued for the oracles.
    UpdateOracle {
        /// The metric key.
        metric_key: String,
        /// The metric value.
        metric_value: String,
    },

    /// An oracle update was acknowledged.
    UpdateOracleAck {
        /// The metric key.
        metric_key: String,
        /// The outcome of the update.
        ack_status: AckStatus,
    },

    /// The host zone was halted.
    HaltZone {
        /// The host chain.
        host_zone: String,
        /// The redemption rate at the time of the halt.
        redemption_rate: Dec,
    },
}

impl StakingEvent {
    /// Returns the event type.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SuccessfulLiquidStake { .. } => "successful_liquid_stake",
            Self::SuccessfulRedeemStake { .. } => "successful_redeem_stake",
            Self::ConfirmDelegation { .. } => "confirm_delegation",
            Self::ConfirmUndelegation { .. } => "confirm_undelegation",
            Self::ConfirmSweep { .. } => "confirm_sweep",
            Self::UpdateOracle { .. } => "update_oracle",
            Self::UpdateOracleAck { .. } => "update_oracle_ack",
            Self::HaltZone { .. } => "halt_zone",
        }
    }

    /// Returns the event attributes as key-value pairs.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::SuccessfulLiquidStake {
                staker,
                host_zone,
                native_base_denom,
                native_ibc_denom,
                native_amount,
                st_token_amount,
            } => vec![
                ("liquid_staker", staker.to_string()),
                ("host_zone", host_zone.clone()),
                ("native_base_denom", native_base_denom.clone()),
                ("native_ibc_denom", native_ibc_denom.clone()),
                ("native_amount", native_amount.to_string()),
                ("sttoken_amount", st_token_amount.to_string()),
            ],
            Self::SuccessfulRedeemStake {
                redeemer,
                host_zone,
                unbonding_record_id,
                native_amount,
                st_token_amount,
            } => vec![
                ("redeemer", redeemer.to_string()),
                ("host_zone", host_zone.clone()),
                ("unbonding_record_id", unbonding_record_id.to_string()),
                ("native_amount", native_amount.to_string()),
                ("sttoken_amount", st_token_amount.to_string()),
            ],
            Self::ConfirmDelegation {
                host_zone,
                record_id,
                native_amount,
                tx_hash,
                sender,
            }
            | Self::ConfirmSweep {
                host_zone,
                record_id,
                native_amount,
                tx_hash,
                sender,
            } => vec![
                ("host_zone", host_zone.clone()),
                ("record_id", record_id.to_string()),
                ("native_amount", native_amount.to_string()),
                ("tx_hash", tx_hash.clone()),
                ("sender", sender.to_string()),
            ],
            Self::ConfirmUndelegation {
                host_zone,
                record_id,
                native_amount,
                st_token_amount,
                tx_hash,
                sender,
            } => vec![
                ("host_zone", host_zone.clone()),
                ("record_id", record_id.to_string()),
                ("native_amount", native_amount.to_string()),
                ("sttoken_amount", st_token_amount.to_string()),
                ("tx_hash", tx_hash.clone()),
                ("sender", sender.to_string()),
            ],
            Self::UpdateOracle {
                metric_key,
                metric_value,
            } => vec![
                ("metric_key", metric_key.clone()),
                ("metric_value", metric_value.clone()),
            ],
            Self::UpdateOracleAck {
                metric_key,
                ack_status,
            } => vec![
                ("metric_key", metric_key.clone()),
                ("ack_status", ack_status.to_string()),
            ],
            Self::HaltZone {
                host_zone,
                redemption_rate,
            } => vec![
                ("host_zone", host_zone.clone()),
                ("redemption_rate", redemption_rate.to_string()),
            ],
        }
    }
}

impl fmt::Display for StakingEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        for (i, (key, value)) in self.attributes().iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{key}={value}")?;
        }

        Ok(())
    }
}
