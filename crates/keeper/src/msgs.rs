//! The messages accepted by the module and their stateless validation.

use serde::{Deserialize, Serialize};
use stzone_params::types::ModuleParams;
use stzone_primitives::{
    dec::Dec,
    records::{DelegationRecord, RedemptionRecord, UnbondingRecord},
    types::{Address, Amount, Coin, RecordId, SignedAmount},
};

use crate::errors::{KeeperError, KeeperResult};

fn validate_address(field: &'static str, address: &Address, params: &ModuleParams) -> KeeperResult<()> {
    Address::parse_with_prefix(address.as_str(), &params.address_prefix)
        .map(|_| ())
        .map_err(|source| KeeperError::InvalidAddress { field, source })
}

fn validate_tx_hash(tx_hash: &str) -> KeeperResult<()> {
    if tx_hash.is_empty() {
        return Err(KeeperError::InvalidMessage("tx hash is empty".to_string()));
    }
    if hex::decode(tx_hash).is_err() {
        return Err(KeeperError::InvalidMessage(format!(
            "tx hash is invalid {tx_hash}"
        )));
    }

    Ok(())
}

fn validate_optional_tx_hash(tx_hash: &str) -> KeeperResult<()> {
    if tx_hash.is_empty() {
        return Ok(());
    }

    validate_tx_hash(tx_hash)
}

fn validate_minimum(amount: Amount, minimum: Amount) -> KeeperResult<()> {
    if amount < minimum {
        return Err(KeeperError::AmountBelowMinimum { amount, minimum });
    }

    Ok(())
}

/// Stake native tokens for stTokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgLiquidStake {
    /// The staker.
    pub staker: Address,
    /// Native tokens to stake.
    pub native_amount: Amount,
}

/// Redeem stTokens for native tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgRedeemStake {
    /// The redeemer.
    pub redeemer: Address,
    /// stTokens to redeem.
    pub st_token_amount: Amount,
}

/// Confirm that a delegation landed on the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgConfirmDelegation {
    /// The operator or safe.
    pub operator: Address,
    /// The delegation record.
    pub record_id: RecordId,
    /// The delegation transaction.
    pub tx_hash: String,
}

/// Confirm that an undelegation was submitted on the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgConfirmUndelegation {
    /// The operator or safe.
    pub operator: Address,
    /// The unbonding record.
    pub record_id: RecordId,
    /// The undelegation transaction.
    pub tx_hash: String,
}

/// Confirm that unbonded tokens were swept to the claim account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgConfirmUnbondedTokenSweep {
    /// The operator or safe.
    pub operator: Address,
    /// The unbonding record.
    pub record_id: RecordId,
    /// The sweep transaction.
    pub tx_hash: String,
}

/// Correct the delegated balance, for example after a slash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgAdjustDelegatedBalance {
    /// The safe.
    pub operator: Address,
    /// Signed change applied to the delegated balance.
    pub delegation_offset: SignedAmount,
    /// The validator the change is attributed to.
    pub validator_address: String,
}

/// Replace the inner redemption rate bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUpdateInnerRedemptionRateBounds {
    /// The safe.
    pub creator: Address,
    /// New lower inner bound.
    pub min_inner_redemption_rate: Dec,
    /// New upper inner bound.
    pub max_inner_redemption_rate: Dec,
}

/// Lift a halt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgResumeHostZone {
    /// The safe.
    pub creator: Address,
}

/// Recompute the redemption rate outside of the day epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgRefreshRedemptionRate {
    /// The safe.
    pub creator: Address,
}

/// Replace the operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSetOperatorAddress {
    /// The safe.
    pub signer: Address,
    /// The new operator.
    pub operator: Address,
}

/// Replace a delegation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgOverwriteDelegationRecord {
    /// The safe.
    pub creator: Address,
    /// The replacement record.
    pub delegation_record: DelegationRecord,
}

/// Replace an unbonding record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgOverwriteUnbondingRecord {
    /// The safe.
    pub creator: Address,
    /// The replacement record.
    pub unbonding_record: UnbondingRecord,
}

/// Replace a redemption record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgOverwriteRedemptionRecord {
    /// The safe.
    pub creator: Address,
    /// The replacement record.
    pub redemption_record: RedemptionRecord,
}

/// Any message accepted by the module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Msg {
    /// A liquid stake.
    LiquidStake(MsgLiquidStake),
    /// A redemption.
    RedeemStake(MsgRedeemStake),
    /// A delegation confirmation.
    ConfirmDelegation(MsgConfirmDelegation),
    /// An undelegation confirmation.
    ConfirmUndelegation(MsgConfirmUndelegation),
    /// A sweep confirmation.
    ConfirmUnbondedTokenSweep(MsgConfirmUnbondedTokenSweep),
    /// A delegated balance correction.
    AdjustDelegatedBalance(MsgAdjustDelegatedBalance),
    /// An inner bounds update.
    UpdateInnerRedemptionRateBounds(MsgUpdateInnerRedemptionRateBounds),
    /// A resume.
    ResumeHostZone(MsgResumeHostZone),
    /// A redemption rate refresh.
    RefreshRedemptionRate(MsgRefreshRedemptionRate),
    /// An operator change.
    SetOperatorAddress(MsgSetOperatorAddress),
    /// A delegation record overwrite.
    OverwriteDelegationRecord(MsgOverwriteDelegationRecord),
    /// An unbonding record overwrite.
    OverwriteUnbondingRecord(MsgOverwriteUnbondingRecord),
    /// A redemption record overwrite.
    OverwriteRedemptionRecord(MsgOverwriteRedemptionRecord),
}

impl Msg {
    /// Returns the message type.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LiquidStake(_) => "liquid_stake",
            Self::RedeemStake(_) => "redeem_stake",
            Self::ConfirmDelegation(_) => "confirm_delegation",
            Self::ConfirmUndelegation(_) => "confirm_undelegation",
            Self::ConfirmUnbondedTokenSweep(_) => "confirm_unbonded_token_sweep",
            Self::AdjustDelegatedBalance(_) => "adjust_delegated_balance",
            Self::UpdateInnerRedemptionRateBounds(_) => "update_inner_redemption_rate_bounds",
            Self::ResumeHostZone(_) => "resume_host_zone",
            Self::RefreshRedemptionRate(_) => "refresh_redemption_rate",
            Self::SetOperatorAddress(_) => "set_operator_address",
            Self::OverwriteDelegationRecord(_) => "overwrite_delegation_record",
            Self::OverwriteUnbondingRecord(_) => "overwrite_unbonding_record",
            Self::OverwriteRedemptionRecord(_) => "overwrite_redemption_record",
        }
    }

    /// Returns the signer of the message.
    pub const fn signer(&self) -> &Address {
        match self {
            Self::LiquidStake(msg) => &msg.staker,
            Self::RedeemStake(msg) => &msg.redeemer,
            Self::ConfirmDelegation(msg) => &msg.operator,
            Self::ConfirmUndelegation(msg) => &msg.operator,
            Self::ConfirmUnbondedTokenSweep(msg) => &msg.operator,
            Self::AdjustDelegatedBalance(msg) => &msg.operator,
            Self::UpdateInnerRedemptionRateBounds(msg) => &msg.creator,
            Self::ResumeHostZone(msg) => &msg.creator,
            Self::RefreshRedemptionRate(msg) => &msg.creator,
            Self::SetOperatorAddress(msg) => &msg.signer,
            Self::OverwriteDelegationRecord(msg) => &msg.creator,
            Self::OverwriteUnbondingRecord(msg) => &msg.creator,
            Self::OverwriteRedemptionRecord(msg) => &msg.creator,
        }
    }

    /// Checks everything that can be checked without reading state.
    pub fn validate_basic(&self, params: &ModuleParams) -> KeeperResult<()> {
        validate_address("signer", self.signer(), params)?;

        match self {
            Self::LiquidStake(msg) => validate_minimum(msg.native_amount, params.min_liquid_stake_amount),
            Self::RedeemStake(msg) => validate_minimum(msg.st_token_amount, params.min_redeem_amount),
            Self::ConfirmDelegation(MsgConfirmDelegation { tx_hash, .. })
            | Self::ConfirmUndelegation(MsgConfirmUndelegation { tx_hash, .. })
            | Self::ConfirmUnbondedTokenSweep(MsgConfirmUnbondedTokenSweep { tx_hash, .. }) => {
                validate_tx_hash(tx_hash)
            }
            Self::AdjustDelegatedBalance(msg) => {
                if msg.delegation_offset == 0 {
                    return Err(KeeperError::InvalidMessage(
                        "delegation offset must be specified".to_string(),
                    ));
                }
                if msg.validator_address.is_empty() {
                    return Err(KeeperError::InvalidMessage(
                        "validator address must be specified".to_string(),
                    ));
                }
                Ok(())
            }
            Self::UpdateInnerRedemptionRateBounds(msg) => {
                let (min, max) = (msg.min_inner_redemption_rate, msg.max_inner_redemption_rate);
                if !min.is_positive() || !max.is_positive() || min > max {
                    return Err(KeeperError::InvalidBounds(format!(
                        "invalid host zone redemption rate inner bounds: [{min}, {max}]"
                    )));
                }
                Ok(())
            }
            Self::SetOperatorAddress(msg) => validate_address("operator", &msg.operator, params),
            Self::OverwriteDelegationRecord(msg) => {
                validate_optional_tx_hash(&msg.delegation_record.tx_hash)
            }
            Self::OverwriteUnbondingRecord(msg) => {
                let record = &msg.unbonding_record;
                validate_optional_tx_hash(&record.undelegation_tx_hash)?;
                validate_optional_tx_hash(&record.unbonded_token_sweep_tx_hash)
            }
            Self::OverwriteRedemptionRecord(msg) => {
                validate_address("redeemer", &msg.redemption_record.redeemer, params)
            }
            Self::ResumeHostZone(_) | Self::RefreshRedemptionRate(_) => Ok(()),
        }
    }
}

/// The result of a successfully handled message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MsgResponse {
    /// The stTokens minted by a liquid stake.
    LiquidStake {
        /// The minted stTokens.
        st_token: Coin,
    },
    /// The native tokens a redemption is expected to return.
    RedeemStake {
        /// The estimated native tokens.
        native_token: Coin,
    },
    /// A message without a payload in its response.
    Empty,
}
