//! Errors surfaced by the keeper.

use std::fmt;

use stzone_db::errors::DbError;
use stzone_params::errors::ParamsError;
use stzone_primitives::{
    dec::Dec,
    errors::{HostZoneError, ParseError, RecordError},
    types::{Amount, RecordId, SignedAmount},
};
use stzone_sm::{delegation::errors::DelegationSMError, unbonding::errors::UnbondingSMError};
use thiserror::Error;

use crate::{
    admin::AdminRole,
    expected_keepers::{BankError, TransferError},
};

/// The coarse classification of a [`KeeperError`].
///
/// Callers that only need to react to the category of a failure (for example to map it to a
/// response code) match on this instead of on the error itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A user or admin supplied a malformed address.
    InvalidAddress,
    /// An amount is zero, below the minimum or otherwise unusable.
    InvalidAmount,
    /// An account does not hold enough tokens.
    InsufficientFunds,
    /// The host zone is halted.
    Halted,
    /// The redemption rate is outside its bounds.
    RedemptionRateOutOfBounds,
    /// A record does not exist.
    RecordNotFound,
    /// A record with the same identifier already exists.
    RecordAlreadyExists,
    /// A record or the host zone is not in a state that allows the operation.
    InvalidState,
    /// A module invariant does not hold.
    InvariantBroken,
    /// The operation would drive the delegated balance negative.
    NegativeBalance,
    /// The outbound transfer was rejected at submission.
    TransportFailure,
    /// An acknowledgement could not be parsed.
    MalformedAck,
    /// The sender does not hold the required admin role.
    Unauthorized,
    /// A redemption exceeds the delegated balance.
    UnbondTooLarge,
    /// The store failed.
    Storage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InvalidAddress => "INVALID_ADDRESS",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::InsufficientFunds => "INSUFFICIENT_FUNDS",
            Self::Halted => "HALTED",
            Self::RedemptionRateOutOfBounds => "REDEMPTION_RATE_OUT_OF_BOUNDS",
            Self::RecordNotFound => "RECORD_NOT_FOUND",
            Self::RecordAlreadyExists => "RECORD_ALREADY_EXISTS",
            Self::InvalidState => "INVALID_STATE",
            Self::InvariantBroken => "INVARIANT_BROKEN",
            Self::NegativeBalance => "NEGATIVE_BALANCE",
            Self::TransportFailure => "TRANSPORT_FAILURE",
            Self::MalformedAck => "MALFORMED_ACK",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnbondTooLarge => "UNBOND_TOO_LARGE",
            Self::Storage => "STORAGE",
        };
        f.write_str(s)
    }
}

/// Errors raised by a record state machine, wrapped for the keeper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateMachineError {
    /// A delegation record rejected the event.
    #[error(transparent)]
    Delegation(#[from] DelegationSMError),

    /// An unbonding record rejected the event.
    #[error(transparent)]
    Unbonding(#[from] UnbondingSMError),
}

/// Errors that can occur while processing a message, packet callback or epoch step.
#[derive(Debug, Error)]
pub enum KeeperError {
    /// A supplied address does not parse.
    #[error("invalid {field}: {source}")]
    InvalidAddress {
        /// What the address was for.
        field: &'static str,
        /// The parse failure.
        #[source]
        source: ParseError,
    },

    /// An amount is unusable.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// An amount is below the configured minimum.
    #[error("amount {amount} is below the minimum of {minimum}")]
    AmountBelowMinimum {
        /// The requested amount.
        amount: Amount,
        /// The configured minimum.
        minimum: Amount,
    },

    /// A message fails stateless validation.
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// A liquid stake would mint zero stTokens.
    #[error("liquid stake of {native_amount} would return 0 stTokens")]
    InsufficientLiquidStake {
        /// The native amount that was staked.
        native_amount: Amount,
    },

    /// An account holds less than required.
    #[error("{holder} holds {available}{denom}, {required}{denom} required")]
    InsufficientFunds {
        /// The account that was checked.
        holder: String,
        /// The denom that was checked.
        denom: String,
        /// The account's balance.
        available: Amount,
        /// The amount that was required.
        required: Amount,
    },

    /// The host zone is halted.
    #[error("host zone {chain_id} is halted")]
    Halted {
        /// The halted host zone.
        chain_id: String,
    },

    /// A resume was requested while the host zone is running.
    #[error("host zone {chain_id} is not halted")]
    NotHalted {
        /// The running host zone.
        chain_id: String,
    },

    /// The host zone has not been initialised.
    #[error("host zone not found")]
    HostZoneNotFound,

    /// The host zone fails validation.
    #[error("invalid host zone: {0}")]
    InvalidHostZone(#[from] HostZoneError),

    /// A bounds update is not nested correctly.
    #[error("invalid redemption rate bounds: {0}")]
    InvalidBounds(String),

    /// The redemption rate or an implied rate is outside its bounds.
    #[error("redemption rate {rate} outside safety bounds: {reason}")]
    RedemptionRateOutOfBounds {
        /// The offending rate.
        rate: Dec,
        /// Which bound was crossed.
        reason: String,
    },

    /// The redemption rate cannot be computed from the current balances.
    #[error("cannot compute redemption rate from {native_locked} native tokens and {st_supply} stTokens")]
    InconsistentRedemptionRate {
        /// Native tokens locked in the module.
        native_locked: Amount,
        /// stToken supply.
        st_supply: Amount,
    },

    /// The implied rate of an undelegation could not be computed because nothing was burned.
    #[error("division by zero: no stTokens were burned")]
    DivisionByZero,

    /// A record does not exist.
    #[error("{kind} record {id} not found")]
    RecordNotFound {
        /// The record family.
        kind: &'static str,
        /// The record identifier.
        id: String,
    },

    /// A record with the same identifier already exists.
    #[error("{kind} record {id} already exists")]
    RecordAlreadyExists {
        /// The record family.
        kind: &'static str,
        /// The record identifier.
        id: RecordId,
    },

    /// A record rejected the requested transition.
    #[error(transparent)]
    StateMachine(#[from] StateMachineError),

    /// A module invariant does not hold.
    #[error("invariant broken: {0}")]
    InvariantBroken(String),

    /// The delegated balance would become negative.
    #[error("delegated balance {current} cannot absorb a change of {change}")]
    NegativeBalance {
        /// The delegated balance before the change.
        current: Amount,
        /// The requested change.
        change: SignedAmount,
    },

    /// A redemption is larger than the delegated balance.
    #[error("cannot unstake an amount greater than total staked balance: {native_amount} > {delegated_balance}")]
    UnbondTooLarge {
        /// The estimated native amount of the redemption.
        native_amount: Amount,
        /// The delegated balance.
        delegated_balance: Amount,
    },

    /// An arithmetic result does not fit.
    #[error("overflow computing {0}")]
    Overflow(&'static str),

    /// The sender does not hold the required role.
    #[error("{sender} is not authorized as {role}")]
    Unauthorized {
        /// The sender of the message.
        sender: String,
        /// The role that was required.
        role: AdminRole,
    },

    /// The bank rejected a transfer, mint or burn.
    #[error("bank: {0}")]
    Bank(#[from] BankError),

    /// The outbound transfer was rejected at submission.
    #[error("transfer submission failed: {0}")]
    TransportFailure(#[from] TransferError),

    /// An acknowledgement could not be parsed.
    #[error("malformed acknowledgement: {0}")]
    MalformedAck(String),

    /// The callback identifier is not registered by this module.
    #[error("unknown callback {0}")]
    UnknownCallback(String),

    /// Genesis records fail validation.
    #[error("invalid genesis records: {0}")]
    InvalidRecords(#[from] RecordError),

    /// Module parameters fail validation.
    #[error("invalid params: {0}")]
    InvalidParams(#[from] ParamsError),

    /// The store failed.
    #[error("db: {0}")]
    Db(#[from] DbError),
}

impl From<DelegationSMError> for KeeperError {
    fn from(err: DelegationSMError) -> Self {
        Self::StateMachine(err.into())
    }
}

impl From<UnbondingSMError> for KeeperError {
    fn from(err: UnbondingSMError) -> Self {
        Self::StateMachine(err.into())
    }
}

impl KeeperError {
    /// Returns the category of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAddress { .. } => ErrorKind::InvalidAddress,
            Self::InvalidAmount(_)
            | Self::AmountBelowMinimum { .. }
            | Self::InsufficientLiquidStake { .. }
            | Self::InvalidBounds(_)
            | Self::Overflow(_) => ErrorKind::InvalidAmount,
            Self::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            Self::Bank(err) => err.kind(),
            Self::Halted { .. } => ErrorKind::Halted,
            Self::RedemptionRateOutOfBounds { .. } => ErrorKind::RedemptionRateOutOfBounds,
            Self::HostZoneNotFound | Self::RecordNotFound { .. } => ErrorKind::RecordNotFound,
            Self::RecordAlreadyExists { .. } => ErrorKind::RecordAlreadyExists,
            Self::NotHalted { .. }
            | Self::InvalidHostZone(_)
            | Self::InconsistentRedemptionRate { .. }
            | Self::StateMachine(_)
            | Self::UnknownCallback(_)
            | Self::InvalidMessage(_)
            | Self::InvalidRecords(_)
            | Self::InvalidParams(_) => ErrorKind::InvalidState,
            Self::InvariantBroken(_) | Self::DivisionByZero => ErrorKind::InvariantBroken,
            Self::NegativeBalance { .. } => ErrorKind::NegativeBalance,
            Self::UnbondTooLarge { .. } => ErrorKind::UnbondTooLarge,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::TransportFailure(_) => ErrorKind::TransportFailure,
            Self::MalformedAck(_) => ErrorKind::MalformedAck,
            Self::Db(_) => ErrorKind::Storage,
        }
    }

    pub(crate) fn delegation_not_found(id: RecordId) -> Self {
        Self::RecordNotFound {
            kind: "delegation",
            id: id.to_string(),
        }
    }

    pub(crate) fn unbonding_not_found(id: RecordId) -> Self {
        Self::RecordNotFound {
            kind: "unbonding",
            id: id.to_string(),
        }
    }
}

/// The result type used throughout the keeper.
pub type KeeperResult<T> = Result<T, KeeperError>;
