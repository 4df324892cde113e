//! Interfaces of the collaborators the keeper consumes.
//!
//! Every collaborator is shared behind an `Arc<dyn ...>` and takes `&self`, so implementations
//! manage their own interior mutability. Collaborators that hold state also implement
//! [`Transactional`] so that a scope rolled back by the keeper is rolled back everywhere.

use std::fmt;

use stzone_primitives::types::{Address, Amount, ChannelId, Coin, Sequence};
use thiserror::Error;

use crate::errors::ErrorKind;

/// A collaborator that can join the keeper's scoped transactions.
///
/// Scopes nest. Every `begin` is matched by exactly one `commit` or `rollback`.
pub trait Transactional {
    /// Opens a scope.
    fn begin(&self) {}

    /// Keeps the changes of the innermost scope.
    fn commit(&self) {}

    /// Discards the changes of the innermost scope.
    fn rollback(&self) {}
}

/// Errors returned by the [`BankKeeper`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    /// The holder does not have enough tokens.
    #[error("{holder} has {available}{denom}, needs {required}{denom}")]
    InsufficientFunds {
        /// The account or module that was debited.
        holder: String,
        /// The denom that was debited.
        denom: String,
        /// The balance of the holder.
        available: Amount,
        /// The amount that was requested.
        required: Amount,
    },

    /// A balance or supply would overflow.
    #[error("overflow in {denom}")]
    Overflow {
        /// The overflowing denom.
        denom: String,
    },

    /// The recipient is not allowed to receive funds.
    #[error("{0} is not allowed to receive funds")]
    Blocked(String),
}

impl BankError {
    /// Returns the category of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            Self::Overflow { .. } => ErrorKind::InvalidAmount,
            Self::Blocked(_) => ErrorKind::InvalidAddress,
        }
    }
}

/// Balances, transfers, minting and burning.
pub trait BankKeeper: Transactional + fmt::Debug {
    /// Returns the balance of `address` in `denom`.
    fn balance(&self, address: &Address, denom: &str) -> Amount;

    /// Returns the total supply of `denom`.
    fn supply(&self, denom: &str) -> Amount;

    /// Moves `coin` between two accounts.
    fn send_coins(&self, from: &Address, to: &Address, coin: &Coin) -> Result<(), BankError>;

    /// Moves `coin` from an account into a module account.
    fn send_coins_from_account_to_module(
        &self,
        from: &Address,
        module: &str,
        coin: &Coin,
    ) -> Result<(), BankError>;

    /// Moves `coin` from a module account into an account.
    fn send_coins_from_module_to_account(
        &self,
        module: &str,
        to: &Address,
        coin: &Coin,
    ) -> Result<(), BankError>;

    /// Creates `coin` in a module account.
    fn mint_coins(&self, module: &str, coin: &Coin) -> Result<(), BankError>;

    /// Destroys `coin` held by a module account.
    fn burn_coins(&self, module: &str, coin: &Coin) -> Result<(), BankError>;
}

/// An outbound ICS-20 transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MsgTransfer {
    /// The local port.
    pub source_port: String,
    /// The local channel.
    pub source_channel: ChannelId,
    /// The tokens to send.
    pub token: Coin,
    /// The local sender.
    pub sender: Address,
    /// The remote receiver.
    pub receiver: Address,
    /// Timeout as unix nanoseconds.
    pub timeout_timestamp: u64,
    /// Free-form memo.
    pub memo: String,
}

/// Errors returned when a transfer is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// The channel is not open.
    #[error("channel {0} is closed")]
    ChannelClosed(ChannelId),

    /// The transfer module refused the packet.
    #[error("transfer rejected: {0}")]
    Rejected(String),
}

/// Submission of outbound transfers.
pub trait TransferKeeper: Transactional + fmt::Debug {
    /// Sends the transfer and returns the packet sequence.
    fn transfer(&self, msg: &MsgTransfer) -> Result<Sequence, TransferError>;
}

/// The transfer rate limiter's denom blacklist.
pub trait RateLimitKeeper: Transactional + fmt::Debug {
    /// Blocks transfers of `denom`.
    fn add_denom_to_blacklist(&self, denom: &str);

    /// Unblocks transfers of `denom`.
    fn remove_denom_from_blacklist(&self, denom: &str);
}

/// A metric pushed to the oracles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricUpdate {
    /// The metric key.
    pub key: String,
    /// The metric value.
    pub value: String,
    /// The metric type.
    pub metric_type: String,
    /// JSON-encoded attributes.
    pub attributes: String,
}

/// Posting of metrics to the oracles.
pub trait OracleKeeper: Transactional + fmt::Debug {
    /// Queues `update` for every registered oracle.
    fn queue_metric_update(&self, update: MetricUpdate);
}

/// Data stored for a packet whose lifecycle events should be routed back to this module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackData {
    /// The packet's source port.
    pub port_id: String,
    /// The packet's source channel.
    pub channel_id: ChannelId,
    /// The packet sequence.
    pub sequence: Sequence,
    /// The registered callback that handles the packet.
    pub callback_id: String,
    /// Opaque arguments for the callback.
    pub args: Vec<u8>,
}

/// Registry routing packet callbacks to this module.
pub trait CallbackRegistry: Transactional + fmt::Debug {
    /// Registers a callback identifier.
    fn register_callback(&self, callback_id: &str);

    /// Stores the callback data of a packet.
    fn set_callback_data(&self, data: CallbackData);

    /// Gets the callback data of a packet.
    fn callback_data(
        &self,
        port_id: &str,
        channel_id: &ChannelId,
        sequence: Sequence,
    ) -> Option<CallbackData>;
}

/// The outcome carried by an acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AckStatus {
    /// The packet was executed on the counterparty.
    Success,
    /// The counterparty returned an error.
    Failure,
    /// The packet timed out.
    Timeout,
}

impl fmt::Display for AckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
            Self::Timeout => "TIMEOUT",
        };
        f.write_str(s)
    }
}

/// A parsed acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AckResponse {
    /// The outcome.
    pub status: AckStatus,
    /// Message responses decoded from a successful ack.
    pub msg_responses: Vec<Vec<u8>>,
    /// The error string of a failed ack.
    pub error: Option<String>,
}

impl AckResponse {
    /// A timeout response.
    pub const fn timeout() -> Self {
        Self {
            status: AckStatus::Timeout,
            msg_responses: Vec::new(),
            error: None,
        }
    }
}

/// Decoding of acknowledgement bytes.
pub trait AckParser: fmt::Debug {
    /// Parses `ack`, returning a description of the problem if it is malformed.
    fn parse(&self, ack: &[u8]) -> Result<AckResponse, String>;
}

/// A packet as delivered to the callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// The packet sequence.
    pub sequence: Sequence,
    /// The local port.
    pub source_port: String,
    /// The local channel.
    pub source_channel: ChannelId,
    /// The remote port.
    pub destination_port: String,
    /// The remote channel.
    pub destination_channel: ChannelId,
    /// The packet payload.
    pub data: Vec<u8>,
}
