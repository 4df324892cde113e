//! Errors raised while parsing or validating primitive types.

use thiserror::Error;

/// Errors that occur when parsing a primitive from its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The address is empty or not of the form `<prefix>1<data>`.
    #[error("invalid address {0:?}")]
    InvalidAddress(String),

    /// The address is well formed but carries the wrong human readable prefix.
    #[error("address {address} does not have prefix {expected}")]
    WrongPrefix {
        /// The address that was parsed.
        address: String,
        /// The prefix that was expected.
        expected: String,
    },

    /// The channel identifier is not of the form `channel-<n>`.
    #[error("invalid channel id {0:?}")]
    InvalidChannel(String),

    /// The string is not a valid non-negative decimal with at most 18 fractional digits.
    #[error("invalid decimal {0:?}")]
    InvalidDecimal(String),
}

/// Errors raised when a [`HostZone`](crate::host_zone::HostZone) fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostZoneError {
    /// A required string field is empty.
    #[error("{0} must be specified")]
    MissingField(&'static str),

    /// The stored IBC denom does not match the hash of the transfer path.
    #[error("native token ibc denom did not match hash generated from channel ({channel}) and denom ({denom})")]
    IbcDenomMismatch {
        /// The transfer channel.
        channel: String,
        /// The native denom on the host.
        denom: String,
    },

    /// One of the addresses is malformed.
    #[error("invalid {field}: {source}")]
    InvalidAddress {
        /// The host zone field holding the address.
        field: &'static str,
        /// The underlying parse failure.
        #[source]
        source: ParseError,
    },

    /// The redemption rate bounds are zero or not nested.
    #[error("invalid redemption rate bounds: {0}")]
    InvalidBounds(String),

    /// The redemption rate is zero.
    #[error("redemption rate must be positive")]
    NonPositiveRedemptionRate,

    /// The unbonding period is zero.
    #[error("unbonding period must be set")]
    MissingUnbondingPeriod,
}

/// Errors raised when a list of records fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Two records share an identifier.
    #[error("duplicate {kind} record {id}")]
    Duplicate {
        /// The record family.
        kind: &'static str,
        /// The duplicated identifier.
        id: String,
    },

    /// A record holds a zero amount where a positive amount is required.
    #[error("zero {field} in {kind} record {id}")]
    ZeroAmount {
        /// The amount field.
        field: &'static str,
        /// The record family.
        kind: &'static str,
        /// The identifier of the offending record.
        id: String,
    },

    /// A record holds a status that is not allowed in its store.
    #[error("{kind} record {id} has status {status} which is not allowed in the {store} store")]
    MisplacedStatus {
        /// The record family.
        kind: &'static str,
        /// The identifier of the offending record.
        id: String,
        /// The offending status.
        status: String,
        /// The store the record was found in.
        store: &'static str,
    },

    /// The number of accumulating unbonding records is not exactly one.
    #[error("expected exactly one accumulating unbonding record, found {0}")]
    AccumulatingCount(usize),
}
