//! Identifier and value types used throughout the workspace.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::ParseError;

/// An amount of tokens in base units.
pub type Amount = u128;

/// A signed adjustment to an [`Amount`].
pub type SignedAmount = i128;

/// The identifier of a delegation or unbonding record, equal to the epoch number that created it.
pub type RecordId = u64;

/// An epoch number as delivered by the epoch scheduler.
pub type EpochNumber = u64;

/// The sequence number assigned to an outbound packet by the transfer transport.
pub type Sequence = u64;

/// Unix time in seconds.
pub type UnixSeconds = u64;

/// Minimum length of the data part of an address.
const MIN_ADDRESS_DATA_LEN: usize = 6;

/// A bech32-style account address of the form `<prefix>1<data>`.
///
/// Addresses are compared as strings. [`Address::new`] does not validate; use
/// [`Address::parse`] or [`Address::parse_with_prefix`] on untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Wraps a string without validating it.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Parses an address of the form `<prefix>1<data>` with any prefix.
    pub fn parse(address: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidAddress(address.to_string());

        let (hrp, data) = address.rsplit_once('1').ok_or_else(invalid)?;
        if hrp.is_empty() || data.len() < MIN_ADDRESS_DATA_LEN {
            return Err(invalid());
        }

        let lowercase_alnum = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();
        if !hrp.chars().all(lowercase_alnum) || !data.chars().all(lowercase_alnum) {
            return Err(invalid());
        }

        Ok(Self(address.to_string()))
    }

    /// Parses an address and checks that it carries the expected prefix.
    pub fn parse_with_prefix(address: &str, prefix: &str) -> Result<Self, ParseError> {
        let parsed = Self::parse(address)?;
        if parsed.prefix() != Some(prefix) {
            return Err(ParseError::WrongPrefix {
                address: address.to_string(),
                expected: prefix.to_string(),
            });
        }

        Ok(parsed)
    }

    /// Returns the human readable prefix if the address is well formed.
    pub fn prefix(&self) -> Option<&str> {
        self.0.rsplit_once('1').map(|(hrp, _)| hrp)
    }

    /// Returns the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the address as bytes, used when building store keys.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Returns `true` if the address is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The identifier of a channel in the packet protocol, of the form `channel-<n>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(String);

impl ChannelId {
    /// Wraps a string without validating it.
    pub fn new(channel: impl Into<String>) -> Self {
        Self(channel.into())
    }

    /// Returns the channel identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the identifier is of the form `channel-<n>`.
    pub fn is_valid(&self) -> bool {
        self.0
            .strip_prefix("channel-")
            .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ChannelId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let channel = Self::new(s);
        if channel.is_valid() {
            Ok(channel)
        } else {
            Err(ParseError::InvalidChannel(s.to_string()))
        }
    }
}

/// An amount of a single denomination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    /// The denomination.
    pub denom: String,
    /// The amount in base units.
    pub amount: Amount,
}

impl Coin {
    /// Creates a new coin.
    pub fn new(denom: impl Into<String>, amount: Amount) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}
