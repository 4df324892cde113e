//! The persisted key layout.
//!
//! Every family of values lives under its own byte prefix. Numeric identifiers are encoded
//! big-endian so that lexicographic key order matches numeric order.

use stzone_primitives::types::{Address, ChannelId, RecordId, Sequence};

use crate::errors::{DbError, DbResult};

/// Key of the host zone singleton.
pub const HOST_ZONE_KEY: &[u8] = b"hostzone";

/// Prefix of active delegation records.
pub const DELEGATION_ACTIVE_PREFIX: &[u8] = b"delegation/active/";

/// Prefix of archived delegation records.
pub const DELEGATION_ARCHIVE_PREFIX: &[u8] = b"delegation/archive/";

/// Prefix of active unbonding records.
pub const UNBONDING_ACTIVE_PREFIX: &[u8] = b"unbonding/active/";

/// Prefix of archived unbonding records.
pub const UNBONDING_ARCHIVE_PREFIX: &[u8] = b"unbonding/archive/";

/// Prefix of redemption records.
pub const REDEMPTION_PREFIX: &[u8] = b"redemption/";

/// Prefix of slash records.
pub const SLASH_PREFIX: &[u8] = b"slash/";

/// Key of the last assigned slash record id.
pub const SLASH_COUNTER_KEY: &[u8] = b"slash-counter";

/// Prefix of the transfer-in-progress index.
pub const TRANSFER_IN_PROGRESS_PREFIX: &[u8] = b"transfer-in-progress/";

const SEPARATOR: u8 = b'/';

fn with_id(prefix: &[u8], id: u64) -> Vec<u8> {
    let mut key = Vec::with_capacity(prefix.len() + 8);
    key.extend_from_slice(prefix);
    key.extend_from_slice(&id.to_be_bytes());
    key
}

/// Key of an active delegation record.
pub fn delegation_active_key(id: RecordId) -> Vec<u8> {
    with_id(DELEGATION_ACTIVE_PREFIX, id)
}

/// Key of an archived delegation record.
pub fn delegation_archive_key(id: RecordId) -> Vec<u8> {
    with_id(DELEGATION_ARCHIVE_PREFIX, id)
}

/// Key of an active unbonding record.
pub fn unbonding_active_key(id: RecordId) -> Vec<u8> {
    with_id(UNBONDING_ACTIVE_PREFIX, id)
}

/// Key of an archived unbonding record.
pub fn unbonding_archive_key(id: RecordId) -> Vec<u8> {
    with_id(UNBONDING_ARCHIVE_PREFIX, id)
}

/// Prefix of all redemption records belonging to one unbonding record.
pub fn redemption_prefix(unbonding_id: RecordId) -> Vec<u8> {
    let mut key = with_id(REDEMPTION_PREFIX, unbonding_id);
    key.push(SEPARATOR);
    key
}

/// Key of a redemption record.
pub fn redemption_key(unbonding_id: RecordId, redeemer: &Address) -> Vec<u8> {
    let mut key = redemption_prefix(unbonding_id);
    key.extend_from_slice(redeemer.as_bytes());
    key
}

/// Key of a slash record.
pub fn slash_key(id: u64) -> Vec<u8> {
    with_id(SLASH_PREFIX, id)
}

/// Key of a transfer-in-progress entry.
pub fn transfer_in_progress_key(channel: &ChannelId, sequence: Sequence) -> Vec<u8> {
    let mut key = TRANSFER_IN_PROGRESS_PREFIX.to_vec();
    key.extend_from_slice(channel.as_str().as_bytes());
    key.push(SEPARATOR);
    key.extend_from_slice(&sequence.to_be_bytes());
    key
}

/// Splits a transfer-in-progress key back into its channel and sequence.
pub fn parse_transfer_in_progress_key(key: &[u8]) -> DbResult<(ChannelId, Sequence)> {
    let corrupt = || DbError::CorruptKey(String::from_utf8_lossy(key).into_owned());

    let rest = key
        .strip_prefix(TRANSFER_IN_PROGRESS_PREFIX)
        .ok_or_else(corrupt)?;
    if rest.len() < 9 {
        return Err(corrupt());
    }

    let (channel, sequence) = rest.split_at(rest.len() - 8);
    let channel = channel.strip_suffix(&[SEPARATOR]).ok_or_else(corrupt)?;
    let channel = std::str::from_utf8(channel).map_err(|_| corrupt())?;
    let sequence: [u8; 8] = sequence.try_into().map_err(|_| corrupt())?;

    Ok((ChannelId::new(channel), u64::from_be_bytes(sequence)))
}
