//! Re-exports of the most commonly used types.

pub use crate::{
    dec::Dec,
    denom::{ibc_denom, st_denom},
    errors::{HostZoneError, ParseError, RecordError},
    host_zone::{HostZone, RedemptionRateBounds},
    records::{
        DelegationRecord, DelegationRecordStatus, RedemptionRecord, SlashRecord, UnbondingRecord,
        UnbondingRecordStatus,
    },
    types::{
        Address, Amount, ChannelId, Coin, EpochNumber, RecordId, Sequence, SignedAmount,
        UnixSeconds,
    },
};
