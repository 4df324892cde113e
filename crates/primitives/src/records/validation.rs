//! Validation of record lists, as found in a genesis file.

use std::collections::BTreeSet;

use super::{
    DelegationRecord, DelegationRecordStatus, RedemptionRecord, SlashRecord, UnbondingRecord,
    UnbondingRecordStatus,
};
use crate::errors::RecordError;

/// Validates active and archived delegation records.
///
/// Identifiers must be unique across both stores, archive-only statuses must not appear in the
/// active store and amounts must be positive.
pub fn validate_delegation_records(
    active: &[DelegationRecord],
    archived: &[DelegationRecord],
) -> Result<(), RecordError> {
    let mut ids = BTreeSet::new();

    for (record, store) in tagged(active, "active").chain(tagged(archived, "archive")) {
        if !ids.insert(record.id) {
            return Err(RecordError::Duplicate {
                kind: "delegation",
                id: record.id.to_string(),
            });
        }

        if record.native_amount == 0 {
            return Err(RecordError::ZeroAmount {
                field: "native amount",
                kind: "delegation",
                id: record.id.to_string(),
            });
        }

        let misplaced = match store {
            "active" => record.status.is_archive_only(),
            _ => record.status == DelegationRecordStatus::TransferInProgress,
        };
        if misplaced {
            return Err(RecordError::MisplacedStatus {
                kind: "delegation",
                id: record.id.to_string(),
                status: record.status.to_string(),
                store,
            });
        }
    }

    Ok(())
}

/// Validates active and archived unbonding records.
///
/// Identifiers must be unique across both stores, exactly one accumulating record must exist and
/// frozen active records must carry positive totals.
pub fn validate_unbonding_records(
    active: &[UnbondingRecord],
    archived: &[UnbondingRecord],
) -> Result<(), RecordError> {
    let mut ids = BTreeSet::new();

    for (record, store) in tagged(active, "active").chain(tagged(archived, "archive")) {
        if !ids.insert(record.id) {
            return Err(RecordError::Duplicate {
                kind: "unbonding",
                id: record.id.to_string(),
            });
        }

        if store == "active" && record.status.is_archive_only() {
            return Err(RecordError::MisplacedStatus {
                kind: "unbonding",
                id: record.id.to_string(),
                status: record.status.to_string(),
                store,
            });
        }

        if store == "active" && record.status >= UnbondingRecordStatus::UnbondingQueue {
            if record.native_amount == 0 {
                return Err(RecordError::ZeroAmount {
                    field: "native amount",
                    kind: "unbonding",
                    id: record.id.to_string(),
                });
            }
            if record.st_token_amount == 0 {
                return Err(RecordError::ZeroAmount {
                    field: "sttoken amount",
                    kind: "unbonding",
                    id: record.id.to_string(),
                });
            }
        }
    }

    let accumulating = active
        .iter()
        .filter(|r| r.status == UnbondingRecordStatus::AccumulatingRedemptions)
        .count();
    if accumulating != 1 {
        return Err(RecordError::AccumulatingCount(accumulating));
    }

    Ok(())
}

/// Validates redemption records: unique `(unbonding id, redeemer)` keys and positive stToken
/// amounts.
pub fn validate_redemption_records(records: &[RedemptionRecord]) -> Result<(), RecordError> {
    let mut keys = BTreeSet::new();

    for record in records {
        if !keys.insert((record.unbonding_record_id, record.redeemer.clone())) {
            return Err(RecordError::Duplicate {
                kind: "redemption",
                id: record.label(),
            });
        }

        if record.st_token_amount == 0 {
            return Err(RecordError::ZeroAmount {
                field: "sttoken amount",
                kind: "redemption",
                id: record.label(),
            });
        }
    }

    Ok(())
}

/// Validates slash records: unique identifiers and non-zero offsets.
pub fn validate_slash_records(records: &[SlashRecord]) -> Result<(), RecordError> {
    let mut ids = BTreeSet::new();

    for record in records {
        if !ids.insert(record.id) {
            return Err(RecordError::Duplicate {
                kind: "slash",
                id: record.id.to_string(),
            });
        }

        if record.native_amount == 0 {
            return Err(RecordError::ZeroAmount {
                field: "native amount",
                kind: "slash",
                id: record.id.to_string(),
            });
        }
    }

    Ok(())
}

fn tagged<'a, T>(
    records: &'a [T],
    store: &'static str,
) -> impl Iterator<Item = (&'a T, &'static str)> {
    records.iter().map(move |r| (r, store))
}
