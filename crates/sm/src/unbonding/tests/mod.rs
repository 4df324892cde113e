//! Testing utilities specific to the Unbonding State Machine.

mod process_claims;
mod prop_tests;

use proptest::prelude::*;
use stzone_primitives::{
    records::{UnbondingRecord, UnbondingRecordStatus},
    types::{Amount, RecordId, UnixSeconds},
};

use crate::unbonding::{config::UnbondingSMCfg, events::UnbondingEvent, machine::UnbondingSM};

// ===== Test Constants =====

/// Epoch number used as the record id in tests.
pub(super) const TEST_RECORD_ID: RecordId = 12;
/// Native total of a frozen record in tests.
pub(super) const TEST_NATIVE_AMOUNT: Amount = 1_000;
/// stToken total of a frozen record in tests.
pub(super) const TEST_ST_AMOUNT: Amount = 500;
/// Host unbonding period (21 days).
pub(super) const TEST_UNBONDING_PERIOD: u64 = 21 * 24 * 60 * 60;
/// Block time at which the undelegation is confirmed.
pub(super) const TEST_BLOCK_TIME: UnixSeconds = 1_700_000_000;
/// Host transaction hash used for undelegation confirmations.
pub(super) const TEST_UNDELEGATION_TX: &str = "0E1D2C3B4A596877";
/// Host transaction hash used for sweep confirmations.
pub(super) const TEST_SWEEP_TX: &str = "9F8E7D6C5B4A3921";

// ===== Configuration Helpers =====

pub(super) const fn test_cfg() -> UnbondingSMCfg {
    UnbondingSMCfg {
        unbonding_period_seconds: TEST_UNBONDING_PERIOD,
    }
}

// ===== State Machine Helpers =====

pub(super) const fn create_sm(record: UnbondingRecord) -> UnbondingSM {
    UnbondingSM::new(record)
}

pub(super) const fn get_state(sm: &UnbondingSM) -> &UnbondingRecord {
    sm.record()
}

/// A record with the test totals and no tx hashes in the given status.
pub(super) fn record_with_status(status: UnbondingRecordStatus) -> UnbondingRecord {
    UnbondingRecord {
        status,
        native_amount: TEST_NATIVE_AMOUNT,
        st_token_amount: TEST_ST_AMOUNT,
        ..UnbondingRecord::new_accumulating(TEST_RECORD_ID)
    }
}

/// A record that has been undelegated at [`TEST_BLOCK_TIME`].
pub(super) fn in_progress_record() -> UnbondingRecord {
    UnbondingRecord {
        unbonding_completion_time_seconds: TEST_BLOCK_TIME + TEST_UNBONDING_PERIOD,
        undelegation_tx_hash: TEST_UNDELEGATION_TX.to_string(),
        ..record_with_status(UnbondingRecordStatus::UnbondingInProgress)
    }
}

// ===== Strategies =====

pub(super) fn arb_status() -> impl Strategy<Value = UnbondingRecordStatus> {
    prop_oneof![
        Just(UnbondingRecordStatus::AccumulatingRedemptions),
        Just(UnbondingRecordStatus::UnbondingQueue),
        Just(UnbondingRecordStatus::UnbondingInProgress),
        Just(UnbondingRecordStatus::Unbonded),
        Just(UnbondingRecordStatus::Claimable),
        Just(UnbondingRecordStatus::Claimed),
    ]
}

fn arb_amount() -> impl Strategy<Value = Amount> {
    prop_oneof![Just(0u128), 1..1_000_000_000_000u128]
}

fn arb_tx_hash() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[0-9A-F]{16}"]
}

fn arb_time() -> impl Strategy<Value = UnixSeconds> {
    0..2 * TEST_BLOCK_TIME
}

pub(super) fn arb_record() -> impl Strategy<Value = UnbondingRecord> {
    (
        0..100u64,
        arb_status(),
        arb_amount(),
        arb_amount(),
        arb_time(),
        arb_tx_hash(),
        arb_tx_hash(),
    )
        .prop_map(
            |(id, status, native_amount, st_token_amount, completion, undelegation, sweep)| {
                UnbondingRecord {
                    id,
                    status,
                    native_amount,
                    st_token_amount,
                    unbonding_completion_time_seconds: completion,
                    undelegation_tx_hash: undelegation,
                    unbonded_token_sweep_tx_hash: sweep,
                }
            },
        )
}

pub(super) fn arb_terminal_state() -> impl Strategy<Value = UnbondingRecord> {
    arb_record().prop_map(|record| UnbondingRecord {
        status: UnbondingRecordStatus::Claimed,
        ..record
    })
}

pub(super) fn arb_events() -> impl Strategy<Value = UnbondingEvent> {
    prop_oneof![
        (arb_amount(), arb_amount()).prop_map(|(native_amount, st_token_amount)| {
            UnbondingEvent::RedemptionAdded {
                native_amount,
                st_token_amount,
            }
        }),
        arb_amount().prop_map(|native_amount| UnbondingEvent::Frozen { native_amount }),
        (arb_tx_hash(), arb_time()).prop_map(|(tx_hash, block_time)| {
            UnbondingEvent::UndelegationConfirmed {
                tx_hash,
                block_time,
            }
        }),
        arb_time().prop_map(|now| UnbondingEvent::UnbondingFinished { now }),
        arb_tx_hash().prop_map(|tx_hash| UnbondingEvent::SweepConfirmed { tx_hash }),
        Just(UnbondingEvent::ClaimsDistributed),
    ]
}
