//! Testing utilities specific to the Delegation State Machine.

mod prop_tests;

use proptest::prelude::*;
use stzone_primitives::{
    records::{DelegationRecord, DelegationRecordStatus},
    types::{Amount, RecordId},
};

use crate::delegation::{events::DelegationEvent, machine::DelegationSM};

// ===== Test Constants =====

/// Epoch number used as the record id in tests.
pub(super) const TEST_RECORD_ID: RecordId = 7;
/// Native amount carried by the record in tests.
pub(super) const TEST_NATIVE_AMOUNT: Amount = 1_000_000;
/// Host transaction hash used for confirmations.
pub(super) const TEST_TX_HASH: &str = "C1A8C7B4E2F0D9A3";

// ===== State Machine Helpers =====

pub(super) const fn create_sm(record: DelegationRecord) -> DelegationSM {
    DelegationSM::new(record)
}

pub(super) const fn get_state(sm: &DelegationSM) -> &DelegationRecord {
    sm.record()
}

pub(super) fn record_with_status(status: DelegationRecordStatus) -> DelegationRecord {
    DelegationRecord {
        status,
        ..DelegationRecord::new_in_progress(TEST_RECORD_ID, TEST_NATIVE_AMOUNT)
    }
}

// ===== Strategies =====

pub(super) fn arb_status() -> impl Strategy<Value = DelegationRecordStatus> {
    prop_oneof![
        Just(DelegationRecordStatus::TransferInProgress),
        Just(DelegationRecordStatus::TransferFailed),
        Just(DelegationRecordStatus::DelegationQueue),
        Just(DelegationRecordStatus::DelegationComplete),
    ]
}

fn arb_tx_hash() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[0-9A-F]{16}"]
}

pub(super) fn arb_record() -> impl Strategy<Value = DelegationRecord> {
    (
        0..100u64,
        prop_oneof![Just(0u128), 1..=u64::MAX as u128],
        arb_status(),
        arb_tx_hash(),
    )
        .prop_map(|(id, native_amount, status, tx_hash)| DelegationRecord {
            id,
            native_amount,
            status,
            tx_hash,
        })
}

pub(super) fn arb_terminal_state() -> impl Strategy<Value = DelegationRecord> {
    (
        arb_record(),
        prop_oneof![
            Just(DelegationRecordStatus::TransferFailed),
            Just(DelegationRecordStatus::DelegationComplete),
        ],
    )
        .prop_map(|(record, status)| DelegationRecord { status, ..record })
}

pub(super) fn arb_events() -> impl Strategy<Value = DelegationEvent> {
    prop_oneof![
        Just(DelegationEvent::TransferAcknowledged),
        Just(DelegationEvent::TransferFailed),
        arb_tx_hash().prop_map(|tx_hash| DelegationEvent::DelegationConfirmed { tx_hash }),
    ]
}
