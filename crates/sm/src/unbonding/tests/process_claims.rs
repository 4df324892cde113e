//! Unit Tests for process_sweep_confirmed and process_claims_distributed
#[cfg(test)]
mod tests {
    use stzone_primitives::records::{UnbondingRecord, UnbondingRecordStatus};

    use crate::{
        testing::transition::*,
        unbonding::{
            duties::UnbondingDuty, errors::UnbondingSMError, events::UnbondingEvent,
            machine::UnbondingSM, tests::*,
        },
    };

    fn unbonded_record() -> UnbondingRecord {
        UnbondingRecord {
            status: UnbondingRecordStatus::Unbonded,
            ..in_progress_record()
        }
    }

    fn swept() -> UnbondingEvent {
        UnbondingEvent::SweepConfirmed {
            tx_hash: TEST_SWEEP_TX.to_string(),
        }
    }

    #[test]
    fn test_sweep_makes_record_claimable() {
        test_transition::<UnbondingSM, _, _, _, _, _, _>(
            create_sm,
            get_state,
            &test_cfg(),
            Transition {
                from_state: unbonded_record(),
                event: swept(),
                expected_state: UnbondingRecord {
                    status: UnbondingRecordStatus::Claimable,
                    unbonded_token_sweep_tx_hash: TEST_SWEEP_TX.to_string(),
                    ..unbonded_record()
                },
                expected_duties: vec![],
            },
        );
    }

    #[test]
    fn test_sweep_before_unbonded_is_invalid() {
        test_invalid_transition::<UnbondingSM, _, _, _, _, _, _>(
            create_sm,
            get_state,
            &test_cfg(),
            InvalidTransition {
                from_state: in_progress_record(),
                event: swept(),
                expected_error: UnbondingSMError::is_invalid_event,
            },
        );
    }

    #[test]
    fn test_sweep_with_existing_hash_rejected() {
        test_invalid_transition::<UnbondingSM, _, _, _, _, _, _>(
            create_sm,
            get_state,
            &test_cfg(),
            InvalidTransition {
                from_state: UnbondingRecord {
                    unbonded_token_sweep_tx_hash: "AAAA".to_string(),
                    ..unbonded_record()
                },
                event: swept(),
                expected_error: UnbondingSMError::is_rejected,
            },
        );
    }

    #[test]
    fn test_claims_distributed_archives() {
        test_transition::<UnbondingSM, _, _, _, _, _, _>(
            create_sm,
            get_state,
            &test_cfg(),
            Transition {
                from_state: record_with_status(UnbondingRecordStatus::Claimable),
                event: UnbondingEvent::ClaimsDistributed,
                expected_state: record_with_status(UnbondingRecordStatus::Claimed),
                expected_duties: vec![UnbondingDuty::ArchiveRecord],
            },
        );
    }

    #[test]
    fn test_full_lifecycle() {
        let sm = create_sm(UnbondingRecord::new_accumulating(TEST_RECORD_ID));
        let mut sequence = EventSequence::new(sm, get_state);
        let cfg = test_cfg();

        sequence
            .process(
                &cfg,
                UnbondingEvent::RedemptionAdded {
                    native_amount: TEST_NATIVE_AMOUNT,
                    st_token_amount: TEST_ST_AMOUNT,
                },
            )
            .process(
                &cfg,
                UnbondingEvent::Frozen {
                    native_amount: TEST_NATIVE_AMOUNT,
                },
            )
            .process(
                &cfg,
                UnbondingEvent::UndelegationConfirmed {
                    tx_hash: TEST_UNDELEGATION_TX.to_string(),
                    block_time: TEST_BLOCK_TIME,
                },
            )
            .process(
                &cfg,
                UnbondingEvent::UnbondingFinished {
                    now: TEST_BLOCK_TIME + TEST_UNBONDING_PERIOD,
                },
            )
            .process(&cfg, swept())
            .process(&cfg, UnbondingEvent::ClaimsDistributed);

        sequence
            .assert_no_errors()
            .assert_final_state(&UnbondingRecord {
                status: UnbondingRecordStatus::Claimed,
                unbonded_token_sweep_tx_hash: TEST_SWEEP_TX.to_string(),
                ..in_progress_record()
            })
            .assert_duties_contain(&[
                UnbondingDuty::BurnStTokens {
                    amount: TEST_ST_AMOUNT,
                },
                UnbondingDuty::ArchiveRecord,
            ]);
        assert_eq!(sequence.all_duties().len(), 3);
    }
}
