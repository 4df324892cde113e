use stzone_db::pagination::PageRequest;
use stzone_primitives::{
    records::{
        DelegationRecord, DelegationRecordStatus, RedemptionRecord, UnbondingRecord,
        UnbondingRecordStatus,
    },
    types::Address,
};

use crate::{
    errors::{ErrorKind, KeeperError},
    query::RedemptionRecordsRequest,
    testing::fixtures::{
        genesis, host_zone, redeemer_a, redeemer_b, TestEnv, ACCUMULATING_ID, NOW, TX_HASH,
        UNBONDING_PERIOD,
    },
};

const COMPLETION: u64 = NOW + 100;
const ESTIMATE: u64 = NOW + UNBONDING_PERIOD + 4 * 24 * 60 * 60;

fn redemption(unbonding_record_id: u64, redeemer: Address) -> RedemptionRecord {
    RedemptionRecord {
        native_amount: 10,
        st_token_amount: 10,
        ..RedemptionRecord::new(unbonding_record_id, redeemer)
    }
}

/// Redemptions under an unbonding record, the accumulating record and a missing record.
fn env() -> TestEnv {
    let mut genesis = genesis(host_zone());
    genesis.unbonding_records.push(UnbondingRecord {
        status: UnbondingRecordStatus::UnbondingInProgress,
        native_amount: 10,
        st_token_amount: 10,
        unbonding_completion_time_seconds: COMPLETION,
        undelegation_tx_hash: TX_HASH.to_string(),
        ..UnbondingRecord::new_accumulating(0)
    });
    genesis.redemption_records = vec![
        redemption(0, redeemer_a()),
        redemption(ACCUMULATING_ID, redeemer_a()),
        redemption(ACCUMULATING_ID, redeemer_b()),
        redemption(9, redeemer_b()),
    ];
    TestEnv::with_genesis(genesis)
}

fn summary(env: &TestEnv, request: &RedemptionRecordsRequest) -> Vec<(u64, String, u64)> {
    env.keeper
        .query_redemption_records(&env.ctx, request)
        .unwrap()
        .redemption_record_responses
        .into_iter()
        .map(|r| {
            (
                r.redemption_record.unbonding_record_id,
                r.redemption_record.redeemer.to_string(),
                r.unbonding_completion_time_seconds,
            )
        })
        .collect()
}

#[test]
fn single_record_reports_completion_or_estimate() {
    let env = env();

    let response = env
        .keeper
        .query_redemption_record(&env.ctx, 0, &redeemer_a())
        .unwrap();
    assert_eq!(response.unbonding_completion_time_seconds, COMPLETION);
    assert_eq!(response.redemption_record, redemption(0, redeemer_a()));

    let response = env
        .keeper
        .query_redemption_record(&env.ctx, ACCUMULATING_ID, &redeemer_b())
        .unwrap();
    assert_eq!(response.unbonding_completion_time_seconds, ESTIMATE);
}

#[test]
fn missing_records_are_not_found() {
    let env = env();

    let err = env
        .keeper
        .query_redemption_record(&env.ctx, 5, &redeemer_a())
        .unwrap_err();
    assert!(matches!(err, KeeperError::RecordNotFound { kind: "redemption", .. }));

    let err = env
        .keeper
        .query_redemption_record(&env.ctx, 9, &redeemer_b())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RecordNotFound);
}

#[test]
fn filters_by_address_then_unbonding_record() {
    let env = env();
    let a = redeemer_a().to_string();
    let b = redeemer_b().to_string();

    let by_address = RedemptionRecordsRequest {
        address: Some(redeemer_a()),
        unbonding_record_id: Some(9),
        pagination: None,
    };
    assert_eq!(
        summary(&env, &by_address),
        [(0, a.clone(), COMPLETION), (ACCUMULATING_ID, a.clone(), ESTIMATE)]
    );

    let by_record = RedemptionRecordsRequest {
        unbonding_record_id: Some(ACCUMULATING_ID),
        ..Default::default()
    };
    assert_eq!(
        summary(&env, &by_record),
        [(ACCUMULATING_ID, a, ESTIMATE), (ACCUMULATING_ID, b.clone(), ESTIMATE)]
    );

    let orphaned = RedemptionRecordsRequest {
        address: Some(redeemer_b()),
        ..Default::default()
    };
    assert_eq!(summary(&env, &orphaned)[1], (9, b, 0));
}

#[test]
fn unfiltered_listing_is_paginated() {
    let env = env();

    let first = env
        .keeper
        .query_redemption_records(
            &env.ctx,
            &RedemptionRecordsRequest {
                pagination: Some(PageRequest {
                    key: None,
                    limit: Some(3),
                }),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(first.redemption_record_responses.len(), 3);
    let page = first.pagination.expect("paginated");
    assert_eq!(page.total, 4);
    assert!(page.next_key.is_some());

    let second = env
        .keeper
        .query_redemption_records(
            &env.ctx,
            &RedemptionRecordsRequest {
                pagination: Some(PageRequest {
                    key: page.next_key,
                    limit: Some(3),
                }),
                ..Default::default()
            },
        )
        .unwrap();
    let responses = second.redemption_record_responses;
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].redemption_record, redemption(9, redeemer_b()));
    assert_eq!(second.pagination.unwrap().next_key, None);
}

#[test]
fn record_listings_include_archives_on_request() {
    let mut genesis = genesis(host_zone());
    genesis.delegation_records.push(DelegationRecord {
        status: DelegationRecordStatus::DelegationQueue,
        ..DelegationRecord::new_in_progress(4, 10)
    });
    genesis.archived_delegation_records.push(DelegationRecord {
        status: DelegationRecordStatus::DelegationComplete,
        tx_hash: TX_HASH.to_string(),
        ..DelegationRecord::new_in_progress(2, 10)
    });
    genesis
        .archived_unbonding_records
        .push(UnbondingRecord::new_accumulating(0));
    let env = TestEnv::with_genesis(genesis);

    let ids = |records: Vec<DelegationRecord>| records.iter().map(|r| r.id).collect::<Vec<_>>();
    assert_eq!(ids(env.keeper.query_delegation_records(false).unwrap()), [4]);
    assert_eq!(ids(env.keeper.query_delegation_records(true).unwrap()), [4, 2]);

    assert_eq!(env.keeper.query_unbonding_records(false).unwrap().len(), 1);
    assert_eq!(env.keeper.query_unbonding_records(true).unwrap().len(), 2);
    assert_eq!(env.keeper.query_host_zone().unwrap(), host_zone());
}
