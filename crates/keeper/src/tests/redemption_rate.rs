use stzone_primitives::dec::Dec;

use crate::{
    errors::{ErrorKind, KeeperError},
    events::StakingEvent,
    expected_keepers::MetricUpdate,
    redemption_rate::check_redemption_rate_within_bounds,
    testing::fixtures::{dec, host_zone, staker, TestEnv, DAY},
};

#[test]
fn nothing_staked_keeps_the_rate() {
    let mut env = TestEnv::new();
    let before = env.host_zone();

    env.keeper.update_redemption_rate().unwrap();

    assert_eq!(env.host_zone(), before);
}

#[test]
fn one_sided_state_is_inconsistent() {
    let mut env = TestEnv::new();
    env.fund_native(&env.host_zone().deposit_address, 100);

    let err = env.keeper.update_redemption_rate().unwrap_err();
    assert!(matches!(
        err,
        KeeperError::InconsistentRedemptionRate {
            native_locked: 100,
            st_supply: 0
        }
    ));

    let mut env = TestEnv::new();
    env.fund_st(&staker(), 100);
    let err = env.keeper.update_redemption_rate().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[test]
fn rate_counts_deposits_in_flight_and_delegated_tokens() {
    let mut env = TestEnv::new();
    let ctx = env.ctx;
    let deposit = env.host_zone().deposit_address;
    env.fund_native(&staker(), 1000);
    env.keeper.liquid_stake(&staker(), 1000).unwrap();

    // rewards landing in the deposit account
    env.fund_native(&deposit, 50);
    env.keeper.update_redemption_rate().unwrap();
    let host_zone = env.host_zone();
    assert_eq!(host_zone.redemption_rate, dec("1.05"));
    assert_eq!(host_zone.last_redemption_rate, Dec::ONE);

    // the transfer leaves the deposit account but stays counted while in flight
    env.keeper.prepare_delegation(&ctx, 1, DAY).unwrap();
    assert_eq!(env.native_balance(&deposit), 0);
    env.update_host_zone(|hz| hz.delegated_balance = 10);
    env.keeper.update_redemption_rate().unwrap();

    let host_zone = env.host_zone();
    assert_eq!(host_zone.redemption_rate, dec("1.06"));
    assert_eq!(host_zone.last_redemption_rate, dec("1.05"));
}

#[test]
fn bounds_are_checked_outer_first() {
    let mut zone = host_zone();
    zone.redemption_rate = dec("0.4");
    let err = check_redemption_rate_within_bounds(&zone).unwrap_err();
    assert!(
        matches!(err, KeeperError::RedemptionRateOutOfBounds { ref reason, .. } if reason.contains("min outer"))
    );

    zone.redemption_rate = dec("1.2");
    let err = check_redemption_rate_within_bounds(&zone).unwrap_err();
    assert!(
        matches!(err, KeeperError::RedemptionRateOutOfBounds { ref reason, .. } if reason.contains("max inner"))
    );

    zone.redemption_rate = dec("1.1");
    check_redemption_rate_within_bounds(&zone).unwrap();
}

#[test]
fn rate_is_posted_to_the_oracle() {
    let mut env = TestEnv::new();

    env.keeper.post_redemption_rate_to_oracle().unwrap();

    assert_eq!(
        env.oracle.updates(),
        [MetricUpdate {
            key: "stutia_redemption_rate".to_string(),
            value: "1".to_string(),
            metric_type: "redemption_rate".to_string(),
            attributes: r#"{"sttoken_denom":"stutia"}"#.to_string(),
        }]
    );
    assert_eq!(
        env.keeper.events(),
        [StakingEvent::UpdateOracle {
            metric_key: "stutia_redemption_rate".to_string(),
            metric_value: "1".to_string(),
        }]
    );
}

#[test]
fn out_of_bounds_rate_is_not_posted() {
    let mut env = TestEnv::new();
    env.update_host_zone(|hz| hz.redemption_rate = dec("1.3"));

    let err = env.keeper.post_redemption_rate_to_oracle().unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RedemptionRateOutOfBounds);
    assert!(env.oracle.updates().is_empty());
    assert!(env.keeper.check_redemption_rate_exceeds_bounds().is_err());
}
