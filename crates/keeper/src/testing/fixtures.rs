//! A keeper wired to mock collaborators, and the host zone it starts from.

use std::{sync::Arc, time::Duration};

use stzone_db::inmemory::InMemoryStore;
use stzone_params::types::ModuleParams;
use stzone_primitives::{
    dec::Dec,
    denom::ibc_denom,
    host_zone::{HostZone, RedemptionRateBounds},
    records::UnbondingRecord,
    types::{Address, Amount, ChannelId, Coin, RecordId, Sequence},
};

use super::mocks::{MockBank, MockCallbacks, MockOracle, MockRateLimit, MockTransfer};
use crate::{
    ack::Ics20AckParser,
    context::BlockCtx,
    expected_keepers::{BankKeeper, Packet},
    genesis::GenesisState,
    keeper::{Collaborators, Keeper},
};

pub(crate) const CHAIN_ID: &str = "celestia";
pub(crate) const NATIVE_DENOM: &str = "utia";
pub(crate) const ST_DENOM: &str = "stutia";
pub(crate) const CHANNEL: &str = "channel-0";

/// Id of the accumulating unbonding record at genesis.
pub(crate) const ACCUMULATING_ID: RecordId = 1;

/// Block time of the default context: 2023-11-14T22:13:20Z.
pub(crate) const NOW: u64 = 1_700_000_000;

pub(crate) const UNBONDING_PERIOD: u64 = 21 * 24 * 60 * 60;

pub(crate) const TX_HASH: &str = "a1b2c3d4e5f60718293a4b5c6d7e8f90";

pub(crate) fn native_ibc_denom() -> String {
    ibc_denom("transfer", CHANNEL, NATIVE_DENOM)
}

pub(crate) fn channel() -> ChannelId {
    ChannelId::new(CHANNEL)
}

pub(crate) fn addr(address: &str) -> Address {
    Address::new(address)
}

pub(crate) fn operator() -> Address {
    addr("stride1operator")
}

pub(crate) fn safe() -> Address {
    addr("stride1safeaddr")
}

pub(crate) fn staker() -> Address {
    addr("stride1staker")
}

pub(crate) fn redeemer_a() -> Address {
    addr("stride1redeemera")
}

pub(crate) fn redeemer_b() -> Address {
    addr("stride1redeemerb")
}

pub(crate) fn dec(s: &str) -> Dec {
    s.parse().expect("valid decimal")
}

/// Bounds of 0.5, 0.9, 1.1 and 1.5 times `rate`.
pub(crate) fn bounds_around(rate: Dec) -> RedemptionRateBounds {
    let scaled = |percent: u128| Dec::from_atomics(rate.atomics() / 100 * percent);
    RedemptionRateBounds {
        min: scaled(50),
        min_inner: scaled(90),
        max_inner: scaled(110),
        max: scaled(150),
    }
}

pub(crate) fn host_zone_with_rate(rate: Dec) -> HostZone {
    HostZone {
        chain_id: CHAIN_ID.to_string(),
        native_token_denom: NATIVE_DENOM.to_string(),
        native_token_ibc_denom: native_ibc_denom(),
        transfer_channel_id: channel(),
        delegation_address: addr("celestia1delegation"),
        reward_address: addr("celestia1reward"),
        deposit_address: addr("stride1deposit"),
        redemption_address: addr("stride1redemption"),
        claim_address: addr("stride1claimaddr"),
        fee_address: addr("stride1feeaddr"),
        operator_address: operator(),
        safe_address: safe(),
        last_redemption_rate: rate,
        redemption_rate: rate,
        bounds: bounds_around(rate),
        delegated_balance: 0,
        unbonding_period_seconds: UNBONDING_PERIOD,
        halted: false,
    }
}

pub(crate) fn host_zone() -> HostZone {
    host_zone_with_rate(Dec::ONE)
}

pub(crate) fn genesis(host_zone: HostZone) -> GenesisState {
    GenesisState {
        params: ModuleParams::default(),
        host_zone,
        delegation_records: Vec::new(),
        archived_delegation_records: Vec::new(),
        unbonding_records: vec![UnbondingRecord::new_accumulating(ACCUMULATING_ID)],
        archived_unbonding_records: Vec::new(),
        redemption_records: Vec::new(),
        slash_records: Vec::new(),
        transfers_in_progress: Vec::new(),
    }
}

pub(crate) fn packet(sequence: Sequence) -> Packet {
    Packet {
        sequence,
        source_port: "transfer".to_string(),
        source_channel: channel(),
        destination_port: "transfer".to_string(),
        destination_channel: ChannelId::new("channel-7"),
        data: Vec::new(),
    }
}

pub(crate) const SUCCESS_ACK: &[u8] = br#"{"result":"AQ=="}"#;
pub(crate) const ERROR_ACK: &[u8] = br#"{"error":"insufficient funds"}"#;

/// A keeper over an in-memory store along with handles to its mock collaborators.
#[derive(Debug)]
pub(crate) struct TestEnv {
    pub(crate) keeper: Keeper<InMemoryStore>,
    pub(crate) bank: Arc<MockBank>,
    pub(crate) transfer: Arc<MockTransfer>,
    pub(crate) rate_limit: Arc<MockRateLimit>,
    pub(crate) oracle: Arc<MockOracle>,
    pub(crate) callbacks: Arc<MockCallbacks>,
    pub(crate) ctx: BlockCtx,
}

impl TestEnv {
    pub(crate) fn new() -> Self {
        Self::with_genesis(genesis(host_zone()))
    }

    pub(crate) fn with_rate(rate: Dec) -> Self {
        Self::with_genesis(genesis(host_zone_with_rate(rate)))
    }

    pub(crate) fn with_genesis(genesis: GenesisState) -> Self {
        let bank = Arc::new(MockBank::default());
        let transfer = Arc::new(MockTransfer::new(bank.clone()));
        let rate_limit = Arc::new(MockRateLimit::default());
        let oracle = Arc::new(MockOracle::default());
        let callbacks = Arc::new(MockCallbacks::default());

        let collaborators = Collaborators {
            bank: bank.clone(),
            transfer: transfer.clone(),
            rate_limit: rate_limit.clone(),
            oracle: oracle.clone(),
            callbacks: callbacks.clone(),
            ack_parser: Arc::new(Ics20AckParser),
        };

        let mut keeper = Keeper::new(InMemoryStore::new(), genesis.params.clone(), collaborators);
        keeper.init_genesis(genesis);

        Self {
            keeper,
            bank,
            transfer,
            rate_limit,
            oracle,
            callbacks,
            ctx: BlockCtx::from_unix(100, NOW).expect("valid timestamp"),
        }
    }

    pub(crate) fn host_zone(&self) -> HostZone {
        self.keeper.host_zone().expect("host zone exists")
    }

    pub(crate) fn update_host_zone(&mut self, f: impl FnOnce(&mut HostZone)) {
        let mut host_zone = self.host_zone();
        f(&mut host_zone);
        self.keeper
            .set_host_zone(&host_zone)
            .expect("host zone stored");
    }

    pub(crate) fn fund_native(&self, holder: &Address, amount: Amount) {
        self.bank
            .fund(holder, &Coin::new(native_ibc_denom(), amount));
    }

    pub(crate) fn fund_st(&self, holder: &Address, amount: Amount) {
        self.bank.fund(holder, &Coin::new(ST_DENOM, amount));
    }

    pub(crate) fn native_balance(&self, holder: &Address) -> Amount {
        self.bank.balance(holder, &native_ibc_denom())
    }

    pub(crate) fn st_balance(&self, holder: &Address) -> Amount {
        self.bank.balance(holder, ST_DENOM)
    }

    pub(crate) fn st_supply(&self) -> Amount {
        self.bank.supply(ST_DENOM)
    }
}

/// A one-day epoch duration.
pub(crate) const DAY: Duration = Duration::from_secs(24 * 60 * 60);
