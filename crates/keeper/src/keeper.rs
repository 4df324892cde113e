//! The keeper: owner of the module state and its collaborators.

use std::sync::Arc;

use stzone_db::{cache::CacheStore, kv::KvStore, records::HostZoneDb};
use stzone_params::types::ModuleParams;
use stzone_primitives::host_zone::HostZone;
use tracing::{debug, error};

use crate::{
    errors::{KeeperError, KeeperResult},
    events::StakingEvent,
    expected_keepers::{
        AckParser, BankKeeper, CallbackRegistry, OracleKeeper, RateLimitKeeper, TransferKeeper,
    },
};

/// The collaborators the keeper consumes.
#[derive(Debug, Clone)]
pub struct Collaborators {
    /// Balances, transfers, minting and burning.
    pub bank: Arc<dyn BankKeeper>,
    /// Outbound transfers.
    pub transfer: Arc<dyn TransferKeeper>,
    /// The stToken transfer blacklist.
    pub rate_limit: Arc<dyn RateLimitKeeper>,
    /// Redemption rate oracles.
    pub oracle: Arc<dyn OracleKeeper>,
    /// Packet callback routing.
    pub callbacks: Arc<dyn CallbackRegistry>,
    /// Acknowledgement decoding.
    pub ack_parser: Arc<dyn AckParser>,
}

impl Collaborators {
    fn begin(&self) {
        self.bank.begin();
        self.transfer.begin();
        self.rate_limit.begin();
        self.oracle.begin();
        self.callbacks.begin();
    }

    fn commit(&self) {
        self.bank.commit();
        self.transfer.commit();
        self.rate_limit.commit();
        self.oracle.commit();
        self.callbacks.commit();
    }

    fn rollback(&self) {
        self.bank.rollback();
        self.transfer.rollback();
        self.rate_limit.rollback();
        self.oracle.rollback();
        self.callbacks.rollback();
    }
}

/// The liquid staking keeper.
///
/// Entry points take `&mut self` and run to completion. Message handling, packet callbacks and
/// the `safely_*` epoch steps each run inside [`Keeper::apply_if_no_error`], so a failure leaves
/// the store, the collaborators and the event buffer as they were.
#[derive(Debug)]
pub struct Keeper<S> {
    pub(crate) store: CacheStore<S>,
    pub(crate) params: ModuleParams,
    pub(crate) collaborators: Collaborators,
    events: Vec<StakingEvent>,
}

impl<S: KvStore> Keeper<S> {
    /// Creates a keeper over `store`.
    pub fn new(store: S, params: ModuleParams, collaborators: Collaborators) -> Self {
        Self {
            store: CacheStore::new(store),
            params,
            collaborators,
            events: Vec::new(),
        }
    }

    /// Returns the module parameters.
    pub const fn params(&self) -> &ModuleParams {
        &self.params
    }

    /// Returns the store.
    pub const fn store(&self) -> &CacheStore<S> {
        &self.store
    }

    /// Returns the collaborators.
    pub const fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    /// Returns the underlying store.
    pub fn into_store(self) -> S {
        self.store.into_inner()
    }

    /// Returns the events emitted so far.
    pub fn events(&self) -> &[StakingEvent] {
        &self.events
    }

    /// Drains the events emitted so far.
    pub fn take_events(&mut self) -> Vec<StakingEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: StakingEvent) {
        debug!(%event, "emitting event");
        self.events.push(event);
    }

    pub(crate) fn bank(&self) -> &dyn BankKeeper {
        self.collaborators.bank.as_ref()
    }

    /// Runs `f` in a scope that is committed if it succeeds and discarded if it fails.
    ///
    /// Scopes nest: a scope committed inside a scope that is later rolled back is rolled back
    /// with it.
    pub fn apply_if_no_error<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> KeeperResult<T>,
    ) -> KeeperResult<T> {
        let mark = self.events.len();
        self.store.branch();
        self.collaborators.begin();

        // commit and rollback both pop the branch, even when the commit fails
        let result = match f(self) {
            Ok(value) => self.store.commit().map(|()| value).map_err(KeeperError::from),
            Err(err) => {
                if let Err(db_err) = self.store.rollback() {
                    error!(%db_err, "could not discard branch");
                }
                Err(err)
            }
        };

        match result {
            Ok(value) => {
                self.collaborators.commit();
                Ok(value)
            }
            Err(err) => {
                self.collaborators.rollback();
                self.events.truncate(mark);
                Err(err)
            }
        }
    }

    /// Returns the host zone.
    pub fn host_zone(&self) -> KeeperResult<HostZone> {
        self.store
            .get_host_zone()?
            .ok_or(KeeperError::HostZoneNotFound)
    }

    /// Returns the host zone, failing if it is halted.
    pub(crate) fn unhalted_host_zone(&self) -> KeeperResult<HostZone> {
        let host_zone = self.host_zone()?;
        if host_zone.halted {
            return Err(KeeperError::Halted {
                chain_id: host_zone.chain_id,
            });
        }

        Ok(host_zone)
    }

    pub(crate) fn set_host_zone(&mut self, host_zone: &HostZone) -> KeeperResult<()> {
        Ok(self.store.set_host_zone(host_zone)?)
    }
}
