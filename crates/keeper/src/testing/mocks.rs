//! In-memory collaborators.
//!
//! Every mock keeps its state behind a [`parking_lot::Mutex`] together with a stack of snapshots
//! so that it follows the keeper's scopes.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use parking_lot::Mutex;
use stzone_primitives::types::{Address, Amount, ChannelId, Coin, Sequence};

use crate::expected_keepers::{
    BankError, BankKeeper, CallbackData, CallbackRegistry, MetricUpdate, MsgTransfer,
    OracleKeeper, RateLimitKeeper, TransferError, TransferKeeper, Transactional,
};

#[derive(Debug, Default)]
struct Layers<T> {
    current: T,
    snapshots: Vec<T>,
}

/// State that can be snapshotted when a scope opens.
#[derive(Debug, Default)]
pub(crate) struct Snapshotted<T>(Mutex<Layers<T>>);

impl<T: Clone> Snapshotted<T> {
    pub(crate) fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.0.lock().current)
    }

    pub(crate) fn get(&self) -> T {
        self.0.lock().current.clone()
    }

    fn begin(&self) {
        let mut layers = self.0.lock();
        let snapshot = layers.current.clone();
        layers.snapshots.push(snapshot);
    }

    fn commit(&self) {
        self.0.lock().snapshots.pop();
    }

    fn rollback(&self) {
        let mut layers = self.0.lock();
        if let Some(snapshot) = layers.snapshots.pop() {
            layers.current = snapshot;
        }
    }
}

macro_rules! impl_transactional {
    ($($mock:ty),+ $(,)?) => {
        $(
            impl Transactional for $mock {
                fn begin(&self) {
                    self.state.begin();
                }

                fn commit(&self) {
                    self.state.commit();
                }

                fn rollback(&self) {
                    self.state.rollback();
                }
            }
        )+
    };
}

impl_transactional!(MockBank, MockTransfer, MockRateLimit, MockOracle, MockCallbacks);

/// Holder key of a module account.
pub(crate) fn module_holder(module: &str) -> String {
    format!("module:{module}")
}

#[derive(Debug, Clone, Default)]
pub(crate) struct BankState {
    balances: BTreeMap<(String, String), Amount>,
    supply: BTreeMap<String, Amount>,
    blocked: BTreeSet<String>,
}

impl BankState {
    fn debit(&mut self, holder: &str, coin: &Coin) -> Result<(), BankError> {
        let balance = self
            .balances
            .entry((holder.to_string(), coin.denom.clone()))
            .or_default();
        if *balance < coin.amount {
            return Err(BankError::InsufficientFunds {
                holder: holder.to_string(),
                denom: coin.denom.clone(),
                available: *balance,
                required: coin.amount,
            });
        }

        *balance -= coin.amount;
        Ok(())
    }

    fn credit(&mut self, holder: &str, coin: &Coin) -> Result<(), BankError> {
        if self.blocked.contains(holder) {
            return Err(BankError::Blocked(holder.to_string()));
        }

        let balance = self
            .balances
            .entry((holder.to_string(), coin.denom.clone()))
            .or_default();
        *balance = balance.checked_add(coin.amount).ok_or(BankError::Overflow {
            denom: coin.denom.clone(),
        })?;
        Ok(())
    }

    fn transfer(&mut self, from: &str, to: &str, coin: &Coin) -> Result<(), BankError> {
        self.debit(from, coin)?;
        self.credit(to, coin)
    }
}

/// A bank holding account and module balances.
#[derive(Debug, Default)]
pub(crate) struct MockBank {
    state: Snapshotted<BankState>,
}

impl MockBank {
    /// Creates `coin` in the account of `holder`.
    pub(crate) fn fund(&self, holder: &Address, coin: &Coin) {
        self.state.with(|state| {
            let balance = state
                .balances
                .entry((holder.to_string(), coin.denom.clone()))
                .or_default();
            *balance += coin.amount;
            *state.supply.entry(coin.denom.clone()).or_default() += coin.amount;
        });
    }

    /// Makes every credit to `holder` fail.
    pub(crate) fn block(&self, holder: &Address) {
        self.state.with(|state| state.blocked.insert(holder.to_string()));
    }

    pub(crate) fn module_balance(&self, module: &str, denom: &str) -> Amount {
        self.state.with(|state| {
            state
                .balances
                .get(&(module_holder(module), denom.to_string()))
                .copied()
                .unwrap_or_default()
        })
    }

    fn move_coins(&self, from: &str, to: &str, coin: &Coin) -> Result<(), BankError> {
        // work on a copy so a failed credit leaves the debit undone
        self.state.with(|state| {
            let mut next = state.clone();
            next.transfer(from, to, coin)?;
            *state = next;
            Ok(())
        })
    }
}

impl BankKeeper for MockBank {
    fn balance(&self, address: &Address, denom: &str) -> Amount {
        self.state.with(|state| {
            state
                .balances
                .get(&(address.to_string(), denom.to_string()))
                .copied()
                .unwrap_or_default()
        })
    }

    fn supply(&self, denom: &str) -> Amount {
        self.state
            .with(|state| state.supply.get(denom).copied().unwrap_or_default())
    }

    fn send_coins(&self, from: &Address, to: &Address, coin: &Coin) -> Result<(), BankError> {
        self.move_coins(from.as_str(), to.as_str(), coin)
    }

    fn send_coins_from_account_to_module(
        &self,
        from: &Address,
        module: &str,
        coin: &Coin,
    ) -> Result<(), BankError> {
        self.move_coins(from.as_str(), &module_holder(module), coin)
    }

    fn send_coins_from_module_to_account(
        &self,
        module: &str,
        to: &Address,
        coin: &Coin,
    ) -> Result<(), BankError> {
        self.move_coins(&module_holder(module), to.as_str(), coin)
    }

    fn mint_coins(&self, module: &str, coin: &Coin) -> Result<(), BankError> {
        self.state.with(|state| {
            let mut next = state.clone();
            next.credit(&module_holder(module), coin)?;
            let supply = next.supply.entry(coin.denom.clone()).or_default();
            *supply = supply.checked_add(coin.amount).ok_or(BankError::Overflow {
                denom: coin.denom.clone(),
            })?;
            *state = next;
            Ok(())
        })
    }

    fn burn_coins(&self, module: &str, coin: &Coin) -> Result<(), BankError> {
        self.state.with(|state| {
            let mut next = state.clone();
            next.debit(&module_holder(module), coin)?;
            let supply = next.supply.entry(coin.denom.clone()).or_default();
            *supply = supply.saturating_sub(coin.amount);
            *state = next;
            Ok(())
        })
    }
}

/// Escrow holder of tokens sent over a channel.
pub(crate) const TRANSFER_ESCROW: &str = "transfer-escrow";

#[derive(Debug, Clone, Default)]
pub(crate) struct TransferState {
    pub(crate) sent: Vec<MsgTransfer>,
    pub(crate) next_sequence: Sequence,
    pub(crate) closed: bool,
}

/// A transfer module escrowing the sent tokens in the [`MockBank`].
#[derive(Debug)]
pub(crate) struct MockTransfer {
    bank: Arc<MockBank>,
    state: Snapshotted<TransferState>,
}

impl MockTransfer {
    pub(crate) fn new(bank: Arc<MockBank>) -> Self {
        let state = Snapshotted::default();
        state.with(|state: &mut TransferState| state.next_sequence = 1);
        Self { bank, state }
    }

    pub(crate) fn sent(&self) -> Vec<MsgTransfer> {
        self.state.get().sent
    }

    pub(crate) fn close_channel(&self) {
        self.state.with(|state| state.closed = true);
    }
}

impl TransferKeeper for MockTransfer {
    fn transfer(&self, msg: &MsgTransfer) -> Result<Sequence, TransferError> {
        if self.state.with(|state| state.closed) {
            return Err(TransferError::ChannelClosed(msg.source_channel.clone()));
        }

        self.bank
            .send_coins_from_account_to_module(&msg.sender, TRANSFER_ESCROW, &msg.token)
            .map_err(|err| TransferError::Rejected(err.to_string()))?;

        Ok(self.state.with(|state| {
            let sequence = state.next_sequence;
            state.next_sequence += 1;
            state.sent.push(msg.clone());
            sequence
        }))
    }
}

/// The rate limiter's blacklist.
#[derive(Debug, Default)]
pub(crate) struct MockRateLimit {
    state: Snapshotted<BTreeSet<String>>,
}

impl MockRateLimit {
    pub(crate) fn is_blacklisted(&self, denom: &str) -> bool {
        self.state.with(|blacklist| blacklist.contains(denom))
    }
}

impl RateLimitKeeper for MockRateLimit {
    fn add_denom_to_blacklist(&self, denom: &str) {
        self.state.with(|blacklist| blacklist.insert(denom.to_string()));
    }

    fn remove_denom_from_blacklist(&self, denom: &str) {
        self.state.with(|blacklist| blacklist.remove(denom));
    }
}

/// Collects queued metric updates.
#[derive(Debug, Default)]
pub(crate) struct MockOracle {
    state: Snapshotted<Vec<MetricUpdate>>,
}

impl MockOracle {
    pub(crate) fn updates(&self) -> Vec<MetricUpdate> {
        self.state.get()
    }
}

impl OracleKeeper for MockOracle {
    fn queue_metric_update(&self, update: MetricUpdate) {
        self.state.with(|updates| updates.push(update));
    }
}

type CallbackKey = (String, ChannelId, Sequence);

#[derive(Debug, Clone, Default)]
pub(crate) struct CallbackState {
    pub(crate) registered: BTreeSet<String>,
    pub(crate) data: BTreeMap<CallbackKey, CallbackData>,
}

/// Stores callback registrations and per-packet callback data.
#[derive(Debug, Default)]
pub(crate) struct MockCallbacks {
    state: Snapshotted<CallbackState>,
}

impl MockCallbacks {
    pub(crate) fn registered(&self) -> BTreeSet<String> {
        self.state.get().registered
    }
}

impl CallbackRegistry for MockCallbacks {
    fn register_callback(&self, callback_id: &str) {
        self.state
            .with(|state| state.registered.insert(callback_id.to_string()));
    }

    fn set_callback_data(&self, data: CallbackData) {
        self.state.with(|state| {
            let key = (data.port_id.clone(), data.channel_id.clone(), data.sequence);
            state.data.insert(key, data);
        });
    }

    fn callback_data(
        &self,
        port_id: &str,
        channel_id: &ChannelId,
        sequence: Sequence,
    ) -> Option<CallbackData> {
        self.state.with(|state| {
            state
                .data
                .get(&(port_id.to_string(), channel_id.clone(), sequence))
                .cloned()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_follows_scopes() {
        let bank = MockBank::default();
        let alice = Address::new("stride1alicex");
        bank.fund(&alice, &Coin::new("utia", 100));

        bank.begin();
        bank.burn_coins("none", &Coin::new("utia", 1)).unwrap_err();
        bank.send_coins(&alice, &Address::new("stride1bobbyx"), &Coin::new("utia", 60))
            .expect("funded");
        bank.rollback();

        assert_eq!(bank.balance(&alice, "utia"), 100);
        assert_eq!(bank.supply("utia"), 100);
    }

    #[test]
    fn failed_credit_leaves_balances_untouched() {
        let bank = MockBank::default();
        let alice = Address::new("stride1alicex");
        let bob = Address::new("stride1bobbyx");
        bank.fund(&alice, &Coin::new("utia", 100));
        bank.block(&bob);

        let err = bank
            .send_coins(&alice, &bob, &Coin::new("utia", 10))
            .unwrap_err();
        assert_eq!(err, BankError::Blocked(bob.to_string()));
        assert_eq!(bank.balance(&alice, "utia"), 100);
    }
}
