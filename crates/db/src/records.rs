//! Typed accessors for the host zone, delegation, unbonding and slash records.
//!
//! Each trait is implemented for every [`KvStore`], so the keeper reads and writes records
//! through whichever store (or cache layer) it holds.

use serde::{de::DeserializeOwned, Serialize};
use stzone_primitives::{
    host_zone::HostZone,
    records::{
        DelegationRecord, DelegationRecordStatus, SlashRecord, UnbondingRecord,
        UnbondingRecordStatus,
    },
    types::RecordId,
};
use tracing::trace;

use crate::{
    codec::{decode, encode},
    errors::DbResult,
    keys,
    kv::KvStore,
};

pub(crate) fn get_typed<S, T>(store: &S, key: &[u8]) -> DbResult<Option<T>>
where
    S: KvStore + ?Sized,
    T: DeserializeOwned,
{
    store.get(key)?.map(|bytes| decode(&bytes)).transpose()
}

pub(crate) fn set_typed<S, T>(store: &mut S, key: &[u8], value: &T) -> DbResult<()>
where
    S: KvStore + ?Sized,
    T: Serialize,
{
    store.set(key, encode(value)?)
}

pub(crate) fn values_under<S, T>(store: &S, prefix: &[u8]) -> DbResult<Vec<T>>
where
    S: KvStore + ?Sized,
    T: DeserializeOwned,
{
    store
        .iter_prefix(prefix)?
        .iter()
        .map(|(_, v)| decode(v))
        .collect()
}

/// Access to the host zone singleton.
pub trait HostZoneDb: KvStore {
    /// Gets the host zone, if it has been initialised.
    fn get_host_zone(&self) -> DbResult<Option<HostZone>> {
        get_typed(self, keys::HOST_ZONE_KEY)
    }

    /// Stores the host zone.
    fn set_host_zone(&mut self, host_zone: &HostZone) -> DbResult<()> {
        trace!(chain_id = %host_zone.chain_id, "storing host zone");
        set_typed(self, keys::HOST_ZONE_KEY, host_zone)
    }
}

impl<S: KvStore + ?Sized> HostZoneDb for S {}

/// Access to delegation records in the active and archive stores.
pub trait DelegationRecordDb: KvStore {
    /// Gets an active delegation record.
    fn get_delegation_record(&self, id: RecordId) -> DbResult<Option<DelegationRecord>> {
        get_typed(self, &keys::delegation_active_key(id))
    }

    /// Gets an archived delegation record.
    fn get_archived_delegation_record(&self, id: RecordId) -> DbResult<Option<DelegationRecord>> {
        get_typed(self, &keys::delegation_archive_key(id))
    }

    /// Returns `true` if a record with this id exists in either store.
    fn delegation_record_exists(&self, id: RecordId) -> DbResult<bool> {
        Ok(self.contains(&keys::delegation_active_key(id))?
            || self.contains(&keys::delegation_archive_key(id))?)
    }

    /// Writes a record to the active store.
    fn set_delegation_record(&mut self, record: &DelegationRecord) -> DbResult<()> {
        trace!(%record, "storing active delegation record");
        set_typed(self, &keys::delegation_active_key(record.id), record)
    }

    /// Writes a record to the archive store, removing it from the active store.
    fn archive_delegation_record(&mut self, record: &DelegationRecord) -> DbResult<()> {
        trace!(%record, "archiving delegation record");
        self.delete(&keys::delegation_active_key(record.id))?;
        set_typed(self, &keys::delegation_archive_key(record.id), record)
    }

    /// Removes a record from the active store.
    fn remove_delegation_record(&mut self, id: RecordId) -> DbResult<()> {
        self.delete(&keys::delegation_active_key(id))
    }

    /// Returns every active record in id order.
    fn all_active_delegation_records(&self) -> DbResult<Vec<DelegationRecord>> {
        values_under(self, keys::DELEGATION_ACTIVE_PREFIX)
    }

    /// Returns every archived record in id order.
    fn all_archived_delegation_records(&self) -> DbResult<Vec<DelegationRecord>> {
        values_under(self, keys::DELEGATION_ARCHIVE_PREFIX)
    }

    /// Returns the active records with the given status.
    fn delegation_records_by_status(
        &self,
        status: DelegationRecordStatus,
    ) -> DbResult<Vec<DelegationRecord>> {
        let mut records = self.all_active_delegation_records()?;
        records.retain(|r| r.status == status);
        Ok(records)
    }
}

impl<S: KvStore + ?Sized> DelegationRecordDb for S {}

/// Access to unbonding records in the active and archive stores.
pub trait UnbondingRecordDb: KvStore {
    /// Gets an active unbonding record.
    fn get_unbonding_record(&self, id: RecordId) -> DbResult<Option<UnbondingRecord>> {
        get_typed(self, &keys::unbonding_active_key(id))
    }

    /// Gets an archived unbonding record.
    fn get_archived_unbonding_record(&self, id: RecordId) -> DbResult<Option<UnbondingRecord>> {
        get_typed(self, &keys::unbonding_archive_key(id))
    }

    /// Returns `true` if a record with this id exists in either store.
    fn unbonding_record_exists(&self, id: RecordId) -> DbResult<bool> {
        Ok(self.contains(&keys::unbonding_active_key(id))?
            || self.contains(&keys::unbonding_archive_key(id))?)
    }

    /// Writes a record to the active store.
    fn set_unbonding_record(&mut self, record: &UnbondingRecord) -> DbResult<()> {
        trace!(%record, "storing active unbonding record");
        set_typed(self, &keys::unbonding_active_key(record.id), record)
    }

    /// Writes a record to the archive store, removing it from the active store.
    fn archive_unbonding_record(&mut self, record: &UnbondingRecord) -> DbResult<()> {
        trace!(%record, "archiving unbonding record");
        self.delete(&keys::unbonding_active_key(record.id))?;
        set_typed(self, &keys::unbonding_archive_key(record.id), record)
    }

    /// Returns every active record in id order.
    fn all_active_unbonding_records(&self) -> DbResult<Vec<UnbondingRecord>> {
        values_under(self, keys::UNBONDING_ACTIVE_PREFIX)
    }

    /// Returns every archived record in id order.
    fn all_archived_unbonding_records(&self) -> DbResult<Vec<UnbondingRecord>> {
        values_under(self, keys::UNBONDING_ARCHIVE_PREFIX)
    }

    /// Returns the active records with the given status.
    fn unbonding_records_by_status(
        &self,
        status: UnbondingRecordStatus,
    ) -> DbResult<Vec<UnbondingRecord>> {
        let mut records = self.all_active_unbonding_records()?;
        records.retain(|r| r.status == status);
        Ok(records)
    }
}

impl<S: KvStore + ?Sized> UnbondingRecordDb for S {}

/// Access to the slash record audit trail.
pub trait SlashRecordDb: KvStore {
    /// Stores a slash record.
    fn set_slash_record(&mut self, record: &SlashRecord) -> DbResult<()> {
        trace!(%record, "storing slash record");
        set_typed(self, &keys::slash_key(record.id), record)
    }

    /// Returns every slash record in id order.
    fn all_slash_records(&self) -> DbResult<Vec<SlashRecord>> {
        values_under(self, keys::SLASH_PREFIX)
    }

    /// Returns the last assigned slash record id, zero if none was assigned.
    fn last_slash_record_id(&self) -> DbResult<u64> {
        Ok(get_typed(self, keys::SLASH_COUNTER_KEY)?.unwrap_or_default())
    }

    /// Sets the last assigned slash record id.
    fn set_last_slash_record_id(&mut self, id: u64) -> DbResult<()> {
        set_typed(self, keys::SLASH_COUNTER_KEY, &id)
    }

    /// Increments the slash record counter and returns the new id.
    fn next_slash_record_id(&mut self) -> DbResult<u64> {
        let id = self.last_slash_record_id()? + 1;
        self.set_last_slash_record_id(id)?;
        Ok(id)
    }
}

impl<S: KvStore + ?Sized> SlashRecordDb for S {}
