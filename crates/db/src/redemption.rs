//! Typed accessors for redemption records.

use stzone_primitives::{
    records::RedemptionRecord,
    types::{Address, RecordId},
};
use tracing::trace;

use crate::{
    codec::decode,
    errors::DbResult,
    keys,
    kv::KvStore,
    pagination::{paginate, PageRequest, PageResponse},
    records::{get_typed, set_typed, values_under},
};

/// Access to redemption records, keyed by parent unbonding record and redeemer.
pub trait RedemptionRecordDb: KvStore {
    /// Gets the redemption record of `redeemer` in unbonding record `unbonding_id`.
    fn get_redemption_record(
        &self,
        unbonding_id: RecordId,
        redeemer: &Address,
    ) -> DbResult<Option<RedemptionRecord>> {
        get_typed(self, &keys::redemption_key(unbonding_id, redeemer))
    }

    /// Stores a redemption record.
    fn set_redemption_record(&mut self, record: &RedemptionRecord) -> DbResult<()> {
        trace!(%record, "storing redemption record");
        set_typed(
            self,
            &keys::redemption_key(record.unbonding_record_id, &record.redeemer),
            record,
        )
    }

    /// Removes a redemption record.
    fn remove_redemption_record(
        &mut self,
        unbonding_id: RecordId,
        redeemer: &Address,
    ) -> DbResult<()> {
        trace!(%unbonding_id, %redeemer, "removing redemption record");
        self.delete(&keys::redemption_key(unbonding_id, redeemer))
    }

    /// Returns every redemption record, ordered by unbonding id then redeemer.
    fn all_redemption_records(&self) -> DbResult<Vec<RedemptionRecord>> {
        values_under(self, keys::REDEMPTION_PREFIX)
    }

    /// Returns the children of one unbonding record, ordered by redeemer.
    fn redemption_records_by_unbonding_id(
        &self,
        unbonding_id: RecordId,
    ) -> DbResult<Vec<RedemptionRecord>> {
        values_under(self, &keys::redemption_prefix(unbonding_id))
    }

    /// Returns every redemption record of one redeemer across all unbonding records.
    fn redemption_records_by_redeemer(
        &self,
        redeemer: &Address,
    ) -> DbResult<Vec<RedemptionRecord>> {
        let mut records = self.all_redemption_records()?;
        records.retain(|r| &r.redeemer == redeemer);
        Ok(records)
    }

    /// Returns one page of redemption records.
    fn paginated_redemption_records(
        &self,
        page: &PageRequest,
        limit: u64,
    ) -> DbResult<(Vec<RedemptionRecord>, PageResponse)> {
        let (pairs, response) = paginate(self, keys::REDEMPTION_PREFIX, page, limit)?;
        let records = pairs
            .iter()
            .map(|(_, v)| decode(v))
            .collect::<DbResult<Vec<_>>>()?;

        Ok((records, response))
    }
}

impl<S: KvStore + ?Sized> RedemptionRecordDb for S {}
