//! Read-only queries over the module state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stzone_db::{
    kv::KvStore,
    pagination::{PageRequest, PageResponse},
    records::{DelegationRecordDb, SlashRecordDb, UnbondingRecordDb},
    redemption::RedemptionRecordDb,
};
use stzone_primitives::{
    host_zone::HostZone,
    records::{DelegationRecord, RedemptionRecord, SlashRecord, UnbondingRecord},
    types::{Address, RecordId, UnixSeconds},
};

use crate::{
    context::BlockCtx,
    errors::{KeeperError, KeeperResult},
    keeper::Keeper,
};

/// A redemption record together with the expected completion time of its unbonding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedemptionRecordResponse {
    /// The redemption record.
    pub redemption_record: RedemptionRecord,
    /// When the tokens are expected to be claimable, zero if unknown.
    pub unbonding_completion_time_seconds: UnixSeconds,
}

/// A list of redemption records, paginated when no filter was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedemptionRecordsResponse {
    /// The matching records.
    pub redemption_record_responses: Vec<RedemptionRecordResponse>,
    /// Continuation of a paginated listing.
    pub pagination: Option<PageResponse>,
}

/// Filters of the redemption records query. The address filter takes precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedemptionRecordsRequest {
    /// Only records of this redeemer.
    pub address: Option<Address>,
    /// Only records of this unbonding record.
    pub unbonding_record_id: Option<RecordId>,
    /// Page of an unfiltered listing.
    pub pagination: Option<PageRequest>,
}

impl<S: KvStore> Keeper<S> {
    /// Returns the host zone.
    pub fn query_host_zone(&self) -> KeeperResult<HostZone> {
        self.host_zone()
    }

    /// Returns the active delegation records, followed by the archived ones if requested.
    pub fn query_delegation_records(
        &self,
        include_archived: bool,
    ) -> KeeperResult<Vec<DelegationRecord>> {
        let mut records = self.store.all_active_delegation_records()?;
        if include_archived {
            records.extend(self.store.all_archived_delegation_records()?);
        }

        Ok(records)
    }

    /// Returns the active unbonding records, followed by the archived ones if requested.
    pub fn query_unbonding_records(
        &self,
        include_archived: bool,
    ) -> KeeperResult<Vec<UnbondingRecord>> {
        let mut records = self.store.all_active_unbonding_records()?;
        if include_archived {
            records.extend(self.store.all_archived_unbonding_records()?);
        }

        Ok(records)
    }

    /// Returns one redemption record with its expected completion time.
    pub fn query_redemption_record(
        &self,
        ctx: &BlockCtx,
        unbonding_record_id: RecordId,
        address: &Address,
    ) -> KeeperResult<RedemptionRecordResponse> {
        let redemption_record = self
            .store
            .get_redemption_record(unbonding_record_id, address)?
            .ok_or_else(|| KeeperError::RecordNotFound {
                kind: "redemption",
                id: format!("{unbonding_record_id}-{address}"),
            })?;

        let unbonding = match self.store.get_unbonding_record(unbonding_record_id)? {
            Some(record) => record,
            None => self
                .store
                .get_archived_unbonding_record(unbonding_record_id)?
                .ok_or_else(|| KeeperError::unbonding_not_found(unbonding_record_id))?,
        };
        let estimate = self.estimated_completion_time(ctx)?;

        Ok(RedemptionRecordResponse {
            redemption_record,
            unbonding_completion_time_seconds: completion_or(&unbonding, estimate),
        })
    }

    /// Returns redemption records filtered by redeemer, by unbonding record, or one page of all
    /// records when neither filter is set.
    pub fn query_redemption_records(
        &self,
        ctx: &BlockCtx,
        request: &RedemptionRecordsRequest,
    ) -> KeeperResult<RedemptionRecordsResponse> {
        let estimate = self.estimated_completion_time(ctx)?;
        let completion_times: BTreeMap<RecordId, UnixSeconds> = self
            .store
            .all_active_unbonding_records()?
            .iter()
            .map(|record| (record.id, completion_or(record, estimate)))
            .collect();
        let respond = |redemption_record: RedemptionRecord| RedemptionRecordResponse {
            unbonding_completion_time_seconds: completion_times
                .get(&redemption_record.unbonding_record_id)
                .copied()
                .unwrap_or_default(),
            redemption_record,
        };

        if let Some(address) = &request.address {
            let records = self.store.redemption_records_by_redeemer(address)?;
            return Ok(RedemptionRecordsResponse {
                redemption_record_responses: records.into_iter().map(respond).collect(),
                pagination: None,
            });
        }

        if let Some(unbonding_record_id) = request.unbonding_record_id {
            let records = self
                .store
                .redemption_records_by_unbonding_id(unbonding_record_id)?;
            return Ok(RedemptionRecordsResponse {
                redemption_record_responses: records.into_iter().map(respond).collect(),
                pagination: None,
            });
        }

        let page = request.pagination.clone().unwrap_or_default();
        let limit = self.params.page_limit(page.limit);
        let (records, pagination) = self.store.paginated_redemption_records(&page, limit)?;

        Ok(RedemptionRecordsResponse {
            redemption_record_responses: records.into_iter().map(respond).collect(),
            pagination: Some(pagination),
        })
    }

    /// Returns every slash record.
    pub fn query_slash_records(&self) -> KeeperResult<Vec<SlashRecord>> {
        Ok(self.store.all_slash_records()?)
    }

    /// Block time plus the unbonding period plus the configured buffer.
    fn estimated_completion_time(&self, ctx: &BlockCtx) -> KeeperResult<UnixSeconds> {
        let host_zone = self.host_zone()?;

        ctx.unix_seconds()
            .checked_add(host_zone.unbonding_period_seconds)
            .and_then(|t| t.checked_add(self.params.unbonding_estimate_buffer_seconds))
            .ok_or(KeeperError::Overflow("estimated completion time"))
    }
}

const fn completion_or(record: &UnbondingRecord, estimate: UnixSeconds) -> UnixSeconds {
    match record.unbonding_completion_time_seconds {
        0 => estimate,
        completion => completion,
    }
}
