//! The transfer-in-progress index.
//!
//! Maps an outbound transfer, identified by `(channel, sequence)`, to the delegation record
//! waiting for its acknowledgement.

use serde::{Deserialize, Serialize};
use stzone_primitives::types::{ChannelId, RecordId, Sequence};
use tracing::trace;

use crate::{
    codec::decode,
    errors::DbResult,
    keys,
    kv::KvStore,
    records::{get_typed, set_typed},
};

/// An entry of the transfer-in-progress index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferInProgress {
    /// The channel the transfer was sent on.
    pub channel_id: ChannelId,
    /// The packet sequence.
    pub sequence: Sequence,
    /// The delegation record the transfer belongs to.
    pub record_id: RecordId,
}

/// Access to the transfer-in-progress index.
pub trait TransferInProgressDb: KvStore {
    /// Gets the record id awaiting the ack of `(channel, sequence)`.
    fn get_transfer_in_progress(
        &self,
        channel: &ChannelId,
        sequence: Sequence,
    ) -> DbResult<Option<RecordId>> {
        get_typed(self, &keys::transfer_in_progress_key(channel, sequence))
    }

    /// Indexes `(channel, sequence)` to `record_id`.
    fn set_transfer_in_progress(
        &mut self,
        channel: &ChannelId,
        sequence: Sequence,
        record_id: RecordId,
    ) -> DbResult<()> {
        trace!(%channel, %sequence, %record_id, "indexing transfer in progress");
        set_typed(
            self,
            &keys::transfer_in_progress_key(channel, sequence),
            &record_id,
        )
    }

    /// Removes the entry for `(channel, sequence)`.
    fn remove_transfer_in_progress(
        &mut self,
        channel: &ChannelId,
        sequence: Sequence,
    ) -> DbResult<()> {
        trace!(%channel, %sequence, "removing transfer in progress");
        self.delete(&keys::transfer_in_progress_key(channel, sequence))
    }

    /// Returns every entry of the index.
    fn all_transfers_in_progress(&self) -> DbResult<Vec<TransferInProgress>> {
        self.iter_prefix(keys::TRANSFER_IN_PROGRESS_PREFIX)?
            .iter()
            .map(|(k, v)| {
                let (channel_id, sequence) = keys::parse_transfer_in_progress_key(k)?;
                Ok(TransferInProgress {
                    channel_id,
                    sequence,
                    record_id: decode(v)?,
                })
            })
            .collect()
    }
}

impl<S: KvStore + ?Sized> TransferInProgressDb for S {}
