//! Routing of packet acknowledgements and timeouts back to delegation records.

use stzone_db::{kv::KvStore, records::DelegationRecordDb, transfer::TransferInProgressDb};
use stzone_primitives::types::{ChannelId, RecordId, Sequence};
use stzone_sm::delegation::events::DelegationEvent;
use tracing::{debug, info, warn};

use crate::{
    errors::{KeeperError, KeeperResult},
    events::StakingEvent,
    expected_keepers::{AckResponse, AckStatus, CallbackData, Packet},
    keeper::Keeper,
};

/// Callback identifier of the deposit transfer sent by delegation preparation.
pub const DELEGATION_TRANSFER_CALLBACK_ID: &str = "delegation_transfer";

/// Callback identifier of redemption rate oracle updates.
pub const UPDATE_ORACLE_CALLBACK_ID: &str = "update_oracle";

impl<S: KvStore> Keeper<S> {
    /// Registers this module's callback identifiers.
    pub fn register_callbacks(&self) {
        for callback_id in [DELEGATION_TRANSFER_CALLBACK_ID, UPDATE_ORACLE_CALLBACK_ID] {
            self.collaborators.callbacks.register_callback(callback_id);
        }
    }

    /// Handles the acknowledgement of a deposit transfer.
    ///
    /// Packets that are not indexed belong to another module and are ignored. A malformed ack
    /// fails without touching the record or the index.
    pub fn on_acknowledgement_packet(&mut self, packet: &Packet, ack: &[u8]) -> KeeperResult<()> {
        self.apply_if_no_error(|keeper| {
            let Some(record_id) = keeper.indexed_transfer(packet)? else {
                return Ok(());
            };

            let response = keeper
                .collaborators
                .ack_parser
                .parse(ack)
                .map_err(KeeperError::MalformedAck)?;

            keeper.resolve_transfer(&packet.source_channel, packet.sequence, record_id, &response)
        })
    }

    /// Handles the timeout of a deposit transfer. The record is archived as failed.
    pub fn on_timeout_packet(&mut self, packet: &Packet) -> KeeperResult<()> {
        self.apply_if_no_error(|keeper| {
            let Some(record_id) = keeper.indexed_transfer(packet)? else {
                return Ok(());
            };

            keeper.resolve_transfer(
                &packet.source_channel,
                packet.sequence,
                record_id,
                &AckResponse::timeout(),
            )
        })
    }

    /// Dispatches a packet lifecycle event to the callback registered for the packet.
    ///
    /// `ack` is `None` when the packet timed out. Packets without callback data are ignored.
    pub fn on_callback(&mut self, packet: &Packet, ack: Option<&[u8]>) -> KeeperResult<()> {
        let Some(data) = self.collaborators.callbacks.callback_data(
            &packet.source_port,
            &packet.source_channel,
            packet.sequence,
        ) else {
            debug!(sequence = %packet.sequence, channel = %packet.source_channel, "no callback data for packet");
            return Ok(());
        };

        match (data.callback_id.as_str(), ack) {
            (DELEGATION_TRANSFER_CALLBACK_ID, Some(ack)) => self.on_acknowledgement_packet(packet, ack),
            (DELEGATION_TRANSFER_CALLBACK_ID, None) => self.on_timeout_packet(packet),
            (UPDATE_ORACLE_CALLBACK_ID, ack) => self.on_update_oracle_ack(&data, ack),
            (other, _) => Err(KeeperError::UnknownCallback(other.to_string())),
        }
    }

    fn on_update_oracle_ack(&mut self, data: &CallbackData, ack: Option<&[u8]>) -> KeeperResult<()> {
        let response = match ack {
            Some(ack) => self
                .collaborators
                .ack_parser
                .parse(ack)
                .map_err(KeeperError::MalformedAck)?,
            None => AckResponse::timeout(),
        };

        let metric_key = String::from_utf8_lossy(&data.args).into_owned();
        info!(%metric_key, status = %response.status, "oracle update acknowledged");
        self.emit(StakingEvent::UpdateOracleAck {
            metric_key,
            ack_status: response.status,
        });

        Ok(())
    }

    fn indexed_transfer(&self, packet: &Packet) -> KeeperResult<Option<RecordId>> {
        let record_id = self
            .store
            .get_transfer_in_progress(&packet.source_channel, packet.sequence)?;
        if record_id.is_none() {
            debug!(sequence = %packet.sequence, channel = %packet.source_channel, "packet is not a delegation transfer");
        }

        Ok(record_id)
    }

    fn resolve_transfer(
        &mut self,
        channel: &ChannelId,
        sequence: Sequence,
        record_id: RecordId,
        response: &AckResponse,
    ) -> KeeperResult<()> {
        let record = self
            .store
            .get_delegation_record(record_id)?
            .ok_or_else(|| KeeperError::delegation_not_found(record_id))?;

        let event = match response.status {
            AckStatus::Success => DelegationEvent::TransferAcknowledged,
            AckStatus::Failure | AckStatus::Timeout => DelegationEvent::TransferFailed,
        };
        let record = self.process_delegation_event(record, event)?;
        self.store.remove_transfer_in_progress(channel, sequence)?;

        match response.status {
            AckStatus::Success => info!(%record_id, "delegation transfer acknowledged"),
            status => warn!(
                %record_id,
                %status,
                error = ?response.error,
                native_amount = %record.native_amount,
                "delegation transfer failed"
            ),
        }

        Ok(())
    }
}
