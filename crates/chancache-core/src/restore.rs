//! Replaying cached configuration after a device reset.

use std::convert::Infallible;

use bytes::Bytes;
use tracing::{debug, info};

use crate::cache::ChannelConfigCache;
use crate::layout::SlotRegion;

/// One message of a restore sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreEntry {
    /// Slot the message was stored in.
    pub slot: usize,
    /// Logical region of the slot.
    pub region: SlotRegion,
    /// Independent copy of the stored message.
    pub payload: Bytes,
}

/// Destination for replayed configuration messages.
///
/// Implemented by whatever retransmits messages to the expansion board.
pub trait ConfigSink {
    /// Error produced when a message cannot be delivered.
    type Error;

    /// Deliver the message cached for `slot`.
    fn send_config(&mut self, slot: usize, payload: Bytes) -> Result<(), Self::Error>;
}

impl ConfigSink for Vec<(usize, Bytes)> {
    type Error = Infallible;

    fn send_config(&mut self, slot: usize, payload: Bytes) -> Result<(), Self::Error> {
        self.push((slot, payload));
        Ok(())
    }
}

impl<S: ConfigSink + ?Sized> ConfigSink for &mut S {
    type Error = S::Error;

    fn send_config(&mut self, slot: usize, payload: Bytes) -> Result<(), Self::Error> {
        (**self).send_config(slot, payload)
    }
}

impl ChannelConfigCache {
    /// Copies of every occupied slot, in ascending slot order.
    pub fn restore_all(&self) -> Vec<RestoreEntry> {
        let layout = *self.layout();
        self.occupied_messages()
            .filter_map(|(slot, message)| {
                layout.region_of(slot).map(|region| RestoreEntry {
                    slot,
                    region,
                    payload: message.to_bytes(),
                })
            })
            .collect()
    }

    /// Send every occupied slot to `sink`, in ascending slot order.
    ///
    /// Stops at the first delivery error. Returns the number of messages sent.
    pub fn replay<S: ConfigSink>(&self, mut sink: S) -> Result<usize, S::Error> {
        let mut sent = 0usize;
        for (slot, message) in self.occupied_messages() {
            debug!(slot, len = message.len(), "replaying channel configuration");
            sink.send_config(slot, message.to_bytes())?;
            sent += 1;
        }
        info!(sent, "configuration replay complete");
        Ok(sent)
    }
}
