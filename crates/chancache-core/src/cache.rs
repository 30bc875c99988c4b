use bytes::{BufMut, Bytes, BytesMut};
use chancache_proto::{ChannelKind, SubType};
use tracing::{debug, trace};

use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::layout::{SlotLayout, SlotRegion};
use crate::message::StoredMessage;

/// Outcome of an accepted [`ChannelConfigCache::store`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stored {
    /// Slot written.
    pub slot: usize,
    /// Length of the stored message.
    pub len: usize,
    /// True if a previous message was released.
    pub replaced: bool,
}

/// Last configuration message per channel slot of one expansion board.
///
/// The cache exclusively owns every stored buffer. Reads hand out independent
/// copies, and cloning the cache deep-copies every occupied slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelConfigCache {
    slots: Vec<Option<StoredMessage>>,
    config: CacheConfig,
}

impl Default for ChannelConfigCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelConfigCache {
    /// Create an empty cache for the default board geometry.
    pub fn new() -> Self {
        Self::empty(CacheConfig::default())
    }

    /// Create an empty cache with explicit config.
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::empty(config))
    }

    fn empty(config: CacheConfig) -> Self {
        Self {
            slots: vec![None; config.layout.slot_count()],
            config,
        }
    }

    /// Current cache configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Board geometry of this cache.
    pub fn layout(&self) -> &SlotLayout {
        &self.config.layout
    }

    /// Number of addressable slots.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Store the latest configuration message for `slot`.
    ///
    /// Any previous message in the slot is released. A rejected store leaves
    /// the cache exactly as it was; callers that do not need confirmation may
    /// discard the result.
    pub fn store(&mut self, slot: usize, payload: &[u8]) -> Result<Stored> {
        if let Err(err) = self.check_store(slot, payload) {
            debug!(slot, len = payload.len(), %err, "configuration store ignored");
            return Err(err);
        }

        let message = StoredMessage::try_copy(payload).map_err(|_| {
            debug!(slot, len = payload.len(), "configuration store allocation failed");
            CacheError::AllocationFailed {
                slot,
                size: payload.len(),
            }
        })?;

        let replaced = self.slots[slot].replace(message).is_some();
        debug!(slot, len = payload.len(), replaced, "stored channel configuration");
        Ok(Stored {
            slot,
            len: payload.len(),
            replaced,
        })
    }

    fn check_store(&self, slot: usize, payload: &[u8]) -> Result<()> {
        if slot >= self.slots.len() {
            return Err(CacheError::SlotOutOfRange {
                slot,
                slots: self.slots.len(),
            });
        }
        if payload.is_empty() {
            return Err(CacheError::EmptyPayload { slot });
        }
        if payload.len() > self.config.max_message_len {
            return Err(CacheError::PayloadTooLarge {
                slot,
                size: payload.len(),
                max: self.config.max_message_len,
            });
        }
        Ok(())
    }

    /// Remove the message in `slot`, returning it.
    pub fn clear(&mut self, slot: usize) -> Option<Bytes> {
        let removed = self.slots.get_mut(slot)?.take()?;
        debug!(slot, len = removed.len(), "cleared channel configuration");
        Some(removed.to_bytes())
    }

    /// Drop every stored message.
    pub fn reset(&mut self) {
        let released = self.occupied();
        self.slots.iter_mut().for_each(|slot| *slot = None);
        debug!(released, "configuration cache reset");
    }

    /// Release the additional-ADC message of analog channel `ch`.
    ///
    /// Used when a channel leaves combined ADC mode. Out-of-range channels are
    /// ignored.
    pub fn clear_additional_adc(&mut self, ch: usize) {
        if let Some(slot) = self.layout().additional_adc(ch) {
            if self.slots[slot].take().is_some() {
                debug!(channel = ch, slot, "cleared additional ADC configuration");
            }
        }
    }

    /// Length of the message in `slot`, if any.
    pub fn len_of(&self, slot: usize) -> Option<usize> {
        self.message(slot).map(StoredMessage::len)
    }

    /// Returns true if `slot` holds a message.
    pub fn is_occupied(&self, slot: usize) -> bool {
        self.message(slot).is_some()
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Byte-exact copy of the message in `slot`, `None` if absent.
    ///
    /// Messages too short to classify are still returned verbatim.
    pub fn restore(&self, slot: usize) -> Option<Bytes> {
        self.message(slot).map(StoredMessage::to_bytes)
    }

    /// Append the message in `slot` to `dst`, returning bytes written.
    ///
    /// Writes nothing and returns 0 when the slot is absent.
    pub fn restore_into(&self, slot: usize, dst: &mut BytesMut) -> usize {
        match self.message(slot) {
            Some(message) => {
                dst.reserve(message.len());
                dst.put_slice(message.as_bytes());
                message.len()
            }
            None => 0,
        }
    }

    /// Classify the configuration held by `slot`.
    ///
    /// Absent or short messages classify as [`ChannelKind::HighImpedance`].
    /// For a primary analog slot without a recognisable message of its own,
    /// an ADC configuration in the channel's additional-ADC slot is reported
    /// instead. Out-of-range slots are [`ChannelKind::Unknown`].
    pub fn classify(&self, slot: usize) -> ChannelKind {
        let Some(region) = self.layout().region_of(slot) else {
            return ChannelKind::Unknown;
        };

        let own = self.kind_at(slot);
        if let SlotRegion::Primary(ch) = region {
            let recognised = matches!(own, Some(kind) if kind != ChannelKind::Unknown);
            if !recognised {
                if let Some(kind) = self.additional_adc_kind(ch) {
                    trace!(channel = ch, %kind, "classified from additional ADC slot");
                    return kind;
                }
            }
        }
        own.unwrap_or(ChannelKind::HighImpedance)
    }

    /// Classification of analog channel `ch`, `None` if `ch` is out of range.
    pub fn channel_kind(&self, ch: usize) -> Option<ChannelKind> {
        self.layout().primary(ch).map(|slot| self.classify(slot))
    }

    /// Classification of every analog channel, in channel order.
    pub fn channel_kinds(&self) -> Vec<ChannelKind> {
        (0..self.layout().analog_channels)
            .map(|ch| self.classify(ch))
            .collect()
    }

    /// Channel `ch` measures voltage (primary or additional-ADC slot).
    pub fn is_voltage_adc(&self, ch: usize) -> bool {
        self.has_adc(ch, SubType::Voltage)
    }

    /// Channel `ch` measures current (primary or additional-ADC slot).
    pub fn is_current_adc(&self, ch: usize) -> bool {
        self.has_adc(ch, SubType::Current)
    }

    /// Channel `ch` outputs voltage.
    pub fn is_voltage_dac(&self, ch: usize) -> bool {
        self.primary_is(ch, ChannelKind::VoltageDac)
    }

    /// Channel `ch` outputs current.
    pub fn is_current_dac(&self, ch: usize) -> bool {
        self.primary_is(ch, ChannelKind::CurrentDac)
    }

    /// Channel `ch` is a digital input.
    pub fn is_digital_input(&self, ch: usize) -> bool {
        self.primary_is(ch, ChannelKind::DigitalInput)
    }

    /// Channel `ch` is an RTD input.
    pub fn is_rtd(&self, ch: usize) -> bool {
        self.primary_is(ch, ChannelKind::Rtd)
    }

    /// Channel `ch` is unconfigured or explicitly high-impedance.
    pub fn is_high_impedance(&self, ch: usize) -> bool {
        match self.layout().primary(ch) {
            Some(slot) => matches!(self.kind_at(slot), None | Some(ChannelKind::HighImpedance)),
            None => false,
        }
    }

    /// Deep copy that reports allocation failure instead of aborting.
    pub fn try_clone(&self) -> Result<Self> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(self.slots.len())
            .map_err(|_| CacheError::AllocationFailed {
                slot: 0,
                size: self.slots.len(),
            })?;

        for (slot, entry) in self.slots.iter().enumerate() {
            let copy = entry
                .as_ref()
                .map(|message| {
                    StoredMessage::try_copy(message.as_bytes()).map_err(|_| {
                        CacheError::AllocationFailed {
                            slot,
                            size: message.len(),
                        }
                    })
                })
                .transpose()?;
            slots.push(copy);
        }

        Ok(Self {
            slots,
            config: self.config,
        })
    }

    pub(crate) fn occupied_messages(&self) -> impl Iterator<Item = (usize, &StoredMessage)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, entry)| entry.as_ref().map(|message| (slot, message)))
    }

    fn message(&self, slot: usize) -> Option<&StoredMessage> {
        self.slots.get(slot)?.as_ref()
    }

    /// Kind of the message in `slot`; `None` when absent or too short.
    fn kind_at(&self, slot: usize) -> Option<ChannelKind> {
        self.message(slot)?.kind()
    }

    fn additional_adc_kind(&self, ch: usize) -> Option<ChannelKind> {
        let slot = self.layout().additional_adc(ch)?;
        self.kind_at(slot).filter(|kind| kind.is_adc())
    }

    fn has_adc(&self, ch: usize, sub_type: SubType) -> bool {
        let wanted = ChannelKind::adc(sub_type);
        let Some(primary) = self.layout().primary(ch) else {
            return false;
        };
        self.kind_at(primary) == Some(wanted) || self.additional_adc_kind(ch) == Some(wanted)
    }

    fn primary_is(&self, ch: usize, kind: ChannelKind) -> bool {
        self.layout()
            .primary(ch)
            .is_some_and(|slot| self.kind_at(slot) == Some(kind))
    }
}
