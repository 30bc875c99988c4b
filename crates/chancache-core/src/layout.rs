//! Slot index space of a cache.
//!
//! A board with `A` analog channels and `P` PWM channels has
//! `2A + P + 1` slots, laid out as:
//!
//! ```text
//! ┌──────────────────┬───────────────┬───────────────┬──────────────────────┐
//! │ Primary (A)      │ PWM (P)       │ RTD time (1)  │ Additional ADC (A)   │
//! │ 0 .. A           │ A .. A+P      │ A+P           │ A+P+1 .. 2A+P+1      │
//! └──────────────────┴───────────────┴───────────────┴──────────────────────┘
//! ```
//!
//! Primary slot index equals the analog channel index. The additional-ADC
//! slot of channel `ch` is `ch + additional_adc_offset()`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default number of analog channels on an expansion board.
pub const DEFAULT_ANALOG_CHANNELS: usize = 8;

/// Default number of PWM channels on an expansion board.
pub const DEFAULT_PWM_CHANNELS: usize = 4;

/// Largest slot count a layout may produce (slot indices fit in one byte).
pub const MAX_SLOTS: usize = 256;

/// Board geometry that determines the slot index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotLayout {
    /// Number of multi-function analog channels.
    pub analog_channels: usize,
    /// Number of PWM output channels.
    pub pwm_channels: usize,
}

impl Default for SlotLayout {
    fn default() -> Self {
        Self {
            analog_channels: DEFAULT_ANALOG_CHANNELS,
            pwm_channels: DEFAULT_PWM_CHANNELS,
        }
    }
}

impl fmt::Display for SlotLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} analog, {} pwm",
            self.analog_channels, self.pwm_channels
        )
    }
}

/// The logical region a slot index falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "region", content = "channel", rename_all = "snake_case")]
pub enum SlotRegion {
    /// Primary configuration of an analog channel.
    Primary(usize),
    /// Configuration of a PWM channel.
    Pwm(usize),
    /// The board-wide RTD update time.
    RtdUpdateTime,
    /// Additional ADC configuration of an analog channel.
    AdditionalAdc(usize),
}

impl SlotRegion {
    /// Short region name.
    pub fn name(self) -> &'static str {
        match self {
            SlotRegion::Primary(_) => "primary",
            SlotRegion::Pwm(_) => "pwm",
            SlotRegion::RtdUpdateTime => "rtd-update-time",
            SlotRegion::AdditionalAdc(_) => "additional-adc",
        }
    }

    /// Channel index within the region, if the region is per-channel.
    pub fn channel(self) -> Option<usize> {
        match self {
            SlotRegion::Primary(ch) | SlotRegion::Pwm(ch) | SlotRegion::AdditionalAdc(ch) => {
                Some(ch)
            }
            SlotRegion::RtdUpdateTime => None,
        }
    }
}

impl fmt::Display for SlotRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.channel() {
            Some(ch) => write!(f, "{}[{ch}]", self.name()),
            None => f.write_str(self.name()),
        }
    }
}

impl SlotLayout {
    /// Create a layout for the given channel counts.
    pub const fn new(analog_channels: usize, pwm_channels: usize) -> Self {
        Self {
            analog_channels,
            pwm_channels,
        }
    }

    /// Total number of slots.
    pub fn slot_count(&self) -> usize {
        2 * self.analog_channels + self.pwm_channels + 1
    }

    /// Returns true if `slot` is a valid index.
    pub fn contains(&self, slot: usize) -> bool {
        slot < self.slot_count()
    }

    /// Primary slot of analog channel `ch`.
    pub fn primary(&self, ch: usize) -> Option<usize> {
        (ch < self.analog_channels).then_some(ch)
    }

    /// Slot of PWM channel `ch`.
    pub fn pwm(&self, ch: usize) -> Option<usize> {
        (ch < self.pwm_channels).then(|| self.analog_channels + ch)
    }

    /// Slot holding the RTD update time.
    pub fn rtd_update_time(&self) -> usize {
        self.analog_channels + self.pwm_channels
    }

    /// Distance from a primary slot to its additional-ADC slot.
    pub fn additional_adc_offset(&self) -> usize {
        self.analog_channels + self.pwm_channels + 1
    }

    /// Additional-ADC slot of analog channel `ch`.
    pub fn additional_adc(&self, ch: usize) -> Option<usize> {
        (ch < self.analog_channels).then(|| ch + self.additional_adc_offset())
    }

    /// Map a slot index back to its region.
    pub fn region_of(&self, slot: usize) -> Option<SlotRegion> {
        let rtd = self.rtd_update_time();
        if slot < self.analog_channels {
            Some(SlotRegion::Primary(slot))
        } else if slot < rtd {
            Some(SlotRegion::Pwm(slot - self.analog_channels))
        } else if slot == rtd {
            Some(SlotRegion::RtdUpdateTime)
        } else if slot < self.slot_count() {
            Some(SlotRegion::AdditionalAdc(slot - self.additional_adc_offset()))
        } else {
            None
        }
    }

    /// Check the geometry is usable.
    pub fn validate(&self) -> Result<(), String> {
        if self.analog_channels == 0 {
            return Err("layout needs at least one analog channel".to_string());
        }
        let slots = self
            .analog_channels
            .checked_mul(2)
            .and_then(|n| n.checked_add(self.pwm_channels))
            .and_then(|n| n.checked_add(1));
        match slots {
            Some(n) if n <= MAX_SLOTS => Ok(()),
            _ => Err(format!(
                "layout of {} analog and {} pwm channels exceeds {MAX_SLOTS} slots",
                self.analog_channels, self.pwm_channels
            )),
        }
    }
}
