//! Byte offsets and codes of a channel configuration message.
//!
//! Offsets 0-2 are always present in a classifiable message; the sub-type
//! offset is only meaningful when the role is [`Role::Adc`] or [`Role::Dac`].

use serde::{Deserialize, Serialize};

use crate::error::{ProtoError, Result};

/// Command byte (the opcode the controller sent).
pub const COMMAND_POS: usize = 0;

/// Role byte: which capability the channel is configured for.
pub const ROLE_POS: usize = 1;

/// Sub-type byte for ADC configuration messages.
pub const ADC_TYPE_POS: usize = 2;

/// Sub-type byte for DAC configuration messages.
pub const DAC_TYPE_POS: usize = 2;

/// Minimum length of a message that can be classified.
pub const MIN_CONFIG_LEN: usize = 5;

/// Channel capability carried in the role byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Role {
    Adc = 0x05,
    Dac = 0x06,
    Rtd = 0x07,
    HighImpedance = 0x08,
    DigitalInput = 0x09,
    Pwm = 0x0A,
    /// Global RTD conversion period, not tied to a single channel.
    RtdUpdateTime = 0x0B,
}

impl Role {
    /// Wire code of this role.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Human-readable role name.
    pub fn name(self) -> &'static str {
        match self {
            Role::Adc => "ADC",
            Role::Dac => "DAC",
            Role::Rtd => "RTD",
            Role::HighImpedance => "HIGH_IMPEDANCE",
            Role::DigitalInput => "DIGITAL_INPUT",
            Role::Pwm => "PWM",
            Role::RtdUpdateTime => "RTD_UPDATE_TIME",
        }
    }

    /// Returns true if messages with this role carry a sub-type byte.
    pub fn has_sub_type(self) -> bool {
        matches!(self, Role::Adc | Role::Dac)
    }

    /// Offset of the sub-type byte for this role, if it has one.
    pub fn sub_type_pos(self) -> Option<usize> {
        match self {
            Role::Adc => Some(ADC_TYPE_POS),
            Role::Dac => Some(DAC_TYPE_POS),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Role {
    type Error = ProtoError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0x05 => Ok(Role::Adc),
            0x06 => Ok(Role::Dac),
            0x07 => Ok(Role::Rtd),
            0x08 => Ok(Role::HighImpedance),
            0x09 => Ok(Role::DigitalInput),
            0x0A => Ok(Role::Pwm),
            0x0B => Ok(Role::RtdUpdateTime),
            other => Err(ProtoError::UnknownRole(other)),
        }
    }
}

/// Electrical quantity of an ADC or DAC channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum SubType {
    Current = 0x01,
    Voltage = 0x02,
}

impl SubType {
    /// Wire code of this sub-type.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for SubType {
    type Error = ProtoError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0x01 => Ok(SubType::Current),
            0x02 => Ok(SubType::Voltage),
            other => Err(ProtoError::UnknownSubType(other)),
        }
    }
}
