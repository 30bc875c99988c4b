use serde::{Deserialize, Serialize};

use crate::schema::{Role, SubType, MIN_CONFIG_LEN, ROLE_POS};

/// Operating mode of a channel as derived from its configuration message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    VoltageAdc,
    CurrentAdc,
    VoltageDac,
    CurrentDac,
    DigitalInput,
    Rtd,
    HighImpedance,
    Unknown,
}

impl ChannelKind {
    /// The ADC kind measuring the given quantity.
    pub fn adc(sub_type: SubType) -> Self {
        match sub_type {
            SubType::Voltage => ChannelKind::VoltageAdc,
            SubType::Current => ChannelKind::CurrentAdc,
        }
    }

    /// The DAC kind driving the given quantity.
    pub fn dac(sub_type: SubType) -> Self {
        match sub_type {
            SubType::Voltage => ChannelKind::VoltageDac,
            SubType::Current => ChannelKind::CurrentDac,
        }
    }

    /// Returns true for the two ADC kinds.
    pub fn is_adc(self) -> bool {
        matches!(self, ChannelKind::VoltageAdc | ChannelKind::CurrentAdc)
    }

    /// Returns true for the two DAC kinds.
    pub fn is_dac(self) -> bool {
        matches!(self, ChannelKind::VoltageDac | ChannelKind::CurrentDac)
    }

    /// Human-readable kind name.
    pub fn name(self) -> &'static str {
        match self {
            ChannelKind::VoltageAdc => "VOLTAGE_ADC",
            ChannelKind::CurrentAdc => "CURRENT_ADC",
            ChannelKind::VoltageDac => "VOLTAGE_DAC",
            ChannelKind::CurrentDac => "CURRENT_DAC",
            ChannelKind::DigitalInput => "DIGITAL_INPUT",
            ChannelKind::Rtd => "RTD",
            ChannelKind::HighImpedance => "HIGH_IMPEDANCE",
            ChannelKind::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns true if a message of this length can be classified.
pub fn is_classifiable(message: &[u8]) -> bool {
    message.len() >= MIN_CONFIG_LEN
}

/// Decode the channel kind a configuration message selects.
///
/// Returns `None` if the message is too short to classify. Roles that do not
/// configure a channel mode (PWM, RTD update time), unknown role codes, and
/// ADC/DAC messages with an unknown sub-type decode to [`ChannelKind::Unknown`].
pub fn decode(message: &[u8]) -> Option<ChannelKind> {
    if !is_classifiable(message) {
        return None;
    }

    let role = match Role::try_from(message[ROLE_POS]) {
        Ok(role) => role,
        Err(_) => return Some(ChannelKind::Unknown),
    };

    let sub_type = role
        .sub_type_pos()
        .and_then(|pos| SubType::try_from(message[pos]).ok());

    let kind = match (role, sub_type) {
        (Role::Adc, Some(sub_type)) => ChannelKind::adc(sub_type),
        (Role::Dac, Some(sub_type)) => ChannelKind::dac(sub_type),
        (Role::DigitalInput, _) => ChannelKind::DigitalInput,
        (Role::Rtd, _) => ChannelKind::Rtd,
        (Role::HighImpedance, _) => ChannelKind::HighImpedance,
        _ => ChannelKind::Unknown,
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(role: u8, sub_type: u8) -> [u8; MIN_CONFIG_LEN] {
        [0x01, role, sub_type, 0x00, 0x00]
    }

    #[test]
    fn decodes_voltage_adc() {
        assert_eq!(
            decode(&[0x01, 0x05, 0x02, 0x00, 0x00]),
            Some(ChannelKind::VoltageAdc)
        );
    }

    #[test]
    fn decodes_adc_and_dac_sub_types() {
        assert_eq!(
            decode(&msg(Role::Adc.code(), SubType::Current.code())),
            Some(ChannelKind::CurrentAdc)
        );
        assert_eq!(
            decode(&msg(Role::Dac.code(), SubType::Voltage.code())),
            Some(ChannelKind::VoltageDac)
        );
        assert_eq!(
            decode(&msg(Role::Dac.code(), SubType::Current.code())),
            Some(ChannelKind::CurrentDac)
        );
    }

    #[test]
    fn sub_type_ignored_for_roles_without_one() {
        assert_eq!(
            decode(&msg(Role::DigitalInput.code(), 0xEE)),
            Some(ChannelKind::DigitalInput)
        );
        assert_eq!(decode(&msg(Role::Rtd.code(), 0x00)), Some(ChannelKind::Rtd));
        assert_eq!(
            decode(&msg(Role::HighImpedance.code(), 0x02)),
            Some(ChannelKind::HighImpedance)
        );
    }

    #[test]
    fn short_message_does_not_classify() {
        assert_eq!(decode(&[0x01, 0x05, 0x02, 0x00]), None);
        assert_eq!(decode(&[]), None);
        assert!(!is_classifiable(&[0x01, 0x05]));
    }

    #[test]
    fn unknown_codes_decode_to_unknown() {
        assert_eq!(decode(&msg(0x7F, 0x02)), Some(ChannelKind::Unknown));
        assert_eq!(
            decode(&msg(Role::Adc.code(), 0x09)),
            Some(ChannelKind::Unknown)
        );
        assert_eq!(
            decode(&msg(Role::Pwm.code(), 0x02)),
            Some(ChannelKind::Unknown)
        );
        assert_eq!(
            decode(&msg(Role::RtdUpdateTime.code(), 0x00)),
            Some(ChannelKind::Unknown)
        );
    }

    #[test]
    fn longer_messages_decode_from_fixed_offsets() {
        let mut long = vec![0x01, Role::Adc.code(), SubType::Current.code()];
        long.extend_from_slice(&[0xAA; 32]);
        assert_eq!(decode(&long), Some(ChannelKind::CurrentAdc));
    }

    #[test]
    fn kind_helpers() {
        assert!(ChannelKind::VoltageAdc.is_adc());
        assert!(!ChannelKind::VoltageAdc.is_dac());
        assert!(ChannelKind::CurrentDac.is_dac());
        assert_eq!(ChannelKind::Rtd.to_string(), "RTD");
    }
}
