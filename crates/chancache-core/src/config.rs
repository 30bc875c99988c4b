use serde::{Deserialize, Serialize};

use chancache_proto::MIN_CONFIG_LEN;

use crate::error::{CacheError, Result};
use crate::layout::SlotLayout;

/// Default maximum stored message size in bytes.
pub const DEFAULT_MAX_MESSAGE_LEN: usize = 255;

/// Controls cache geometry and admission limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Board geometry. Default: 8 analog, 4 PWM channels.
    pub layout: SlotLayout,
    /// Largest message accepted by `store`. Default: 255 bytes.
    pub max_message_len: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            layout: SlotLayout::default(),
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
        }
    }
}

impl CacheConfig {
    /// Configuration for a specific board geometry with default limits.
    pub fn with_layout(layout: SlotLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|err| CacheError::InvalidConfig(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        self.layout.validate().map_err(CacheError::InvalidConfig)?;
        if self.max_message_len < MIN_CONFIG_LEN {
            return Err(CacheError::InvalidConfig(format!(
                "max_message_len {} is below the {MIN_CONFIG_LEN}-byte minimum message",
                self.max_message_len
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(CacheConfig::default().validate().is_ok());
    }

    #[test]
    fn from_json_fills_defaults() {
        let config = CacheConfig::from_json(r#"{"layout":{"analog_channels":4}}"#).unwrap();
        assert_eq!(config.layout, SlotLayout::new(4, 4));
        assert_eq!(config.max_message_len, DEFAULT_MAX_MESSAGE_LEN);

        let config = CacheConfig::from_json("{}").unwrap();
        assert_eq!(config, CacheConfig::default());
    }

    #[test]
    fn from_json_rejects_invalid() {
        assert!(matches!(
            CacheConfig::from_json("not json"),
            Err(CacheError::InvalidConfig(_))
        ));
        assert!(matches!(
            CacheConfig::from_json(r#"{"max_message_len":4}"#),
            Err(CacheError::InvalidConfig(_))
        ));
        assert!(matches!(
            CacheConfig::from_json(r#"{"layout":{"analog_channels":0}}"#),
            Err(CacheError::InvalidConfig(_))
        ));
    }
}
