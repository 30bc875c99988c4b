//! Configuration message schema for analog expansion channels.
//!
//! Every channel configuration message carries, at fixed offsets:
//! - A command byte at offset 0
//! - A role byte at offset 1 selecting the channel capability
//! - For ADC and DAC roles, a sub-type byte selecting voltage or current
//!
//! Messages shorter than [`MIN_CONFIG_LEN`] bytes never classify.

pub mod error;
pub mod kind;
pub mod schema;

pub use error::{ProtoError, Result};
pub use kind::{decode, is_classifiable, ChannelKind};
pub use schema::{
    Role, SubType, ADC_TYPE_POS, COMMAND_POS, DAC_TYPE_POS, MIN_CONFIG_LEN, ROLE_POS,
};
