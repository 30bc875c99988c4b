//! Channel configuration cache for industrial analog expansion modules.
//!
//! chancache remembers the last configuration message sent to every channel
//! of a multi-function analog expansion board, so the controller can tell what
//! mode each channel is in and replay the configuration after a board reset.
//!
//! # Crate Structure
//!
//! - [`proto`]: Message schema: byte offsets, role and sub-type codes
//! - [`cache`]: The cache, slot layout, restore/replay and snapshots

/// Re-export message schema types.
pub mod proto {
    pub use chancache_proto::*;
}

/// Re-export cache types.
pub mod cache {
    pub use chancache_core::*;
}

pub use chancache_core::{CacheConfig, ChannelConfigCache, ChannelKind, SlotLayout};
