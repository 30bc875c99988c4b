//! Per-channel configuration cache for analog expansion modules.
//!
//! The controller stores the last configuration message it sent to each
//! channel slot. After the expansion board resets, the cache answers what mode
//! every channel was in and hands back byte-exact copies of the messages to
//! resend.
//!
//! ```
//! use chancache_core::ChannelConfigCache;
//!
//! let mut cache = ChannelConfigCache::new();
//! cache.store(3, &[0x01, 0x05, 0x02, 0x00, 0x00]).ok();
//!
//! assert!(cache.is_voltage_adc(3));
//! assert_eq!(cache.restore(3).unwrap().as_ref(), &[0x01, 0x05, 0x02, 0x00, 0x00]);
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod layout;
mod message;
pub mod restore;
pub mod snapshot;

pub use cache::{ChannelConfigCache, Stored};
pub use chancache_proto::{ChannelKind, Role, SubType};
pub use config::{CacheConfig, DEFAULT_MAX_MESSAGE_LEN};
pub use error::{CacheError, Result};
pub use layout::{SlotLayout, SlotRegion};
pub use restore::{ConfigSink, RestoreEntry};
pub use snapshot::{CacheSnapshot, SnapshotEntry};
