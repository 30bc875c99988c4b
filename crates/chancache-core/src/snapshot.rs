//! Serializable hand-off form of a cache.
//!
//! Payloads are hex-encoded so snapshots stay readable as JSON. The same
//! entry shape is used for captured configuration traffic.

use serde::{Deserialize, Serialize};

use crate::cache::{ChannelConfigCache, Stored};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::layout::SlotLayout;

/// One stored message: slot index plus hex payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub slot: usize,
    pub payload: String,
}

impl SnapshotEntry {
    /// Build an entry from raw message bytes.
    pub fn new(slot: usize, payload: &[u8]) -> Self {
        Self {
            slot,
            payload: hex::encode(payload),
        }
    }

    /// Decode the hex payload.
    pub fn payload_bytes(&self) -> Result<Vec<u8>> {
        Ok(hex::decode(self.payload.trim())?)
    }
}

/// Every occupied slot of a cache together with its board geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    pub layout: SlotLayout,
    pub entries: Vec<SnapshotEntry>,
}

impl ChannelConfigCache {
    /// Capture every occupied slot, in slot order.
    pub fn snapshot(&self) -> CacheSnapshot {
        CacheSnapshot {
            layout: *self.layout(),
            entries: self
                .occupied_messages()
                .map(|(slot, message)| SnapshotEntry::new(slot, message.as_bytes()))
                .collect(),
        }
    }

    /// Rebuild a cache from a snapshot.
    ///
    /// Fails if the snapshot geometry differs from `config.layout` or if any
    /// entry would be rejected by [`ChannelConfigCache::store`].
    pub fn from_snapshot(snapshot: &CacheSnapshot, config: CacheConfig) -> Result<Self> {
        if snapshot.layout != config.layout {
            return Err(CacheError::LayoutMismatch {
                expected: config.layout,
                found: snapshot.layout,
            });
        }

        let mut cache = Self::with_config(config)?;
        for (index, entry) in snapshot.entries.iter().enumerate() {
            cache
                .apply_entry(entry)
                .map_err(|err| CacheError::InvalidSnapshotEntry {
                    index,
                    source: Box::new(err),
                })?;
        }
        Ok(cache)
    }

    /// Store the message an entry describes.
    pub fn apply_entry(&mut self, entry: &SnapshotEntry) -> Result<Stored> {
        let payload = entry.payload_bytes()?;
        self.store(entry.slot, &payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated() -> ChannelConfigCache {
        let mut cache = ChannelConfigCache::new();
        cache.store(3, &[0x01, 0x05, 0x02, 0x00, 0x00]).unwrap();
        cache.store(12, &[0x01, 0x0B]).unwrap();
        cache
    }

    #[test]
    fn snapshot_lists_occupied_slots() {
        let snapshot = populated().snapshot();
        assert_eq!(snapshot.layout, SlotLayout::default());
        assert_eq!(
            snapshot.entries,
            vec![
                SnapshotEntry {
                    slot: 3,
                    payload: "0105020000".to_string()
                },
                SnapshotEntry {
                    slot: 12,
                    payload: "010b".to_string()
                },
            ]
        );
    }

    #[test]
    fn snapshot_reloads_through_json() {
        let cache = populated();
        let json = serde_json::to_string(&cache.snapshot()).unwrap();
        let snapshot: CacheSnapshot = serde_json::from_str(&json).unwrap();

        let reloaded = ChannelConfigCache::from_snapshot(&snapshot, CacheConfig::default()).unwrap();
        assert_eq!(reloaded, cache);
        assert!(reloaded.is_voltage_adc(3));
    }

    #[test]
    fn layout_mismatch_is_rejected() {
        let snapshot = populated().snapshot();
        let config = CacheConfig::with_layout(SlotLayout::new(4, 2));
        let err = ChannelConfigCache::from_snapshot(&snapshot, config).unwrap_err();
        assert!(matches!(err, CacheError::LayoutMismatch { .. }));
    }

    #[test]
    fn invalid_entry_reports_position() {
        let snapshot = CacheSnapshot {
            layout: SlotLayout::default(),
            entries: vec![SnapshotEntry::new(0, &[0x01]), SnapshotEntry::new(40, &[0x01])],
        };
        let err = ChannelConfigCache::from_snapshot(&snapshot, CacheConfig::default()).unwrap_err();
        match &err {
            CacheError::InvalidSnapshotEntry { index, source } => {
                assert_eq!(*index, 1);
                assert!(matches!(**source, CacheError::SlotOutOfRange { slot: 40, .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.slot(), Some(40));
    }

    #[test]
    fn bad_hex_is_rejected() {
        let mut cache = ChannelConfigCache::new();
        let entry = SnapshotEntry {
            slot: 0,
            payload: "zz".to_string(),
        };
        assert!(matches!(
            cache.apply_entry(&entry),
            Err(CacheError::InvalidHex(_))
        ));

        let empty = SnapshotEntry {
            slot: 0,
            payload: String::new(),
        };
        assert!(matches!(
            cache.apply_entry(&empty),
            Err(CacheError::EmptyPayload { slot: 0 })
        ));
        assert_eq!(cache.occupied(), 0);
    }
}
