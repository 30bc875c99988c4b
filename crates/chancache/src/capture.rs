//! Captured configuration traffic.
//!
//! A capture is JSON Lines, one `{"slot": N, "payload": "<hex>"}` object per
//! message in the order the controller sent them. Blank lines and `#` comments
//! are skipped.

use std::path::Path;

use chancache_core::{CacheConfig, CacheError, ChannelConfigCache, SnapshotEntry};
use tracing::{debug, warn};

use crate::exit::{cache_error, io_error, CliError, CliResult, DATA_INVALID};

/// A capture entry with the 1-based line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedMessage {
    pub line: usize,
    pub entry: SnapshotEntry,
}

/// A cache rebuilt from a capture.
#[derive(Debug)]
pub struct Replayed {
    pub cache: ChannelConfigCache,
    pub applied: usize,
    pub rejected: usize,
}

pub fn parse_capture(text: &str) -> CliResult<Vec<CapturedMessage>> {
    let mut messages = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let entry: SnapshotEntry = serde_json::from_str(line).map_err(|err| {
            CliError::new(
                DATA_INVALID,
                format!("capture line {}: invalid entry: {err}", index + 1),
            )
        })?;
        messages.push(CapturedMessage {
            line: index + 1,
            entry,
        });
    }
    Ok(messages)
}

pub fn read_capture(path: &Path) -> CliResult<Vec<CapturedMessage>> {
    let text = std::fs::read_to_string(path)
        .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))?;
    parse_capture(&text)
}

/// Feed captured messages into a fresh cache, in order.
///
/// Entries the cache rejects are logged and counted, matching how a controller
/// ignores failed stores. Undecodable hex aborts the load.
pub fn replay_capture(messages: &[CapturedMessage], config: CacheConfig) -> CliResult<Replayed> {
    let mut cache = ChannelConfigCache::with_config(config)
        .map_err(|err| cache_error("invalid configuration", err))?;
    let mut applied = 0usize;
    let mut rejected = 0usize;

    for message in messages {
        match cache.apply_entry(&message.entry) {
            Ok(stored) => {
                debug!(line = message.line, slot = stored.slot, "applied capture entry");
                applied += 1;
            }
            Err(err @ CacheError::InvalidHex(_)) => {
                return Err(cache_error(&format!("capture line {}", message.line), err));
            }
            Err(err) => {
                warn!(line = message.line, %err, "capture entry rejected");
                rejected += 1;
            }
        }
    }

    Ok(Replayed {
        cache,
        applied,
        rejected,
    })
}
