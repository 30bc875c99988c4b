use crate::layout::SlotLayout;

/// Reasons a cache operation was not applied.
///
/// None of these leave the cache partially modified: a rejected store keeps the
/// slot's previous message (or its absence) intact.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The slot index is outside the cache's slot range.
    #[error("slot {slot} out of range (cache has {slots} slots)")]
    SlotOutOfRange { slot: usize, slots: usize },

    /// A zero-length message was offered for storage.
    #[error("empty configuration message for slot {slot}")]
    EmptyPayload { slot: usize },

    /// The message exceeds the configured maximum size.
    #[error("message for slot {slot} too large ({size} bytes, max {max})")]
    PayloadTooLarge { slot: usize, size: usize, max: usize },

    /// The buffer for a copy could not be allocated.
    #[error("failed to allocate {size} bytes for slot {slot}")]
    AllocationFailed { slot: usize, size: usize },

    /// The cache configuration is unusable.
    #[error("invalid cache configuration: {0}")]
    InvalidConfig(String),

    /// A snapshot was taken from a board with a different geometry.
    #[error("snapshot layout ({found}) does not match cache layout ({expected})")]
    LayoutMismatch {
        expected: SlotLayout,
        found: SlotLayout,
    },

    /// A snapshot entry was rejected while loading.
    #[error("invalid snapshot entry {index}: {source}")]
    InvalidSnapshotEntry {
        index: usize,
        #[source]
        source: Box<CacheError>,
    },

    /// A payload string is not valid hex.
    #[error("invalid hex payload: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

impl CacheError {
    /// The slot the error refers to, when there is one.
    pub fn slot(&self) -> Option<usize> {
        match self {
            CacheError::SlotOutOfRange { slot, .. }
            | CacheError::EmptyPayload { slot }
            | CacheError::PayloadTooLarge { slot, .. }
            | CacheError::AllocationFailed { slot, .. } => Some(*slot),
            CacheError::InvalidSnapshotEntry { source, .. } => source.slot(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;
