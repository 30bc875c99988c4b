use std::collections::TryReserveError;
use std::fmt;

use bytes::Bytes;
use chancache_proto::ChannelKind;

/// An exclusively owned copy of one configuration message.
///
/// Always non-empty: the cache never stores zero-length messages.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct StoredMessage {
    bytes: Box<[u8]>,
}

impl StoredMessage {
    /// Copy `src` into a fresh allocation, reporting allocation failure.
    pub(crate) fn try_copy(src: &[u8]) -> Result<Self, TryReserveError> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(src.len())?;
        buf.extend_from_slice(src);
        Ok(Self {
            bytes: buf.into_boxed_slice(),
        })
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Channel kind this message selects, `None` when too short to classify.
    pub(crate) fn kind(&self) -> Option<ChannelKind> {
        chancache_proto::decode(&self.bytes)
    }

    /// An independent copy for handing to callers.
    pub(crate) fn to_bytes(&self) -> Bytes {
        Bytes::copy_from_slice(&self.bytes)
    }
}

impl fmt::Debug for StoredMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredMessage")
            .field("len", &self.bytes.len())
            .field("bytes", &hex::encode(&self.bytes))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_owns_its_bytes() {
        let mut src = vec![0x01, 0x05, 0x02, 0x00, 0x00];
        let message = StoredMessage::try_copy(&src).unwrap();
        src[1] = 0xFF;
        assert_eq!(message.as_bytes(), &[0x01, 0x05, 0x02, 0x00, 0x00]);
        assert_eq!(message.len(), 5);
        assert_eq!(message.kind(), Some(ChannelKind::VoltageAdc));
    }

    #[test]
    fn handed_out_bytes_do_not_alias_storage() {
        let message = StoredMessage::try_copy(b"\x01\x06\x01\x00\x00").unwrap();
        let copy = message.to_bytes();
        assert_ne!(copy.as_ptr(), message.as_bytes().as_ptr());
        assert_eq!(copy.as_ref(), message.as_bytes());
    }

    #[test]
    fn debug_shows_hex() {
        let message = StoredMessage::try_copy(&[0xAB, 0xCD]).unwrap();
        let rendered = format!("{message:?}");
        assert!(rendered.contains("abcd"));
        assert_eq!(message.kind(), None);
    }
}
