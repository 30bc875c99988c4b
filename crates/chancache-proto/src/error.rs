/// Errors that can occur while interpreting message schema bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProtoError {
    /// The role byte does not name a known channel capability.
    #[error("unknown role code 0x{0:02X}")]
    UnknownRole(u8),

    /// The sub-type byte is neither voltage nor current.
    #[error("unknown sub-type code 0x{0:02X}")]
    UnknownSubType(u8),
}

pub type Result<T> = std::result::Result<T, ProtoError>;
