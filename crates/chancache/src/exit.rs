use std::fmt;
use std::io;

use chancache_core::CacheError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => FAILURE,
        io::ErrorKind::InvalidData => DATA_INVALID,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn json_error(context: &str, err: serde_json::Error) -> CliError {
    let code = if err.is_io() { INTERNAL } else { DATA_INVALID };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn cache_error(context: &str, err: CacheError) -> CliError {
    let code = match &err {
        CacheError::InvalidConfig(_) => USAGE,
        CacheError::AllocationFailed { .. } => INTERNAL,
        CacheError::SlotOutOfRange { .. }
        | CacheError::EmptyPayload { .. }
        | CacheError::PayloadTooLarge { .. }
        | CacheError::LayoutMismatch { .. }
        | CacheError::InvalidSnapshotEntry { .. }
        | CacheError::InvalidHex(_) => DATA_INVALID,
    };
    CliError::new(code, format!("{context}: {err}"))
}
