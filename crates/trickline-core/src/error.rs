//! Shared error type across trickline crates.

use thiserror::Error;

use crate::rules::IllegalReason;

/// Stable error codes, safe to show to users or match on in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid input or configuration.
    BadRequest,
    /// Malformed wire data.
    DecodeFailed,
    /// Local rule-engine rejection of exclusion tokens or deck size.
    Validation,
    /// Send attempted without an open connection.
    NotConnected,
    /// Card rejected by local legality prediction.
    IllegalPlay,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Anything else.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and the event trail.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::DecodeFailed => "DECODE_FAILED",
            ErrorCode::Validation => "VALIDATION",
            ErrorCode::NotConnected => "NOT_CONNECTED",
            ErrorCode::IllegalPlay => "ILLEGAL_PLAY",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, TricklineError>;

/// Unified error type used by core and client.
#[derive(Debug, Error)]
pub enum TricklineError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
    #[error("not connected")]
    NotConnected,
    #[error("illegal play: {0}")]
    IllegalPlay(IllegalReason),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl TricklineError {
    /// Map to a stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            TricklineError::BadRequest(_) => ErrorCode::BadRequest,
            TricklineError::Decode(_) => ErrorCode::DecodeFailed,
            TricklineError::Validation(_) => ErrorCode::Validation,
            TricklineError::NotConnected => ErrorCode::NotConnected,
            TricklineError::IllegalPlay(_) => ErrorCode::IllegalPlay,
            TricklineError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            TricklineError::Internal(_) => ErrorCode::Internal,
        }
    }
}
