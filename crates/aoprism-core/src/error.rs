//! Shared error type across aoPrism crates.

use thiserror::Error;

/// Stable error codes used in logs, metrics labels and OOC notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed message.
    BadRequest,
    /// Not allowed in the client's current state.
    NotAllowed,
    /// Message or buffer too large.
    PayloadTooLarge,
    /// Flood control tripped.
    RateLimited,
    /// Keepalive expired.
    Timeout,
    /// Unsupported config or protocol version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::NotAllowed => "NOT_ALLOWED",
            ClientCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ClientCode::RateLimited => "RATE_LIMITED",
            ClientCode::Timeout => "TIMEOUT",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }

    /// Whether a handler failing with this code may keep its connection open.
    pub fn is_recoverable(self) -> bool {
        matches!(
            self,
            ClientCode::BadRequest | ClientCode::NotAllowed | ClientCode::RateLimited
        )
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, AoError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum AoError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not allowed: {0}")]
    NotAllowed(String),
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("rate limited")]
    RateLimited,
    #[error("keepalive timeout")]
    Timeout,
    #[error("unsupported version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl AoError {
    /// Map internal error to a stable code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            AoError::BadRequest(_) => ClientCode::BadRequest,
            AoError::NotAllowed(_) => ClientCode::NotAllowed,
            AoError::PayloadTooLarge => ClientCode::PayloadTooLarge,
            AoError::RateLimited => ClientCode::RateLimited,
            AoError::Timeout => ClientCode::Timeout,
            AoError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            AoError::Internal(_) => ClientCode::Internal,
        }
    }
}

/// Why an `MS` argument vector could not be decoded.
///
/// Both cases are routine for foreign traffic; callers drop the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("no dialect matches {argc} arguments")]
    NoDialect { argc: usize },
    #[error("charid_pair {raw:?} has a non-integer id")]
    BadPairId { raw: String },
}

impl DecodeError {
    /// Short label for logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            DecodeError::NoDialect { .. } => "no_dialect",
            DecodeError::BadPairId { .. } => "bad_pair_id",
        }
    }
}

impl From<DecodeError> for AoError {
    fn from(e: DecodeError) -> Self {
        AoError::BadRequest(e.to_string())
    }
}
