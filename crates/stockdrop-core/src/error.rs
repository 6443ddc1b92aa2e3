use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Validation and contract errors exposed by `stockdrop-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },
    #[error("epoch timestamp out of range: {value}")]
    EpochOutOfRange { value: i64 },
    #[error("date must be YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },

    #[error(
        "invalid source kind '{value}', expected one of quote, historical-light, historical-full, placeholder"
    )]
    InvalidSourceKind { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },
    #[error("change {change} and change_percent {change_percent} must share a sign or both be zero")]
    SignMismatch { change: f64, change_percent: f64 },

    #[error("historical series dates must be strictly ascending at index {index}")]
    SeriesNotAscending { index: usize },

    #[error("endpoint chain must contain at least one entry")]
    EmptyEndpointChain,
    #[error("screener limit must be greater than zero")]
    ZeroScreenerLimit,
}

/// Failure classification for a single upstream fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// Transport failure: DNS, connection, timeout.
    Network,
    /// HTTP 429 from the upstream API.
    RateLimited,
    /// HTTP 401/403 from the upstream API.
    Auth,
    /// Any other non-2xx status.
    Upstream,
    /// Malformed JSON, empty payload, or a record rejected by domain validation.
    Parse,
}

/// Structured fetch error carried through the fallback resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
    retryable: bool,
}

impl FetchError {
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Network,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::RateLimited,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Auth,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Upstream,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Parse,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            FetchErrorKind::Network => "fetch.network",
            FetchErrorKind::RateLimited => "fetch.rate_limited",
            FetchErrorKind::Auth => "fetch.auth",
            FetchErrorKind::Upstream => "fetch.upstream",
            FetchErrorKind::Parse => "fetch.parse",
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for FetchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_are_not_retryable() {
        let error = FetchError::auth("upstream rejected credentials with status 401");
        assert_eq!(error.kind(), FetchErrorKind::Auth);
        assert!(!error.retryable());
        assert_eq!(error.code(), "fetch.auth");
    }

    #[test]
    fn rate_limit_errors_are_retryable() {
        let error = FetchError::rate_limited("upstream returned status 429");
        assert!(error.retryable());
        assert_eq!(error.code(), "fetch.rate_limited");
    }
}
