use thiserror::Error;

use stockdrop_core::{FetchError, FetchErrorKind};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] stockdrop_core::ValidationError),

    #[error("no API key configured; set STOCKDROP_FMP_API_KEY or FMP_API_KEY")]
    MissingApiKey,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::MissingApiKey => 2,
            Self::Fetch(error) => match error.kind() {
                FetchErrorKind::RateLimited => 6,
                FetchErrorKind::Auth => 7,
                _ => 3,
            },
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
