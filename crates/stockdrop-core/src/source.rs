use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Upstream endpoint variant that produced a normalized record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    /// `/api/v3/quote/{symbol}` — full quote object.
    Quote,
    /// `/api/v3/historical-price-eod/light` — date/price pairs.
    HistoricalLight,
    /// `/api/v3/historical-price-full/{symbol}` — daily OHLC records.
    HistoricalFull,
    /// Synthetic demo entry that always succeeds with a fixed quote.
    Placeholder,
}

impl SourceKind {
    pub const ALL: [Self; 4] = [
        Self::Quote,
        Self::HistoricalLight,
        Self::HistoricalFull,
        Self::Placeholder,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quote => "quote",
            Self::HistoricalLight => "historical-light",
            Self::HistoricalFull => "historical-full",
            Self::Placeholder => "placeholder",
        }
    }
}

impl Display for SourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "quote" => Ok(Self::Quote),
            "historical-light" => Ok(Self::HistoricalLight),
            "historical-full" => Ok(Self::HistoricalFull),
            "placeholder" => Ok(Self::Placeholder),
            other => Err(ValidationError::InvalidSourceKind {
                value: other.to_owned(),
            }),
        }
    }
}
