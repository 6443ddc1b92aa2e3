use std::time::Duration;

use crate::{SourceKind, Symbol, ValidationError};

/// One entry of a fallback chain: which upstream variant to hit and how
/// long to wait for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointSpec {
    pub kind: SourceKind,
    pub timeout: Duration,
}

impl EndpointSpec {
    pub const fn new(kind: SourceKind, timeout: Duration) -> Self {
        Self { kind, timeout }
    }

    /// Terminal demo entry; always succeeds without a network call.
    pub const fn placeholder() -> Self {
        Self::new(SourceKind::Placeholder, Duration::ZERO)
    }

    /// Upstream URL for this endpoint, or `None` for the placeholder.
    pub fn url(&self, base_url: &str, symbol: &Symbol, api_key: &str) -> Option<String> {
        let base = base_url.trim_end_matches('/');
        let ticker = urlencoding::encode(symbol.as_str());
        let key = urlencoding::encode(api_key);

        match self.kind {
            SourceKind::Quote => Some(format!("{base}/api/v3/quote/{ticker}?apikey={key}")),
            SourceKind::HistoricalLight => Some(format!(
                "{base}/api/v3/historical-price-eod/light?symbol={ticker}&apikey={key}"
            )),
            SourceKind::HistoricalFull => Some(format!(
                "{base}/api/v3/historical-price-full/{ticker}?apikey={key}"
            )),
            SourceKind::Placeholder => None,
        }
    }
}

/// Stock-screener query feeding the ranking selector's input batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenerQuery {
    pub sector: Option<String>,
    pub limit: usize,
    pub timeout: Duration,
}

impl ScreenerQuery {
    pub fn new(limit: usize, timeout: Duration) -> Result<Self, ValidationError> {
        if limit == 0 {
            return Err(ValidationError::ZeroScreenerLimit);
        }
        Ok(Self {
            sector: None,
            limit,
            timeout,
        })
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    pub fn url(&self, base_url: &str, api_key: &str) -> String {
        let base = base_url.trim_end_matches('/');
        let key = urlencoding::encode(api_key);

        let mut url = format!("{base}/api/v3/stock-screener?limit={}", self.limit);
        if let Some(sector) = &self.sector {
            url.push_str("&sector=");
            url.push_str(&urlencoding::encode(sector));
        }
        url.push_str("&apikey=");
        url.push_str(&key);
        url
    }
}
