use std::env;
use std::time::Duration;

use crate::endpoint::EndpointSpec;
use crate::SourceKind;

pub const DEFAULT_BASE_URL: &str = "https://financialmodelingprep.com";
pub const DEFAULT_QUOTE_TIMEOUT: Duration = Duration::from_secs(3);
pub const DEFAULT_HISTORY_TIMEOUT: Duration = Duration::from_secs(8);

/// Upstream API configuration, passed into the quote client at
/// construction. There is deliberately no process-global key: the
/// embedding application owns where the key comes from.
///
/// # Environment Variables
///
/// `ApiConfig::from_env` reads the key from `STOCKDROP_FMP_API_KEY`,
/// falling back to `FMP_API_KEY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_key: String,
    pub base_url: String,
    pub quote_timeout: Duration,
    pub history_timeout: Duration,
}

impl ApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: String::from(DEFAULT_BASE_URL),
            quote_timeout: DEFAULT_QUOTE_TIMEOUT,
            history_timeout: DEFAULT_HISTORY_TIMEOUT,
        }
    }

    /// Read the API key from the environment; `None` when no key is set.
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("STOCKDROP_FMP_API_KEY")
            .or_else(|_| env::var("FMP_API_KEY"))
            .ok()?;
        Some(Self::new(api_key))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_quote_timeout(mut self, timeout: Duration) -> Self {
        self.quote_timeout = timeout;
        self
    }

    pub fn with_history_timeout(mut self, timeout: Duration) -> Self {
        self.history_timeout = timeout;
        self
    }

    /// Default single-quote fallback chain, richest endpoint first.
    pub fn quote_chain(&self) -> Vec<EndpointSpec> {
        vec![
            EndpointSpec::new(SourceKind::Quote, self.quote_timeout),
            EndpointSpec::new(SourceKind::HistoricalLight, self.history_timeout),
        ]
    }

    /// Default historical-series fallback chain.
    pub fn series_chain(&self) -> Vec<EndpointSpec> {
        vec![
            EndpointSpec::new(SourceKind::HistoricalFull, self.history_timeout),
            EndpointSpec::new(SourceKind::HistoricalLight, self.history_timeout),
        ]
    }

    /// Append the always-succeeding demo entry as the terminal fallback.
    pub fn with_demo_fallback(mut chain: Vec<EndpointSpec>) -> Vec<EndpointSpec> {
        chain.push(EndpointSpec::placeholder());
        chain
    }
}
