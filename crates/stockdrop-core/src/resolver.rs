//! Ordered fallback resolution across upstream endpoint variants.
//!
//! The resolver walks an endpoint chain front to back, stops at the
//! first endpoint that yields a valid record, and when every endpoint
//! fails it surfaces the error from the LAST attempt. Earlier failures
//! are logged as they happen so they are diagnosable without being the
//! reported outcome.

use std::time::Instant;

use serde::Serialize;

use crate::client::QuoteClient;
use crate::domain::{HistoricalSeries, Quote, Symbol};
use crate::endpoint::EndpointSpec;
use crate::normalize;
use crate::{FetchError, SourceKind, ValidationError};

/// Validated resolution request: one symbol and a non-empty endpoint
/// chain, tried in order.
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    symbol: Symbol,
    chain: Vec<EndpointSpec>,
}

impl ResolveRequest {
    pub fn new(symbol: Symbol, chain: Vec<EndpointSpec>) -> Result<Self, ValidationError> {
        if chain.is_empty() {
            return Err(ValidationError::EmptyEndpointChain);
        }
        Ok(Self { symbol, chain })
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn chain(&self) -> &[EndpointSpec] {
        &self.chain
    }
}

/// Successful quote resolution, annotated with how it was obtained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub quote: Quote,
    pub source: SourceKind,
    pub attempted: Vec<SourceKind>,
    pub latency_ms: u64,
}

/// Successful series resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesResolution {
    pub series: HistoricalSeries,
    pub source: SourceKind,
    pub attempted: Vec<SourceKind>,
    pub latency_ms: u64,
}

/// Walks a fallback chain until one endpoint produces a valid record.
#[derive(Clone)]
pub struct FallbackResolver {
    client: QuoteClient,
}

impl FallbackResolver {
    pub fn new(client: QuoteClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &QuoteClient {
        &self.client
    }

    /// Resolve a single quote. Short-circuits on the first success; on
    /// total failure returns the last endpoint's error.
    pub async fn resolve(&self, request: &ResolveRequest) -> Result<Resolution, FetchError> {
        let started = Instant::now();
        let mut attempted = Vec::with_capacity(request.chain().len());
        let mut last_error: Option<FetchError> = None;

        for spec in request.chain() {
            attempted.push(spec.kind);
            match self.attempt_quote(spec, request.symbol()).await {
                Ok(quote) => {
                    log::debug!(
                        "resolved {} via {} after {} attempt(s)",
                        request.symbol(),
                        spec.kind,
                        attempted.len()
                    );
                    return Ok(Resolution {
                        quote,
                        source: spec.kind,
                        attempted,
                        latency_ms: elapsed_ms(started),
                    });
                }
                Err(error) => {
                    log::warn!(
                        "endpoint {} failed for {}: {} ({})",
                        spec.kind,
                        request.symbol(),
                        error.message(),
                        error.code()
                    );
                    last_error = Some(error);
                }
            }
        }

        Err(last_error.expect("chain is validated non-empty"))
    }

    /// Resolve an ordered close-price history through the same chain
    /// discipline as `resolve`.
    pub async fn resolve_series(
        &self,
        request: &ResolveRequest,
    ) -> Result<SeriesResolution, FetchError> {
        let started = Instant::now();
        let mut attempted = Vec::with_capacity(request.chain().len());
        let mut last_error: Option<FetchError> = None;

        for spec in request.chain() {
            attempted.push(spec.kind);
            match self.attempt_series(spec, request.symbol()).await {
                Ok(series) => {
                    return Ok(SeriesResolution {
                        series,
                        source: spec.kind,
                        attempted,
                        latency_ms: elapsed_ms(started),
                    });
                }
                Err(error) => {
                    log::warn!(
                        "endpoint {} failed for {}: {} ({})",
                        spec.kind,
                        request.symbol(),
                        error.message(),
                        error.code()
                    );
                    last_error = Some(error);
                }
            }
        }

        Err(last_error.expect("chain is validated non-empty"))
    }

    async fn attempt_quote(
        &self,
        spec: &EndpointSpec,
        symbol: &Symbol,
    ) -> Result<Quote, FetchError> {
        let payload = self.client.fetch(spec, symbol).await?;
        normalize::quote_for(spec.kind, &payload, symbol)
    }

    async fn attempt_series(
        &self,
        spec: &EndpointSpec,
        symbol: &Symbol,
    ) -> Result<HistoricalSeries, FetchError> {
        let payload = self.client.fetch(spec, symbol).await?;
        normalize::series_for(spec.kind, &payload, symbol)
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64
}
