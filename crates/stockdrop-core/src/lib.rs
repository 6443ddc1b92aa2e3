//! Core contracts for stockdrop.
//!
//! This crate contains:
//! - Canonical domain models and validation
//! - Upstream endpoint identifiers and URL construction
//! - The quote client with its fetch-error taxonomy
//! - Payload normalization, fallback resolution, and mover ranking

pub mod client;
pub mod config;
pub mod domain;
pub mod endpoint;
pub mod error;
pub mod http_client;
pub mod normalize;
pub mod ranking;
pub mod resolver;
pub mod source;

pub use client::QuoteClient;
pub use config::ApiConfig;
pub use domain::{HistoricalSeries, PricePoint, Quote, Symbol, TradingDate, UtcDateTime};
pub use endpoint::{EndpointSpec, ScreenerQuery};
pub use error::{FetchError, FetchErrorKind, ValidationError};
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use ranking::{select_extreme, Direction};
pub use resolver::{FallbackResolver, Resolution, ResolveRequest, SeriesResolution};
pub use source::SourceKind;
