//! Mapping from raw upstream payloads into canonical domain records.
//!
//! Each upstream endpoint variant has its own payload shape and its own
//! mapping function; `quote_for`/`series_for` dispatch on [`SourceKind`].
//! Two policies apply uniformly:
//!
//! - an empty array or empty `historical` list is a `Parse` failure, never
//!   an empty success — callers must not render "no data" as a valid
//!   zero-value quote;
//! - a record rejected by domain validation (negative price, disagreeing
//!   change/change-percent signs) is a `Parse` failure, not a pass-through.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{HistoricalSeries, PricePoint, Quote, Symbol, TradingDate, UtcDateTime};
use crate::{FetchError, SourceKind, ValidationError};

/// Normalize a payload from any single-quote-capable endpoint variant.
pub fn quote_for(kind: SourceKind, value: &Value, symbol: &Symbol) -> Result<Quote, FetchError> {
    match kind {
        SourceKind::Quote => quote_payload(value, symbol),
        SourceKind::HistoricalLight => light_quote(value, symbol),
        SourceKind::HistoricalFull => full_quote(value, symbol),
        SourceKind::Placeholder => placeholder_quote(value, symbol),
    }
}

/// Normalize a payload from a series-capable endpoint variant.
pub fn series_for(
    kind: SourceKind,
    value: &Value,
    symbol: &Symbol,
) -> Result<HistoricalSeries, FetchError> {
    match kind {
        SourceKind::HistoricalLight => light_series(value, symbol),
        SourceKind::HistoricalFull => full_series(value, symbol),
        other => Err(FetchError::parse(format!(
            "endpoint kind '{other}' cannot produce a historical series"
        ))),
    }
}

/// Quote endpoint: array with one object carrying the movement fields
/// directly. Maps 1:1; `as_of` comes from the upstream epoch timestamp
/// when present, else client receipt time.
pub fn quote_payload(value: &Value, symbol: &Symbol) -> Result<Quote, FetchError> {
    #[derive(Debug, Deserialize)]
    struct Row {
        price: f64,
        change: f64,
        #[serde(rename = "changesPercentage", alias = "changePercent")]
        change_percent: f64,
        #[serde(default)]
        timestamp: Option<i64>,
    }

    let rows: Vec<Row> = decode(value, "quote payload")?;
    let row = rows
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::parse("quote payload is an empty array"))?;

    let as_of = match row.timestamp {
        Some(epoch) => UtcDateTime::from_unix_timestamp(epoch).map_err(reject)?,
        None => UtcDateTime::now(),
    };

    Quote::new(
        symbol.clone(),
        row.price,
        row.change,
        row.change_percent,
        as_of,
        SourceKind::Quote,
    )
    .map_err(reject)
}

/// Historical-light endpoint consumed as a single-quote fallback: the
/// most recent close becomes the price, diffed against the prior close.
pub fn light_quote(value: &Value, symbol: &Symbol) -> Result<Quote, FetchError> {
    let points = light_points(value)?;
    quote_from_points(symbol, &points, SourceKind::HistoricalLight)
}

/// Historical-light endpoint as an ordered series.
pub fn light_series(value: &Value, symbol: &Symbol) -> Result<HistoricalSeries, FetchError> {
    let points = light_points(value)?;
    HistoricalSeries::new(symbol.clone(), points).map_err(reject)
}

/// Historical-full endpoint consumed as a single-quote fallback.
pub fn full_quote(value: &Value, symbol: &Symbol) -> Result<Quote, FetchError> {
    let points = full_points(value)?;
    quote_from_points(symbol, &points, SourceKind::HistoricalFull)
}

/// Historical-full endpoint as an ordered series for charting.
pub fn full_series(value: &Value, symbol: &Symbol) -> Result<HistoricalSeries, FetchError> {
    let points = full_points(value)?;
    HistoricalSeries::new(symbol.clone(), points).map_err(reject)
}

/// Placeholder demo payload: a single flat object.
pub fn placeholder_quote(value: &Value, symbol: &Symbol) -> Result<Quote, FetchError> {
    #[derive(Debug, Deserialize)]
    struct Row {
        price: f64,
        change: f64,
        #[serde(rename = "changePercent")]
        change_percent: f64,
    }

    let row: Row = decode(value, "placeholder payload")?;
    Quote::new(
        symbol.clone(),
        row.price,
        row.change,
        row.change_percent,
        UtcDateTime::now(),
        SourceKind::Placeholder,
    )
    .map_err(reject)
}

/// Screener endpoint: array of per-symbol rows feeding the ranking
/// selector. Rows that fail validation are skipped with a warning rather
/// than failing the batch — a ranking scan is advisory input, and one
/// defective row should not sink it. An empty upstream array yields an
/// empty batch (the selector's empty-input contract covers it).
pub fn screener_batch(value: &Value) -> Result<Vec<Quote>, FetchError> {
    #[derive(Debug, Deserialize)]
    struct Row {
        symbol: String,
        price: f64,
        #[serde(rename = "changesPercentage", default)]
        change_percent: Option<f64>,
        #[serde(default)]
        change: Option<f64>,
    }

    let rows: Vec<Row> = decode(value, "screener payload")?;
    let as_of = UtcDateTime::now();
    let mut quotes = Vec::with_capacity(rows.len());

    for row in rows {
        let symbol = match Symbol::parse(&row.symbol) {
            Ok(symbol) => symbol,
            Err(error) => {
                log::warn!("skipping screener row '{}': {error}", row.symbol);
                continue;
            }
        };

        // A row without movement data must not rank as a flat 0% mover.
        let Some(change_percent) = row.change_percent else {
            log::warn!("skipping screener row '{symbol}': missing changesPercentage");
            continue;
        };
        let change = match row.change {
            Some(change) => change,
            None => match derive_change(row.price, change_percent) {
                Some(change) => change,
                None => {
                    log::warn!(
                        "skipping screener row '{symbol}': cannot derive change from {change_percent}%"
                    );
                    continue;
                }
            },
        };

        match Quote::new(symbol.clone(), row.price, change, change_percent, as_of, SourceKind::Quote)
        {
            Ok(quote) => quotes.push(quote),
            Err(error) => log::warn!("skipping screener row '{symbol}': {error}"),
        }
    }

    Ok(quotes)
}

/// Reconstruct the absolute change from today's price and the percent
/// move. Undefined when the implied prior close is non-positive.
fn derive_change(price: f64, change_percent: f64) -> Option<f64> {
    let denominator = 1.0 + change_percent / 100.0;
    if !denominator.is_finite() || denominator <= 0.0 {
        return None;
    }
    Some(price - price / denominator)
}

fn light_points(value: &Value) -> Result<Vec<PricePoint>, FetchError> {
    #[derive(Debug, Deserialize)]
    struct Row {
        date: String,
        price: f64,
    }

    let rows: Vec<Row> = decode(value, "historical-light payload")?;
    close_points(
        rows.into_iter().map(|row| (row.date, row.price)).collect(),
        "historical-light payload",
    )
}

fn full_points(value: &Value) -> Result<Vec<PricePoint>, FetchError> {
    #[derive(Debug, Deserialize)]
    struct Row {
        date: String,
        close: f64,
    }

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(default)]
        historical: Vec<Row>,
    }

    let payload: Payload = decode(value, "historical-full payload")?;
    close_points(
        payload
            .historical
            .into_iter()
            .map(|row| (row.date, row.close))
            .collect(),
        "historical-full payload",
    )
}

fn close_points(rows: Vec<(String, f64)>, what: &str) -> Result<Vec<PricePoint>, FetchError> {
    if rows.is_empty() {
        return Err(FetchError::parse(format!("{what} has no data points")));
    }

    let mut points = rows
        .into_iter()
        .map(|(date, close)| {
            let date = TradingDate::parse(&date).map_err(reject)?;
            PricePoint::new(date, close).map_err(reject)
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Upstream lists most-recent-first; canonical order is ascending.
    points.sort_by_key(|point| point.date);
    Ok(points)
}

fn quote_from_points(
    symbol: &Symbol,
    points: &[PricePoint],
    source: SourceKind,
) -> Result<Quote, FetchError> {
    let latest = points
        .last()
        .ok_or_else(|| FetchError::parse("historical payload has no data points"))?;

    let (change, change_percent) = match points.len() {
        0 | 1 => (0.0, 0.0),
        len => {
            let prior = points[len - 2].close;
            if prior > 0.0 {
                let change = latest.close - prior;
                (change, change / prior * 100.0)
            } else {
                // A zero prior close has no expressible percent move;
                // zero both to keep the sign invariant.
                (0.0, 0.0)
            }
        }
    };

    Quote::new(
        symbol.clone(),
        latest.close,
        change,
        change_percent,
        latest.date.start_of_day_utc(),
        source,
    )
    .map_err(reject)
}

fn decode<T: DeserializeOwned>(value: &Value, what: &str) -> Result<T, FetchError> {
    serde_json::from_value(value.clone())
        .map_err(|error| FetchError::parse(format!("{what} has unexpected shape: {error}")))
}

fn reject(error: ValidationError) -> FetchError {
    FetchError::parse(format!("normalized record rejected: {error}"))
}
