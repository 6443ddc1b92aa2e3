use serde::Serialize;

use crate::domain::{Symbol, TradingDate, UtcDateTime};
use crate::{SourceKind, ValidationError};

/// Normalized price observation for one symbol.
///
/// Immutable once constructed; the constructor enforces the record-level
/// invariants so a defective upstream row can never leak past normalization:
///
/// - `price` is finite and non-negative
/// - `change` and `change_percent` are finite and share a sign, or are both zero
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub symbol: Symbol,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub as_of: UtcDateTime,
    pub source: SourceKind,
}

impl Quote {
    pub fn new(
        symbol: Symbol,
        price: f64,
        change: f64,
        change_percent: f64,
        as_of: UtcDateTime,
        source: SourceKind,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("price", price)?;
        validate_finite("change", change)?;
        validate_finite("change_percent", change_percent)?;

        if !signs_agree(change, change_percent) {
            return Err(ValidationError::SignMismatch {
                change,
                change_percent,
            });
        }

        Ok(Self {
            symbol,
            price,
            change,
            change_percent,
            as_of,
            source,
        })
    }
}

/// One daily close in a historical series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: TradingDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: TradingDate, close: f64) -> Result<Self, ValidationError> {
        validate_non_negative("close", close)?;
        Ok(Self { date, close })
    }
}

/// Ordered close-price history for one symbol, strictly ascending by date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalSeries {
    pub symbol: Symbol,
    points: Vec<PricePoint>,
}

impl HistoricalSeries {
    pub fn new(symbol: Symbol, points: Vec<PricePoint>) -> Result<Self, ValidationError> {
        for (index, window) in points.windows(2).enumerate() {
            if window[0].date >= window[1].date {
                return Err(ValidationError::SeriesNotAscending { index: index + 1 });
            }
        }

        Ok(Self { symbol, points })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn signs_agree(change: f64, change_percent: f64) -> bool {
    if change == 0.0 && change_percent == 0.0 {
        return true;
    }
    (change > 0.0) == (change_percent > 0.0) && (change < 0.0) == (change_percent < 0.0)
}

fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    validate_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
