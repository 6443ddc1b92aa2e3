use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

use crate::domain::UtcDateTime;
use crate::ValidationError;

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Calendar date of a daily close, `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradingDate(Date);

impl TradingDate {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }

    pub fn into_inner(self) -> Date {
        self.0
    }

    /// Midnight UTC on this date, used as `as_of` for daily close records.
    pub fn start_of_day_utc(self) -> UtcDateTime {
        UtcDateTime::from_offset_datetime(self.0.midnight().assume_utc())
            .expect("midnight UTC is a valid UTC timestamp")
    }

    pub fn format_iso(self) -> String {
        self.0
            .format(DATE_FORMAT)
            .expect("TradingDate must be formattable")
    }
}

impl Display for TradingDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl Serialize for TradingDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso())
    }
}

impl<'de> Deserialize<'de> for TradingDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_date() {
        let parsed = TradingDate::parse("2025-03-14").expect("must parse");
        assert_eq!(parsed.format_iso(), "2025-03-14");
    }

    #[test]
    fn rejects_other_layouts() {
        for input in ["14/03/2025", "2025-3-14", "March 14 2025"] {
            assert!(matches!(
                TradingDate::parse(input),
                Err(ValidationError::InvalidDate { .. })
            ));
        }
    }

    #[test]
    fn orders_chronologically() {
        let earlier = TradingDate::parse("2025-03-13").expect("must parse");
        let later = TradingDate::parse("2025-03-14").expect("must parse");
        assert!(earlier < later);
    }

    #[test]
    fn start_of_day_is_midnight_utc() {
        let date = TradingDate::parse("2025-03-14").expect("must parse");
        assert_eq!(
            date.start_of_day_utc().format_rfc3339(),
            "2025-03-14T00:00:00Z"
        );
    }
}
