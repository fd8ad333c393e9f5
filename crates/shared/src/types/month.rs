//! Calendar months of a budget year.
//!
//! Budget entries, forecast flags, and vendor schedules all address a month
//! by its number (1-12). `Month` is the validated form of that number.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A month number outside 1-12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Month must be between 1 and 12, got {0}")]
pub struct InvalidMonth(pub u32);

/// A calendar month (1 = January, 12 = December).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Month(u32);

impl Month {
    /// Number of months in a budget year.
    pub const COUNT: usize = 12;
    /// January.
    pub const JANUARY: Self = Self(1);
    /// December.
    pub const DECEMBER: Self = Self(12);

    /// Creates a month from its number.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMonth` if `number` is not in 1-12.
    pub const fn new(number: u32) -> Result<Self, InvalidMonth> {
        if number >= 1 && number <= 12 {
            Ok(Self(number))
        } else {
            Err(InvalidMonth(number))
        }
    }

    /// Creates a month from a zero-based slot index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        u32::try_from(index + 1).ok().and_then(|n| Self::new(n).ok())
    }

    /// Returns the month of a date.
    #[must_use]
    pub fn from_date(date: impl Datelike) -> Self {
        Self(date.month())
    }

    /// Parses a start-month label such as `"March"`, `"mar"` or `"3"`.
    ///
    /// Returns `None` for placeholders like `"N/A"` and anything else unrecognised.
    #[must_use]
    pub fn parse_name(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if let Ok(number) = trimmed.parse::<u32>() {
            return Self::new(number).ok();
        }
        trimmed
            .parse::<chrono::Month>()
            .ok()
            .map(|m| Self(m.number_from_month()))
    }

    /// All twelve months in calendar order.
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (1..13).map(Self)
    }

    /// Months from January through `self`, inclusive.
    pub fn through(self) -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (1..self.0 + 1).map(Self)
    }

    /// Months from `self` through December, inclusive.
    pub fn onwards(self) -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (self.0..13).map(Self)
    }

    /// Month number (1-12).
    #[must_use]
    pub const fn number(self) -> u32 {
        self.0
    }

    /// Zero-based slot index (0-11) into a 12-element array.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Full English month name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        NAMES[self.index()]
    }

    /// Number of months from `self` through December, inclusive.
    #[must_use]
    pub const fn remaining_in_year(self) -> u32 {
        12 - self.0 + 1
    }
}

impl TryFrom<u32> for Month {
    type Error = InvalidMonth;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u32 {
    fn from(month: Month) -> Self {
        month.0
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    #[test]
    fn test_new_rejects_out_of_range() {
        assert_eq!(Month::new(0), Err(InvalidMonth(0)));
        assert_eq!(Month::new(13), Err(InvalidMonth(13)));
        assert_eq!(Month::new(1).unwrap().number(), 1);
        assert_eq!(Month::new(12).unwrap().index(), 11);
    }

    #[rstest]
    #[case("March", Some(3))]
    #[case("march", Some(3))]
    #[case("Mar", Some(3))]
    #[case(" December ", Some(12))]
    #[case("7", Some(7))]
    #[case("N/A", None)]
    #[case("", None)]
    #[case("13", None)]
    #[case("Smarch", None)]
    fn test_parse_name(#[case] raw: &str, #[case] expected: Option<u32>) {
        assert_eq!(Month::parse_name(raw).map(Month::number), expected);
    }

    #[test]
    fn test_iterators() {
        assert_eq!(Month::all().count(), 12);
        let march = Month::new(3).unwrap();
        assert_eq!(march.through().map(Month::number).collect::<Vec<_>>(), [1, 2, 3]);
        assert_eq!(march.onwards().count(), 10);
        assert_eq!(march.remaining_in_year(), 10);
    }

    #[test]
    fn test_from_index_and_date() {
        assert_eq!(Month::from_index(0), Some(Month::JANUARY));
        assert_eq!(Month::from_index(12), None);
        let date = NaiveDate::from_ymd_opt(2025, 10, 19).unwrap();
        assert_eq!(Month::from_date(date).number(), 10);
    }

    #[test]
    fn test_display_and_serde() {
        let may = Month::new(5).unwrap();
        assert_eq!(may.to_string(), "May");
        assert_eq!(serde_json::to_string(&may).unwrap(), "5");
        assert!(serde_json::from_str::<Month>("0").is_err());
        assert_eq!(serde_json::from_str::<Month>("12").unwrap(), Month::DECEMBER);
    }
}
