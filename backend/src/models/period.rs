//! Calendar month periods used as grouping keys across the engine.
//!
//! A [`MonthPeriod`] is independent of day-of-month: every timestamp in the
//! same calendar month maps to the same period. At the API boundary periods
//! are always rendered as `"YYYY-MM"`.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Error returned when a month label cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid month period '{0}', expected YYYY-MM")]
pub struct PeriodParseError(String);

/// A calendar month, stored as its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthPeriod(NaiveDate);

impl MonthPeriod {
    /// Build a period from a year and a 1-based month.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// Period containing the given date.
    pub fn of_date(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    /// Period containing the given timestamp.
    pub fn of_datetime(timestamp: &NaiveDateTime) -> Self {
        Self::of_date(timestamp.date())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// Last calendar day of the month (the month boundary used for compliance).
    pub fn last_day(&self) -> NaiveDate {
        self.succ()
            .and_then(|next| next.0.pred_opt())
            .unwrap_or(self.0)
    }

    /// The following month, if representable.
    pub fn succ(&self) -> Option<Self> {
        self.0.checked_add_months(Months::new(1)).map(Self)
    }

    /// Iterate from `self` through `last`, both inclusive, in ascending order.
    ///
    /// Yields nothing when `last` precedes `self`.
    pub fn through(self, last: MonthPeriod) -> impl Iterator<Item = MonthPeriod> {
        std::iter::successors(Some(self), |month| month.succ()).take_while(move |m| *m <= last)
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for MonthPeriod {
    type Err = PeriodParseError;

    /// Accepts `"YYYY-MM"`, `"YYYYMM"` and the `P`-prefixed period form
    /// (`"P2024-01"`), ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PeriodParseError(s.to_string());
        let body = s.trim().trim_start_matches(|c: char| c == 'P' || c == 'p');
        if !body.is_ascii() {
            return Err(invalid());
        }

        let (year, month) = match body.split_once('-') {
            Some(parts) => parts,
            None if body.len() == 6 => body.split_at(4),
            None => return Err(invalid()),
        };

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        MonthPeriod::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for MonthPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthPeriod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(de::Error::custom)
    }
}
