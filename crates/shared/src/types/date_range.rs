//! Inclusive date ranges used to scope household data.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors constructing a date range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeError {
    /// Start date falls after end date.
    #[error("Invalid date range: start {start} is after end {end}")]
    StartAfterEnd {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Year/month pair does not name a calendar month.
    #[error("Invalid calendar month: {year}-{month:02}")]
    InvalidMonth {
        /// Year.
        year: i32,
        /// Month (1-12).
        month: u32,
    },

    /// Text is not in `YYYY-MM` form.
    #[error("Expected a month in YYYY-MM form, got {0:?}")]
    Unparsable(String),
}

/// An inclusive `[start, end]` range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting a start after the end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::StartAfterEnd { start, end });
        }
        Ok(Self { start, end })
    }

    /// The range covering a whole calendar month.
    pub fn month(year: i32, month: u32) -> Result<Self, DateRangeError> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(DateRangeError::InvalidMonth { year, month })?;
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or(DateRangeError::InvalidMonth { year, month })?;
        Ok(Self { start, end })
    }

    /// The calendar month containing `date`.
    pub fn month_containing(date: NaiveDate) -> Result<Self, DateRangeError> {
        Self::month(date.year(), date.month())
    }

    /// Parses `YYYY-MM` into the range covering that month.
    pub fn parse_month(input: &str) -> Result<Self, DateRangeError> {
        let unparsable = || DateRangeError::Unparsable(input.to_string());
        let (year, month) = input.trim().split_once('-').ok_or_else(unparsable)?;
        let year = year.parse::<i32>().map_err(|_| unparsable())?;
        let month = month.parse::<u32>().map_err(|_| unparsable())?;
        Self::month(year, month)
    }

    /// First day of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns true if `date` falls within the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Returns true if `[start, end]` shares at least one day with this range.
    #[must_use]
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end && end >= self.start
    }
}
