//! Date-range error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned by the validating date setters.
///
/// Unlike enumeration errors these are reported after the offending field
/// has been cleared and listeners notified.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DateRangeError {
    #[error("Invalid date: '{input}'")]
    InvalidDate { input: String },

    #[error("Invalid start date {start}, it should be before or equal to end {end}")]
    InvalidStart { start: NaiveDate, end: NaiveDate },

    #[error("Invalid end date {end}, it should be equal to or after start {start}")]
    InvalidEnd { start: NaiveDate, end: NaiveDate },
}

/// Problems found in an edit buffer checked against the strict
/// day/month/year grammar.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EditDateError {
    #[error("'{text}' is not in DD/MM/YYYY form")]
    Malformed { text: String },

    #[error("Day {day} does not exist in {month:02}/{year:04}")]
    DayOutOfRange { day: u32, month: u32, year: i32 },

    #[error("Month {month} is out of range (1-12)")]
    MonthOutOfRange { month: u32 },

    #[error("Year {year} is out of range (1-9999)")]
    YearOutOfRange { year: i32 },
}
