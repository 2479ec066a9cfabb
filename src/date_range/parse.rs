//! Date parsing and formatting.
//!
//! Two parsers live here. The general one behind [`DateInput`] accepts the
//! assorted forms callers hand to `set_start`/`set_end`. The strict one
//! checks free-text edit buffers against a day-first `DD/MM/YYYY` grammar
//! and reports every problem it finds at once.

use super::error::EditDateError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Canonical storage format; sorts lexicographically.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d";

/// Edit-buffer display format.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";

const TEXT_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%a %b %d %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

const MONTH_LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Anything `set_start`/`set_end` can be handed.
#[derive(Clone, Debug, PartialEq)]
pub enum DateInput {
    Date(NaiveDate),
    /// Calendar parts; month is 1-12
    Parts { year: i32, month: u32, day: u32 },
    /// Milliseconds since the Unix epoch, read as a UTC date
    Timestamp(i64),
    Text(String),
}

impl DateInput {
    /// Convert to a calendar date, `None` if the input names no valid date.
    pub fn to_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            Self::Parts { year, month, day } => NaiveDate::from_ymd_opt(*year, *month, *day),
            Self::Timestamp(millis) => {
                DateTime::<Utc>::from_timestamp_millis(*millis).map(|dt| dt.date_naive())
            }
            Self::Text(text) => parse_text(text),
        }
    }
}

impl fmt::Display for DateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{}", date.format(CANONICAL_FORMAT)),
            Self::Parts { year, month, day } => write!(f, "{year}-{month}-{day}"),
            Self::Timestamp(millis) => write!(f, "{millis}ms"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(moment: DateTime<Utc>) -> Self {
        Self::Date(moment.date_naive())
    }
}

impl From<(i32, u32, u32)> for DateInput {
    fn from((year, month, day): (i32, u32, u32)) -> Self {
        Self::Parts { year, month, day }
    }
}

impl From<i64> for DateInput {
    fn from(millis: i64) -> Self {
        Self::Timestamp(millis)
    }
}

impl From<&str> for DateInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for DateInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

fn parse_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    TEXT_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|dt| dt.date())
        })
}

pub fn to_canonical(date: NaiveDate) -> String {
    date.format(CANONICAL_FORMAT).to_string()
}

pub fn to_display(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Days in `month` (1-12) of `year`; `None` for a month out of range.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    let days = *MONTH_LENGTHS.get(index)?;
    if month == 2 && is_leap_year(year) {
        Some(days + 1)
    } else {
        Some(days)
    }
}

/// Parse an edit buffer against the strict `DD/MM/YYYY` grammar.
///
/// Day and month take one or two digits, the year exactly four. Range
/// problems in day, month and year are accumulated rather than stopping at
/// the first.
pub fn parse_edit(text: &str) -> Validation<NaiveDate, NonEmptyVec<EditDateError>> {
    let malformed = || EditDateError::Malformed {
        text: text.to_string(),
    };

    let Some((day, month, year)) = split_fields(text) else {
        return Validation::fail(malformed());
    };

    let checks = vec![
        check_year(year),
        check_month(month),
        check_day(day, month, year),
    ];

    match Validation::all_vec(checks) {
        Validation::Success(_) => match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => Validation::success(date),
            None => Validation::fail(malformed()),
        },
        Validation::Failure(errors) => Validation::Failure(errors),
    }
}

/// Every problem with `text` under the strict grammar; empty when valid.
pub fn edit_problems(text: &str) -> Vec<EditDateError> {
    match parse_edit(text) {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors.iter().cloned().collect(),
    }
}

fn split_fields(text: &str) -> Option<(u32, u32, i32)> {
    let mut parts = text.trim().split('/');
    let day = numeric(parts.next()?, 1..=2)?;
    let month = numeric(parts.next()?, 1..=2)?;
    let year = numeric(parts.next()?, 4..=4)?;
    if parts.next().is_some() {
        return None;
    }
    Some((day, month, i32::try_from(year).ok()?))
}

fn numeric(part: &str, digits: std::ops::RangeInclusive<usize>) -> Option<u32> {
    if !digits.contains(&part.len()) || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

fn check_year(year: i32) -> Validation<(), NonEmptyVec<EditDateError>> {
    if (1..=9999).contains(&year) {
        Validation::success(())
    } else {
        Validation::fail(EditDateError::YearOutOfRange { year })
    }
}

fn check_month(month: u32) -> Validation<(), NonEmptyVec<EditDateError>> {
    if (1..=12).contains(&month) {
        Validation::success(())
    } else {
        Validation::fail(EditDateError::MonthOutOfRange { month })
    }
}

fn check_day(day: u32, month: u32, year: i32) -> Validation<(), NonEmptyVec<EditDateError>> {
    let limit = days_in_month(year, month).unwrap_or(31);
    if (1..=limit).contains(&day) {
        Validation::success(())
    } else {
        Validation::fail(EditDateError::DayOutOfRange { day, month, year })
    }
}

/// Earlier of two optional dates; an absent side never wins.
pub fn min(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Option<NaiveDate> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Later of two optional dates; an absent side never wins.
pub fn max(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Option<NaiveDate> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn general_parser_accepts_common_forms() {
        let expected = ymd(2006, 1, 2);
        for text in [
            "2006-01-02",
            "2006/01/02",
            "01/02/2006",
            "Jan 02 2006",
            "January 2 2006",
            "Jan 2, 2006",
            "2 Jan 2006",
            "2006-01-02T10:30:00Z",
            "2006-01-02T10:30:00",
        ] {
            assert_eq!(DateInput::from(text).to_date(), Some(expected), "{text}");
        }
    }

    #[test]
    fn general_parser_accepts_non_text_inputs() {
        assert_eq!(DateInput::from((2006, 1, 2)).to_date(), Some(ymd(2006, 1, 2)));
        assert_eq!(DateInput::from((2006, 2, 30)).to_date(), None);
        assert_eq!(DateInput::from(0i64).to_date(), Some(ymd(1970, 1, 1)));
        assert_eq!(
            DateInput::from(ymd(2020, 2, 29)).to_date(),
            Some(ymd(2020, 2, 29))
        );
    }

    #[test]
    fn general_parser_rejects_garbage() {
        assert_eq!(DateInput::from("").to_date(), None);
        assert_eq!(DateInput::from("not a date").to_date(), None);
        assert_eq!(DateInput::from("2006-13-01").to_date(), None);
    }

    #[test]
    fn formats_round_trip() {
        let date = ymd(2006, 1, 2);
        assert_eq!(to_canonical(date), "2006-01-02");
        assert_eq!(to_display(date), "02/01/2006");
    }

    #[test]
    fn month_lengths_follow_leap_years() {
        assert_eq!(days_in_month(2020, 2), Some(29));
        assert_eq!(days_in_month(2019, 2), Some(28));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(2021, 4), Some(30));
        assert_eq!(days_in_month(2021, 0), None);
        assert_eq!(days_in_month(2021, 13), None);
    }

    #[test]
    fn strict_grammar_accepts_day_first() {
        assert!(matches!(parse_edit("02/01/2006"), Validation::Success(d) if d == ymd(2006, 1, 2)));
        assert!(matches!(parse_edit("2/1/2006"), Validation::Success(d) if d == ymd(2006, 1, 2)));
        assert!(matches!(parse_edit("29/02/2020"), Validation::Success(d) if d == ymd(2020, 2, 29)));
        assert!(edit_problems("31/12/1999").is_empty());
    }

    #[test]
    fn strict_grammar_rejects_impossible_day() {
        assert_eq!(
            edit_problems("31/02/2020"),
            vec![EditDateError::DayOutOfRange {
                day: 31,
                month: 2,
                year: 2020
            }]
        );
        assert_eq!(edit_problems("29/02/2019").len(), 1);
    }

    #[test]
    fn strict_grammar_rejects_other_shapes() {
        for text in ["2006-01-02", "02/01/06", "002/01/2006", "a/b/cdef", "1/2/2006/4", ""] {
            assert_eq!(
                edit_problems(text),
                vec![EditDateError::Malformed {
                    text: text.to_string()
                }],
                "{text}"
            );
        }
    }

    #[test]
    fn strict_grammar_accumulates_problems() {
        let problems = edit_problems("00/13/0000");
        assert_eq!(problems.len(), 3);
        assert!(problems.contains(&EditDateError::YearOutOfRange { year: 0 }));
        assert!(problems.contains(&EditDateError::MonthOutOfRange { month: 13 }));
        assert!(problems.contains(&EditDateError::DayOutOfRange {
            day: 0,
            month: 13,
            year: 0
        }));
    }

    #[test]
    fn min_max_ignore_absent_side() {
        let early = Some(ymd(2006, 1, 1));
        let late = Some(ymd(2006, 1, 2));

        assert_eq!(min(early, late), early);
        assert_eq!(max(early, late), late);
        assert_eq!(min(None, late), late);
        assert_eq!(max(early, None), early);
        assert_eq!(min(None, None), None);
    }
}
