//! Date range with ordered start/end fields and free-text edit buffers.
//!
//! The canonical `start`/`end` fields only ever hold valid dates, and when
//! both are set `start <= end`. Each field is paired with an edit buffer
//! that holds whatever the user has typed so far; the buffer is reconciled
//! into its field on an explicit apply.

pub mod error;
pub mod parse;

pub use error::{DateRangeError, EditDateError};
pub use parse::{max, min, DateInput};

use crate::core::{assign, encode, Field, Listeners, Observable, Schema};
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use stillwater::validation::Validation;

/// Which end of the range an operation targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Bound {
    Start,
    End,
}

/// Two ordered, optional dates with paired edit buffers.
///
/// # Example
///
/// ```rust
/// use rok::date_range::{DateRange, DateRangeError};
///
/// let mut range = DateRange::new("period", "Period");
/// range.set_start("2006-01-02").unwrap();
///
/// let result = range.set_end("2006-01-01");
/// assert!(matches!(result, Err(DateRangeError::InvalidEnd { .. })));
/// assert_eq!(range.end(), None);
/// assert_eq!(range.edit_start(), "02/01/2006");
/// ```
pub struct DateRange {
    listeners: Listeners,
    name: String,
    title: String,
    opts: Value,
    meta: Value,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    edit_start: String,
    edit_end: String,
    data: BTreeMap<String, Value>,
}

impl Default for DateRange {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl DateRange {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            listeners: Listeners::new(),
            name: name.into(),
            title: title.into(),
            opts: Value::Object(Default::default()),
            meta: Value::Object(Default::default()),
            start: None,
            end: None,
            edit_start: String::new(),
            edit_end: String::new(),
            data: BTreeMap::new(),
        }
    }

    pub fn with_opts(mut self, opts: Value) -> Self {
        self.opts = opts;
        self
    }

    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = meta;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.notify();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.notify();
    }

    pub fn opts(&self) -> &Value {
        &self.opts
    }

    pub fn meta(&self) -> &Value {
        &self.meta
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// Start in canonical `YYYY-MM-DD` form.
    pub fn start_str(&self) -> Option<String> {
        self.start.map(parse::to_canonical)
    }

    /// End in canonical `YYYY-MM-DD` form.
    pub fn end_str(&self) -> Option<String> {
        self.end.map(parse::to_canonical)
    }

    pub fn edit_start(&self) -> &str {
        &self.edit_start
    }

    pub fn edit_end(&self) -> &str {
        &self.edit_end
    }

    pub fn has_start(&self) -> bool {
        self.start.is_some()
    }

    pub fn has_end(&self) -> bool {
        self.end.is_some()
    }

    pub fn has_either(&self) -> bool {
        self.has_start() || self.has_end()
    }

    pub fn has_both(&self) -> bool {
        self.has_start() && self.has_end()
    }

    /// Set the start date.
    ///
    /// An unparseable input or a date after `end` clears `start`, notifies,
    /// and returns the error. On success the start edit buffer is
    /// rewritten in display form.
    pub fn set_start(&mut self, input: impl Into<DateInput>) -> Result<(), DateRangeError> {
        self.set_bound(Bound::Start, input.into())
    }

    /// Set the end date; the mirror image of [`set_start`](Self::set_start).
    pub fn set_end(&mut self, input: impl Into<DateInput>) -> Result<(), DateRangeError> {
        self.set_bound(Bound::End, input.into())
    }

    pub fn remove_start(&mut self) {
        self.start = None;
        self.notify();
    }

    pub fn remove_end(&mut self) {
        self.end = None;
        self.notify();
    }

    /// Store raw edit text for the start date without validating it.
    pub fn set_edit_start(&mut self, text: impl Into<String>) {
        self.edit_start = text.into();
        self.notify();
    }

    /// Store raw edit text for the end date without validating it.
    pub fn set_edit_end(&mut self, text: impl Into<String>) {
        self.edit_end = text.into();
        self.notify();
    }

    /// `true` when the start buffer is empty or a valid `DD/MM/YYYY` date.
    pub fn is_valid_edit_start(&self) -> bool {
        is_valid_edit(&self.edit_start)
    }

    pub fn is_valid_edit_end(&self) -> bool {
        is_valid_edit(&self.edit_end)
    }

    /// Everything wrong with the start buffer; empty when it is valid.
    pub fn edit_start_problems(&self) -> Vec<EditDateError> {
        edit_problems(&self.edit_start)
    }

    pub fn edit_end_problems(&self) -> Vec<EditDateError> {
        edit_problems(&self.edit_end)
    }

    /// Reconcile the start buffer into `start`.
    ///
    /// A buffer that fails the strict grammar clears `start` without
    /// returning an error. A valid buffer goes through
    /// [`set_start`](Self::set_start), so ordering errors are returned.
    pub fn apply_edit_start(&mut self) -> Result<(), DateRangeError> {
        self.apply_edit(Bound::Start)
    }

    /// Reconcile the end buffer into `end`; see
    /// [`apply_edit_start`](Self::apply_edit_start).
    pub fn apply_edit_end(&mut self) -> Result<(), DateRangeError> {
        self.apply_edit(Bound::End)
    }

    pub fn data(&self) -> &BTreeMap<String, Value> {
        &self.data
    }

    /// Attach an arbitrary value to the range under `key`.
    pub fn set_data(&mut self, key: impl Into<String>, value: Value) {
        self.data.insert(key.into(), value);
        self.notify();
    }

    fn set_bound(&mut self, bound: Bound, input: DateInput) -> Result<(), DateRangeError> {
        let Some(date) = input.to_date() else {
            tracing::debug!(model = %self.name, ?bound, %input, "unparseable date");
            *self.slot(bound) = None;
            self.notify();
            return Err(DateRangeError::InvalidDate {
                input: input.to_string(),
            });
        };

        let violation = match (bound, self.start, self.end) {
            (Bound::Start, _, Some(end)) if date > end => {
                Some(DateRangeError::InvalidStart { start: date, end })
            }
            (Bound::End, Some(start), _) if start > date => {
                Some(DateRangeError::InvalidEnd { start, end: date })
            }
            _ => None,
        };

        if let Some(error) = violation {
            tracing::debug!(model = %self.name, ?bound, %date, "date out of order");
            *self.slot(bound) = None;
            self.notify();
            return Err(error);
        }

        *self.slot(bound) = Some(date);
        *self.buffer(bound) = parse::to_display(date);
        self.notify();
        Ok(())
    }

    fn apply_edit(&mut self, bound: Bound) -> Result<(), DateRangeError> {
        let text = match bound {
            Bound::Start => &self.edit_start,
            Bound::End => &self.edit_end,
        };

        match parse::parse_edit(text) {
            Validation::Success(date) => self.set_bound(bound, DateInput::Date(date)),
            Validation::Failure(_) => {
                tracing::debug!(model = %self.name, ?bound, "edit buffer rejected, clearing");
                *self.slot(bound) = None;
                self.notify();
                Ok(())
            }
        }
    }

    fn slot(&mut self, bound: Bound) -> &mut Option<NaiveDate> {
        match bound {
            Bound::Start => &mut self.start,
            Bound::End => &mut self.end,
        }
    }

    fn buffer(&mut self, bound: Bound) -> &mut String {
        match bound {
            Bound::Start => &mut self.edit_start,
            Bound::End => &mut self.edit_end,
        }
    }
}

fn is_valid_edit(text: &str) -> bool {
    text.is_empty() || matches!(parse::parse_edit(text), Validation::Success(_))
}

fn edit_problems(text: &str) -> Vec<EditDateError> {
    if text.is_empty() {
        Vec::new()
    } else {
        parse::edit_problems(text)
    }
}

impl fmt::Debug for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateRange")
            .field("name", &self.name)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("edit_start", &self.edit_start)
            .field("edit_end", &self.edit_end)
            .finish()
    }
}

impl Observable for DateRange {
    fn listeners(&self) -> &Listeners {
        &self.listeners
    }
}

impl Schema for DateRange {
    const KIND: &'static str = "DateRange";
    const FIELDS: &'static [Field<Self>] = &[
        Field::property(
            "name",
            |m: &Self| encode(&m.name),
            |m: &mut Self, value| assign(&mut m.name, value),
        ),
        Field::property(
            "title",
            |m: &Self| encode(&m.title),
            |m: &mut Self, value| assign(&mut m.title, value),
        ),
        Field::property(
            "start",
            |m: &Self| encode(&m.start),
            |m: &mut Self, value| assign(&mut m.start, value),
        )
        .reset_with(|m: &mut Self| m.start = None),
        Field::property(
            "end",
            |m: &Self| encode(&m.end),
            |m: &mut Self, value| assign(&mut m.end, value),
        )
        .reset_with(|m: &mut Self| m.end = None),
        Field::property(
            "edit_start",
            |m: &Self| encode(&m.edit_start),
            |m: &mut Self, value| assign(&mut m.edit_start, value),
        )
        .reset_with(|m: &mut Self| m.edit_start.clear()),
        Field::property(
            "edit_end",
            |m: &Self| encode(&m.edit_end),
            |m: &mut Self, value| assign(&mut m.edit_end, value),
        )
        .reset_with(|m: &mut Self| m.edit_end.clear()),
        Field::object(
            "opts",
            |m: &Self| m.opts.clone(),
            |m: &mut Self, value| assign(&mut m.opts, value),
        ),
        Field::object(
            "meta",
            |m: &Self| m.meta.clone(),
            |m: &mut Self, value| assign(&mut m.meta, value),
        ),
        Field::object(
            "data",
            |m: &Self| encode(&m.data),
            |m: &mut Self, value| assign(&mut m.data, value),
        )
        .reset_with(|m: &mut Self| m.data.clear()),
    ];

    fn after_restore(&mut self) {
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > end {
                tracing::debug!(model = %self.name, %start, %end, "restored range out of order");
                self.end = None;
            }
        }
    }
}
