//! Date input validation for the dashboards.
//!
//! Every load starts with user-supplied date strings from the date
//! pickers. Nothing past this module ever sees a raw string: queries
//! are constructed exclusively through [`parse_single_date`] and
//! [`parse_date_range`], so a `ReportQuery` in hand is always valid.

use std::sync::LazyLock;

use chrono::{Datelike, Local, Months, NaiveDate};
use regex::Regex;
use thiserror::Error;

/// Wire format for every date the backend understands.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is valid"));

/// A validated date selection for one load action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportQuery {
    /// The three single-date reports share one date picker.
    SingleDate { date: NaiveDate },
    /// The appointments-between-dates report and the statistics
    /// dashboard take an inclusive range.
    DateRange { start: NaiveDate, end: NaiveDate },
}

impl ReportQuery {
    pub fn as_single_date(&self) -> Option<NaiveDate> {
        match self {
            Self::SingleDate { date } => Some(*date),
            Self::DateRange { .. } => None,
        }
    }

    pub fn as_date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            Self::SingleDate { .. } => None,
            Self::DateRange { start, end } => Some((*start, *end)),
        }
    }
}

/// Validation failures, each mapped to an operator-facing toast.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("malformed date `{0}`, expected YYYY-MM-DD")]
    MalformedDate(String),

    #[error("inverted range: start {start} is after end {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

impl ValidationError {
    /// Message shown to the operator, matching the dashboard wording.
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::MissingField("date") => "Por favor selecciona una fecha",
            ValidationError::MissingField(_) => "Por favor selecciona ambas fechas",
            ValidationError::MalformedDate(_) => "Formato de fecha inválido",
            ValidationError::InvertedRange { .. } => {
                "La fecha de inicio no puede ser mayor a la fecha fin"
            }
        }
    }
}

/// Validates one date-picker value into a single-date query.
pub fn parse_single_date(raw: &str) -> Result<ReportQuery, ValidationError> {
    let date = parse_date_field(raw, "date")?;
    Ok(ReportQuery::SingleDate { date })
}

/// Validates a start/end picker pair into a range query.
///
/// Both fields are checked for presence before either is parsed, so an
/// empty end date reports as missing even when the start is malformed.
pub fn parse_date_range(raw_start: &str, raw_end: &str) -> Result<ReportQuery, ValidationError> {
    if raw_start.trim().is_empty() {
        return Err(ValidationError::MissingField("start_date"));
    }
    if raw_end.trim().is_empty() {
        return Err(ValidationError::MissingField("end_date"));
    }

    let start = parse_date_field(raw_start, "start_date")?;
    let end = parse_date_field(raw_end, "end_date")?;

    if start > end {
        return Err(ValidationError::InvertedRange { start, end });
    }

    Ok(ReportQuery::DateRange { start, end })
}

fn parse_date_field(raw: &str, field: &'static str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    if !DATE_PATTERN.is_match(raw) {
        return Err(ValidationError::MalformedDate(raw.to_string()));
    }
    // The pattern admits impossible dates like 2024-02-30; chrono is
    // the calendar authority.
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| ValidationError::MalformedDate(raw.to_string()))
}

/// Default selection for the reports dashboard: today.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Default selection for the statistics dashboard: the current month.
pub fn this_month() -> (NaiveDate, NaiveDate) {
    let now = today();
    let first = now.with_day(1).expect("day 1 exists in every month");
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .expect("previous day of a month start exists");
    (first, last)
}
