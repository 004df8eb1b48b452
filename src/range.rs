// src/range.rs

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Missing(&'static str),
    Invalid(&'static str),
    Inverted,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Missing(param) => write!(f, "{param} is required"),
            ValidationError::Invalid(param) => write!(f, "{param} is not a valid date"),
            ValidationError::Inverted => {
                write!(f, "endDate must be greater than or equal to startDate")
            }
        }
    }
}

/// Inclusive date range for charge queries. Built once from the two query
/// strings, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    pub fn from_query(start: Option<&str>, end: Option<&str>) -> Result<Self, ValidationError> {
        let start_raw = non_empty(start).ok_or(ValidationError::Missing("startDate"))?;
        let end_raw = non_empty(end).ok_or(ValidationError::Missing("endDate"))?;

        let start = parse_date(start_raw).ok_or(ValidationError::Invalid("startDate"))?;
        let end = parse_date(end_raw).ok_or(ValidationError::Invalid("endDate"))?;

        if end < start {
            return Err(ValidationError::Inverted);
        }

        Ok(Self { start, end })
    }

    pub fn start_epoch(&self) -> i64 {
        self.start.timestamp()
    }

    pub fn end_epoch(&self) -> i64 {
        self.end.timestamp()
    }
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Accepts a plain calendar date (midnight UTC) or a full RFC 3339 instant.
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
