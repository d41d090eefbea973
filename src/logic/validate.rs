use chrono::{Datelike, Utc};

use crate::error::{ApiError, ApiResult};

/// The championship's first season.
pub const FIRST_SEASON: i32 = 1950;

/// Inclusive range of seasons a year parameter may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

impl YearBounds {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// From the first season through next year.
    pub fn current() -> Self {
        Self::new(FIRST_SEASON, Utc::now().year() + 1)
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.min && year <= self.max
    }
}

/// A year must be exactly four ASCII digits and fall inside `bounds`.
pub fn validate_year(raw: &str, bounds: YearBounds) -> ApiResult<i32> {
    let year = if raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
        raw.parse::<i32>().ok().filter(|year| bounds.contains(*year))
    } else {
        None
    };

    year.ok_or_else(|| {
        ApiError::Validation(format!(
            "Invalid year format or range. Please provide a valid 4-digit year between {} and {}. Received: {}",
            bounds.min, bounds.max, raw
        ))
    })
}

pub fn validate_year_range(start: &str, end: &str, bounds: YearBounds) -> ApiResult<(i32, i32)> {
    let start = validate_year(start, bounds)?;
    let end = validate_year(end, bounds)?;
    if end < start {
        return Err(ApiError::Validation(
            "The end year cannot be earlier than the start year.".to_string(),
        ));
    }
    Ok((start, end))
}

/// Identifiers and round numbers are only checked for integer syntax.
pub fn parse_id(kind: &str, raw: &str) -> ApiResult<i64> {
    raw.parse::<i64>().map_err(|_| {
        ApiError::Validation(format!("Invalid {kind} '{raw}'. Expected an integer."))
    })
}
