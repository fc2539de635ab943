use chrono::NaiveDate;

use crate::error::{TriptiError, TriptiResult};

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> TriptiResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(TriptiError::BlankField {
            field: field.to_string(),
        })
    } else {
        Ok(trimmed)
    }
}

/// Validates that `start` does not come after `end`. Single-day ranges are fine.
pub fn date_range(start: NaiveDate, end: NaiveDate, field: &str) -> TriptiResult<()> {
    if start > end {
        Err(TriptiError::InvalidDateRange {
            field: field.to_string(),
            start: start.to_string(),
            end: end.to_string(),
        })
    } else {
        Ok(())
    }
}

/// Trims an optional string, returning None if blank.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
