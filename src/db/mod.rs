pub mod schema;
pub mod filter;
pub mod user_repo;
pub mod circle_repo;
pub mod membership_repo;
pub mod trip_repo;
pub mod nudge_repo;
pub mod aggregate_repo;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use crate::error::{TriptiError, TriptiResult};

pub(crate) fn parse_timestamp(s: &str) -> TriptiResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| TriptiError::Other(format!("Invalid timestamp: {}", e)))
}

pub(crate) fn parse_date(s: &str) -> TriptiResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| TriptiError::Other(format!("Invalid date: {}", e)))
}

/// Fixed-width UTC form, so stored timestamps sort lexically.
pub(crate) fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}
