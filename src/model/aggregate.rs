use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day's activity snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    /// Totals at the time the aggregation ran.
    pub active_memberships: i64,
    pub left_memberships: i64,
    /// Counts for `date` only.
    pub trips_created: i64,
    pub nudges_created: i64,
    pub nudges_pushed: i64,
}
