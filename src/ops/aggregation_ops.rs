use chrono::NaiveDate;
use rusqlite::Connection;

use crate::db::aggregate_repo;
use crate::error::TriptiResult;
use crate::model::DailyAggregate;
use crate::queries::stats_queries;

/// Compute and store the aggregate for `date`. Re-running replaces the stored row.
pub fn run_daily_aggregation(conn: &Connection, date: NaiveDate) -> TriptiResult<DailyAggregate> {
    let aggregate = stats_queries::compute_daily_aggregate(conn, date)?;
    aggregate_repo::upsert(conn, &aggregate)?;
    tracing::info!(
        %date,
        active_memberships = aggregate.active_memberships,
        trips_created = aggregate.trips_created,
        nudges_pushed = aggregate.nudges_pushed,
        "daily aggregation stored"
    );
    Ok(aggregate)
}
