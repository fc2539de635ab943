use chrono::NaiveDate;
use rusqlite::Connection;

use crate::db::{aggregate_repo, membership_repo, nudge_repo, trip_repo};
use crate::db::filter::Filter;
use crate::error::TriptiResult;
use crate::model::membership::STATUS_LEFT;
use crate::model::DailyAggregate;
use crate::queries::membership_queries;

/// Compute (without storing) the activity snapshot for a day.
pub fn compute_daily_aggregate(conn: &Connection, date: NaiveDate) -> TriptiResult<DailyAggregate> {
    let day = date.to_string();

    let active = membership_repo::count_matching(conn, &membership_queries::active_memberships_filter())?;
    let left = membership_repo::count_matching(conn, &Filter::new().eq("status", STATUS_LEFT))?;

    Ok(DailyAggregate {
        date,
        active_memberships: active,
        left_memberships: left,
        trips_created: trip_repo::count_created_on(conn, &day)?,
        nudges_created: nudge_repo::count_created_on(conn, &day)?,
        nudges_pushed: nudge_repo::count_pushed_on(conn, &day)?,
    })
}

pub fn daily_aggregate(conn: &Connection, date: NaiveDate) -> TriptiResult<Option<DailyAggregate>> {
    aggregate_repo::find_by_date(conn, date)
}

pub fn recent_aggregates(conn: &Connection, limit: usize) -> TriptiResult<Vec<DailyAggregate>> {
    aggregate_repo::find_recent(conn, limit)
}
