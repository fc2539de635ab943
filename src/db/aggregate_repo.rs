use chrono::NaiveDate;
use rusqlite::{params, Connection};

use crate::db::parse_date;
use crate::error::TriptiResult;
use crate::model::DailyAggregate;

/// Insert or replace the aggregate for its date.
pub fn upsert(conn: &Connection, aggregate: &DailyAggregate) -> TriptiResult<()> {
    conn.execute(
        "INSERT INTO daily_aggregates
            (date, active_memberships, left_memberships, trips_created, nudges_created, nudges_pushed, computed_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, datetime('now'))
         ON CONFLICT(date) DO UPDATE SET
            active_memberships = excluded.active_memberships,
            left_memberships = excluded.left_memberships,
            trips_created = excluded.trips_created,
            nudges_created = excluded.nudges_created,
            nudges_pushed = excluded.nudges_pushed,
            computed_at = excluded.computed_at",
        params![
            aggregate.date.to_string(),
            aggregate.active_memberships,
            aggregate.left_memberships,
            aggregate.trips_created,
            aggregate.nudges_created,
            aggregate.nudges_pushed,
        ],
    )?;
    Ok(())
}

pub fn find_by_date(conn: &Connection, date: NaiveDate) -> TriptiResult<Option<DailyAggregate>> {
    let mut stmt = conn.prepare(
        "SELECT date, active_memberships, left_memberships, trips_created, nudges_created, nudges_pushed
         FROM daily_aggregates WHERE date = ?1",
    )?;

    let result = stmt.query_row(params![date.to_string()], |row| Ok(row_to_aggregate(row)));

    match result {
        Ok(aggregate) => Ok(Some(aggregate?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Most recent first.
pub fn find_recent(conn: &Connection, limit: usize) -> TriptiResult<Vec<DailyAggregate>> {
    let mut stmt = conn.prepare(
        "SELECT date, active_memberships, left_memberships, trips_created, nudges_created, nudges_pushed
         FROM daily_aggregates ORDER BY date DESC LIMIT ?1",
    )?;

    let aggregates = stmt
        .query_map(params![limit as i64], |row| Ok(row_to_aggregate(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<TriptiResult<Vec<_>>>()?;

    Ok(aggregates)
}

fn row_to_aggregate(row: &rusqlite::Row) -> TriptiResult<DailyAggregate> {
    let date: String = row.get(0)?;
    Ok(DailyAggregate {
        date: parse_date(&date)?,
        active_memberships: row.get(1)?,
        left_memberships: row.get(2)?,
        trips_created: row.get(3)?,
        nudges_created: row.get(4)?,
        nudges_pushed: row.get(5)?,
    })
}
