use rusqlite::{params, Connection};

use crate::db::{format_timestamp, parse_date, parse_timestamp};
use crate::error::{TriptiError, TriptiResult};
use crate::model::{Circle, Id, Trip, TripStatus};

pub fn insert(conn: &Connection, trip: &Trip) -> TriptiResult<()> {
    conn.execute(
        "INSERT INTO trips (id, circle_id, name, leader_id, status, start_date, end_date, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            trip.id.as_str(),
            trip.circle_id.as_str(),
            trip.name,
            trip.leader_id.as_str(),
            trip.status.to_db_str(),
            trip.start_date.map(|d| d.to_string()),
            trip.end_date.map(|d| d.to_string()),
            format_timestamp(&trip.created_at),
        ],
    )?;
    Ok(())
}

pub fn update(conn: &Connection, trip: &Trip) -> TriptiResult<()> {
    conn.execute(
        "UPDATE trips SET name = ?1, leader_id = ?2, status = ?3, start_date = ?4, end_date = ?5
         WHERE id = ?6",
        params![
            trip.name,
            trip.leader_id.as_str(),
            trip.status.to_db_str(),
            trip.start_date.map(|d| d.to_string()),
            trip.end_date.map(|d| d.to_string()),
            trip.id.as_str(),
        ],
    )?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: &Id<Trip>) -> TriptiResult<Option<Trip>> {
    let mut stmt = conn.prepare(
        "SELECT id, circle_id, name, leader_id, status, start_date, end_date, created_at
         FROM trips WHERE id = ?1",
    )?;

    let result = stmt.query_row(params![id.as_str()], |row| Ok(row_to_trip(row)));

    match result {
        Ok(trip) => Ok(Some(trip?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn find_by_circle(conn: &Connection, circle_id: &Id<Circle>) -> TriptiResult<Vec<Trip>> {
    let mut stmt = conn.prepare(
        "SELECT id, circle_id, name, leader_id, status, start_date, end_date, created_at
         FROM trips WHERE circle_id = ?1 ORDER BY created_at",
    )?;

    let trips = stmt
        .query_map(params![circle_id.as_str()], |row| Ok(row_to_trip(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<TriptiResult<Vec<_>>>()?;

    Ok(trips)
}

/// Trips whose `created_at` falls on the given UTC day (`YYYY-MM-DD`).
pub fn count_created_on(conn: &Connection, day: &str) -> TriptiResult<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM trips WHERE substr(created_at, 1, 10) = ?1",
        params![day],
        |row| row.get(0),
    )?;
    Ok(count)
}

fn row_to_trip(row: &rusqlite::Row) -> TriptiResult<Trip> {
    let status_str: String = row.get(4)?;
    let start: Option<String> = row.get(5)?;
    let end: Option<String> = row.get(6)?;
    let created_at: String = row.get(7)?;

    Ok(Trip {
        id: Id::new(row.get::<_, String>(0)?),
        circle_id: Id::new(row.get::<_, String>(1)?),
        name: row.get(2)?,
        leader_id: Id::new(row.get::<_, String>(3)?),
        status: TripStatus::from_db_str(&status_str)
            .ok_or_else(|| TriptiError::Other(format!("Invalid trip status: {}", status_str)))?,
        start_date: start.as_deref().map(parse_date).transpose()?,
        end_date: end.as_deref().map(parse_date).transpose()?,
        created_at: parse_timestamp(&created_at)?,
    })
}
