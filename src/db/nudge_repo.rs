use rusqlite::{params, Connection};

use crate::db::{format_timestamp, parse_timestamp};
use crate::error::{TriptiError, TriptiResult};
use crate::model::{Id, Nudge, NudgeDelivery, Trip, User};

const COLUMNS: &str =
    "id, trip_id, recipient_id, nudge_type, delivery, dismissed, created_at, pushed_at";

pub fn insert(conn: &Connection, nudge: &Nudge) -> TriptiResult<()> {
    conn.execute(
        "INSERT INTO nudges (id, trip_id, recipient_id, nudge_type, delivery, dismissed, created_at, pushed_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            nudge.id.as_str(),
            nudge.trip_id.as_str(),
            nudge.recipient_id.as_str(),
            nudge.nudge_type,
            nudge.delivery.to_db_str(),
            nudge.dismissed as i32,
            format_timestamp(&nudge.created_at),
            nudge.pushed_at.as_ref().map(format_timestamp),
        ],
    )?;
    Ok(())
}

pub fn update(conn: &Connection, nudge: &Nudge) -> TriptiResult<()> {
    conn.execute(
        "UPDATE nudges SET delivery = ?1, dismissed = ?2, pushed_at = ?3 WHERE id = ?4",
        params![
            nudge.delivery.to_db_str(),
            nudge.dismissed as i32,
            nudge.pushed_at.as_ref().map(format_timestamp),
            nudge.id.as_str(),
        ],
    )?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: &Id<Nudge>) -> TriptiResult<Option<Nudge>> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM nudges WHERE id = ?1"))?;

    let result = stmt.query_row(params![id.as_str()], |row| Ok(row_to_nudge(row)));

    match result {
        Ok(nudge) => Ok(Some(nudge?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Nudges dispatch has not looked at yet, oldest first.
pub fn find_pending(conn: &Connection) -> TriptiResult<Vec<Nudge>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM nudges WHERE delivery = 'pending' ORDER BY created_at, rowid"
    ))?;

    let nudges = stmt
        .query_map([], |row| Ok(row_to_nudge(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<TriptiResult<Vec<_>>>()?;

    Ok(nudges)
}

pub fn find_for_recipient(
    conn: &Connection,
    recipient_id: &Id<User>,
    include_dismissed: bool,
) -> TriptiResult<Vec<Nudge>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM nudges WHERE recipient_id = ?1 AND (?2 OR dismissed = 0)
         ORDER BY created_at DESC, rowid DESC"
    ))?;

    let nudges = stmt
        .query_map(params![recipient_id.as_str(), include_dismissed], |row| {
            Ok(row_to_nudge(row))
        })?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<TriptiResult<Vec<_>>>()?;

    Ok(nudges)
}

/// Undismissed nudges for one user on one trip, in creation order.
pub fn find_open_for_trip(
    conn: &Connection,
    trip_id: &Id<Trip>,
    recipient_id: &Id<User>,
) -> TriptiResult<Vec<Nudge>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM nudges WHERE trip_id = ?1 AND recipient_id = ?2 AND dismissed = 0
         ORDER BY created_at, rowid"
    ))?;

    let nudges = stmt
        .query_map(params![trip_id.as_str(), recipient_id.as_str()], |row| {
            Ok(row_to_nudge(row))
        })?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<TriptiResult<Vec<_>>>()?;

    Ok(nudges)
}

/// Dismiss every undismissed nudge on the trip whose type is in `nudge_types`.
/// Returns how many rows changed.
pub fn dismiss_open_for_trip(
    conn: &Connection,
    trip_id: &Id<Trip>,
    nudge_types: &[&str],
) -> TriptiResult<usize> {
    let mut changed = 0;
    for nudge_type in nudge_types {
        changed += conn.execute(
            "UPDATE nudges SET dismissed = 1
             WHERE trip_id = ?1 AND nudge_type = ?2 AND dismissed = 0",
            params![trip_id.as_str(), nudge_type],
        )?;
    }
    Ok(changed)
}

pub fn count_created_on(conn: &Connection, day: &str) -> TriptiResult<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM nudges WHERE substr(created_at, 1, 10) = ?1",
        params![day],
        |row| row.get(0),
    )?;
    Ok(count)
}

pub fn count_pushed_on(conn: &Connection, day: &str) -> TriptiResult<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM nudges WHERE delivery = 'pushed' AND substr(pushed_at, 1, 10) = ?1",
        params![day],
        |row| row.get(0),
    )?;
    Ok(count)
}

fn row_to_nudge(row: &rusqlite::Row) -> TriptiResult<Nudge> {
    let delivery_str: String = row.get(4)?;
    let created_at: String = row.get(6)?;
    let pushed_at: Option<String> = row.get(7)?;

    Ok(Nudge {
        id: Id::new(row.get::<_, String>(0)?),
        trip_id: Id::new(row.get::<_, String>(1)?),
        recipient_id: Id::new(row.get::<_, String>(2)?),
        nudge_type: row.get(3)?,
        delivery: NudgeDelivery::from_db_str(&delivery_str)
            .ok_or_else(|| TriptiError::Other(format!("Invalid nudge delivery: {}", delivery_str)))?,
        dismissed: row.get::<_, i32>(5)? != 0,
        created_at: parse_timestamp(&created_at)?,
        pushed_at: pushed_at.as_deref().map(parse_timestamp).transpose()?,
    })
}
