use rusqlite::{params, Connection};

use crate::db::{format_timestamp, parse_timestamp};
use crate::error::TriptiResult;
use crate::model::{Circle, Id};

pub fn insert(conn: &Connection, circle: &Circle) -> TriptiResult<()> {
    conn.execute(
        "INSERT INTO circles (id, owner_id, name, description, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            circle.id.as_str(),
            circle.owner_id.as_str(),
            circle.name,
            circle.description,
            format_timestamp(&circle.created_at),
        ],
    )?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: &Id<Circle>) -> TriptiResult<Option<Circle>> {
    let mut stmt = conn.prepare(
        "SELECT id, owner_id, name, description, created_at FROM circles WHERE id = ?1",
    )?;

    let result = stmt.query_row(params![id.as_str()], |row| Ok(row_to_circle(row)));

    match result {
        Ok(circle) => Ok(Some(circle?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn row_to_circle(row: &rusqlite::Row) -> TriptiResult<Circle> {
    let created_at: String = row.get(4)?;
    Ok(Circle {
        id: Id::new(row.get::<_, String>(0)?),
        owner_id: Id::new(row.get::<_, String>(1)?),
        name: row.get(2)?,
        description: row.get(3)?,
        created_at: parse_timestamp(&created_at)?,
    })
}
