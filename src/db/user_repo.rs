use rusqlite::{params, Connection};

use crate::error::TriptiResult;
use crate::model::{Id, User};

pub fn insert(conn: &Connection, user: &User) -> TriptiResult<()> {
    conn.execute(
        "INSERT INTO users (id, name, email) VALUES (?1, ?2, ?3)",
        params![user.id.as_str(), user.name, user.email],
    )?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, user_id: &Id<User>) -> TriptiResult<Option<User>> {
    let mut stmt = conn.prepare("SELECT id, name, email FROM users WHERE id = ?1")?;

    let result = stmt.query_row(params![user_id.as_str()], |row| {
        let id_str: String = row.get(0)?;
        let name: String = row.get(1)?;
        let email: String = row.get(2)?;
        Ok((id_str, name, email))
    });

    match result {
        Ok((id_str, name, email)) => Ok(Some(User {
            id: Id::new(id_str),
            name,
            email,
        })),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
