use rusqlite::{params, params_from_iter, Connection};

use crate::db::filter::Filter;
use crate::db::{format_timestamp, parse_timestamp};
use crate::error::{TriptiError, TriptiResult};
use crate::model::{Circle, Id, Membership, MembershipRole, User};

const COLUMNS: &str = "user_id, circle_id, role, status, joined_at";

pub fn insert(conn: &Connection, membership: &Membership) -> TriptiResult<()> {
    conn.execute(
        "INSERT INTO circle_memberships (user_id, circle_id, role, status, joined_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            membership.user_id.as_str(),
            membership.circle_id.as_str(),
            membership.role.to_db_str(),
            membership.status,
            format_timestamp(&membership.joined_at),
        ],
    )?;
    Ok(())
}

pub fn update(conn: &Connection, membership: &Membership) -> TriptiResult<()> {
    conn.execute(
        "UPDATE circle_memberships SET role = ?1, status = ?2, joined_at = ?3
         WHERE user_id = ?4 AND circle_id = ?5",
        params![
            membership.role.to_db_str(),
            membership.status,
            format_timestamp(&membership.joined_at),
            membership.user_id.as_str(),
            membership.circle_id.as_str(),
        ],
    )?;
    Ok(())
}

/// The membership row for this pair regardless of status.
pub fn find(
    conn: &Connection,
    user_id: &Id<User>,
    circle_id: &Id<Circle>,
) -> TriptiResult<Option<Membership>> {
    let filter = Filter::new()
        .eq("user_id", user_id.as_str())
        .eq("circle_id", circle_id.as_str());
    Ok(find_matching(conn, &filter)?.into_iter().next())
}

pub fn find_matching(conn: &Connection, filter: &Filter) -> TriptiResult<Vec<Membership>> {
    let (predicate, values) = filter.to_sql();
    let sql = format!(
        "SELECT {COLUMNS} FROM circle_memberships WHERE {predicate} ORDER BY joined_at, user_id"
    );
    let mut stmt = conn.prepare(&sql)?;

    let memberships = stmt
        .query_map(params_from_iter(values.iter()), |row| Ok(row_to_membership(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<TriptiResult<Vec<_>>>()?;

    Ok(memberships)
}

pub fn count_matching(conn: &Connection, filter: &Filter) -> TriptiResult<i64> {
    let (predicate, values) = filter.to_sql();
    let sql = format!("SELECT COUNT(*) FROM circle_memberships WHERE {predicate}");
    let count = conn.query_row(&sql, params_from_iter(values.iter()), |row| row.get(0))?;
    Ok(count)
}

fn row_to_membership(row: &rusqlite::Row) -> TriptiResult<Membership> {
    let role_str: String = row.get(2)?;
    let joined_at: String = row.get(4)?;
    Ok(Membership {
        user_id: Id::new(row.get::<_, String>(0)?),
        circle_id: Id::new(row.get::<_, String>(1)?),
        role: MembershipRole::from_db_str(&role_str)
            .ok_or_else(|| TriptiError::Other(format!("Invalid membership role: {}", role_str)))?,
        status: row.get(3)?,
        joined_at: parse_timestamp(&joined_at)?,
    })
}
