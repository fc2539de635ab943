use rusqlite::Connection;

use crate::db::user_repo;
use crate::error::{TriptiError, TriptiResult};
use crate::model::{Id, User};
use crate::validation;

pub fn register_user(conn: &Connection, name: &str, email: Option<&str>) -> TriptiResult<User> {
    let valid_name = validation::non_blank(name, "name")?;
    let email = validation::trim_optional(email).unwrap_or_default();

    let user = User::create(valid_name, email);
    user_repo::insert(conn, &user)?;
    tracing::info!(user = %user.id, "registered user");
    Ok(user)
}

pub(crate) fn require_user(conn: &Connection, user_id: &Id<User>) -> TriptiResult<User> {
    user_repo::find_by_id(conn, user_id)?.ok_or_else(|| TriptiError::NotFound {
        entity_type: "User".into(),
        id: user_id.to_string(),
    })
}
