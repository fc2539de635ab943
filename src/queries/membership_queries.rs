use rusqlite::Connection;

use crate::db::filter::Filter;
use crate::db::{circle_repo, membership_repo, user_repo};
use crate::error::TriptiResult;
use crate::model::membership::STATUS_LEFT;
use crate::model::{Circle, Id, Membership, User};

/// Predicate selecting the user's active membership in a circle.
///
/// Rows without a status predate the status column and count as active, so the
/// status clause must be "not `left`, or absent" rather than a plain inequality.
pub fn active_membership_query(user_id: &str, circle_id: &str) -> Filter {
    Filter::new()
        .eq("user_id", user_id)
        .eq("circle_id", circle_id)
        .ne_or_absent("status", STATUS_LEFT)
}

/// All active memberships, legacy rows included.
pub fn active_memberships_filter() -> Filter {
    Filter::new().ne_or_absent("status", STATUS_LEFT)
}

pub fn active_membership(
    conn: &Connection,
    user_id: &Id<User>,
    circle_id: &Id<Circle>,
) -> TriptiResult<Option<Membership>> {
    let filter = active_membership_query(user_id.as_str(), circle_id.as_str());
    Ok(membership_repo::find_matching(conn, &filter)?.into_iter().next())
}

pub fn is_active_member(
    conn: &Connection,
    user_id: &Id<User>,
    circle_id: &Id<Circle>,
) -> TriptiResult<bool> {
    Ok(active_membership(conn, user_id, circle_id)?.is_some())
}

/// Active members of a circle, sorted by name.
pub fn active_members(conn: &Connection, circle_id: &Id<Circle>) -> TriptiResult<Vec<User>> {
    let filter = active_memberships_filter().eq("circle_id", circle_id.as_str());

    let mut members = Vec::new();
    for membership in membership_repo::find_matching(conn, &filter)? {
        if let Some(user) = user_repo::find_by_id(conn, &membership.user_id)? {
            members.push(user);
        }
    }

    members.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(members)
}

/// Circles the user currently belongs to, sorted by name.
pub fn active_circles_for_user(conn: &Connection, user_id: &Id<User>) -> TriptiResult<Vec<Circle>> {
    let filter = active_memberships_filter().eq("user_id", user_id.as_str());

    let mut circles = Vec::new();
    for membership in membership_repo::find_matching(conn, &filter)? {
        if let Some(circle) = circle_repo::find_by_id(conn, &membership.circle_id)? {
            circles.push(circle);
        }
    }

    circles.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(circles)
}
