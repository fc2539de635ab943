use chrono::Utc;
use rusqlite::Connection;

use crate::db::{circle_repo, membership_repo};
use crate::error::{TriptiError, TriptiResult};
use crate::model::membership::{STATUS_ACTIVE, STATUS_LEFT};
use crate::model::{Circle, Id, Membership, MembershipRole, User};
use crate::ops::user_ops::require_user;
use crate::queries::membership_queries;
use crate::validation::{self, trim_optional};

/// Create a circle. The owner becomes its first member, as leader.
pub fn create_circle(
    conn: &Connection,
    owner_id: &Id<User>,
    name: &str,
    description: Option<&str>,
) -> TriptiResult<Circle> {
    let valid_name = validation::non_blank(name, "name")?;
    require_user(conn, owner_id)?;

    let circle = Circle::create(valid_name, trim_optional(description), owner_id.clone());
    circle_repo::insert(conn, &circle)?;

    let membership = Membership::create(owner_id.clone(), circle.id.clone(), MembershipRole::Leader);
    membership_repo::insert(conn, &membership)?;

    tracing::info!(circle = %circle.id, owner = %owner_id, "created circle");
    Ok(circle)
}

/// Add a user to a circle, or bring back a member who left.
pub fn join_circle(
    conn: &Connection,
    user_id: &Id<User>,
    circle_id: &Id<Circle>,
) -> TriptiResult<Membership> {
    require_circle(conn, circle_id)?;
    require_user(conn, user_id)?;

    match membership_repo::find(conn, user_id, circle_id)? {
        Some(existing) if existing.is_active() => Err(TriptiError::AlreadyExists {
            entity_type: "Membership".into(),
            identifier: format!("{}/{}", user_id, circle_id),
        }),
        Some(mut returning) => {
            returning.status = Some(STATUS_ACTIVE.to_string());
            returning.joined_at = Utc::now();
            membership_repo::update(conn, &returning)?;
            tracing::info!(user = %user_id, circle = %circle_id, "rejoined circle");
            Ok(returning)
        }
        None => {
            let membership =
                Membership::create(user_id.clone(), circle_id.clone(), MembershipRole::Member);
            membership_repo::insert(conn, &membership)?;
            tracing::info!(user = %user_id, circle = %circle_id, "joined circle");
            Ok(membership)
        }
    }
}

/// Mark the user's membership as left. The row is kept.
pub fn leave_circle(
    conn: &Connection,
    user_id: &Id<User>,
    circle_id: &Id<Circle>,
) -> TriptiResult<Membership> {
    let mut membership = membership_queries::active_membership(conn, user_id, circle_id)?
        .ok_or_else(|| TriptiError::NotFound {
            entity_type: "Membership".into(),
            id: format!("{}/{}", user_id, circle_id),
        })?;

    membership.status = Some(STATUS_LEFT.to_string());
    membership_repo::update(conn, &membership)?;
    tracing::info!(user = %user_id, circle = %circle_id, "left circle");
    Ok(membership)
}

pub(crate) fn require_circle(conn: &Connection, circle_id: &Id<Circle>) -> TriptiResult<Circle> {
    circle_repo::find_by_id(conn, circle_id)?.ok_or_else(|| TriptiError::NotFound {
        entity_type: "Circle".into(),
        id: circle_id.to_string(),
    })
}
