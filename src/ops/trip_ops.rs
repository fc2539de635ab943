use chrono::NaiveDate;
use rusqlite::Connection;

use crate::db::{nudge_repo, trip_repo};
use crate::error::{TriptiError, TriptiResult};
use crate::model::nudge::{DATES_LOCKED, LEADER_CAN_LOCK_DATES, LEADER_READY_TO_PROPOSE};
use crate::model::{Circle, Id, Nudge, Trip, TripStatus, User};
use crate::ops::circle_ops::require_circle;
use crate::queries::membership_queries;
use crate::validation;

/// Propose a trip in a circle. The leader must be an active member.
pub fn create_trip(
    conn: &Connection,
    circle_id: &Id<Circle>,
    leader_id: &Id<User>,
    name: &str,
) -> TriptiResult<Trip> {
    let valid_name = validation::non_blank(name, "name")?;
    require_circle(conn, circle_id)?;

    if !membership_queries::is_active_member(conn, leader_id, circle_id)? {
        return Err(TriptiError::NotActiveMember {
            user_id: leader_id.to_string(),
            circle_id: circle_id.to_string(),
        });
    }

    let trip = Trip::create(circle_id.clone(), leader_id.clone(), valid_name);
    trip_repo::insert(conn, &trip)?;
    tracing::info!(trip = %trip.id, circle = %circle_id, "created trip");
    Ok(trip)
}

/// Fix the trip's dates and tell every active member of the circle.
///
/// A trip can be locked once. The leader's open scheduling nudges for the
/// trip are dismissed in the same transaction.
pub fn lock_dates(
    conn: &Connection,
    trip_id: &Id<Trip>,
    start: NaiveDate,
    end: NaiveDate,
) -> TriptiResult<Trip> {
    validation::date_range(start, end, "dates")?;
    let mut trip = require_trip(conn, trip_id)?;

    if matches!(trip.status, TripStatus::Canceled | TripStatus::Locked) {
        return Err(TriptiError::InvalidTripState {
            trip_id: trip_id.to_string(),
            status: trip.status.to_db_str().into(),
        });
    }

    let tx = conn.unchecked_transaction()?;

    trip.status = TripStatus::Locked;
    trip.start_date = Some(start);
    trip.end_date = Some(end);
    trip_repo::update(&tx, &trip)?;

    let closed = nudge_repo::dismiss_open_for_trip(
        &tx,
        &trip.id,
        &[LEADER_CAN_LOCK_DATES, LEADER_READY_TO_PROPOSE],
    )?;

    let members = membership_queries::active_members(&tx, &trip.circle_id)?;
    for member in &members {
        let nudge = Nudge::create(trip.id.clone(), member.id.clone(), DATES_LOCKED.to_string());
        nudge_repo::insert(&tx, &nudge)?;
    }

    tx.commit()?;

    tracing::info!(
        trip = %trip.id,
        %start,
        %end,
        notified = members.len(),
        closed,
        "locked trip dates"
    );
    Ok(trip)
}

pub fn cancel_trip(conn: &Connection, trip_id: &Id<Trip>) -> TriptiResult<Trip> {
    let mut trip = require_trip(conn, trip_id)?;
    trip.status = TripStatus::Canceled;
    trip_repo::update(conn, &trip)?;
    tracing::info!(trip = %trip.id, "canceled trip");
    Ok(trip)
}

pub(crate) fn require_trip(conn: &Connection, trip_id: &Id<Trip>) -> TriptiResult<Trip> {
    trip_repo::find_by_id(conn, trip_id)?.ok_or_else(|| TriptiError::NotFound {
        entity_type: "Trip".into(),
        id: trip_id.to_string(),
    })
}
