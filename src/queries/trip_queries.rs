use rusqlite::Connection;

use crate::db::{nudge_repo, trip_repo};
use crate::error::{TriptiError, TriptiResult};
use crate::model::nudge::{
    ADD_AVAILABILITY, DATES_LOCKED, LEADER_CAN_LOCK_DATES, LEADER_READY_TO_PROPOSE, VOTE_ON_DATES,
};
use crate::model::{Id, PendingAction, Trip, User};

pub const VIEW_TRIP_LABEL: &str = "View Trip";

/// Pick the action to surface for a trip.
///
/// `pending` must already be ordered highest priority first; the first entry
/// is returned as-is. With nothing pending the trip's detail page is used,
/// which requires a non-blank trip id.
pub fn trip_primary_action(trip: &Trip, pending: &[PendingAction]) -> TriptiResult<PendingAction> {
    if let Some(first) = pending.first() {
        return Ok(first.clone());
    }

    if trip.id.is_blank() {
        return Err(TriptiError::BlankField {
            field: "trip id".into(),
        });
    }

    Ok(PendingAction::new(trip.detail_href(), VIEW_TRIP_LABEL))
}

/// Map a nudge type to its action and priority (lower is more urgent).
/// Unknown types have no action.
pub fn action_for_nudge(trip_id: &Id<Trip>, nudge_type: &str) -> Option<(u8, PendingAction)> {
    let (priority, suffix, label) = match nudge_type {
        LEADER_CAN_LOCK_DATES => (0, "/dates", "Lock dates"),
        LEADER_READY_TO_PROPOSE => (1, "/propose", "Propose dates"),
        VOTE_ON_DATES => (2, "/vote", "Vote on dates"),
        ADD_AVAILABILITY => (3, "/availability", "Add availability"),
        DATES_LOCKED => (4, "", "See trip dates"),
        _ => return None,
    };
    Some((
        priority,
        PendingAction::new(format!("/trips/{}{}", trip_id, suffix), label),
    ))
}

/// The user's open actions on a trip, most urgent first.
pub fn pending_actions(
    conn: &Connection,
    trip: &Trip,
    user_id: &Id<User>,
) -> TriptiResult<Vec<PendingAction>> {
    let nudges = nudge_repo::find_open_for_trip(conn, &trip.id, user_id)?;

    let mut ranked: Vec<(u8, PendingAction)> = nudges
        .iter()
        .filter_map(|n| action_for_nudge(&trip.id, &n.nudge_type))
        .collect();
    // Stable sort keeps creation order among equal priorities.
    ranked.sort_by_key(|(priority, _)| *priority);
    ranked.dedup_by(|a, b| a.1 == b.1);

    Ok(ranked.into_iter().map(|(_, action)| action).collect())
}

pub fn primary_action(
    conn: &Connection,
    trip_id: &Id<Trip>,
    user_id: &Id<User>,
) -> TriptiResult<PendingAction> {
    let trip = trip_repo::find_by_id(conn, trip_id)?.ok_or_else(|| TriptiError::NotFound {
        entity_type: "Trip".into(),
        id: trip_id.to_string(),
    })?;

    let pending = pending_actions(conn, &trip, user_id)?;
    trip_primary_action(&trip, &pending)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(id: &str) -> Trip {
        let mut trip = Trip::create(Id::new("c1"), Id::new("u1"), "Lisbon".into());
        trip.id = Id::new(id);
        trip
    }

    #[test]
    fn no_pending_actions_points_at_trip_page() {
        let action = trip_primary_action(&trip("t1"), &[]).unwrap();
        assert_eq!(action, PendingAction::new("/trips/t1", "View Trip"));
    }

    #[test]
    fn first_pending_action_wins() {
        let pending = vec![
            PendingAction::new("/a", "Do A"),
            PendingAction::new("/b", "Do B"),
        ];
        let action = trip_primary_action(&trip("t1"), &pending).unwrap();
        assert_eq!(action, PendingAction::new("/a", "Do A"));
    }

    #[test]
    fn pending_actions_are_not_reranked() {
        let pending = vec![
            PendingAction::new("/trips/t1", "See trip dates"),
            PendingAction::new("/trips/t1/dates", "Lock dates"),
        ];
        let action = trip_primary_action(&trip("t1"), &pending).unwrap();
        assert_eq!(action.label, "See trip dates");
    }

    #[test]
    fn blank_trip_id_is_rejected_when_nothing_is_pending() {
        let err = trip_primary_action(&trip(""), &[]).unwrap_err();
        assert!(matches!(err, TriptiError::BlankField { .. }));
    }

    #[test]
    fn blank_trip_id_is_fine_when_something_is_pending() {
        let pending = vec![PendingAction::new("/a", "Do A")];
        assert!(trip_primary_action(&trip(""), &pending).is_ok());
    }

    #[test]
    fn unknown_nudge_types_have_no_action() {
        assert!(action_for_nudge(&Id::new("t1"), "trip_created").is_none());
    }

    #[test]
    fn lock_dates_outranks_dates_locked() {
        let (lock, _) = action_for_nudge(&Id::new("t1"), LEADER_CAN_LOCK_DATES).unwrap();
        let (locked, _) = action_for_nudge(&Id::new("t1"), DATES_LOCKED).unwrap();
        assert!(lock < locked);
    }
}
