use chrono::Utc;
use rusqlite::Connection;
use serde::Serialize;

use crate::db::{nudge_repo, user_repo};
use crate::error::{TriptiError, TriptiResult};
use crate::model::{Id, Nudge, NudgeDelivery, Trip, TripStatus, User};
use crate::notify::PushSender;
use crate::ops::trip_ops::require_trip;
use crate::ops::user_ops::require_user;
use crate::queries::membership_queries;
use crate::validation;

/// Outcome counts from one dispatch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub pushed: usize,
    pub in_app_only: usize,
    pub suppressed: usize,
    /// Sends that failed; those nudges stay pending.
    pub failed: usize,
}

pub fn create_nudge(
    conn: &Connection,
    trip_id: &Id<Trip>,
    recipient_id: &Id<User>,
    nudge_type: &str,
) -> TriptiResult<Nudge> {
    let valid_type = validation::non_blank(nudge_type, "nudge type")?;
    require_trip(conn, trip_id)?;
    require_user(conn, recipient_id)?;

    let nudge = Nudge::create(trip_id.clone(), recipient_id.clone(), valid_type);
    nudge_repo::insert(conn, &nudge)?;
    tracing::debug!(nudge = %nudge.id, nudge_type = %nudge.nudge_type, "created nudge");
    Ok(nudge)
}

pub fn dismiss_nudge(conn: &Connection, nudge_id: &Id<Nudge>) -> TriptiResult<Nudge> {
    let mut nudge = nudge_repo::find_by_id(conn, nudge_id)?.ok_or_else(|| TriptiError::NotFound {
        entity_type: "Nudge".into(),
        id: nudge_id.to_string(),
    })?;

    nudge.dismissed = true;
    nudge_repo::update(conn, &nudge)?;
    Ok(nudge)
}

/// Decide delivery for every pending nudge, oldest first.
///
/// Dismissed nudges, nudges on canceled trips and nudges for recipients who
/// are no longer active in the trip's circle are suppressed. Types outside
/// the push allow-list stay in-app. The rest are sent.
pub fn dispatch_pending(conn: &Connection, sender: &dyn PushSender) -> TriptiResult<DispatchReport> {
    let mut report = DispatchReport::default();

    for mut nudge in nudge_repo::find_pending(conn)? {
        let trip = require_trip(conn, &nudge.trip_id)?;

        if nudge.dismissed
            || trip.status == TripStatus::Canceled
            || !membership_queries::is_active_member(conn, &nudge.recipient_id, &trip.circle_id)?
        {
            tracing::debug!(nudge = %nudge.id, trip_status = trip.status.to_db_str(), "suppressed");
            nudge.delivery = NudgeDelivery::Suppressed;
            nudge_repo::update(conn, &nudge)?;
            report.suppressed += 1;
            continue;
        }

        if !nudge.is_push_eligible() {
            tracing::debug!(nudge = %nudge.id, nudge_type = %nudge.nudge_type, "in-app only");
            nudge.delivery = NudgeDelivery::InAppOnly;
            nudge_repo::update(conn, &nudge)?;
            report.in_app_only += 1;
            continue;
        }

        let Some(recipient) = user_repo::find_by_id(conn, &nudge.recipient_id)? else {
            nudge.delivery = NudgeDelivery::Suppressed;
            nudge_repo::update(conn, &nudge)?;
            report.suppressed += 1;
            continue;
        };

        match sender.send(&recipient, &nudge) {
            Ok(()) => {
                nudge.delivery = NudgeDelivery::Pushed;
                nudge.pushed_at = Some(Utc::now());
                nudge_repo::update(conn, &nudge)?;
                report.pushed += 1;
            }
            Err(e) => {
                tracing::warn!(nudge = %nudge.id, error = %e, "push failed, will retry");
                report.failed += 1;
            }
        }
    }

    tracing::info!(
        pushed = report.pushed,
        in_app_only = report.in_app_only,
        suppressed = report.suppressed,
        failed = report.failed,
        "dispatch finished"
    );
    Ok(report)
}
