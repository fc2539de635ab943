use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::Id;
use super::trip::Trip;
use super::user::User;

pub const LEADER_CAN_LOCK_DATES: &str = "leader_can_lock_dates";
pub const LEADER_READY_TO_PROPOSE: &str = "leader_ready_to_propose";
pub const DATES_LOCKED: &str = "dates_locked";
pub const VOTE_ON_DATES: &str = "vote_on_dates";
pub const ADD_AVAILABILITY: &str = "add_availability";

/// Nudge types that are sent as push notifications.
///
/// Kept to actionable, leader-scoped or milestone events. Every other type,
/// including any type added later, is delivered in-app only until listed here.
pub const PUSH_ELIGIBLE_TYPES: [&str; 3] =
    [LEADER_CAN_LOCK_DATES, LEADER_READY_TO_PROPOSE, DATES_LOCKED];

/// Whether a nudge of this type should go out as a push notification.
pub fn is_push_eligible(nudge_type: &str) -> bool {
    PUSH_ELIGIBLE_TYPES.contains(&nudge_type)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NudgeDelivery {
    /// Not yet looked at by dispatch.
    Pending,
    Pushed,
    /// Not push-eligible; shown in-app only.
    InAppOnly,
    /// Recipient was no longer an active member at dispatch time.
    Suppressed,
}

impl NudgeDelivery {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(NudgeDelivery::Pending),
            "pushed" => Some(NudgeDelivery::Pushed),
            "in_app_only" => Some(NudgeDelivery::InAppOnly),
            "suppressed" => Some(NudgeDelivery::Suppressed),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            NudgeDelivery::Pending => "pending",
            NudgeDelivery::Pushed => "pushed",
            NudgeDelivery::InAppOnly => "in_app_only",
            NudgeDelivery::Suppressed => "suppressed",
        }
    }
}

/// A prompt surfaced to one user about a trip's planning progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nudge {
    pub id: Id<Nudge>,
    pub trip_id: Id<Trip>,
    pub recipient_id: Id<User>,
    pub nudge_type: String,
    pub delivery: NudgeDelivery,
    pub dismissed: bool,
    pub created_at: DateTime<Utc>,
    pub pushed_at: Option<DateTime<Utc>>,
}

impl Nudge {
    pub fn create(trip_id: Id<Trip>, recipient_id: Id<User>, nudge_type: String) -> Self {
        Self {
            id: Id::generate(),
            trip_id,
            recipient_id,
            nudge_type,
            delivery: NudgeDelivery::Pending,
            dismissed: false,
            created_at: Utc::now(),
            pushed_at: None,
        }
    }

    pub fn is_push_eligible(&self) -> bool {
        is_push_eligible(&self.nudge_type)
    }
}
