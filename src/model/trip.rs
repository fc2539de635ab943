use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::circle::Circle;
use super::ids::Id;
use super::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TripStatus {
    Proposed,
    Scheduling,
    Locked,
    Canceled,
}

impl TripStatus {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "proposed" => Some(TripStatus::Proposed),
            "scheduling" => Some(TripStatus::Scheduling),
            "locked" => Some(TripStatus::Locked),
            "canceled" => Some(TripStatus::Canceled),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            TripStatus::Proposed => "proposed",
            TripStatus::Scheduling => "scheduling",
            TripStatus::Locked => "locked",
            TripStatus::Canceled => "canceled",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: Id<Trip>,
    pub circle_id: Id<Circle>,
    pub name: String,
    pub leader_id: Id<User>,
    pub status: TripStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Trip {
    pub fn create(circle_id: Id<Circle>, leader_id: Id<User>, name: String) -> Self {
        Self {
            id: Id::generate(),
            circle_id,
            name,
            leader_id,
            status: TripStatus::Proposed,
            start_date: None,
            end_date: None,
            created_at: Utc::now(),
        }
    }

    /// Path of the trip's detail page.
    pub fn detail_href(&self) -> String {
        format!("/trips/{}", self.id)
    }
}

/// A suggested next step for a trip: where to go and what to call it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    pub href: String,
    pub label: String,
}

impl PendingAction {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }
}
