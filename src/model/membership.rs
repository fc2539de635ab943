use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::circle::Circle;
use super::ids::Id;
use super::user::User;

/// Status value written when a member departs a circle.
pub const STATUS_LEFT: &str = "left";
/// Status value written for current members. Legacy rows have no status at all.
pub const STATUS_ACTIVE: &str = "active";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MembershipRole {
    Leader,
    Member,
}

impl MembershipRole {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "leader" => Some(MembershipRole::Leader),
            "member" => Some(MembershipRole::Member),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            MembershipRole::Leader => "leader",
            MembershipRole::Member => "member",
        }
    }
}

/// Association between a user and a circle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    pub user_id: Id<User>,
    pub circle_id: Id<Circle>,
    pub role: MembershipRole,
    /// `None` for records that predate the status column.
    pub status: Option<String>,
    pub joined_at: DateTime<Utc>,
}

impl Membership {
    pub fn create(user_id: Id<User>, circle_id: Id<Circle>, role: MembershipRole) -> Self {
        Self {
            user_id,
            circle_id,
            role,
            status: Some(STATUS_ACTIVE.to_string()),
            joined_at: Utc::now(),
        }
    }

    /// A membership is active unless its status is exactly `left`.
    pub fn is_active(&self) -> bool {
        self.status.as_deref() != Some(STATUS_LEFT)
    }
}
