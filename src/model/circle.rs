use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::Id;
use super::user::User;

/// A group of users planning trips together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    pub id: Id<Circle>,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: Id<User>,
    pub created_at: DateTime<Utc>,
}

impl Circle {
    pub fn create(name: String, description: Option<String>, owner_id: Id<User>) -> Self {
        Self {
            id: Id::generate(),
            name,
            description,
            owner_id,
            created_at: Utc::now(),
        }
    }
}
