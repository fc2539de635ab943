use thiserror::Error;

#[derive(Debug, Error)]
pub enum TriptiError {
    #[error("{field} cannot be blank")]
    BlankField { field: String },

    #[error("{field} has start {start} after end {end}")]
    InvalidDateRange {
        field: String,
        start: String,
        end: String,
    },

    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("{entity_type} already exists: {identifier}")]
    AlreadyExists {
        entity_type: String,
        identifier: String,
    },

    #[error("User {user_id} is not an active member of circle {circle_id}")]
    NotActiveMember { user_id: String, circle_id: String },

    #[error("Trip {trip_id} is {status}")]
    InvalidTripState { trip_id: String, status: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type TriptiResult<T> = Result<T, TriptiError>;
