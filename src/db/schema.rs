use rusqlite::Connection;

use crate::error::TriptiResult;

/// Initialize the database schema. Creates all tables if they don't exist.
pub fn initialize(conn: &Connection) -> TriptiResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            email TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS circles (
            id TEXT PRIMARY KEY NOT NULL,
            owner_id TEXT NOT NULL REFERENCES users(id),
            name TEXT NOT NULL,
            description TEXT,
            created_at TEXT NOT NULL
        );

        -- status is NULL for memberships created before it existed
        CREATE TABLE IF NOT EXISTS circle_memberships (
            user_id TEXT NOT NULL REFERENCES users(id),
            circle_id TEXT NOT NULL REFERENCES circles(id) ON DELETE CASCADE,
            role TEXT NOT NULL DEFAULT 'member',
            status TEXT,
            joined_at TEXT NOT NULL,
            PRIMARY KEY (user_id, circle_id)
        );

        CREATE TABLE IF NOT EXISTS trips (
            id TEXT PRIMARY KEY NOT NULL,
            circle_id TEXT NOT NULL REFERENCES circles(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            leader_id TEXT NOT NULL REFERENCES users(id),
            status TEXT NOT NULL,
            start_date TEXT,
            end_date TEXT,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS nudges (
            id TEXT PRIMARY KEY NOT NULL,
            trip_id TEXT NOT NULL REFERENCES trips(id) ON DELETE CASCADE,
            recipient_id TEXT NOT NULL REFERENCES users(id),
            nudge_type TEXT NOT NULL,
            delivery TEXT NOT NULL DEFAULT 'pending',
            dismissed INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            pushed_at TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_nudges_delivery ON nudges(delivery);

        CREATE TABLE IF NOT EXISTS daily_aggregates (
            date TEXT PRIMARY KEY NOT NULL,
            active_memberships INTEGER NOT NULL,
            left_memberships INTEGER NOT NULL,
            trips_created INTEGER NOT NULL,
            nudges_created INTEGER NOT NULL,
            nudges_pushed INTEGER NOT NULL,
            computed_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        PRAGMA foreign_keys = ON;
        ",
    )?;
    Ok(())
}

/// Create an in-memory connection for testing. Available in test builds.
pub fn test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}
