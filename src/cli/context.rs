use rusqlite::Connection;
use serde::Serialize;

use crate::error::{TriptiError, TriptiResult};

pub struct CliContext {
    pub conn: Connection,
    pub json: bool,
}

impl CliContext {
    pub fn new(conn: Connection, json: bool) -> Self {
        Self { conn, json }
    }

    /// Print `value` as JSON in `--json` mode, otherwise run the human printer.
    pub fn emit<T: Serialize>(&self, value: &T, human: impl FnOnce(&T)) -> TriptiResult<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            human(value);
        }
        Ok(())
    }

    pub fn print_error(&self, e: &TriptiError) {
        eprintln!("Error: {}", e);
    }
}
