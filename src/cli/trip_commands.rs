use chrono::NaiveDate;
use clap::Subcommand;

use crate::cli::context::CliContext;
use crate::db::trip_repo;
use crate::error::TriptiResult;
use crate::model::Id;
use crate::ops::trip_ops;
use crate::queries::trip_queries;

#[derive(Subcommand, Debug)]
pub enum TripSubcommand {
    /// Propose a trip in a circle
    Add {
        circle_id: String,
        leader_id: String,
        name: String,
    },
    /// Lock a trip's dates (YYYY-MM-DD) and notify members
    Lock {
        trip_id: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    /// Cancel a trip
    Cancel { trip_id: String },
    /// List a circle's trips
    List { circle_id: String },
    /// Show the next action a user should take on a trip
    Next { trip_id: String, user_id: String },
}

pub fn run(ctx: &CliContext, subcommand: TripSubcommand) -> TriptiResult<()> {
    match subcommand {
        TripSubcommand::Add {
            circle_id,
            leader_id,
            name,
        } => {
            let trip =
                trip_ops::create_trip(&ctx.conn, &Id::new(circle_id), &Id::new(leader_id), &name)?;
            ctx.emit(&trip, |t| println!("Created trip: {} ({})", t.name, t.id))
        }
        TripSubcommand::Lock {
            trip_id,
            start,
            end,
        } => {
            let trip = trip_ops::lock_dates(&ctx.conn, &Id::new(trip_id), start, end)?;
            ctx.emit(&trip, |t| println!("Locked {} for {} to {}", t.name, start, end))
        }
        TripSubcommand::Cancel { trip_id } => {
            let trip = trip_ops::cancel_trip(&ctx.conn, &Id::new(trip_id))?;
            ctx.emit(&trip, |t| println!("Canceled trip: {}", t.name))
        }
        TripSubcommand::List { circle_id } => {
            let trips = trip_repo::find_by_circle(&ctx.conn, &Id::new(circle_id))?;
            ctx.emit(&trips, |trips| {
                if trips.is_empty() {
                    println!("No trips yet.");
                }
                for t in trips {
                    match (t.start_date, t.end_date) {
                        (Some(start), Some(end)) => {
                            println!("  {} [{}] {} to {} ({})", t.name, t.status.to_db_str(), start, end, t.id)
                        }
                        _ => println!("  {} [{}] ({})", t.name, t.status.to_db_str(), t.id),
                    }
                }
            })
        }
        TripSubcommand::Next { trip_id, user_id } => {
            let action =
                trip_queries::primary_action(&ctx.conn, &Id::new(trip_id), &Id::new(user_id))?;
            ctx.emit(&action, |a| println!("{} -> {}", a.label, a.href))
        }
    }
}
