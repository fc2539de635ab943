pub mod context;
pub mod circle_commands;
pub mod trip_commands;
pub mod nudge_commands;

use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use serde::Serialize;

use crate::error::TriptiResult;
use crate::model::nudge;
use crate::ops::{aggregation_ops, user_ops};
use crate::queries::stats_queries;
use circle_commands::CircleSubcommand;
use context::CliContext;
use nudge_commands::NudgeSubcommand;
use trip_commands::TripSubcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage users
    User {
        #[command(subcommand)]
        subcommand: UserSubcommand,
    },

    /// Manage circles and memberships
    Circle {
        #[command(subcommand)]
        subcommand: CircleSubcommand,
    },

    /// Manage trips
    Trip {
        #[command(subcommand)]
        subcommand: TripSubcommand,
    },

    /// Manage nudges and push delivery
    Nudge {
        #[command(subcommand)]
        subcommand: NudgeSubcommand,
    },

    /// Compute and store the daily aggregate (defaults to today, UTC)
    Aggregate {
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Print the most recent stored aggregates instead of computing
        #[arg(long, conflicts_with = "date")]
        recent: Option<usize>,
    },

    /// Check whether a nudge type is sent as a push notification
    PushEligible { nudge_type: String },
}

#[derive(Subcommand, Debug)]
pub enum UserSubcommand {
    /// Register a user
    Add {
        name: String,
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Serialize)]
struct PushEligibility<'a> {
    nudge_type: &'a str,
    push_eligible: bool,
}

pub fn run(ctx: &CliContext, command: Commands) -> TriptiResult<()> {
    match command {
        Commands::User {
            subcommand: UserSubcommand::Add { name, email },
        } => {
            let user = user_ops::register_user(&ctx.conn, &name, email.as_deref())?;
            ctx.emit(&user, |u| println!("Registered {} ({})", u.name, u.id))
        }
        Commands::Circle { subcommand } => circle_commands::run(ctx, subcommand),
        Commands::Trip { subcommand } => trip_commands::run(ctx, subcommand),
        Commands::Nudge { subcommand } => nudge_commands::run(ctx, subcommand),
        Commands::Aggregate {
            recent: Some(limit),
            ..
        } => {
            let aggregates = stats_queries::recent_aggregates(&ctx.conn, limit)?;
            ctx.emit(&aggregates, |aggregates| {
                for a in aggregates {
                    println!(
                        "  {}  members {} (left {})  trips {}  nudges {} (pushed {})",
                        a.date,
                        a.active_memberships,
                        a.left_memberships,
                        a.trips_created,
                        a.nudges_created,
                        a.nudges_pushed
                    );
                }
            })
        }
        Commands::Aggregate { date, recent: None } => {
            let date = date.unwrap_or_else(|| Utc::now().date_naive());
            let aggregate = aggregation_ops::run_daily_aggregation(&ctx.conn, date)?;
            ctx.emit(&aggregate, |a| {
                println!("Aggregate for {}:", a.date);
                println!("  Active memberships: {}", a.active_memberships);
                println!("  Left memberships: {}", a.left_memberships);
                println!("  Trips created: {}", a.trips_created);
                println!("  Nudges created: {}", a.nudges_created);
                println!("  Nudges pushed: {}", a.nudges_pushed);
            })
        }
        Commands::PushEligible { nudge_type } => {
            let result = PushEligibility {
                nudge_type: &nudge_type,
                push_eligible: nudge::is_push_eligible(&nudge_type),
            };
            ctx.emit(&result, |r| {
                let verdict = if r.push_eligible { "push" } else { "in-app only" };
                println!("{}: {}", r.nudge_type, verdict);
            })
        }
    }
}
