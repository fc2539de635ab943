use clap::Subcommand;

use crate::cli::context::CliContext;
use crate::db::nudge_repo;
use crate::error::TriptiResult;
use crate::model::Id;
use crate::notify::LogPushSender;
use crate::ops::nudge_ops;

#[derive(Subcommand, Debug)]
pub enum NudgeSubcommand {
    /// Queue a nudge for a user on a trip
    Add {
        trip_id: String,
        recipient_id: String,
        nudge_type: String,
    },
    /// List a user's nudges, newest first
    List {
        recipient_id: String,
        /// Include dismissed nudges
        #[arg(long)]
        all: bool,
    },
    /// Dismiss a nudge
    Dismiss { nudge_id: String },
    /// Deliver pending nudges
    Dispatch,
}

pub fn run(ctx: &CliContext, subcommand: NudgeSubcommand) -> TriptiResult<()> {
    match subcommand {
        NudgeSubcommand::Add {
            trip_id,
            recipient_id,
            nudge_type,
        } => {
            let nudge = nudge_ops::create_nudge(
                &ctx.conn,
                &Id::new(trip_id),
                &Id::new(recipient_id),
                &nudge_type,
            )?;
            ctx.emit(&nudge, |n| {
                let push = if n.is_push_eligible() { "push" } else { "in-app" };
                println!("Queued {} nudge {} ({})", n.nudge_type, n.id, push);
            })
        }
        NudgeSubcommand::List { recipient_id, all } => {
            let nudges = nudge_repo::find_for_recipient(&ctx.conn, &Id::new(recipient_id), all)?;
            ctx.emit(&nudges, |nudges| {
                if nudges.is_empty() {
                    println!("No nudges.");
                }
                for n in nudges {
                    let dismissed = if n.dismissed { " (dismissed)" } else { "" };
                    println!(
                        "  {} {} trip={} {}{}",
                        n.created_at.format("%Y-%m-%d"),
                        n.nudge_type,
                        n.trip_id,
                        n.delivery.to_db_str(),
                        dismissed
                    );
                }
            })
        }
        NudgeSubcommand::Dismiss { nudge_id } => {
            let nudge = nudge_ops::dismiss_nudge(&ctx.conn, &Id::new(nudge_id))?;
            ctx.emit(&nudge, |n| println!("Dismissed {}", n.id))
        }
        NudgeSubcommand::Dispatch => {
            let report = nudge_ops::dispatch_pending(&ctx.conn, &LogPushSender)?;
            ctx.emit(&report, |r| {
                println!(
                    "Pushed {}, in-app {}, suppressed {}, failed {}",
                    r.pushed, r.in_app_only, r.suppressed, r.failed
                )
            })
        }
    }
}
