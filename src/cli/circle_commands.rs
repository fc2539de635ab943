use clap::Subcommand;

use crate::cli::context::CliContext;
use crate::error::TriptiResult;
use crate::model::Id;
use crate::ops::circle_ops;
use crate::queries::membership_queries;

#[derive(Subcommand, Debug)]
pub enum CircleSubcommand {
    /// Create a circle owned by a user
    Add {
        owner_id: String,
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Join (or rejoin) a circle
    Join { user_id: String, circle_id: String },
    /// Leave a circle
    Leave { user_id: String, circle_id: String },
    /// List a circle's active members
    Members { circle_id: String },
    /// List the circles a user belongs to
    List { user_id: String },
}

pub fn run(ctx: &CliContext, subcommand: CircleSubcommand) -> TriptiResult<()> {
    match subcommand {
        CircleSubcommand::Add {
            owner_id,
            name,
            description,
        } => {
            let circle = circle_ops::create_circle(
                &ctx.conn,
                &Id::new(owner_id),
                &name,
                description.as_deref(),
            )?;
            ctx.emit(&circle, |c| println!("Created circle: {} ({})", c.name, c.id))
        }
        CircleSubcommand::Join { user_id, circle_id } => {
            let membership =
                circle_ops::join_circle(&ctx.conn, &Id::new(user_id), &Id::new(circle_id))?;
            ctx.emit(&membership, |m| println!("{} joined circle {}", m.user_id, m.circle_id))
        }
        CircleSubcommand::Leave { user_id, circle_id } => {
            let membership =
                circle_ops::leave_circle(&ctx.conn, &Id::new(user_id), &Id::new(circle_id))?;
            ctx.emit(&membership, |m| println!("{} left circle {}", m.user_id, m.circle_id))
        }
        CircleSubcommand::Members { circle_id } => {
            let members = membership_queries::active_members(&ctx.conn, &Id::new(circle_id))?;
            ctx.emit(&members, |members| {
                if members.is_empty() {
                    println!("No active members.");
                } else {
                    println!("Members ({}):", members.len());
                    for user in members {
                        println!("  {} ({})", user.name, user.id);
                    }
                }
            })
        }
        CircleSubcommand::List { user_id } => {
            let circles = membership_queries::active_circles_for_user(&ctx.conn, &Id::new(user_id))?;
            ctx.emit(&circles, |circles| {
                if circles.is_empty() {
                    println!("No circles yet. Use 'circle add' or 'circle join'.");
                } else {
                    println!("Circles ({}):", circles.len());
                    for circle in circles {
                        println!("  {} ({})", circle.name, circle.id);
                    }
                }
            })
        }
    }
}
