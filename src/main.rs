use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rusqlite::Connection;
use tracing_subscriber::EnvFilter;

use tripti::cli::{self, context::CliContext, Commands};
use tripti::db::schema;
use tripti::error::TriptiResult;

#[derive(Parser)]
#[command(name = "tripti", about = "Plan trips with your circles", version)]
struct Cli {
    /// Database file path (default: .data/tripti.db)
    #[arg(long, short = 'f', global = true, env = "TRIPTI_DB")]
    file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, short = 'j', global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let ctx = match open(cli.file, cli.json) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error opening database: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli::run(&ctx, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ctx.print_error(&e);
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` directives when set and valid, `warn` otherwise.
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

fn open(file: Option<PathBuf>, json: bool) -> TriptiResult<CliContext> {
    let db_path = match file {
        Some(path) => path,
        None => {
            let dir = PathBuf::from(".data");
            std::fs::create_dir_all(&dir)?;
            dir.join("tripti.db")
        }
    };

    tracing::debug!(path = %db_path.display(), "opening database");
    let conn = Connection::open(&db_path)?;
    schema::initialize(&conn)?;
    Ok(CliContext::new(conn, json))
}
