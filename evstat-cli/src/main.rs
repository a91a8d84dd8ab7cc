mod commands;
mod config;
mod render;

use std::io::IsTerminal;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{ArgAction, Parser, Subcommand};
use evstat_core::{EventQuery, StatusFilter};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::EvstatConfig;

#[derive(Parser)]
#[command(name = "evstat")]
#[command(about = "List events as upcoming, ongoing or past")]
struct Cli {
    /// More log output (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors (overrides -v)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    quiet: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events, current and upcoming first
    List {
        /// JSON export of the events table (defaults to events_file from config)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// all, upcoming, ongoing (live) or past (ended)
        #[arg(short, long, default_value = "all")]
        status: StatusFilter,

        /// Only events whose title, location, category or description contains this
        #[arg(long)]
        search: Option<String>,

        /// Only events in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Skip this many matching events
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Show at most this many events (defaults to page_size from config)
        #[arg(short, long)]
        limit: Option<NonZeroUsize>,

        /// Evaluate as of this moment (YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS])
        #[arg(long)]
        now: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Classify a single date range
    Classify {
        /// First day (YYYY-MM-DD)
        #[arg(short, long)]
        start: String,

        /// Last day (YYYY-MM-DD), defaults to the start day
        #[arg(short, long)]
        end: Option<String>,

        /// Evaluate as of this moment (YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS])
        #[arg(long)]
        now: Option<String>,
    },
    /// Counts per status, what is on now and what is next
    Summary {
        /// JSON export of the events table (defaults to events_file from config)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Evaluate as of this moment (YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS])
        #[arg(long)]
        now: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet)?;

    let config = EvstatConfig::load()?;

    match cli.command {
        Commands::List {
            file,
            status,
            search,
            category,
            offset,
            limit,
            now,
            json,
        } => {
            let now = commands::resolve_now(now.as_deref(), &config)?;
            let events = commands::load_events(file, &config)?;
            let query = EventQuery {
                status,
                search,
                category,
                offset,
                limit: limit.or(config.page_size),
            };
            debug!(?query, %now, "Listing events");
            commands::list::run(&events, &query, now, json)
        }
        Commands::Classify { start, end, now } => {
            let now = commands::resolve_now(now.as_deref(), &config)?;
            commands::classify::run(&start, end.as_deref(), now)
        }
        Commands::Summary { file, now, json } => {
            let now = commands::resolve_now(now.as_deref(), &config)?;
            let events = commands::load_events(file, &config)?;
            commands::summary::run(&events, now, json)
        }
    }
}

/// Log level when RUST_LOG is unset. Any `-q` wins over `-v`.
fn default_level(verbose: u8, quiet: u8) -> &'static str {
    match (quiet, verbose) {
        (q, _) if q > 0 => "error",
        (_, 0) => "warn",
        (_, 1) => "info",
        (_, 2) => "debug",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8, quiet: u8) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level(verbose, quiet)))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}
