//! `slots` CLI — compute booking availability from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Weekly schedule from a JSON event list (stdin → stdout)
//! cat events.json | slots availability --start 2014-08-10
//!
//! # From file to file, hour-long slots, pretty-printed
//! slots availability --start 2014-08-10 -i events.json -o week.json --slot-minutes 60 --pretty
//!
//! # Engine settings from a JSON file
//! slots availability --start 2014-08-10 -i events.json --config slots.json
//!
//! # List the slot start times of a range
//! slots split --start 2014-08-04T09:30:00Z --end 2014-08-04T12:30:00Z
//!
//! # Show where each opening falls in a week
//! slots occurrence --start-date 2014-08-10 -i events.json
//! ```
//!
//! Logs go to stderr. `-v` enables debug output; `RUST_LOG` overrides both.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use slot_engine::{
    get_slots, occurrence_in_window, slots::start_of_day, AvailabilityConfig, AvailabilityEngine,
    EventKind, EventSource, InMemoryEvents,
};
use std::io::{self, Read};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Weekly booking availability from openings and appointments"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the 7-day availability schedule starting on a date
    Availability {
        /// First day of the schedule (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// Input events JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Slot length in minutes (overrides --config)
        #[arg(long)]
        slot_minutes: Option<u32>,
        /// Engine settings JSON file, e.g. {"slot_minutes": 30}
        #[arg(long)]
        config: Option<String>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the slot start times of a time range, one per line
    Split {
        /// Range start (RFC 3339)
        #[arg(long)]
        start: DateTime<Utc>,
        /// Range end (RFC 3339)
        #[arg(long)]
        end: DateTime<Utc>,
        /// Slot length in minutes
        #[arg(long, default_value_t = slot_engine::config::DEFAULT_SLOT_MINUTES)]
        slot_minutes: u32,
    },
    /// Print each opening's occurrence in the week starting on a date
    Occurrence {
        /// First day of the week (YYYY-MM-DD)
        #[arg(long)]
        start_date: NaiveDate,
        /// Input events JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Availability {
            start,
            input,
            output,
            slot_minutes,
            config,
            pretty,
        } => {
            let config = load_config(config.as_deref(), slot_minutes)?;
            let engine = AvailabilityEngine::new(config).context("Invalid engine configuration")?;

            let source = load_events(input.as_deref())?;
            info!(start = %start, events = source.events().len(), "computing availability");

            let schedule = engine
                .availabilities(&source, start)
                .context("Failed to compute availability")?;
            debug!(free_slots = schedule.slot_count(), "schedule rendered");

            let json = if pretty {
                serde_json::to_string_pretty(&schedule)?
            } else {
                serde_json::to_string(&schedule)?
            };
            write_output(output.as_deref(), &json)?;
        }
        Commands::Split {
            start,
            end,
            slot_minutes,
        } => {
            let duration = AvailabilityConfig::default()
                .with_slot_minutes(slot_minutes)
                .slot_duration();
            let slots = get_slots(start, end, duration).context("Failed to split range")?;
            for slot in slots {
                println!("{}", slot.starts_at().to_rfc3339());
            }
        }
        Commands::Occurrence { start_date, input } => {
            let source = load_events(input.as_deref())?;
            let window_start = start_of_day(start_date);
            for opening in source.fetch(EventKind::Opening)? {
                match occurrence_in_window(&opening, window_start)
                    .context("Failed to project opening")?
                {
                    Some(occurrence) => println!(
                        "{} => {} -> {}",
                        opening,
                        occurrence.starts_at.to_rfc3339(),
                        occurrence.ends_at.to_rfc3339()
                    ),
                    None => println!("{} => none", opening),
                }
            }
        }
    }

    Ok(())
}

/// Install a stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Build the engine config from an optional JSON file, then apply flag overrides.
fn load_config(path: Option<&str>, slot_minutes: Option<u32>) -> Result<AvailabilityConfig> {
    let mut config = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            AvailabilityConfig::from_json(&json)
                .with_context(|| format!("Failed to parse config file: {}", path))?
        }
        None => AvailabilityConfig::default(),
    };

    if let Some(minutes) = slot_minutes {
        config = config.with_slot_minutes(minutes);
    }
    Ok(config)
}

fn load_events(path: Option<&str>) -> Result<InMemoryEvents> {
    let json = read_input(path)?;
    InMemoryEvents::from_json(&json).context("Failed to load events")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
