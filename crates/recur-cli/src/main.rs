//! `recur` CLI — compute and normalize recurring task dates from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Next due date after today for a task anchored on 2023-01-01
//! recur next --date 20230101 --repeat "d 3"
//!
//! # Same, against an explicit reference date
//! recur --now 20230105 next --date 20230101 --repeat "d 3"
//!
//! # Date a task should be stored with on create/update
//! recur normalize --date 20240101 --repeat "w 1,4" --json
//!
//! # What happens to a task when it is marked done
//! recur done --date 20240110 --repeat "m -1"
//!
//! # Inspect a rule
//! recur parse "m 1,-1 1,7"
//! ```
//!
//! "Today" comes from `--now` if given, otherwise from the clock in `--tz`
//! (or `RECUR_TZ`, default UTC).

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use recur_engine::{date, mark_done, Completion, NextDateQuery, RepeatRule, TaskDates};
use tracing::{debug, warn};

#[derive(Parser)]
#[command(
    name = "recur",
    version,
    about = "Compute next due dates for recurring tasks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Reference date (YYYYMMDD) used instead of the clock
    #[arg(long, global = true)]
    now: Option<String>,

    /// IANA timezone used to read today's date from the clock
    #[arg(long, global = true, env = "RECUR_TZ", default_value = "UTC", value_parser = parse_tz)]
    tz: Tz,

    /// Log computation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the next due date for an anchor date and repeat rule
    Next {
        /// Anchor date (YYYYMMDD)
        #[arg(short, long)]
        date: String,
        /// Repeat rule, e.g. "d 7", "w 1,5", "m 1,-1"
        #[arg(short, long)]
        repeat: String,
    },
    /// Print the date a task should be stored with
    Normalize {
        /// Stored date (YYYYMMDD); empty means today
        #[arg(short, long, default_value = "")]
        date: String,
        /// Repeat rule; empty for a one-off task
        #[arg(short, long, default_value = "")]
        repeat: String,
        /// Print the whole record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print what happens to a task when its current occurrence is done
    Done {
        /// Stored date (YYYYMMDD)
        #[arg(short, long)]
        date: String,
        /// Repeat rule; empty for a one-off task
        #[arg(short, long, default_value = "")]
        repeat: String,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// Parse a repeat rule and print its structure
    Parse {
        /// Repeat rule
        rule: String,
    },
}

fn parse_tz(s: &str) -> std::result::Result<Tz, String> {
    s.parse::<Tz>().map_err(|_| format!("Unknown timezone: '{}'", s))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Today's date in `tz`, read from the system clock.
fn clock_today(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// `--now` if given, otherwise the clock.
fn resolve_today(now: Option<&str>, tz: Tz) -> Result<NaiveDate> {
    match now {
        Some(s) => date::parse_date(s)
            .with_context(|| format!("Invalid --now '{}': expected YYYYMMDD", s))
            .inspect_err(|e| warn!(error = %e, "rejected input")),
        None => Ok(clock_today(tz)),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Next { date, repeat } => {
            let query = NextDateQuery {
                now: cli.now,
                date,
                repeat,
            };
            let today = clock_today(cli.tz);
            debug!(?query, %today, "computing next date");
            let next = query
                .evaluate(today)
                .inspect_err(|e| warn!(error = %e, "rejected input"))
                .context("Failed to compute next date")?;
            println!("{}", next);
        }
        Commands::Normalize { date, repeat, json } => {
            let today = resolve_today(cli.now.as_deref(), cli.tz)?;
            let mut task = TaskDates::new(date, repeat);
            debug!(?task, %today, "normalizing task date");
            task.normalize(today)
                .inspect_err(|e| warn!(error = %e, "rejected input"))
                .context("Failed to normalize task date")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&task)?);
            } else {
                println!("{}", task.date);
            }
        }
        Commands::Done { date, repeat, json } => {
            let now = resolve_today(cli.now.as_deref(), cli.tz)?;
            let task = TaskDates::new(date, repeat);
            let completion = mark_done(now, &task)
                .inspect_err(|e| warn!(error = %e, "rejected input"))
                .context("Failed to complete task")?;
            debug!(?completion, "task completed");
            if json {
                println!("{}", serde_json::to_string_pretty(&completion)?);
            } else {
                match completion {
                    Completion::Reschedule(next) => println!("reschedule {}", next),
                    Completion::Remove => println!("remove"),
                }
            }
        }
        Commands::Parse { rule } => {
            let parsed = RepeatRule::parse(&rule)
                .inspect_err(|e| warn!(error = %e, "rejected input"))
                .with_context(|| format!("Failed to parse repeat rule '{}'", rule))?;
            println!("{}", parsed);
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
    }

    Ok(())
}
