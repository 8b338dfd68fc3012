//! `slots` CLI — query availability snapshots from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Every bookable slot for a course on one day
//! slots query -s demo.json --course algebra-1 --from 2026-03-16 --to 2026-03-16
//!
//! # Pin "now" for reproducible output (support reproductions, tests)
//! slots query -s demo.json --course algebra-1 --from 2026-03-16 --to 2026-03-22 \
//!     --at 2026-03-10T12:00:00Z
//!
//! # Snapshot on stdin, machine-readable output
//! cat demo.json | slots query --course algebra-1 --from 2026-03-16 --to 2026-03-16 --json
//!
//! # A tutor's availability windows, before bookings are subtracted
//! slots windows -s demo.json --tutor t-ada --from 2026-03-16 --to 2026-03-22
//!
//! # A tutor's merged busy intervals (appointments + live holds)
//! slots busy -s demo.json --tutor t-ada --from 2026-03-16 --to 2026-03-22
//! ```
//!
//! Bare `--from`/`--to` dates are interpreted in the snapshot's configured
//! timezone: `--from` means the start of that local day, `--to` its end.
//! Full RFC 3339 instants are accepted too.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use slot_engine::civil::CivilConverter;
use slot_engine::model::{AvailabilityWindow, TimeSlot};
use slot_engine::{CourseId, MemoryStore, ProRataPricer, SlotConfig, SlotEngine, Snapshot, TutorId};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "slots", version, about = "TutorGrid availability snapshot inspector")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List bookable slots for a course
    Query {
        /// Snapshot JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        snapshot: Option<String>,
        /// Course id to query
        #[arg(long)]
        course: String,
        /// Range start: YYYY-MM-DD (local) or RFC 3339 instant
        #[arg(long)]
        from: String,
        /// Range end: YYYY-MM-DD (local) or RFC 3339 instant
        #[arg(long)]
        to: String,
        /// Anchor for lead-time/horizon bounds (RFC 3339); defaults to the wall clock
        #[arg(long)]
        at: Option<String>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show a tutor's availability windows before occupancy subtraction
    Windows {
        /// Snapshot JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        snapshot: Option<String>,
        /// Tutor id to inspect
        #[arg(long)]
        tutor: String,
        /// Range start: YYYY-MM-DD (local) or RFC 3339 instant
        #[arg(long)]
        from: String,
        /// Range end: YYYY-MM-DD (local) or RFC 3339 instant
        #[arg(long)]
        to: String,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show a tutor's merged busy intervals (appointments + live holds)
    Busy {
        /// Snapshot JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        snapshot: Option<String>,
        /// Tutor id to inspect
        #[arg(long)]
        tutor: String,
        /// Range start: YYYY-MM-DD (local) or RFC 3339 instant
        #[arg(long)]
        from: String,
        /// Range end: YYYY-MM-DD (local) or RFC 3339 instant
        #[arg(long)]
        to: String,
        /// Anchor for hold expiry (RFC 3339); defaults to the wall clock
        #[arg(long)]
        at: Option<String>,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Query {
            snapshot,
            course,
            from,
            to,
            at,
            json,
        } => {
            let engine = load_engine(snapshot.as_deref())?;
            let converter = CivilConverter::new(engine.config().timezone);
            let from = parse_range_start(&from, &converter)?;
            let to = parse_range_end(&to, &converter)?;
            let now = parse_anchor(at.as_deref())?;

            let slots = engine.available_slots_at(&CourseId::from(course.as_str()), from, to, now)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&slots)?);
            } else {
                print_slots(&slots, &converter);
            }
        }
        Commands::Windows {
            snapshot,
            tutor,
            from,
            to,
            json,
        } => {
            let engine = load_engine(snapshot.as_deref())?;
            let converter = CivilConverter::new(engine.config().timezone);
            let from = parse_range_start(&from, &converter)?;
            let to = parse_range_end(&to, &converter)?;

            let windows = engine.tutor_windows(&TutorId::from(tutor.as_str()), from, to)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&windows)?);
            } else {
                print_windows(&windows, &converter);
            }
        }
        Commands::Busy {
            snapshot,
            tutor,
            from,
            to,
            at,
            json,
        } => {
            let engine = load_engine(snapshot.as_deref())?;
            let converter = CivilConverter::new(engine.config().timezone);
            let from = parse_range_start(&from, &converter)?;
            let to = parse_range_end(&to, &converter)?;
            let now = parse_anchor(at.as_deref())?;

            let busy = engine.merged_busy_at(&TutorId::from(tutor.as_str()), from, to, now)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&busy)?);
            } else {
                print_busy(&busy, &converter);
            }
        }
    }

    Ok(())
}

/// Load a snapshot from a file (or stdin) and build an engine over it. The
/// snapshot's embedded config applies when present.
fn load_engine(path: Option<&str>) -> Result<SlotEngine<MemoryStore, ProRataPricer>> {
    let raw = read_input(path)?;
    let snapshot: Snapshot =
        serde_json::from_str(&raw).context("Snapshot is not valid JSON")?;
    let config = snapshot.config.clone().unwrap_or_else(SlotConfig::default);
    SlotEngine::new(MemoryStore::from_snapshot(snapshot), ProRataPricer, config)
        .context("Snapshot carries an unusable engine config")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot file: {}", path)),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read snapshot from stdin")?;
            Ok(buf)
        }
    }
}

/// Parse `--from`: a bare date means the start of that local day.
fn parse_range_start(raw: &str, converter: &CivilConverter) -> Result<DateTime<Utc>> {
    if let Ok(date) = raw.parse::<NaiveDate>() {
        return Ok(converter.to_absolute(date, NaiveTime::MIN));
    }
    parse_instant(raw)
}

/// Parse `--to`: a bare date means the end of that local day, so a
/// single-day query reads `--from D --to D`.
fn parse_range_end(raw: &str, converter: &CivilConverter) -> Result<DateTime<Utc>> {
    if let Ok(date) = raw.parse::<NaiveDate>() {
        let next = date.succ_opt().context("date is out of range")?;
        return Ok(converter.to_absolute(next, NaiveTime::MIN) - Duration::seconds(1));
    }
    parse_instant(raw)
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>> {
    raw.parse::<DateTime<Utc>>()
        .with_context(|| format!("Invalid datetime '{}': use YYYY-MM-DD or RFC 3339", raw))
}

fn parse_anchor(at: Option<&str>) -> Result<DateTime<Utc>> {
    match at {
        Some(raw) => parse_instant(raw),
        None => Ok(Utc::now()),
    }
}

fn print_slots(slots: &[TimeSlot], converter: &CivilConverter) {
    if slots.is_empty() {
        println!("No bookable slots in range.");
        return;
    }
    let tz = converter.timezone();
    for slot in slots {
        let local = slot.start.with_timezone(&tz);
        let durations = slot
            .durations
            .iter()
            .map(|d| format!("{} min {}", d.duration_minutes, format_cents(d.price_cents)))
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "{}  {:<20} {}",
            local.format("%Y-%m-%d %H:%M %Z"),
            slot.tutor_name,
            durations
        );
    }
}

fn print_windows(windows: &[AvailabilityWindow], converter: &CivilConverter) {
    if windows.is_empty() {
        println!("No availability windows in range.");
        return;
    }
    let tz = converter.timezone();
    for w in windows {
        let minutes = (w.end - w.start).num_minutes();
        println!(
            "{} -> {}  ({} min)",
            w.start.with_timezone(&tz).format("%Y-%m-%d %H:%M %Z"),
            w.end.with_timezone(&tz).format("%Y-%m-%d %H:%M %Z"),
            minutes
        );
    }
}

fn print_busy(busy: &[(DateTime<Utc>, DateTime<Utc>)], converter: &CivilConverter) {
    if busy.is_empty() {
        println!("No busy intervals in range.");
        return;
    }
    let tz = converter.timezone();
    for (start, end) in busy {
        let minutes = (*end - *start).num_minutes();
        println!(
            "{} -> {}  ({} min)",
            start.with_timezone(&tz).format("%Y-%m-%d %H:%M %Z"),
            end.with_timezone(&tz).format("%Y-%m-%d %H:%M %Z"),
            minutes
        );
    }
}

fn format_cents(cents: i64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}
