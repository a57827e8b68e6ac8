//! `clinic-slots` CLI — preview appointment slots, reconcile bookings and
//! validate RUTs from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Bookable slots for a date (weekly schedule from a file)
//! clinic-slots slots -s week.json --date 2026-10-19
//!
//! # Same, schedule piped on stdin, JSON output
//! cat week.json | clinic-slots slots --date 2026-10-19 --json
//!
//! # Full grid with booking state
//! clinic-slots availability -s week.json --date 2026-10-19 --booked 09:00,13:00
//! clinic-slots availability -s week.json --date 2026-10-19 --booked-file booked.json
//!
//! # Check a schedule against the editor's rules
//! clinic-slots validate -s week.json
//!
//! # Validate and format a RUT (exit code 1 when invalid)
//! clinic-slots rut 18365232k
//!
//! # Engine trace on stderr
//! RUST_LOG=clinic_slots=trace clinic-slots slots -s week.json --date 2026-10-19
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clinic_slots::{count_bookable, reconcile, BookingState, Rut, WeeklySchedule};
use std::io::{self, Read};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "clinic-slots",
    version,
    about = "Clinic appointment slot engine CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log engine decisions to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the bookable slots of a date
    Slots {
        /// Weekly schedule JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        schedule: Option<String>,
        /// Calendar date, YYYY-MM-DD
        #[arg(short, long)]
        date: NaiveDate,
        /// Print a JSON array instead of one time per line
        #[arg(long)]
        json: bool,
    },
    /// Show every slot of a date with its booking state
    Availability {
        /// Weekly schedule JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        schedule: Option<String>,
        /// Calendar date, YYYY-MM-DD
        #[arg(short, long)]
        date: NaiveDate,
        /// Comma-separated booked start times (HH:MM)
        #[arg(short, long, value_delimiter = ',')]
        booked: Vec<String>,
        /// JSON array of booked start times, as returned by the availability API
        #[arg(long)]
        booked_file: Option<String>,
        /// Print `[{time, isBooked}]` JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Check every day of a weekly schedule against the editor's rules
    Validate {
        /// Weekly schedule JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        schedule: Option<String>,
    },
    /// Validate a RUT and print it formatted
    Rut {
        /// RUT in any common notation, e.g. 12.345.678-5 or 123456785
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Slots {
            schedule,
            date,
            json,
        } => {
            let week = load_schedule(schedule.as_deref())?;
            let slots = week.slots_for(date);
            tracing::info!(%date, count = slots.len(), "slots generated");

            if json {
                println!("{}", serde_json::to_string_pretty(&slots)?);
            } else {
                for slot in &slots {
                    println!("{}", slot);
                }
            }
        }
        Commands::Availability {
            schedule,
            date,
            booked,
            booked_file,
            json,
        } => {
            let week = load_schedule(schedule.as_deref())?;
            let booking = load_bookings(booked, booked_file.as_deref())?;
            let availability = reconcile(&week.slots_for(date), &booking);

            if json {
                println!("{}", serde_json::to_string_pretty(&availability)?);
            } else {
                for slot in &availability {
                    let state = if slot.is_booked { "booked" } else { "free" };
                    println!("{}  {}", slot.time.format("%H:%M"), state);
                }
                println!(
                    "{} of {} slots free",
                    count_bookable(&availability),
                    availability.len()
                );
            }
        }
        Commands::Validate { schedule } => {
            let week = load_schedule(schedule.as_deref())?;
            week.validate().context("Schedule failed validation")?;
            println!("Schedule OK");
        }
        Commands::Rut { value } => match value.parse::<Rut>() {
            Ok(rut) => println!("{}", rut),
            Err(e) => {
                println!("Invalid RUT: {}", e);
                process::exit(1);
            }
        },
    }

    Ok(())
}

/// Install the stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_schedule(path: Option<&str>) -> Result<WeeklySchedule> {
    let json = read_input(path)?;
    WeeklySchedule::from_json(&json).context("Failed to parse weekly schedule")
}

/// Merge `--booked` values with the contents of `--booked-file`.
fn load_bookings(mut booked: Vec<String>, booked_file: Option<&str>) -> Result<BookingState> {
    if let Some(path) = booked_file {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path))?;
        let from_file: Vec<String> = serde_json::from_str(&json)
            .with_context(|| format!("Expected a JSON array of times in {}", path))?;
        booked.extend(from_file);
    }
    Ok(BookingState::from_times(booked))
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
