//! `barrio` CLI — expand event occurrences and validate facility schedules.
//!
//! ## Usage
//!
//! ```sh
//! # Expand an event (stdin → stdout)
//! cat event.json | barrio expand
//!
//! # Expand in the community timezone, from file to file
//! barrio --timezone America/Santiago expand -i event.json -o occurrences.json
//!
//! # Validate an event write against the facility's other events
//! barrio check -i schedule_check.json
//!
//! # Validate a literal facility booking
//! barrio book -i booking_check.json
//!
//! # Busy/free time of a facility over a window
//! barrio free -i facility_load.json
//!
//! # Validate a Chilean RUT
//! barrio rut 12.345.678-5
//! ```
//!
//! Validation failures exit with status 1 and print the reason on stderr.

mod settings;

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use barrio_engine::dst::DstPolicy;
use barrio_engine::request::{BookingCheck, FacilityLoad, ScheduleCheck};
use barrio_engine::{config::parse_timezone, EngineConfig, Event};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::settings::Settings;

#[derive(Parser)]
#[command(
    name = "barrio",
    version,
    about = "Occurrence expansion and facility conflict checks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ./barrio.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Community timezone, IANA name (overrides the config file)
    #[arg(long, global = true)]
    timezone: Option<String>,

    /// Days a recurrence may span from its start date (overrides the config file)
    #[arg(long, global = true)]
    horizon_days: Option<u32>,

    /// How to resolve occurrences falling into a DST gap
    #[arg(long, global = true, value_enum)]
    dst_policy: Option<DstPolicyArg>,

    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand an event into its occurrences
    Expand {
        /// Input event JSON (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Print occurrence count and total minutes instead of the list
        #[arg(long)]
        summary: bool,
    },
    /// Validate an event write against other events at its facility
    Check {
        /// Input JSON with `event`, `facility` and `existing`
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Validate a facility booking against existing bookings
    Book {
        /// Input JSON with `booking`, `facility` and `existing`
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Show busy periods and free slots of a facility
    Free {
        /// Input JSON with `facility`, `events`, `bookings` and the window
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Validate a Chilean RUT
    Rut {
        /// RUT with or without dots and dash
        value: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DstPolicyArg {
    Skip,
    ShiftForward,
    WallClock,
}

impl From<DstPolicyArg> for DstPolicy {
    fn from(arg: DstPolicyArg) -> Self {
        match arg {
            DstPolicyArg::Skip => DstPolicy::Skip,
            DstPolicyArg::ShiftForward => DstPolicy::ShiftForward,
            DstPolicyArg::WallClock => DstPolicy::WallClock,
        }
    }
}

#[derive(Serialize)]
struct Summary {
    occurrences: usize,
    total_minutes: i64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = engine_config(&cli)?;
    tracing::debug!(?config, "engine configuration");

    match cli.command {
        Commands::Expand {
            input,
            output,
            summary,
        } => {
            let json = read_input(input.as_deref())?;
            let event: Event = serde_json::from_str(&json).context("Failed to parse event JSON")?;
            event.validate().context("Invalid event")?;

            let occurrences = barrio_engine::expand(&event, &config);
            let rendered = if summary {
                serde_json::to_string_pretty(&Summary {
                    occurrences: occurrences.len(),
                    total_minutes: barrio_engine::total_minutes(&occurrences),
                })?
            } else {
                serde_json::to_string_pretty(&occurrences)?
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Check { input } => {
            let json = read_input(input.as_deref())?;
            let check: ScheduleCheck =
                serde_json::from_str(&json).context("Failed to parse schedule check JSON")?;
            check
                .run(&config)
                .with_context(|| format!("Event {} rejected", check.event.id))?;
            println!("ok");
        }
        Commands::Book { input } => {
            let json = read_input(input.as_deref())?;
            let check: BookingCheck =
                serde_json::from_str(&json).context("Failed to parse booking check JSON")?;
            check
                .run()
                .with_context(|| format!("Booking {} rejected", check.booking.id))?;
            println!("ok");
        }
        Commands::Free { input, output } => {
            let json = read_input(input.as_deref())?;
            let load: FacilityLoad =
                serde_json::from_str(&json).context("Failed to parse facility load JSON")?;
            if load.window_end <= load.window_start {
                anyhow::bail!("window_end must be after window_start");
            }
            let availability = load.run(&config);
            write_output(output.as_deref(), &serde_json::to_string_pretty(&availability)?)?;
        }
        Commands::Rut { value } => {
            barrio_engine::validate_rut(&value)
                .with_context(|| format!("RUT '{}' rejected", value))?;
            println!("valid");
        }
    }

    Ok(())
}

/// Config file first, then command-line overrides.
fn engine_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = Settings::load(cli.config.as_deref())?.engine;

    if let Some(name) = &cli.timezone {
        config.timezone = parse_timezone(name)?;
    }
    if let Some(days) = cli.horizon_days {
        config.horizon_days = days;
    }
    if let Some(policy) = cli.dst_policy {
        config.dst_policy = policy.into();
    }

    config.validate()?;
    Ok(config)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
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
