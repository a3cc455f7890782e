//! CLI definition using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use hos_app::app::LocationInput;
use hos_domain::model::DutyStatus;
use hos_types::OutputFormat;

#[derive(Parser)]
#[command(name = "hos-planner")]
#[command(version)]
#[command(about = "Hours-of-service compliance checks and HOS-aware trip planning")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// TOML file overriding compliance limits for this run
    #[arg(long, global = true)]
    pub limits: Option<PathBuf>,

    /// Store directory override for this run
    #[arg(long, global = true)]
    pub store_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate duty periods from a CSV file
    Check {
        /// CSV with status,start_time,end_time[,notes]
        periods: PathBuf,

        /// On-duty hours already used in the current cycle
        #[arg(long, default_value = "0")]
        cycle_hours: f64,
    },

    /// Generate a duty schedule
    Schedule {
        /// Start instant (ISO-8601). 06:00 UTC today if omitted or unreadable.
        #[arg(long, short = 's', default_value = "")]
        start: String,

        /// Total driving hours to schedule, above 0 and at most 700
        #[arg(long)]
        hours: f64,

        /// Evaluate the generated schedule with this many prior cycle hours
        #[arg(long, default_value = "0")]
        cycle_hours: f64,
    },

    /// Plan a route between three points without storing it
    Route {
        /// Starting point ("lat,lon" or an address)
        #[arg(long)]
        origin: LocationInput,

        /// Pickup point ("lat,lon" or an address)
        #[arg(long)]
        pickup: LocationInput,

        /// Dropoff point ("lat,lon" or an address)
        #[arg(long)]
        dropoff: LocationInput,

        #[command(flatten)]
        baseline: BaselineArgs,

        /// Departure instant (ISO-8601). Now if omitted.
        #[arg(long)]
        departure: Option<String>,
    },

    /// Manage HOS logs
    Log {
        #[command(subcommand)]
        command: LogCommands,
    },

    /// Manage trips
    Trip {
        #[command(subcommand)]
        command: TripCommands,
    },

    /// Fleet compliance report over stored logs
    Report {
        /// Only this driver's logs
        #[arg(long, short = 'd')]
        driver: Option<String>,

        /// List the driver's logs one per row (requires --driver)
        #[arg(long)]
        history: bool,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set store directory
        #[arg(long)]
        set_store_dir: Option<PathBuf>,

        /// Set max driving hours
        #[arg(long)]
        set_max_driving: Option<f64>,

        /// Set max on-duty hours
        #[arg(long)]
        set_max_on_duty: Option<f64>,

        /// Set max cycle hours
        #[arg(long)]
        set_max_cycle: Option<f64>,

        /// Set geocoder search URL
        #[arg(long)]
        set_geocoder_url: Option<String>,

        /// Set geocoder country codes (e.g. "us,ca")
        #[arg(long)]
        set_country_codes: Option<String>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(clap::Args, Clone, Copy, Debug)]
pub struct BaselineArgs {
    /// Driving hours already used before departure
    #[arg(long, default_value = "0")]
    pub driving_hours_used: f64,

    /// Mark the driver as unable to continue driving
    #[arg(long)]
    pub cannot_continue: bool,
}

#[derive(Subcommand)]
pub enum LogCommands {
    /// Create a new log
    Create {
        /// Driver ID
        #[arg(long, short = 'd')]
        driver: String,

        /// On-duty hours already used in the current cycle
        #[arg(long, default_value = "0")]
        cycle_hours: f64,

        /// Related trip ID
        #[arg(long)]
        trip: Option<String>,

        /// IANA time zone label stored with the log
        #[arg(long)]
        time_zone: Option<String>,

        /// Shipping document number
        #[arg(long)]
        shipping_document: Option<String>,

        #[arg(long)]
        commodity: Option<String>,
    },

    /// Append one duty period
    AddPeriod {
        log_id: String,

        /// driving, on_duty, off_duty, sleeper_berth
        #[arg(long)]
        status: DutyStatus,

        #[arg(long)]
        start: String,

        /// Leave out for a period still in progress
        #[arg(long)]
        end: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Import duty periods from CSV
    Import {
        log_id: String,

        /// CSV with status,start_time,end_time[,notes]
        file: PathBuf,

        /// Replace existing periods instead of appending
        #[arg(long)]
        replace: bool,
    },

    /// Show one log
    Show { log_id: String },

    /// List logs, newest first
    List {
        #[arg(long, short = 'd')]
        driver: Option<String>,
    },

    /// Evaluate a log and store its violations
    Check { log_id: String },

    /// Generate a schedule and store it as the log's duty periods
    Schedule {
        log_id: String,

        /// Start instant (ISO-8601)
        #[arg(long, short = 's')]
        start: Option<String>,

        /// Total driving hours
        #[arg(long)]
        hours: Option<f64>,
    },
}

#[derive(Subcommand)]
pub enum TripCommands {
    /// Create a new trip
    Create {
        #[arg(long, short = 'd')]
        driver: Option<String>,

        #[arg(long)]
        vehicle: Option<String>,

        #[arg(long, default_value = "0")]
        cycle_hours: f64,

        /// Current location ("lat,lon" or an address)
        #[arg(long)]
        origin: Option<LocationInput>,

        #[arg(long)]
        pickup: Option<LocationInput>,

        #[arg(long)]
        dropoff: Option<LocationInput>,

        #[arg(long)]
        commodity: Option<String>,
    },

    /// Plan the trip's route and store its waypoints
    Plan {
        trip_id: String,

        /// Overrides the stored current location
        #[arg(long)]
        origin: Option<LocationInput>,

        /// Overrides the stored pickup location
        #[arg(long)]
        pickup: Option<LocationInput>,

        /// Overrides the stored dropoff location
        #[arg(long)]
        dropoff: Option<LocationInput>,

        #[command(flatten)]
        baseline: BaselineArgs,
    },

    /// Show one trip
    Show { trip_id: String },

    /// List trips, newest first
    List,
}
