use clap::{Args, Parser, Subcommand};
use std::time::Duration;
use url::Url;

use crate::domain::{RouteFilter, VehicleCategory};

use super::defaults::{
    DEFAULT_BASE_URL, DEFAULT_COMPLETION_DELAY, DEFAULT_REQUEST_TIMEOUT, DEFAULT_TICK_INTERVAL,
};
use super::parsers::{
    parse_base_url, parse_category, parse_duration_arg, parse_ride_number, parse_route_filter,
};

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Replay a vehicle's GPS trace on the map
    Track(TrackArgs),
    /// Show fleet status counts and vehicle positions
    Fleet(FleetArgs),
    /// Browse recorded rides
    History(HistoryArgs),
}

#[derive(Debug, Args, Clone)]
pub struct TrackArgs {
    /// Vehicle to track; lists the moving vehicles when omitted
    pub vehicle_id: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct FleetArgs {
    /// Read the static fleet snapshot instead of the live roster
    #[arg(long = "snapshot")]
    pub snapshot: bool,

    /// Place a marker for every vehicle of this category (free, idle)
    #[arg(long = "show", value_parser = parse_category)]
    pub show: Option<VehicleCategory>,
}

#[derive(Debug, Args, Clone)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: HistoryCommand,
}

#[derive(Debug, Subcommand, Clone)]
pub enum HistoryCommand {
    /// List vehicles with recorded rides
    Vehicles,
    /// List the rides of a vehicle
    Rides {
        /// Vehicle whose rides are listed
        vehicle_id: String,
    },
    /// Show the start and end time of a ride
    Ride {
        /// Ride number
        #[arg(value_parser = parse_ride_number)]
        ride_no: u32,
    },
    /// Draw a past ride or its break points
    Route(RouteArgs),
}

#[derive(Debug, Args, Clone)]
pub struct RouteArgs {
    /// Ride number
    #[arg(value_parser = parse_ride_number)]
    pub ride_no: Option<u32>,

    /// Vehicle that drove the ride
    #[arg(long = "vehicle")]
    pub vehicle_id: Option<String>,

    /// What to draw: the full ride or only its break points
    #[arg(long = "filter", default_value = "ride", value_parser = parse_route_filter)]
    pub filter: RouteFilter,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Terminal viewer for a vehicle fleet: live GPS replay, fleet status, and ride history."
)]
pub struct ViewerArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the fleet backend
    #[arg(
        long = "base-url",
        env = "FLEETVIEW_BASE_URL",
        default_value = DEFAULT_BASE_URL,
        value_parser = parse_base_url,
        global = true
    )]
    pub base_url: Url,

    /// Path to config file (TOML or JSON)
    #[arg(long = "config", global = true)]
    pub config: Option<String>,

    /// Time between two playback steps (supports ms/s/m/h)
    #[arg(
        long = "tick-interval",
        default_value = DEFAULT_TICK_INTERVAL,
        value_parser = parse_duration_arg,
        global = true
    )]
    pub tick_interval: Duration,

    /// How long "Ride Completed" stays up before tracking resets (supports ms/s/m/h)
    #[arg(
        long = "completion-delay",
        default_value = DEFAULT_COMPLETION_DELAY,
        value_parser = parse_duration_arg,
        global = true
    )]
    pub completion_delay: Duration,

    /// Timeout for each backend request (supports ms/s/m/h)
    #[arg(
        long = "request-timeout",
        default_value = DEFAULT_REQUEST_TIMEOUT,
        value_parser = parse_duration_arg,
        global = true
    )]
    pub request_timeout: Duration,

    /// Print plain lines instead of the terminal map
    #[arg(long = "no-ui", global = true)]
    pub no_ui: bool,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long = "verbose", short = 'v', global = true)]
    pub verbose: bool,
}
