use clap::{Args, Parser, Subcommand};
use std::time::Duration;

use crate::timeline::{CustomHours, WindowPreset};

use super::defaults::{
    DEFAULT_API_URL, DEFAULT_CUSTOM_HOURS, DEFAULT_HISTORY_LIMIT, DEFAULT_REFRESH, DEFAULT_TIMEOUT,
    DEFAULT_WINDOW,
};
use super::parsers::{
    parse_custom_hours, parse_device_id, parse_duration_arg, parse_positive_u64, parse_window_arg,
};
use super::types::PositiveU64;

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Interactive map with device list, details and the history timeline (default)
    Dashboard,
    /// Print the device list and exit
    Devices,
    /// Print one device's details and its windowed location history
    Device(DeviceArgs),
    /// Log in with --username/--password and print the access token
    Login,
}

#[derive(Debug, Args, Clone, PartialEq, Eq)]
pub struct DeviceArgs {
    /// Device identifier as reported by the API
    #[arg(value_parser = parse_device_id)]
    pub device_id: String,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Terminal dashboard for live and historical device locations - fleet map, device details, and a timeline scrubber for replaying location trails."
)]
pub struct LookArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to config file (TOML or JSON)
    #[arg(long = "config", global = true)]
    pub config: Option<String>,

    /// Base URL of the location API
    #[arg(long = "api-url", env = "NYANLOOK_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Bearer token to use instead of logging in
    #[arg(long, env = "NYANLOOK_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Username for login
    #[arg(long, env = "NYANLOOK_USERNAME", global = true)]
    pub username: Option<String>,

    /// Password for login
    #[arg(long, env = "NYANLOOK_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Request timeout (supports ms/s/m/h)
    #[arg(long = "timeout", value_parser = parse_duration_arg, default_value = DEFAULT_TIMEOUT, global = true)]
    pub request_timeout: Duration,

    /// Device list refresh interval (supports ms/s/m/h)
    #[arg(long = "refresh", value_parser = parse_duration_arg, default_value = DEFAULT_REFRESH, global = true)]
    pub refresh_interval: Duration,

    /// Location points fetched per device
    #[arg(long = "history-limit", value_parser = parse_positive_u64, default_value = DEFAULT_HISTORY_LIMIT, global = true)]
    pub history_limit: PositiveU64,

    /// Initial time window (1h, 4h, 8h, 24h, 48h, all, custom)
    #[arg(long = "window", value_parser = parse_window_arg, default_value = DEFAULT_WINDOW, global = true)]
    pub window: WindowPreset,

    /// Hours for the custom window, clamped to 1..=8760
    #[arg(long = "custom-hours", value_parser = parse_custom_hours, default_value = DEFAULT_CUSTOM_HOURS, global = true)]
    pub custom_hours: CustomHours,

    /// Print text output instead of the interactive dashboard
    #[arg(long = "no-ui", global = true)]
    pub no_ui: bool,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}
