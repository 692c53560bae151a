use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{LookArgs, PositiveU64, parse_window};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};
use crate::timeline::CustomHours;

use super::types::{ConfigFile, DurationValue};

/// Applies configuration values to CLI arguments.
///
/// # Errors
///
/// Returns an error when config values are invalid or conflict with each other.
pub fn apply_config(args: &mut LookArgs, matches: &ArgMatches, config: &ConfigFile) -> AppResult<()> {
    if config.token.is_some() && config.username.is_some() {
        return Err(AppError::config(ConfigError::Conflict {
            left: "token",
            right: "username",
        }));
    }

    if !is_explicit(matches, "api_url")
        && let Some(api_url) = config.api_url.as_ref()
    {
        args.api_url.clone_from(api_url);
    }

    if !is_explicit(matches, "token")
        && let Some(token) = config.token.as_ref()
    {
        args.token = Some(token.clone());
    }

    if !is_explicit(matches, "username")
        && let Some(username) = config.username.as_ref()
    {
        args.username = Some(username.clone());
    }

    if !is_explicit(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = to_duration(timeout, "timeout")?;
    }

    if !is_explicit(matches, "refresh_interval")
        && let Some(refresh) = config.refresh.as_ref()
    {
        args.refresh_interval = to_duration(refresh, "refresh")?;
    }

    if !is_explicit(matches, "history_limit")
        && let Some(limit) = config.history_limit
    {
        args.history_limit = ensure_positive_u64(limit, "history_limit")?;
    }

    if !is_explicit(matches, "window")
        && let Some(window) = config.window.as_deref()
    {
        args.window = parse_window(window).map_err(|err| invalid_field("window", err))?;
    }

    if !is_explicit(matches, "custom_hours")
        && let Some(hours) = config.custom_hours
    {
        args.custom_hours = CustomHours::clamped(hours);
    }

    if !is_explicit(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    if !is_explicit(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    Ok(())
}

fn is_explicit(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}

fn to_duration(value: &DurationValue, field: &'static str) -> AppResult<std::time::Duration> {
    value
        .to_duration()
        .map_err(|err| invalid_field(field, err))
}

fn ensure_positive_u64(value: u64, field: &str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn invalid_field(field: &'static str, source: ValidationError) -> AppError {
    AppError::config(ConfigError::InvalidField { field, source })
}
