use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::ViewerArgs;
use crate::args::parsers::parse_base_url;
use crate::error::{AppError, AppResult, ConfigError};

use super::types::{ConfigFile, DurationValue};

/// Applies configuration values to CLI arguments.
///
/// # Errors
///
/// Returns an error when a config value is invalid.
pub fn apply_config(
    args: &mut ViewerArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_explicit(matches, "base_url")
        && let Some(base_url) = config.base_url.as_deref()
    {
        args.base_url = parse_base_url(base_url).map_err(|err| match err {
            AppError::Validation(source) => {
                AppError::config(ConfigError::InvalidBaseUrl { source })
            }
            other => other,
        })?;
    }

    if !is_explicit(matches, "tick_interval")
        && let Some(value) = config.tick_interval.as_ref()
    {
        args.tick_interval = config_duration(value, "tick_interval")?;
    }

    if !is_explicit(matches, "completion_delay")
        && let Some(value) = config.completion_delay.as_ref()
    {
        args.completion_delay = config_duration(value, "completion_delay")?;
    }

    if !is_explicit(matches, "request_timeout")
        && let Some(value) = config.request_timeout.as_ref()
    {
        args.request_timeout = config_duration(value, "request_timeout")?;
    }

    if !is_explicit(matches, "no_ui")
        && let Some(no_ui) = config.no_ui
    {
        args.no_ui = no_ui;
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

/// Global flags are recorded on the matches of whichever subcommand they were
/// typed after, so every level is checked.
fn is_explicit(matches: &ArgMatches, name: &str) -> bool {
    let mut current = Some(matches);
    while let Some(level) = current {
        if matches!(
            level.value_source(name),
            Some(ValueSource::CommandLine | ValueSource::EnvVariable)
        ) {
            return true;
        }
        current = level.subcommand().map(|(_, sub)| sub);
    }
    false
}

fn config_duration(
    value: &DurationValue,
    field: &'static str,
) -> AppResult<std::time::Duration> {
    value
        .to_duration()
        .map_err(|source| AppError::config(ConfigError::InvalidDuration { field, source }))
}
