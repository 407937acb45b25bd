use std::ffi::OsString;
use std::io::IsTerminal;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::ViewerArgs;
use crate::config::{apply_config, load_config};
use crate::error::{AppError, AppResult, ValidationError};

/// Parses arguments, merges the config file, and runs the selected command
/// on a multi-thread runtime.
///
/// # Errors
///
/// Returns an error when arguments or config are invalid, the runtime cannot
/// be built, or the command fails.
pub fn run() -> AppResult<()> {
    let (mut args, matches) = match parse_args()? {
        Some(parsed) => parsed,
        None => return Ok(()),
    };

    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &matches, &config)?;
    }
    if !args.no_ui && !std::io::stdout().is_terminal() {
        args.no_ui = true;
    }

    crate::logger::init_logging(args.verbose, args.no_color);
    tracing::debug!(
        base_url = %args.base_url,
        tick_interval = ?args.tick_interval,
        completion_delay = ?args.completion_delay,
        no_ui = args.no_ui,
        "Starting fleetview"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(ValidationError::RuntimeBuildFailed { source: err }))?;

    runtime.block_on(crate::app::run(args))
}

fn parse_args() -> AppResult<Option<(ViewerArgs, ArgMatches)>> {
    let mut cmd = ViewerArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = ViewerArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--")
}
