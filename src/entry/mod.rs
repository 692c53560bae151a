mod plan;

use std::io::IsTerminal;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::LookArgs;
use crate::error::AppResult;
use plan::{build_plan, execute_plan};

/// Parses arguments, applies the config file, and runs the selected plan on
/// a fresh multi-threaded runtime.
///
/// # Errors
///
/// Returns an error when arguments or config are invalid, authentication
/// fails, or the selected command fails.
pub fn run() -> AppResult<()> {
    let (mut args, matches) = parse_args()?;
    apply_config(&mut args, &matches)?;

    let plan = build_plan(&args, std::io::stdout().is_terminal());
    if !plan.is_interactive() || args.verbose {
        crate::system::logger::init_logging(args.verbose, args.no_color);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(execute_plan(plan, &args))
}

fn parse_args() -> AppResult<(LookArgs, ArgMatches)> {
    let matches = LookArgs::command().get_matches();
    let args = LookArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

fn apply_config(args: &mut LookArgs, matches: &ArgMatches) -> AppResult<()> {
    if let Some(config) = crate::config::load_config(args.config.as_deref())? {
        crate::config::apply_config(args, matches, &config)?;
    }
    Ok(())
}
