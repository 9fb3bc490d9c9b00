//! # handsim CLI Library
//!
//! Command-line front end for the `handsim-engine` opening hand simulator.
//! Requests (deck plus target hands) and card metadata are read from JSON
//! files; results are printed as a table or as JSON.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["handsim", "sim", "--request", "starter.json", "--cards", "cards.json"];
//! let code = handsim_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `sim`: Run a simulation and report hit rates
//! - `deal`: Deal a single hand for inspection
//! - `check`: Validate a request without running it
//! - `odds`: Exact probability for a single card
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
mod request;
pub mod ui;

use cli::{Commands, HandsimCli};
use commands::odds::Bound;
use commands::{
    SimOptions, handle_cfg_command, handle_check_command, handle_deal_command,
    handle_odds_command, handle_sim_command,
};
use request::Overrides;

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand handler.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` when a run is cancelled
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["handsim", "odds", "--deck-size", "40", "--copies", "3", "--hand-size", "5"];
/// let code = handsim_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["sim", "deal", "check", "odds", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HandsimCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    let _ = print_usage(err, &e.to_string(), COMMANDS);
                    exit_code::ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Sim {
            request,
            trials,
            seed,
            exclusive,
            parallel,
            max_seconds,
            output,
            json,
        } => {
            let overrides = Overrides {
                trials,
                seed,
                exclusive,
                ..Overrides::default()
            };
            let opts = SimOptions {
                parallel,
                max_seconds,
                output,
                json,
            };
            handle_sim_command(&request, overrides, &opts, out, err)
        }
        Commands::Deal { request, seed } => handle_deal_command(&request, seed, out, err),
        Commands::Check { request } => handle_check_command(&request, out, err),
        Commands::Odds {
            deck_size,
            copies,
            hand_size,
            at_least,
            exactly,
        } => {
            let bound = match exactly {
                Some(k) => Bound::Exactly(k),
                None => Bound::AtLeast(at_least.unwrap_or(1)),
            };
            handle_odds_command(deck_size, copies, hand_size, bound, out)
        }
        Commands::Cfg => handle_cfg_command(out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            let _ = ui::write_error(err, &e.to_string());
            match e {
                CliError::Interrupted(_) => exit_code::INTERRUPTED,
                _ => exit_code::ERROR,
            }
        }
    }
}

fn print_usage(err: &mut dyn Write, clap_msg: &str, commands: &[&str]) -> std::io::Result<()> {
    writeln!(err, "{}", clap_msg)?;
    writeln!(err)?;
    writeln!(err, "handsim opening hand simulator")?;
    writeln!(err, "Usage: handsim <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in commands {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: handsim --help")
}
