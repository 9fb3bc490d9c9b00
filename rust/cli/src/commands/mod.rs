//! Command handler modules for the `handsim` CLI.
//!
//! Each command lives in its own file and follows the same shape:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) passed as parameters
//! - All errors propagated via `CliError`; [`crate::run`] maps them to exit codes

pub mod cfg;
pub mod check;
pub mod deal;
pub mod odds;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use check::handle_check_command;
pub use deal::handle_deal_command;
pub use odds::handle_odds_command;
pub use sim::{SimOptions, handle_sim_command};

use handsim_engine::simulation::SimulationRequest;

use crate::cli::RequestArgs;
use crate::config::{self, Config};
use crate::error::CliError;
use crate::request::{self, Cards, Overrides};

fn load_config() -> Result<Config, CliError> {
    config::load().map_err(|e| CliError::Config(format!("Invalid configuration: {}", e)))
}

/// Resolve config, request file and card database for one command.
fn load_inputs(
    args: &RequestArgs,
    mut overrides: Overrides,
) -> Result<(SimulationRequest, Cards, Config), CliError> {
    let cfg = load_config()?;
    overrides.hand_size = overrides.hand_size.or(args.hand_size);
    overrides.max_copies = overrides.max_copies.or(args.max_copies);
    let request = request::load_request(&args.request, &cfg, &overrides)?;
    let cards = request::load_cards(args.cards.as_deref())?;
    Ok((request, cards, cfg))
}
