//! Configuration command handler.
//!
//! Displays the simulation defaults with their sources (default, environment,
//! or configuration file).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "trials": {
//!     "value": 10000,
//!     "source": "default"
//!   },
//!   "seed": {
//!     "value": 42,
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()
        .map_err(|e| CliError::Config(format!("Invalid configuration: {}", e)))?;

    let display = serde_json::json!({
        "trials": {
            "value": config.trials,
            "source": sources.trials,
        },
        "hand_size": {
            "value": config.hand_size,
            "source": sources.hand_size,
        },
        "max_copies": {
            "value": config.max_copies,
            "source": sources.max_copies,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "exclusive": {
            "value": config.exclusive,
            "source": sources.exclusive,
        },
        "parallel": {
            "value": config.parallel,
            "source": sources.parallel,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
