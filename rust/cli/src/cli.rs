//! Command-line definitions (clap derive).

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "handsim",
    version,
    about = "Estimate how often an opening hand hits your target combinations"
)]
pub struct HandsimCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Flags that override values from the request file and the config.
#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// Request file (JSON, optionally .zst compressed)
    #[arg(long)]
    pub request: String,
    /// Card metadata database (JSON array)
    #[arg(long)]
    pub cards: Option<String>,
    /// Cards per hand
    #[arg(long)]
    pub hand_size: Option<usize>,
    /// Maximum copies of one card in the deck
    #[arg(long)]
    pub max_copies: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a simulation and report hit rates per target hand
    Sim {
        #[command(flatten)]
        request: RequestArgs,
        /// Number of hands to draw
        #[arg(long)]
        trials: Option<u64>,
        #[arg(long)]
        seed: Option<u64>,
        /// Count each hand toward the first matching target only
        #[arg(long)]
        exclusive: bool,
        /// Spread trials across all CPU cores
        #[arg(long)]
        parallel: bool,
        /// Cancel the run after this many seconds
        #[arg(long)]
        max_seconds: Option<f64>,
        /// Append a run record (JSONL) to this file
        #[arg(long)]
        output: Option<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Draw a single hand and show which targets it satisfies
    Deal {
        #[command(flatten)]
        request: RequestArgs,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Validate a request without drawing any hands
    Check {
        #[command(flatten)]
        request: RequestArgs,
    },
    /// Exact probability of drawing copies of a single card
    Odds {
        #[arg(long)]
        deck_size: u64,
        /// Copies of the card in the deck
        #[arg(long)]
        copies: u64,
        #[arg(long)]
        hand_size: u64,
        /// Probability of at least K copies (default 1)
        #[arg(long, conflicts_with = "exactly")]
        at_least: Option<u64>,
        /// Probability of exactly K copies
        #[arg(long)]
        exactly: Option<u64>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        HandsimCli::command().debug_assert();
    }

    #[test]
    fn sim_flags_parse() {
        let cli = HandsimCli::try_parse_from([
            "handsim",
            "sim",
            "--request",
            "r.json",
            "--trials",
            "500",
            "--exclusive",
            "--max-seconds",
            "1.5",
        ])
        .unwrap();
        match cli.cmd {
            Commands::Sim {
                request,
                trials,
                exclusive,
                max_seconds,
                parallel,
                ..
            } => {
                assert_eq!(request.request, "r.json");
                assert_eq!(trials, Some(500));
                assert!(exclusive);
                assert!(!parallel);
                assert_eq!(max_seconds, Some(1.5));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn odds_bounds_conflict() {
        let res = HandsimCli::try_parse_from([
            "handsim",
            "odds",
            "--deck-size",
            "40",
            "--copies",
            "3",
            "--hand-size",
            "5",
            "--at-least",
            "1",
            "--exactly",
            "1",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn request_is_required() {
        assert!(HandsimCli::try_parse_from(["handsim", "check"]).is_err());
    }
}
