//! Request and card database files.
//!
//! A request file carries the deck and the target hands; every other field
//! is optional and falls back to the command-line flags, then the config.

use serde::Deserialize;

use handsim_engine::cards::{CardDatabase, CardId, CardLookup, NoMetadata};
use handsim_engine::condition::TargetHand;
use handsim_engine::simulation::SimulationRequest;

use crate::config::Config;
use crate::error::CliError;
use crate::io_utils::read_text_auto;

/// Request as written on disk.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestFile {
    pub deck: Vec<CardId>,
    pub targets: Vec<TargetHand>,
    #[serde(default)]
    pub hand_size: Option<usize>,
    #[serde(default)]
    pub trials: Option<u64>,
    #[serde(default)]
    pub exclusive: Option<bool>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub max_copies: Option<usize>,
}

/// Values given on the command line; they win over the file and the config.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub trials: Option<u64>,
    pub hand_size: Option<usize>,
    pub seed: Option<u64>,
    pub max_copies: Option<usize>,
    /// `--exclusive` can only switch exclusive mode on
    pub exclusive: bool,
}

impl RequestFile {
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Layer the file over `cfg` and `overrides` over the file.
    pub fn resolve(self, cfg: &Config, overrides: &Overrides) -> SimulationRequest {
        let mut request = SimulationRequest::new(
            self.deck,
            overrides
                .hand_size
                .or(self.hand_size)
                .unwrap_or(cfg.hand_size),
            overrides.trials.or(self.trials).unwrap_or(cfg.trials),
            self.targets,
        )
        .with_exclusive(overrides.exclusive || self.exclusive.unwrap_or(cfg.exclusive))
        .with_max_copies(
            overrides
                .max_copies
                .or(self.max_copies)
                .unwrap_or(cfg.max_copies),
        );
        request.seed = overrides.seed.or(self.seed).or(cfg.seed);
        request
    }
}

pub fn load_request(path: &str, cfg: &Config, overrides: &Overrides) -> Result<SimulationRequest, CliError> {
    let text = read_text_auto(path).map_err(CliError::InvalidInput)?;
    let file = RequestFile::parse(&text)
        .map_err(|e| CliError::InvalidInput(format!("{}: invalid request: {}", path, e)))?;
    tracing::debug!(
        path,
        deck = file.deck.len(),
        targets = file.targets.len(),
        "request loaded"
    );
    Ok(file.resolve(cfg, overrides))
}

/// Card metadata source for a run: a loaded database, or none at all.
pub enum Cards {
    Database(CardDatabase),
    Empty,
}

impl Cards {
    pub fn lookup(&self) -> &dyn CardLookup {
        match self {
            Cards::Database(db) => db,
            Cards::Empty => &NoMetadata,
        }
    }
}

pub fn load_cards(path: Option<&str>) -> Result<Cards, CliError> {
    let Some(path) = path else {
        return Ok(Cards::Empty);
    };
    let text = read_text_auto(path).map_err(CliError::InvalidInput)?;
    let db = CardDatabase::from_json(&text)
        .map_err(|e| CliError::InvalidInput(format!("{}: invalid card database: {}", path, e)))?;
    tracing::debug!(path, cards = db.len(), "card database loaded");
    Ok(Cards::Database(db))
}
