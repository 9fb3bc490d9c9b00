//! Simulation driver: repeated draws scored against target hands.
//!
//! Trials are grouped into fixed chunks of [`CHUNK_TRIALS`]. Every chunk owns
//! an RNG seeded from the run seed and the chunk index, so a run's result
//! depends only on its seed: sequential and parallel execution produce
//! identical hit counts.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardLookup};
use crate::condition::TargetHand;
use crate::deck::{Deck, HandSampler, DEFAULT_MAX_COPIES};
use crate::errors::SimError;
use crate::matcher::{CompiledTarget, RemainingCounts};

/// Trials drawn from one chunk RNG
pub const CHUNK_TRIALS: u64 = 1024;

const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

fn default_max_copies() -> usize {
    DEFAULT_MAX_COPIES
}

/// Seed of the RNG driving chunk `chunk` of a run seeded with `base`.
pub fn chunk_seed(base: u64, chunk: u64) -> u64 {
    base.wrapping_add(chunk.wrapping_add(1).wrapping_mul(SEED_STRIDE))
}

/// Everything needed for one simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// Main deck, one entry per physical card
    pub deck: Vec<CardId>,
    pub hand_size: usize,
    pub trials: u64,
    pub targets: Vec<TargetHand>,
    /// Count each hand toward at most one target (the first listed that matches)
    #[serde(default)]
    pub exclusive: bool,
    /// Fixed seed; a fresh one is drawn when absent
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_max_copies")]
    pub max_copies: usize,
}

impl SimulationRequest {
    pub fn new(deck: Vec<CardId>, hand_size: usize, trials: u64, targets: Vec<TargetHand>) -> Self {
        Self {
            deck,
            hand_size,
            trials,
            targets,
            exclusive: false,
            seed: None,
            max_copies: DEFAULT_MAX_COPIES,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_exclusive(mut self, exclusive: bool) -> Self {
        self.exclusive = exclusive;
        self
    }

    pub fn with_max_copies(mut self, max_copies: usize) -> Self {
        self.max_copies = max_copies;
        self
    }

    /// Check every precondition and build the deck.
    ///
    /// # Errors
    ///
    /// - [`SimError::InvalidTrialCount`] when `trials` is zero
    /// - [`SimError::EmptyTargetHand`] for the first target without conditions
    /// - [`SimError::CopyLimitExceeded`] when a card exceeds `max_copies`
    /// - [`SimError::InsufficientDeckSize`] when the hand is larger than the deck
    pub fn validate(&self) -> Result<Deck, SimError> {
        if self.trials < 1 {
            return Err(SimError::InvalidTrialCount {
                trials: self.trials,
            });
        }
        if let Some(index) = self.targets.iter().position(|t| t.conditions.is_empty()) {
            return Err(SimError::EmptyTargetHand { index });
        }
        let deck = Deck::new(self.deck.iter().cloned(), self.max_copies)?;
        if deck.len() < self.hand_size {
            return Err(SimError::InsufficientDeckSize {
                deck_size: deck.len(),
                hand_size: self.hand_size,
            });
        }
        Ok(deck)
    }
}

/// Aggregate outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub trials: u64,
    /// Seed the run actually used
    pub seed: u64,
    pub exclusive: bool,
    /// Hit count per target, in request order
    pub hits: Vec<u64>,
    /// Deck cards without metadata while filter cards were in use
    #[serde(default)]
    pub missing_metadata: Vec<CardId>,
}

impl SimulationResult {
    /// Hit rate of target `index` in percent, rounded to 2 decimals.
    pub fn percentage(&self, index: usize) -> f64 {
        percent(self.hits[index], self.trials)
    }

    pub fn percentages(&self) -> Vec<f64> {
        self.hits.iter().map(|&h| percent(h, self.trials)).collect()
    }

    pub fn total_hits(&self) -> u64 {
        self.hits.iter().sum()
    }
}

/// `hits / trials * 100`, rounded to 2 decimals
pub fn percent(hits: u64, trials: u64) -> f64 {
    if trials == 0 {
        return 0.0;
    }
    (hits as f64 / trials as f64 * 10_000.0).round() / 100.0
}

/// Shared flag a caller flips to abort a run between trials.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// One hand drawn for inspection, with its outcome per target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DealtHand {
    pub cards: Vec<CardId>,
    /// Per target: `None` when matched, else the index of the first failed condition
    pub failures: Vec<Option<usize>>,
}

impl DealtHand {
    pub fn matched(&self) -> Vec<usize> {
        self.failures
            .iter()
            .enumerate()
            .filter_map(|(i, f)| f.is_none().then_some(i))
            .collect()
    }
}

/// Validated, compiled simulation ready to run.
///
/// # Examples
///
/// ```
/// use handsim_engine::cards::{CardId, NoMetadata};
/// use handsim_engine::condition::{Condition, Operator, TargetHand};
/// use handsim_engine::simulation::{CancelToken, SimulationRequest, Simulator};
///
/// let mut deck: Vec<CardId> = (0..37).map(|i| CardId::new(format!("filler{}", i))).collect();
/// deck.extend(std::iter::repeat(CardId::from("X")).take(3));
///
/// let target = TargetHand::named("x", vec![Condition::card("X", Operator::AtLeast, 1)]);
/// let request = SimulationRequest::new(deck, 5, 2_000, vec![target]).with_seed(7);
///
/// let sim = Simulator::new(&request, &NoMetadata).unwrap();
/// let result = sim.run(&CancelToken::new()).unwrap();
/// assert_eq!(result.trials, 2_000);
/// assert!(result.hits[0] > 0 && result.hits[0] < 2_000);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    deck: Deck,
    targets: Vec<CompiledTarget>,
    hand_size: usize,
    trials: u64,
    exclusive: bool,
    seed: u64,
    missing_metadata: Vec<CardId>,
}

impl Simulator {
    pub fn new<L: CardLookup + ?Sized>(
        request: &SimulationRequest,
        lookup: &L,
    ) -> Result<Self, SimError> {
        let deck = request.validate()?;

        let missing_metadata: Vec<CardId> = if request.targets.iter().any(TargetHand::uses_filters) {
            deck.distinct()
                .iter()
                .filter(|id| lookup.metadata(id).is_none())
                .cloned()
                .collect()
        } else {
            Vec::new()
        };
        if !missing_metadata.is_empty() {
            tracing::warn!(
                count = missing_metadata.len(),
                cards = ?missing_metadata,
                "deck cards without metadata cannot satisfy filter cards"
            );
        }

        let targets = request
            .targets
            .iter()
            .map(|t| CompiledTarget::compile(t, &deck, lookup))
            .collect();

        Ok(Self {
            deck,
            targets,
            hand_size: request.hand_size,
            trials: request.trials,
            exclusive: request.exclusive,
            seed: request.seed.unwrap_or_else(rand::random),
            missing_metadata,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn missing_metadata(&self) -> &[CardId] {
        &self.missing_metadata
    }

    fn chunk_count(&self) -> u64 {
        self.trials.div_ceil(CHUNK_TRIALS)
    }

    /// Run every trial on the calling thread.
    pub fn run(&self, cancel: &CancelToken) -> Result<SimulationResult, SimError> {
        tracing::debug!(
            trials = self.trials,
            hand_size = self.hand_size,
            targets = self.targets.len(),
            exclusive = self.exclusive,
            seed = self.seed,
            "running simulation"
        );
        let mut hits = vec![0u64; self.targets.len()];
        for chunk in 0..self.chunk_count() {
            let chunk_hits = self.run_chunk(chunk, cancel)?;
            merge(&mut hits, &chunk_hits);
        }
        Ok(self.finish(hits))
    }

    /// Run chunks across the rayon thread pool. Same result as [`Simulator::run`].
    pub fn run_parallel(&self, cancel: &CancelToken) -> Result<SimulationResult, SimError> {
        tracing::debug!(
            trials = self.trials,
            chunks = self.chunk_count(),
            threads = rayon::current_num_threads(),
            seed = self.seed,
            "running simulation in parallel"
        );
        let hits = (0..self.chunk_count())
            .into_par_iter()
            .map(|chunk| self.run_chunk(chunk, cancel))
            .try_reduce(
                || vec![0u64; self.targets.len()],
                |mut acc, chunk_hits| {
                    merge(&mut acc, &chunk_hits);
                    Ok(acc)
                },
            )?;
        Ok(self.finish(hits))
    }

    fn run_chunk(&self, chunk: u64, cancel: &CancelToken) -> Result<Vec<u64>, SimError> {
        let start = chunk * CHUNK_TRIALS;
        let len = CHUNK_TRIALS.min(self.trials - start);
        let mut sampler = HandSampler::new_with_seed(chunk_seed(self.seed, chunk));
        let mut remaining = RemainingCounts::new(&self.deck);
        let mut hits = vec![0u64; self.targets.len()];

        for _ in 0..len {
            if cancel.is_cancelled() {
                tracing::info!(chunk, "simulation cancelled");
                return Err(SimError::Cancelled);
            }
            let hand = sampler.draw(&self.deck, self.hand_size)?;
            self.tally(hand, &mut remaining, &mut hits);
        }
        Ok(hits)
    }

    fn tally(&self, hand: &[usize], remaining: &mut RemainingCounts, hits: &mut [u64]) {
        for (i, target) in self.targets.iter().enumerate() {
            if target.matches(hand, remaining) {
                hits[i] += 1;
                if self.exclusive {
                    break;
                }
            }
        }
    }

    fn finish(&self, hits: Vec<u64>) -> SimulationResult {
        SimulationResult {
            trials: self.trials,
            seed: self.seed,
            exclusive: self.exclusive,
            hits,
            missing_metadata: self.missing_metadata.clone(),
        }
    }

    /// Draw a single hand and report how each target fares on it.
    pub fn deal(&self, seed: u64) -> Result<DealtHand, SimError> {
        let mut sampler = HandSampler::new_with_seed(seed);
        let mut remaining = RemainingCounts::new(&self.deck);
        let hand = sampler.draw(&self.deck, self.hand_size)?;
        let failures = self
            .targets
            .iter()
            .map(|t| t.first_failure(hand, &mut remaining))
            .collect();
        Ok(DealtHand {
            cards: self.deck.ids_of(hand),
            failures,
        })
    }
}

fn merge(acc: &mut [u64], hits: &[u64]) {
    for (a, h) in acc.iter_mut().zip(hits) {
        *a += h;
    }
}

/// Validate, compile and run a request on the calling thread.
pub fn simulate<L: CardLookup + ?Sized>(
    request: &SimulationRequest,
    lookup: &L,
) -> Result<SimulationResult, SimError> {
    Simulator::new(request, lookup)?.run(&CancelToken::new())
}
