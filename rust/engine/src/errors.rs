use thiserror::Error;

use crate::cards::CardId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("Hand size {hand_size} exceeds deck size {deck_size}")]
    InsufficientDeckSize { deck_size: usize, hand_size: usize },
    #[error("Target hand #{index} has no conditions")]
    EmptyTargetHand { index: usize },
    #[error("Invalid trial count: {trials}, minimum: 1")]
    InvalidTrialCount { trials: u64 },
    #[error("Card {card} appears {count} times (max {max} copies)")]
    CopyLimitExceeded { card: CardId, count: usize, max: usize },
    #[error("Simulation cancelled")]
    Cancelled,
}
