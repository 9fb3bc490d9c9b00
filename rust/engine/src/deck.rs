use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cards::CardId;
use crate::errors::SimError;

/// Default number of copies of one card allowed in a deck
pub const DEFAULT_MAX_COPIES: usize = 3;

/// Deck as an ordered multiset of card ids.
///
/// Distinct ids are interned in first-seen order; every physical copy keeps
/// its own slot holding the index of its id, so copies of the same card are
/// distinct positions for sampling purposes.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<CardId>,
    index: HashMap<CardId, usize>,
    slots: Vec<usize>,
}

impl Deck {
    /// Build a deck, rejecting any id that appears more than `max_copies` times.
    ///
    /// # Examples
    ///
    /// ```
    /// use handsim_engine::cards::CardId;
    /// use handsim_engine::deck::Deck;
    /// use handsim_engine::errors::SimError;
    ///
    /// let ids: Vec<CardId> = ["a", "a", "b"].into_iter().map(CardId::from).collect();
    /// let deck = Deck::new(ids.clone(), 3).unwrap();
    /// assert_eq!(deck.len(), 3);
    /// assert_eq!(deck.copies(&CardId::from("a")), 2);
    ///
    /// let err = Deck::new(ids, 1).unwrap_err();
    /// assert!(matches!(err, SimError::CopyLimitExceeded { count: 2, max: 1, .. }));
    /// ```
    pub fn new(ids: impl IntoIterator<Item = CardId>, max_copies: usize) -> Result<Self, SimError> {
        let deck = Self::unbounded(ids);
        let mut counts = vec![0usize; deck.cards.len()];
        for &slot in &deck.slots {
            counts[slot] += 1;
        }
        if let Some((i, &count)) = counts.iter().enumerate().find(|(_, c)| **c > max_copies) {
            return Err(SimError::CopyLimitExceeded {
                card: deck.cards[i].clone(),
                count,
                max: max_copies,
            });
        }
        Ok(deck)
    }

    /// Build a deck without a copy limit (used to intern arbitrary hands).
    pub fn unbounded(ids: impl IntoIterator<Item = CardId>) -> Self {
        let mut cards = Vec::new();
        let mut index = HashMap::new();
        let mut slots = Vec::new();
        for id in ids {
            let slot = *index.entry(id.clone()).or_insert_with(|| {
                cards.push(id);
                cards.len() - 1
            });
            slots.push(slot);
        }
        Self {
            cards,
            index,
            slots,
        }
    }

    /// Number of physical cards
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Distinct card ids in first-seen order
    pub fn distinct(&self) -> &[CardId] {
        &self.cards
    }

    /// One entry per physical card, each an index into [`Deck::distinct`]
    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    pub fn index_of(&self, id: &CardId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn card(&self, index: usize) -> &CardId {
        &self.cards[index]
    }

    pub fn copies(&self, id: &CardId) -> usize {
        match self.index_of(id) {
            Some(i) => self.slots.iter().filter(|&&s| s == i).count(),
            None => 0,
        }
    }

    /// Resolve drawn slots back to card ids
    pub fn ids_of(&self, hand: &[usize]) -> Vec<CardId> {
        hand.iter().map(|&i| self.cards[i].clone()).collect()
    }
}

/// Draws uniformly random hands from a deck.
///
/// Each draw shuffles a fresh copy of the deck (Fisher-Yates) and takes the
/// top `hand_size` cards. The scratch buffer is reused between draws.
#[derive(Debug)]
pub struct HandSampler {
    rng: ChaCha20Rng,
    scratch: Vec<usize>,
}

impl HandSampler {
    pub fn new_with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha20Rng::seed_from_u64(seed))
    }

    pub fn from_rng(rng: ChaCha20Rng) -> Self {
        Self {
            rng,
            scratch: Vec::new(),
        }
    }

    /// Draw one hand as deck slots (indices into [`Deck::distinct`]).
    pub fn draw(&mut self, deck: &Deck, hand_size: usize) -> Result<&[usize], SimError> {
        if deck.len() < hand_size {
            return Err(SimError::InsufficientDeckSize {
                deck_size: deck.len(),
                hand_size,
            });
        }
        self.scratch.clear();
        self.scratch.extend_from_slice(deck.slots());
        self.scratch.shuffle(&mut self.rng);
        Ok(&self.scratch[..hand_size])
    }

    /// Draw one hand and resolve it to card ids.
    pub fn draw_ids(&mut self, deck: &Deck, hand_size: usize) -> Result<Vec<CardId>, SimError> {
        let hand = self.draw(deck, hand_size)?;
        Ok(hand.iter().map(|&i| deck.card(i).clone()).collect())
    }
}

/// Draw `hand_size` cards without replacement from a plain list of ids.
///
/// # Examples
///
/// ```
/// use handsim_engine::cards::CardId;
/// use handsim_engine::deck::draw_hand;
/// use rand::SeedableRng;
///
/// let deck: Vec<CardId> = ["a", "b", "c", "d"].into_iter().map(CardId::from).collect();
/// let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(7);
/// let hand = draw_hand(&deck, 3, &mut rng).unwrap();
/// assert_eq!(hand.len(), 3);
/// assert!(draw_hand(&deck, 5, &mut rng).is_err());
/// ```
pub fn draw_hand<R: Rng + ?Sized>(
    deck: &[CardId],
    hand_size: usize,
    rng: &mut R,
) -> Result<Vec<CardId>, SimError> {
    if deck.len() < hand_size {
        return Err(SimError::InsufficientDeckSize {
            deck_size: deck.len(),
            hand_size,
        });
    }
    let mut cards = deck.to_vec();
    cards.shuffle(rng);
    cards.truncate(hand_size);
    Ok(cards)
}
