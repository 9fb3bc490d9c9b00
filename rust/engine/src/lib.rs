//! # handsim-engine: Opening Hand Simulator Core
//!
//! Estimates how often a randomly drawn hand satisfies user-defined card
//! combinations. A deck is sampled many times; each hand is checked against
//! a list of target hands and hit counts are aggregated. All runs are
//! reproducible from their seed.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card ids, card metadata and the [`cards::CardLookup`] trait
//! - [`deck`] - Deck multiset with copy limit and the hand sampler
//! - [`filter`] - Metadata predicates for filter cards
//! - [`condition`] - Groups, operators, conditions and target hands
//! - [`matcher`] - Checks a hand against a target hand
//! - [`simulation`] - Request validation and the trial loop
//! - [`odds`] - Exact hypergeometric probabilities
//! - [`logger`] - Run records serialized as JSONL
//! - [`errors`] - Error types for simulation requests
//!
//! ## Quick Start
//!
//! ```rust
//! use handsim_engine::cards::{Attribute, CardDatabase, CardId, CardMetadata};
//! use handsim_engine::condition::{Condition, GroupMember, Operator, TargetHand};
//! use handsim_engine::filter::FilterCard;
//! use handsim_engine::simulation::{simulate, SimulationRequest};
//!
//! let mut deck: Vec<CardId> = (0..34).map(|i| CardId::new(format!("c{}", i))).collect();
//! deck.extend(["fiend", "fiend", "fiend", "imp", "imp", "imp"].map(CardId::from));
//!
//! let db = CardDatabase::from_cards(vec![
//!     CardMetadata::new("fiend").with_attribute(Attribute::Dark).with_level(4),
//!     CardMetadata::new("imp").with_attribute(Attribute::Dark).with_level(2),
//! ]);
//!
//! let two_dark = TargetHand::named(
//!     "two DARK",
//!     vec![Condition::new(
//!         vec![GroupMember::filter(FilterCard::default().attribute(Attribute::Dark))],
//!         Operator::AtLeast,
//!         2,
//!     )],
//! );
//!
//! let request = SimulationRequest::new(deck, 5, 5_000, vec![two_dark]).with_seed(42);
//! let result = simulate(&request, &db).unwrap();
//! println!("two DARK: {:.2}%", result.percentage(0));
//! ```
//!
//! ## Deterministic Runs
//!
//! The same request and seed always produce the same hit counts, whether the
//! trials run on one thread or across the rayon pool:
//!
//! ```rust
//! use handsim_engine::cards::{CardId, NoMetadata};
//! use handsim_engine::condition::{Condition, Operator, TargetHand};
//! use handsim_engine::simulation::{CancelToken, SimulationRequest, Simulator};
//!
//! let deck: Vec<CardId> = (0..40).map(|i| CardId::new(format!("c{}", i))).collect();
//! let target = TargetHand::new(vec![Condition::card("c0", Operator::AtLeast, 1)]);
//! let request = SimulationRequest::new(deck, 5, 3_000, vec![target]).with_seed(9);
//!
//! let sim = Simulator::new(&request, &NoMetadata).unwrap();
//! let cancel = CancelToken::new();
//! assert_eq!(sim.run(&cancel).unwrap(), sim.run_parallel(&cancel).unwrap());
//! ```

pub mod cards;
pub mod condition;
pub mod deck;
pub mod errors;
pub mod filter;
pub mod logger;
pub mod matcher;
pub mod odds;
pub mod simulation;
