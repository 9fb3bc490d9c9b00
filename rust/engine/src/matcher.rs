//! Condition matching: does a drawn hand satisfy a target hand?
//!
//! Conditions are checked in listed order and each one consumes the cards it
//! counted, so one physical card never counts toward two conditions of the
//! same target. The consumption state lives in [`RemainingCounts`] and is
//! rebuilt from the hand at the start of every evaluation.
//!
//! Group counting rules:
//! - a group whose only member is a literal card counts (and consumes) every
//!   remaining copy of that card;
//! - in a larger group each literal member counts at most one copy;
//! - a filter member counts one for every card in the hand that satisfies it
//!   and still has a copy left.

use crate::cards::{CardId, CardLookup};
use crate::condition::{Condition, GroupMember, Operator, TargetHand};
use crate::deck::Deck;

#[derive(Debug, Clone)]
enum CompiledMember {
    /// Deck index of the card, `None` when the card is not in the deck
    Card(Option<usize>),
    /// Per deck index: does that card satisfy the filter
    Filter(Vec<bool>),
}

#[derive(Debug, Clone)]
struct CompiledCondition {
    members: Vec<CompiledMember>,
    single: bool,
    op: Operator,
    count: u32,
}

impl CompiledCondition {
    fn compile<L: CardLookup + ?Sized>(condition: &Condition, deck: &Deck, lookup: &L) -> Self {
        let members = condition
            .group
            .iter()
            .map(|member| match member {
                GroupMember::Card(card) => CompiledMember::Card(deck.index_of(&card.id)),
                GroupMember::Filter(filter) => CompiledMember::Filter(
                    deck.distinct()
                        .iter()
                        .map(|id| filter.matches(lookup.metadata(id)))
                        .collect(),
                ),
            })
            .collect();
        Self {
            members,
            single: condition.is_single(),
            op: condition.op,
            count: condition.count,
        }
    }

    fn group_count(&self, hand: &[usize], remaining: &mut RemainingCounts) -> u32 {
        let mut total = 0u32;
        for member in &self.members {
            match member {
                CompiledMember::Card(None) => {}
                CompiledMember::Card(Some(i)) => {
                    if self.single {
                        total += remaining.take_all(*i);
                    } else if remaining.take_one(*i) {
                        total += 1;
                    }
                }
                CompiledMember::Filter(mask) => {
                    for &slot in hand {
                        if mask[slot] && remaining.take_one(slot) {
                            total += 1;
                        }
                    }
                }
            }
        }
        total
    }
}

/// Copies of each card still available to later conditions.
#[derive(Debug, Clone, Default)]
pub struct RemainingCounts {
    counts: Vec<u32>,
}

impl RemainingCounts {
    pub fn new(deck: &Deck) -> Self {
        Self {
            counts: vec![0; deck.distinct().len()],
        }
    }

    fn reset(&mut self, hand: &[usize]) {
        self.counts.fill(0);
        for &slot in hand {
            if slot >= self.counts.len() {
                self.counts.resize(slot + 1, 0);
            }
            self.counts[slot] += 1;
        }
    }

    fn take_one(&mut self, index: usize) -> bool {
        match self.counts.get_mut(index) {
            Some(c) if *c > 0 => {
                *c -= 1;
                true
            }
            _ => false,
        }
    }

    fn take_all(&mut self, index: usize) -> u32 {
        self.counts.get_mut(index).map_or(0, std::mem::take)
    }
}

/// Target hand resolved against one deck and one metadata source.
///
/// Filter predicates are evaluated once per distinct deck card at compile
/// time, so the per-trial check only touches integer indices.
#[derive(Debug, Clone)]
pub struct CompiledTarget {
    conditions: Vec<CompiledCondition>,
}

impl CompiledTarget {
    pub fn compile<L: CardLookup + ?Sized>(target: &TargetHand, deck: &Deck, lookup: &L) -> Self {
        Self {
            conditions: target
                .conditions
                .iter()
                .map(|c| CompiledCondition::compile(c, deck, lookup))
                .collect(),
        }
    }

    /// Index of the first condition the hand fails, or `None` if all hold.
    pub fn first_failure(&self, hand: &[usize], remaining: &mut RemainingCounts) -> Option<usize> {
        remaining.reset(hand);
        self.conditions
            .iter()
            .position(|c| !c.op.holds(c.group_count(hand, remaining), c.count))
    }

    /// Whether `hand` (deck indices) satisfies every condition.
    pub fn matches(&self, hand: &[usize], remaining: &mut RemainingCounts) -> bool {
        self.first_failure(hand, remaining).is_none()
    }
}

/// Check a hand of card ids against a target hand.
///
/// Pure: the same hand and target always give the same answer.
///
/// # Examples
///
/// ```
/// use handsim_engine::cards::{CardId, NoMetadata};
/// use handsim_engine::condition::{Condition, GroupMember, Operator, TargetHand};
/// use handsim_engine::matcher::matches_hand;
///
/// let hand: Vec<CardId> = ["A", "C", "D"].into_iter().map(CardId::from).collect();
/// let a_or_b = TargetHand::new(vec![Condition::new(
///     vec![GroupMember::card("A"), GroupMember::card("B")],
///     Operator::AtLeast,
///     1,
/// )]);
/// assert!(matches_hand(&hand, &a_or_b, &NoMetadata));
/// ```
pub fn matches_hand<L: CardLookup + ?Sized>(hand: &[CardId], target: &TargetHand, lookup: &L) -> bool {
    let interned = Deck::unbounded(hand.iter().cloned());
    let compiled = CompiledTarget::compile(target, &interned, lookup);
    let mut remaining = RemainingCounts::new(&interned);
    compiled.matches(interned.slots(), &mut remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Attribute, CardDatabase, CardMetadata, NoMetadata};
    use crate::filter::FilterCard;

    fn hand(names: &[&str]) -> Vec<CardId> {
        names.iter().map(|&n| CardId::from(n)).collect()
    }

    fn dark() -> GroupMember {
        GroupMember::filter(FilterCard::default().attribute(Attribute::Dark))
    }

    fn db() -> CardDatabase {
        CardDatabase::from_cards(vec![
            CardMetadata::new("d1").with_attribute(Attribute::Dark).with_level(4),
            CardMetadata::new("d2").with_attribute(Attribute::Dark).with_level(8),
            CardMetadata::new("l1").with_attribute(Attribute::Light).with_level(4),
        ])
    }

    #[test]
    fn single_card_counts_every_copy() {
        let h = hand(&["A", "A", "B"]);
        let exactly_two = TargetHand::new(vec![Condition::card("A", Operator::Exactly, 2)]);
        let exactly_one = TargetHand::new(vec![Condition::card("A", Operator::Exactly, 1)]);
        assert!(matches_hand(&h, &exactly_two, &NoMetadata));
        assert!(!matches_hand(&h, &exactly_one, &NoMetadata));
    }

    #[test]
    fn or_group_literal_counts_one_copy_per_member() {
        let h = hand(&["A", "A", "B"]);
        let group = vec![GroupMember::card("A"), GroupMember::card("B")];
        let two = TargetHand::new(vec![Condition::new(group.clone(), Operator::Exactly, 2)]);
        let three = TargetHand::new(vec![Condition::new(group, Operator::AtLeast, 3)]);
        assert!(matches_hand(&h, &two, &NoMetadata));
        assert!(!matches_hand(&h, &three, &NoMetadata));
    }

    #[test]
    fn repeated_member_consumes_another_copy() {
        let h = hand(&["A", "A", "C"]);
        let group = vec![GroupMember::card("A"), GroupMember::card("A")];
        let target = TargetHand::new(vec![Condition::new(group, Operator::AtLeast, 2)]);
        assert!(matches_hand(&h, &target, &NoMetadata));
    }

    #[test]
    fn consumed_cards_are_unavailable_to_later_conditions() {
        let h = hand(&["A", "C"]);
        let target = TargetHand::new(vec![
            Condition::card("A", Operator::AtLeast, 1),
            Condition::new(
                vec![GroupMember::card("A"), GroupMember::card("B")],
                Operator::AtLeast,
                1,
            ),
        ]);
        assert!(!matches_hand(&h, &target, &NoMetadata));

        let h2 = hand(&["A", "B"]);
        assert!(matches_hand(&h2, &target, &NoMetadata));
    }

    #[test]
    fn filter_counts_each_matching_card() {
        let h = hand(&["d1", "d2", "l1", "X"]);
        let two_dark = TargetHand::new(vec![Condition::new(vec![dark()], Operator::AtLeast, 2)]);
        let three_dark = TargetHand::new(vec![Condition::new(vec![dark()], Operator::AtLeast, 3)]);
        assert!(matches_hand(&h, &two_dark, &db()));
        assert!(!matches_hand(&h, &three_dark, &db()));
    }

    #[test]
    fn filter_counts_duplicate_copies_separately() {
        let h = hand(&["d1", "d1", "l1"]);
        let target = TargetHand::new(vec![Condition::new(vec![dark()], Operator::Exactly, 2)]);
        assert!(matches_hand(&h, &target, &db()));
    }

    #[test]
    fn literal_before_filter_takes_the_card() {
        let h = hand(&["d1", "d2"]);
        let target = TargetHand::new(vec![
            Condition::card("d1", Operator::AtLeast, 1),
            Condition::new(vec![dark()], Operator::AtLeast, 2),
        ]);
        assert!(!matches_hand(&h, &target, &db()));
    }

    #[test]
    fn missing_metadata_only_blocks_filters() {
        let h = hand(&["ghost", "ghost"]);
        let by_id = TargetHand::new(vec![Condition::card("ghost", Operator::Exactly, 2)]);
        let any_card = TargetHand::new(vec![Condition::new(
            vec![GroupMember::filter(FilterCard::default())],
            Operator::AtLeast,
            1,
        )]);
        assert!(matches_hand(&h, &by_id, &db()));
        assert!(!matches_hand(&h, &any_card, &db()));
    }

    #[test]
    fn empty_group_counts_zero() {
        let h = hand(&["A"]);
        let none = TargetHand::new(vec![Condition::new(vec![], Operator::Exactly, 0)]);
        let some = TargetHand::new(vec![Condition::new(vec![], Operator::AtLeast, 1)]);
        assert!(matches_hand(&h, &none, &NoMetadata));
        assert!(!matches_hand(&h, &some, &NoMetadata));
    }

    #[test]
    fn exclude_ignores_stored_count() {
        let with_a = hand(&["A", "B"]);
        let without_a = hand(&["B", "C"]);
        for count in [0, 1, 2, 5] {
            let target = TargetHand::new(vec![Condition::card("A", Operator::Exclude, count)]);
            assert!(!matches_hand(&with_a, &target, &NoMetadata));
            assert!(matches_hand(&without_a, &target, &NoMetadata));
        }
    }

    #[test]
    fn card_absent_from_deck_never_counts() {
        let deck = Deck::unbounded(hand(&["A", "B"]));
        let target = TargetHand::new(vec![Condition::card("Z", Operator::AtLeast, 1)]);
        let compiled = CompiledTarget::compile(&target, &deck, &NoMetadata);
        let mut remaining = RemainingCounts::new(&deck);
        assert!(!compiled.matches(deck.slots(), &mut remaining));
    }

    #[test]
    fn first_failure_reports_condition_index() {
        let deck = Deck::unbounded(hand(&["A", "B", "C"]));
        let target = TargetHand::new(vec![
            Condition::card("A", Operator::AtLeast, 1),
            Condition::card("Z", Operator::AtLeast, 1),
            Condition::card("B", Operator::AtLeast, 1),
        ]);
        let compiled = CompiledTarget::compile(&target, &deck, &NoMetadata);
        let mut remaining = RemainingCounts::new(&deck);
        assert_eq!(compiled.first_failure(deck.slots(), &mut remaining), Some(1));
    }

    #[test]
    fn evaluation_does_not_leak_between_calls() {
        let deck = Deck::unbounded(hand(&["A", "B"]));
        let target = TargetHand::new(vec![Condition::card("A", Operator::AtLeast, 1)]);
        let compiled = CompiledTarget::compile(&target, &deck, &NoMetadata);
        let mut remaining = RemainingCounts::new(&deck);
        for _ in 0..3 {
            assert!(compiled.matches(deck.slots(), &mut remaining));
        }
    }
}
