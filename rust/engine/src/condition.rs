//! Target hand definitions: groups, operators, conditions.
//!
//! These types are also the wire format. A condition serializes as
//! `{ "group": [ {"id": ..} | {filterBy..} ], "op": "=" | "<=" | ">=" | "!=", "count": n }`.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::filter::FilterCard;

/// Literal reference to one card id inside a group.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CardRef {
    pub id: CardId,
}

/// One alternative inside a group.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupMember {
    /// A specific card id
    Card(CardRef),
    /// Any card whose metadata satisfies the filter
    Filter(FilterCard),
}

impl GroupMember {
    pub fn card(id: impl Into<CardId>) -> Self {
        GroupMember::Card(CardRef { id: id.into() })
    }

    pub fn filter(filter: FilterCard) -> Self {
        GroupMember::Filter(filter)
    }

    pub fn is_filter(&self) -> bool {
        matches!(self, GroupMember::Filter(_))
    }
}

/// Comparison applied to a group's match count.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Exactly `count`
    #[serde(rename = "=")]
    Exactly,
    /// At most `count`
    #[serde(rename = "<=")]
    AtMost,
    /// At least `count`
    #[serde(rename = ">=")]
    AtLeast,
    /// None at all; `count` is ignored
    #[serde(rename = "!=")]
    Exclude,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Exactly => "=",
            Operator::AtMost => "<=",
            Operator::AtLeast => ">=",
            Operator::Exclude => "!=",
        }
    }

    /// Apply the operator to a group count.
    ///
    /// ```
    /// use handsim_engine::condition::Operator;
    ///
    /// assert!(Operator::AtLeast.holds(3, 2));
    /// assert!(Operator::Exclude.holds(0, 5));
    /// assert!(!Operator::Exclude.holds(1, 1));
    /// ```
    pub fn holds(&self, group_count: u32, target: u32) -> bool {
        match self {
            Operator::Exactly => group_count == target,
            Operator::AtMost => group_count <= target,
            Operator::AtLeast => group_count >= target,
            Operator::Exclude => group_count == 0,
        }
    }

    pub fn parse(s: &str) -> Option<Operator> {
        match s.trim() {
            "=" | "==" => Some(Operator::Exactly),
            "<=" => Some(Operator::AtMost),
            ">=" => Some(Operator::AtLeast),
            "!=" => Some(Operator::Exclude),
            _ => None,
        }
    }
}

/// One comparison rule over a group.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Alternatives whose matches are summed
    #[serde(default)]
    pub group: Vec<GroupMember>,
    pub op: Operator,
    /// Target count (ignored for `!=`)
    #[serde(default)]
    pub count: u32,
}

impl Condition {
    pub fn new(group: Vec<GroupMember>, op: Operator, count: u32) -> Self {
        Self { group, op, count }
    }

    /// Single-card slot: `op count` copies of one specific card.
    pub fn card(id: impl Into<CardId>, op: Operator, count: u32) -> Self {
        Self::new(vec![GroupMember::card(id)], op, count)
    }

    /// A group made of exactly one literal card counts every copy of it.
    pub fn is_single(&self) -> bool {
        matches!(self.group.as_slice(), [GroupMember::Card(_)])
    }

    pub fn uses_filters(&self) -> bool {
        self.group.iter().any(GroupMember::is_filter)
    }
}

/// Conditions that must all hold for a hand to count as a hit.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TargetHand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub conditions: Vec<Condition>,
}

impl TargetHand {
    pub fn new(conditions: Vec<Condition>) -> Self {
        Self {
            name: None,
            conditions,
        }
    }

    pub fn named(name: impl Into<String>, conditions: Vec<Condition>) -> Self {
        Self {
            name: Some(name.into()),
            conditions,
        }
    }

    pub fn uses_filters(&self) -> bool {
        self.conditions.iter().any(Condition::uses_filters)
    }

    /// Display label: the name, or `#index` when unnamed
    pub fn label(&self, index: usize) -> String {
        match &self.name {
            Some(n) => n.clone(),
            None => format!("#{}", index),
        }
    }
}
