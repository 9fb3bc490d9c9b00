use serde::{Deserialize, Serialize};

use crate::cards::{Attribute, CardMetadata};

/// Inclusive numeric range; a missing bound is open.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i32>,
}

impl StatRange {
    pub fn between(min: i32, max: i32) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn at_least(min: i32) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: i32) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// An absent stat never satisfies a range.
    pub fn contains(&self, value: Option<i32>) -> bool {
        let Some(v) = value else {
            return false;
        };
        self.min.is_none_or(|min| v >= min) && self.max.is_none_or(|max| v <= max)
    }
}

/// Group member matching by metadata rather than by a fixed card id.
///
/// A card matches when it has metadata and every specified predicate holds.
/// A filter with no predicates matches any card with metadata.
///
/// # Examples
///
/// ```
/// use handsim_engine::cards::{Attribute, CardMetadata};
/// use handsim_engine::filter::{FilterCard, StatRange};
///
/// let small_dark = FilterCard::default()
///     .attribute(Attribute::Dark)
///     .level(StatRange::at_most(4));
///
/// let meta = CardMetadata::new("x").with_attribute(Attribute::Dark).with_level(3);
/// assert!(small_dark.matches(Some(&meta)));
/// assert!(!small_dark.matches(None));
/// ```
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterCard {
    #[serde(
        default,
        rename = "filterByAttribute",
        skip_serializing_if = "Option::is_none"
    )]
    pub attribute: Option<Attribute>,
    #[serde(default, rename = "filterByType", skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    #[serde(default, rename = "filterByLevel", skip_serializing_if = "Option::is_none")]
    pub level: Option<StatRange>,
    #[serde(default, rename = "filterByATK", skip_serializing_if = "Option::is_none")]
    pub atk: Option<StatRange>,
    #[serde(
        default,
        rename = "filterByArchetype",
        skip_serializing_if = "Option::is_none"
    )]
    pub archetype: Option<String>,
}

impl FilterCard {
    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attribute = Some(attribute);
        self
    }

    pub fn card_type(mut self, card_type: impl Into<String>) -> Self {
        self.card_type = Some(card_type.into());
        self
    }

    pub fn level(mut self, range: StatRange) -> Self {
        self.level = Some(range);
        self
    }

    pub fn atk(mut self, range: StatRange) -> Self {
        self.atk = Some(range);
        self
    }

    pub fn archetype(mut self, archetype: impl Into<String>) -> Self {
        self.archetype = Some(archetype.into());
        self
    }

    /// Number of active predicates
    pub fn predicate_count(&self) -> usize {
        [
            self.attribute.is_some(),
            self.card_type.is_some(),
            self.level.is_some(),
            self.atk.is_some(),
            self.archetype.is_some(),
        ]
        .into_iter()
        .filter(|&active| active)
        .count()
    }

    /// Whether a card with the given metadata satisfies every predicate.
    /// Cards without metadata never match.
    pub fn matches(&self, meta: Option<&CardMetadata>) -> bool {
        let Some(meta) = meta else {
            return false;
        };
        if let Some(attr) = self.attribute {
            if meta.attribute != Some(attr) {
                return false;
            }
        }
        if let Some(t) = &self.card_type {
            if meta.card_type.as_deref() != Some(t.as_str()) {
                return false;
            }
        }
        if let Some(range) = &self.level {
            if !range.contains(meta.level) {
                return false;
            }
        }
        if let Some(range) = &self.atk {
            if !range.contains(meta.atk) {
                return false;
            }
        }
        if let Some(a) = &self.archetype {
            if meta.archetype.as_deref() != Some(a.as_str()) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::all_attributes;

    fn monster() -> CardMetadata {
        CardMetadata::new("m")
            .with_attribute(Attribute::Light)
            .with_type("Effect Monster")
            .with_level(4)
            .with_atk(1900)
            .with_archetype("Blue-Eyes")
    }

    #[test]
    fn empty_filter_matches_any_known_card() {
        let f = FilterCard::default();
        assert_eq!(f.predicate_count(), 0);
        assert!(f.matches(Some(&monster())));
        assert!(f.matches(Some(&CardMetadata::new("spell").with_type("Spell Card"))));
        assert!(!f.matches(None));
    }

    #[test]
    fn attribute_predicate_only_matches_that_attribute() {
        let meta = monster();
        for attr in all_attributes() {
            let f = FilterCard::default().attribute(attr);
            assert_eq!(f.matches(Some(&meta)), attr == Attribute::Light);
        }
    }

    #[test]
    fn all_predicates_must_hold() {
        let f = FilterCard::default()
            .attribute(Attribute::Light)
            .card_type("Effect Monster")
            .level(StatRange::between(1, 4))
            .atk(StatRange::at_least(1500))
            .archetype("Blue-Eyes");
        assert_eq!(f.predicate_count(), 5);
        assert!(f.matches(Some(&monster())));

        let weaker = f.clone().atk(StatRange::at_least(2000));
        assert!(!weaker.matches(Some(&monster())));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let r = StatRange::between(4, 6);
        assert!(r.contains(Some(4)));
        assert!(r.contains(Some(6)));
        assert!(!r.contains(Some(3)));
        assert!(!r.contains(Some(7)));
        assert!(StatRange::default().contains(Some(-1)));
    }

    #[test]
    fn missing_stat_fails_range() {
        let spell = CardMetadata::new("s").with_type("Spell Card");
        let f = FilterCard::default().level(StatRange::at_most(12));
        assert!(!f.matches(Some(&spell)));
    }

    #[test]
    fn wire_names_round_trip() {
        let json = r#"{"filterByAttribute":"DARK","filterByLevel":{"min":1,"max":4},"filterByATK":{"max":1500}}"#;
        let f: FilterCard = serde_json::from_str(json).unwrap();
        assert_eq!(f.attribute, Some(Attribute::Dark));
        assert_eq!(f.level, Some(StatRange::between(1, 4)));
        assert_eq!(f.atk, Some(StatRange::at_most(1500)));
        assert_eq!(serde_json::to_string(&f).unwrap(), json);
    }

    #[test]
    fn unknown_filter_key_is_rejected() {
        assert!(serde_json::from_str::<FilterCard>(r#"{"filterByColour":"red"}"#).is_err());
    }
}
