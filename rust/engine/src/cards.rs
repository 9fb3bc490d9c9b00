use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a card.
/// A deck is an ordered multiset of these; repeated ids are separate physical copies.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Element attribute printed on a monster card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Attribute {
    Dark,
    Light,
    Earth,
    Water,
    Fire,
    Wind,
    Divine,
}

impl Attribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Dark => "DARK",
            Attribute::Light => "LIGHT",
            Attribute::Earth => "EARTH",
            Attribute::Water => "WATER",
            Attribute::Fire => "FIRE",
            Attribute::Wind => "WIND",
            Attribute::Divine => "DIVINE",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn all_attributes() -> [Attribute; 7] {
    [
        Attribute::Dark,
        Attribute::Light,
        Attribute::Earth,
        Attribute::Water,
        Attribute::Fire,
        Attribute::Wind,
        Attribute::Divine,
    ]
}

/// Static card data used by filter cards.
/// Every field except the id is optional: spell and trap cards carry no
/// attribute, level or ATK.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CardMetadata {
    /// Card identifier this entry describes
    pub id: CardId,
    /// Element attribute (monsters only)
    #[serde(default)]
    pub attribute: Option<Attribute>,
    /// Free-form category such as "Effect Monster" or "Spell Card"
    #[serde(default, rename = "type")]
    pub card_type: Option<String>,
    /// Level or rank
    #[serde(default)]
    pub level: Option<i32>,
    /// Attack value
    #[serde(default)]
    pub atk: Option<i32>,
    /// Archetype name
    #[serde(default)]
    pub archetype: Option<String>,
}

impl CardMetadata {
    pub fn new(id: impl Into<CardId>) -> Self {
        Self {
            id: id.into(),
            attribute: None,
            card_type: None,
            level: None,
            atk: None,
            archetype: None,
        }
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attribute = Some(attribute);
        self
    }

    pub fn with_type(mut self, card_type: impl Into<String>) -> Self {
        self.card_type = Some(card_type.into());
        self
    }

    pub fn with_level(mut self, level: i32) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_atk(mut self, atk: i32) -> Self {
        self.atk = Some(atk);
        self
    }

    pub fn with_archetype(mut self, archetype: impl Into<String>) -> Self {
        self.archetype = Some(archetype.into());
        self
    }
}

/// Read-only metadata source queried by filter cards.
///
/// The engine never owns the card database. Callers load it once before a
/// simulation batch and hand it in through this trait.
pub trait CardLookup {
    fn metadata(&self, id: &CardId) -> Option<&CardMetadata>;
}

impl CardLookup for HashMap<CardId, CardMetadata> {
    fn metadata(&self, id: &CardId) -> Option<&CardMetadata> {
        self.get(id)
    }
}

/// Lookup that knows no cards. Only literal group members can match.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMetadata;

impl CardLookup for NoMetadata {
    fn metadata(&self, _id: &CardId) -> Option<&CardMetadata> {
        None
    }
}

/// In-memory card database keyed by id.
///
/// # Examples
///
/// ```
/// use handsim_engine::cards::{Attribute, CardDatabase, CardId, CardLookup, CardMetadata};
///
/// let db = CardDatabase::from_cards(vec![
///     CardMetadata::new("dragon").with_attribute(Attribute::Dark).with_level(8),
/// ]);
/// let meta = db.metadata(&CardId::from("dragon")).unwrap();
/// assert_eq!(meta.level, Some(8));
/// assert!(db.metadata(&CardId::from("unknown")).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CardDatabase {
    cards: HashMap<CardId, CardMetadata>,
}

impl CardDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list of entries; a later entry replaces an earlier one with the same id.
    pub fn from_cards(cards: impl IntoIterator<Item = CardMetadata>) -> Self {
        let mut db = Self::new();
        for card in cards {
            db.insert(card);
        }
        db
    }

    /// Parse a JSON array of card metadata objects.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        let cards: Vec<CardMetadata> = serde_json::from_str(s)?;
        Ok(Self::from_cards(cards))
    }

    pub fn insert(&mut self, card: CardMetadata) -> Option<CardMetadata> {
        self.cards.insert(card.id.clone(), card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl CardLookup for CardDatabase {
    fn metadata(&self, id: &CardId) -> Option<&CardMetadata> {
        self.cards.get(id)
    }
}
