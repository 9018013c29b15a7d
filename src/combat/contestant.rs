use std::fmt;

use serde::{Deserialize, Serialize};

use crate::combat::rng::RandomSource;
use crate::combat::tier::{classify, Tier};

pub const ATTRIBUTE_COUNT: usize = 5;
pub const ATTRIBUTE_MIN: u8 = 0;
pub const ATTRIBUTE_MAX: u8 = 100;

/// Attribute slots shared by both contestants. The index is the identity key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttributeCategory {
    Intelligence,
    Strength,
    Speed,
    Stamina,
    Luck,
}

impl AttributeCategory {
    pub const ALL: [AttributeCategory; ATTRIBUTE_COUNT] = [
        Self::Intelligence,
        Self::Strength,
        Self::Speed,
        Self::Stamina,
        Self::Luck,
    ];

    pub const fn index(self) -> usize {
        match self {
            Self::Intelligence => 0,
            Self::Strength => 1,
            Self::Speed => 2,
            Self::Stamina => 3,
            Self::Luck => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Intelligence => "Intelligence",
            Self::Strength => "Strength",
            Self::Speed => "Speed",
            Self::Stamina => "Stamina",
            Self::Luck => "Luck",
        }
    }
}

impl fmt::Display for AttributeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the two contestants in a round. Also the side a wager is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Accepts `a`/`b` (any case) or the player-facing `1`/`2`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "a" | "A" | "1" => Some(Self::A),
            "b" | "B" | "2" => Some(Self::B),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
        }
    }
}

/// Fixed attribute vector, positionally aligned with [AttributeCategory::ALL].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Contestant {
    attributes: [u8; ATTRIBUTE_COUNT],
}

impl Contestant {
    /// Builds a contestant from explicit values, clamping each to [0, 100].
    pub fn from_attributes(attributes: [u8; ATTRIBUTE_COUNT]) -> Self {
        Self {
            attributes: attributes.map(|value| value.min(ATTRIBUTE_MAX)),
        }
    }

    pub fn attributes(&self) -> &[u8; ATTRIBUTE_COUNT] {
        &self.attributes
    }

    pub fn get(&self, category: AttributeCategory) -> u8 {
        self.attributes[category.index()]
    }

    pub fn value_at(&self, index: usize) -> Option<u8> {
        self.attributes.get(index).copied()
    }

    /// Sum of all attributes; used by the favourite-picking betting strategy.
    pub fn total(&self) -> u32 {
        self.attributes.iter().map(|&value| u32::from(value)).sum()
    }

    /// Tier view of every attribute, in category order.
    pub fn tiers(&self) -> [(AttributeCategory, Tier); ATTRIBUTE_COUNT] {
        AttributeCategory::ALL.map(|category| (category, classify(self.get(category))))
    }
}

/// Draws one value per category, in category order.
pub fn create_contestant<R: RandomSource + ?Sized>(rng: &mut R) -> Contestant {
    let mut attributes = [0u8; ATTRIBUTE_COUNT];
    for slot in attributes.iter_mut() {
        *slot = rng.randint(u32::from(ATTRIBUTE_MIN), u32::from(ATTRIBUTE_MAX)) as u8;
    }
    Contestant { attributes }
}
