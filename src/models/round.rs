//! Round catalog: the fixed, ordered names of knockout rounds and their match formats.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A named knockout stage. Variants are declared in play order, so `Ord` follows the catalog.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Round {
    #[serde(rename = "round_of_128")]
    RoundOf128,
    #[serde(rename = "round_of_64")]
    RoundOf64,
    #[serde(rename = "round_of_32")]
    RoundOf32,
    #[serde(rename = "round_of_16")]
    RoundOf16,
    QuarterFinals,
    SemiFinals,
    Final,
}

impl Round {
    /// Every round in play order, earliest first.
    pub const CATALOG: [Round; 7] = [
        Round::RoundOf128,
        Round::RoundOf64,
        Round::RoundOf32,
        Round::RoundOf16,
        Round::QuarterFinals,
        Round::SemiFinals,
        Round::Final,
    ];

    /// Position in `CATALOG`.
    pub fn catalog_index(self) -> usize {
        // Discriminants follow declaration order.
        self as usize
    }

    /// The round played after this one, or None after the final.
    pub fn next(self) -> Option<Round> {
        Self::CATALOG.get(self.catalog_index() + 1).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Round::RoundOf128 => "round_of_128",
            Round::RoundOf64 => "round_of_64",
            Round::RoundOf32 => "round_of_32",
            Round::RoundOf16 => "round_of_16",
            Round::QuarterFinals => "quarter_finals",
            Round::SemiFinals => "semi_finals",
            Round::Final => "final",
        }
    }

    /// How many set wins decide a match in this round.
    pub fn format(self) -> MatchFormat {
        let sets_to_win = match self {
            Round::RoundOf128 | Round::RoundOf64 | Round::RoundOf32 | Round::RoundOf16 => 1,
            Round::QuarterFinals => 2,
            Round::SemiFinals => 3,
            Round::Final => 4,
        };
        MatchFormat { sets_to_win }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the catalog round names.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownRound(pub String);

impl fmt::Display for UnknownRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown round name: {}", self.0)
    }
}

impl std::error::Error for UnknownRound {}

impl FromStr for Round {
    type Err = UnknownRound;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::CATALOG
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownRound(s.to_string()))
    }
}

/// Match format of a round: first side to `sets_to_win` set wins takes the match.
///
/// Serializes with its `label` alongside; the label is ignored when reading back.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize)]
pub struct MatchFormat {
    pub sets_to_win: u32,
}

impl MatchFormat {
    /// Human-readable format name, as shown on schedules.
    pub fn label(&self) -> &'static str {
        match self.sets_to_win {
            1 => "1 set knockout",
            2 => "Best of 3 sets",
            3 => "Best of 5 sets",
            _ => "Best of 7 sets",
        }
    }
}

impl Serialize for MatchFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MatchFormat", 2)?;
        state.serialize_field("sets_to_win", &self.sets_to_win)?;
        state.serialize_field("label", self.label())?;
        state.end()
    }
}
