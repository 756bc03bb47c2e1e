use serde::{Deserialize, Serialize};

/// Newtype wrapper for event IDs.
///
/// IDs are unique across a catalog and stable for the app's lifetime;
/// the persistence layer uses them as "already seen" markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(pub u32);

/// One of the seven fixed historical periods, ordered oldest to newest.
///
/// Eras classify events and double as the answer domain in era mode,
/// where the player types the era's key string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Era {
    Ancient,
    Classical,
    Medieval,
    Renaissance,
    Enlightenment,
    Modern,
    Contemporary,
}

impl Era {
    /// All eras in chronological order.
    pub const ALL: [Era; 7] = [
        Era::Ancient,
        Era::Classical,
        Era::Medieval,
        Era::Renaissance,
        Era::Enlightenment,
        Era::Modern,
        Era::Contemporary,
    ];

    /// Returns the key string for this era (e.g., "medieval").
    ///
    /// This is the string compared against the player's answer in era
    /// mode, so it is part of the answer contract and must not change.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Ancient => "ancient",
            Self::Classical => "classical",
            Self::Medieval => "medieval",
            Self::Renaissance => "renaissance",
            Self::Enlightenment => "enlightenment",
            Self::Modern => "modern",
            Self::Contemporary => "contemporary",
        }
    }

    /// Human-readable display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Ancient => "Ancient World",
            Self::Classical => "Classical Era",
            Self::Medieval => "Medieval Period",
            Self::Renaissance => "Renaissance",
            Self::Enlightenment => "Age of Revolution",
            Self::Modern => "Modern Era",
            Self::Contemporary => "Contemporary",
        }
    }

    /// Approximate year span covered by this era.
    pub fn span(&self) -> &'static str {
        match self {
            Self::Ancient => "3000 BCE - 500 BCE",
            Self::Classical => "500 BCE - 500 CE",
            Self::Medieval => "500 - 1500",
            Self::Renaissance => "1400 - 1700",
            Self::Enlightenment => "1700 - 1850",
            Self::Modern => "1850 - 1950",
            Self::Contemporary => "1950 - Present",
        }
    }
}

/// Question difficulty, which sets the base point value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Base points awarded for a correct answer at this difficulty.
    pub fn base_points(&self) -> u32 {
        match self {
            Self::Easy => 100,
            Self::Medium => 200,
            Self::Hard => 300,
        }
    }
}

/// A single historical event: the unit of play in every mode.
///
/// Immutable once loaded; the engine reads events from the catalog and
/// never mutates them. `year` is signed, with negative values meaning
/// BCE. `hints` are ordered from vaguest to most revealing, and
/// `accepted_answers` lists the free-text strings accepted as correct
/// (matched fuzzily, see `core::scoring::check_answer`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalEvent {
    pub id: EventId,
    pub name: String,
    pub era: Era,
    pub year: i32,
    pub location: String,
    pub description: String,
    pub fun_fact: String,
    pub difficulty: Difficulty,
    pub hints: Vec<String>,
    pub accepted_answers: Vec<String>,
}

/// Formats a signed year for display: "479 BCE", "1776 CE".
pub fn format_year(year: i32) -> String {
    if year < 0 {
        format!("{} BCE", -(year as i64))
    } else {
        format!("{} CE", year)
    }
}
