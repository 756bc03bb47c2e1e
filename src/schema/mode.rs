use serde::{Deserialize, Serialize};

/// The closed set of game modes.
///
/// The mode decides how events are selected at session start and how a
/// raw answer string is interpreted on submission (see [`AnswerKind`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Guess the year of an event, three guesses, untimed.
    Classic,
    /// Classic rules with a 30-second countdown and a time bonus.
    Timed,
    /// Arrange events in chronological order; scored on submission.
    Timeline,
    /// The date-seeded daily challenge: classic rules, timed, same
    /// event set for everyone on the same calendar day.
    Daily,
    /// Guess which era an event belongs to.
    Era,
    /// Guess where an event took place.
    Map,
}

/// What `submit_answer` expects the raw answer text to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerKind {
    /// An integer year, negative for BCE.
    Year,
    /// An era key string (see `Era::key`).
    Era,
    /// A place name matched against the event's location.
    Location,
    /// No free-text answer; the mode is played by reordering.
    Ordering,
}

impl GameMode {
    /// Returns the key string for this mode (e.g., "daily").
    pub fn key(&self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Timed => "timed",
            Self::Timeline => "timeline",
            Self::Daily => "daily",
            Self::Era => "era",
            Self::Map => "map",
        }
    }

    /// The raw-answer contract for this mode.
    pub fn answer_kind(&self) -> AnswerKind {
        match self {
            Self::Classic | Self::Timed | Self::Daily => AnswerKind::Year,
            Self::Era => AnswerKind::Era,
            Self::Map => AnswerKind::Location,
            Self::Timeline => AnswerKind::Ordering,
        }
    }

    /// Whether sessions in this mode run the per-question countdown.
    pub fn is_timed(&self) -> bool {
        matches!(self, Self::Timed | Self::Daily)
    }
}
