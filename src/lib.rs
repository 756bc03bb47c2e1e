//! Chronicle Engine — the game session core for history trivia games.
//!
//! Selects historical-event sets per game mode, tracks per-question and
//! per-session state (answers, hints, guesses, timing), scores answers
//! under mode-specific rules, and drives the progression from question
//! to question to completion. Rendering, image fetching, audio, and
//! durable storage belong to the hosting app; at the end of a session
//! the engine hands it a single [`schema::profile::SessionOutcome`].

pub mod core;
pub mod schema;
