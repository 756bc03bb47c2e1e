//! The drag-to-order timeline mode.
//!
//! A [`TimelineSession`] lives alongside its parent [`GameSession`]:
//! it holds the canonical chronological order and the player's current
//! ordering, and on submission counts exact placements and folds the
//! round's points into the parent session. Scoring here is the live
//! linear formula (up to [`TIMELINE_MAX_SCORE`] points, no perfect
//! bonus) — distinct from `scoring::calculate_timeline_score` on
//! purpose.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::core::select;
use crate::core::session::{GameSession, EVENTS_PER_GAME};
use crate::schema::catalog::EventCatalog;
use crate::schema::event::HistoricalEvent;
use crate::schema::mode::GameMode;

/// Points for a fully correct ordering under the live formula.
pub const TIMELINE_MAX_SCORE: u32 = 1000;

/// A timeline round in progress.
#[derive(Debug, Clone)]
pub struct TimelineSession {
    events: Vec<HistoricalEvent>,
    user_order: Vec<HistoricalEvent>,
    is_submitted: bool,
    correct_placements: u32,
    score: u32,
}

/// Start a timeline round: spread events across the year range, fix the
/// ascending-by-year order as the answer key, and hand the player a
/// shuffled ordering. The paired [`GameSession`] carries the running
/// score and the completion flag for the hosting screen.
pub fn start_timeline(catalog: &EventCatalog, rng: &mut StdRng) -> (GameSession, TimelineSession) {
    let mut events = select::pick_spread_years(catalog, EVENTS_PER_GAME, rng);
    events.sort_by_key(|e| e.year);

    let mut user_order = events.clone();
    user_order.shuffle(rng);

    let session = GameSession::new(GameMode::Timeline, events.clone(), false);
    let timeline = TimelineSession {
        events,
        user_order,
        is_submitted: false,
        correct_placements: 0,
        score: 0,
    };
    (session, timeline)
}

impl TimelineSession {
    /// The canonical chronological order (the answer key).
    pub fn events(&self) -> &[HistoricalEvent] {
        &self.events
    }

    /// The player's current ordering.
    pub fn user_order(&self) -> &[HistoricalEvent] {
        &self.user_order
    }

    pub fn is_submitted(&self) -> bool {
        self.is_submitted
    }

    /// Valid once submitted; zero before.
    pub fn correct_placements(&self) -> u32 {
        self.correct_placements
    }

    /// Valid once submitted; zero before.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Move the entry at `from` to position `to` (an array move, not a
    /// swap). No-op once submitted or when either index is out of
    /// range.
    pub fn move_event(&mut self, from: usize, to: usize) {
        if self.is_submitted || from >= self.user_order.len() || to >= self.user_order.len() {
            return;
        }
        let moved = self.user_order.remove(from);
        self.user_order.insert(to, moved);
    }

    /// Lock in the ordering: count placements where the player's entry
    /// matches the chronological order (by event id — ids are unique
    /// within a catalog), score `round(correct / total * 1000)`, and
    /// fold the points into the parent session. No-op once submitted.
    pub fn submit(&mut self, session: &mut GameSession) {
        if self.is_submitted {
            return;
        }
        self.is_submitted = true;

        self.correct_placements = self
            .user_order
            .iter()
            .zip(&self.events)
            .filter(|(placed, actual)| placed.id == actual.id)
            .count() as u32;

        self.score = if self.events.is_empty() {
            0
        } else {
            (f64::from(self.correct_placements) / self.events.len() as f64
                * f64::from(TIMELINE_MAX_SCORE))
            .round() as u32
        };

        session.apply_timeline_points(self.score);
    }
}
