//! The persistence boundary: session outcomes and their fold into a
//! user profile.
//!
//! The engine never touches durable storage. A finished session is
//! reduced to a [`SessionOutcome`]; the hosting app folds it into a
//! [`UserProfile`] with [`UserProfile::record_game`] and persists the
//! profile however it likes (the original app keeps it in local
//! key-value storage as JSON).

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::event::EventId;

/// Everything a finished session hands to the persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionOutcome {
    /// Points earned this session (added to the profile's total).
    pub score_delta: u32,
    /// Questions answered correctly.
    pub correct_count: u32,
    /// Questions in the session.
    pub total_count: u32,
    /// Highest streak reached during the session.
    pub best_streak: u32,
    /// Ids of the events the player answered (any path), used to mark
    /// events as seen.
    pub answered_event_ids: FxHashSet<EventId>,
}

/// Profile achievements the engine can evaluate on its own.
///
/// The original app defines more (speed_demon, era_master, hint_free,
/// hard_mode) but checks them in screen code against per-question data
/// that the outcome tuple does not carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Achievement {
    FirstWin,
    Streak5,
    Streak10,
    PerfectGame,
    CenturyScholar,
    DailyDevotee,
}

impl Achievement {
    /// Returns the stable key string for this achievement.
    pub fn key(&self) -> &'static str {
        match self {
            Self::FirstWin => "first_win",
            Self::Streak5 => "streak_5",
            Self::Streak10 => "streak_10",
            Self::PerfectGame => "perfect_game",
            Self::CenturyScholar => "century_scholar",
            Self::DailyDevotee => "daily_devotee",
        }
    }

    /// Display name shown in the profile screen.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::FirstWin => "First Discovery",
            Self::Streak5 => "On a Roll",
            Self::Streak10 => "Unstoppable",
            Self::PerfectGame => "Perfect Explorer",
            Self::CenturyScholar => "Century Scholar",
            Self::DailyDevotee => "Daily Devotee",
        }
    }
}

/// Accumulated player statistics across sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub total_games_played: u32,
    pub total_score: u64,
    pub best_score: u32,
    pub best_streak: u32,
    pub correct_answers: u32,
    pub total_answers: u32,
    pub daily_streak: u32,
    pub achievements: FxHashSet<Achievement>,
    pub answered_event_ids: FxHashSet<EventId>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Explorer".to_string(),
            total_games_played: 0,
            total_score: 0,
            best_score: 0,
            best_streak: 0,
            correct_answers: 0,
            total_answers: 0,
            daily_streak: 0,
            achievements: FxHashSet::default(),
            answered_event_ids: FxHashSet::default(),
        }
    }
}

impl UserProfile {
    /// Fold a finished session into the profile and return the
    /// achievements that this session newly unlocked.
    pub fn record_game(&mut self, outcome: &SessionOutcome) -> Vec<Achievement> {
        self.total_games_played += 1;
        self.total_score += u64::from(outcome.score_delta);
        self.best_score = self.best_score.max(outcome.score_delta);
        self.best_streak = self.best_streak.max(outcome.best_streak);
        self.correct_answers += outcome.correct_count;
        self.total_answers += outcome.total_count;
        self.answered_event_ids
            .extend(outcome.answered_event_ids.iter().copied());

        let earned = [
            (self.correct_answers > 0, Achievement::FirstWin),
            (self.best_streak >= 5, Achievement::Streak5),
            (self.best_streak >= 10, Achievement::Streak10),
            (
                outcome.total_count > 0 && outcome.correct_count == outcome.total_count,
                Achievement::PerfectGame,
            ),
            (self.total_games_played >= 100, Achievement::CenturyScholar),
            (self.daily_streak >= 7, Achievement::DailyDevotee),
        ];

        let mut unlocked = Vec::new();
        for (condition, achievement) in earned {
            if condition && self.achievements.insert(achievement) {
                unlocked.push(achievement);
            }
        }
        unlocked
    }

    /// Bump the consecutive-daily-challenge counter. The hosting app
    /// decides when a day counts (it tracks calendar dates); the
    /// profile only keeps the tally.
    pub fn record_daily_completion(&mut self) -> Vec<Achievement> {
        self.daily_streak += 1;
        if self.daily_streak >= 7 && self.achievements.insert(Achievement::DailyDevotee) {
            vec![Achievement::DailyDevotee]
        } else {
            Vec::new()
        }
    }

    /// Lifetime answer accuracy as a whole percentage.
    pub fn accuracy_percent(&self) -> u32 {
        crate::core::scoring::accuracy_percent(self.correct_answers, self.total_answers)
    }
}
