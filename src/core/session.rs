//! The game session state machine.
//!
//! One [`GameSession`] per active game, owned by the hosting screen and
//! driven through the operations below. Conceptually each question is in
//! one of two states: awaiting an answer, or answered. Submitting a
//! correct answer, exhausting the guess limit, giving up, and timer
//! expiry all move to answered; advancing re-arms the next question.
//!
//! Misuse is absorbed, not surfaced: submitting to an answered question,
//! revealing a hint past the last one, or advancing past the end are all
//! no-ops. Malformed answer text is just a wrong answer. This is a
//! casual trivia game; the worst outcome of any interaction is "counted
//! as incorrect".

use rand::rngs::StdRng;

use crate::core::scoring;
use crate::core::select;
use crate::schema::catalog::EventCatalog;
use crate::schema::event::{EventId, HistoricalEvent};
use crate::schema::mode::GameMode;
use crate::schema::profile::SessionOutcome;

/// Events per session in every mode.
pub const EVENTS_PER_GAME: usize = 5;
/// Countdown length per question in timed modes, in seconds.
pub const TIMED_SECONDS: u32 = 30;
/// Wrong guesses allowed before a question is marked incorrect.
pub const MAX_GUESSES: u32 = 3;

/// Year tolerance on the live classic/timed/daily path. Tighter than
/// the standalone `scoring::check_year_answer` default on purpose; the
/// two must not be unified.
const SESSION_YEAR_TOLERANCE: i64 = 10;

/// What a call to [`GameSession::submit_answer`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Correct; `points` were added to the session score.
    Correct { points: u32 },
    /// Wrong, but guesses remain; the question is still open.
    Incorrect { guesses_remaining: u32 },
    /// Wrong and out of guesses; the question is closed and the streak
    /// is reset.
    OutOfGuesses,
    /// The call was out of contract (already answered, no current
    /// event, or a mode without free-text answers) and changed nothing.
    Ignored,
}

/// What a call to [`GameSession::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No countdown is running.
    Idle,
    /// The countdown ticked down and the question is still open.
    Running { remaining: u32 },
    /// The countdown hit zero; the question was closed as incorrect.
    Expired,
}

/// The per-question countdown, owned by the session and dropped on
/// every path out of the awaiting-answer state. Holding it as a value
/// inside the session is what guarantees no stale timer survives an
/// answer, an advance, or a new session.
#[derive(Debug, Clone, Copy)]
struct Countdown {
    remaining: u32,
    total: u32,
}

impl Countdown {
    fn new(total: u32) -> Self {
        Self {
            remaining: total,
            total,
        }
    }

    /// Counts down one second; true when the clock hits zero.
    fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }
}

/// Synchronous lookup for pre-fetched event imagery. An absent image is
/// normal ("no image yet"), never an error; the engine initiates no
/// fetches of its own.
pub trait VisualAssets {
    fn image_for(&self, id: EventId) -> Option<String>;
}

/// A single game in progress.
#[derive(Debug, Clone)]
pub struct GameSession {
    mode: GameMode,
    events: Vec<HistoricalEvent>,
    current_index: usize,
    score: u32,
    streak: u32,
    best_streak: u32,
    hints_revealed: usize,
    is_answered: bool,
    is_correct: bool,
    timed: bool,
    timer: Option<Countdown>,
    guesses_used: u32,
    correct_count: u32,
    answered_ids: Vec<EventId>,
    image_uri: Option<String>,
    image_loading: bool,
}

impl GameSession {
    pub(crate) fn new(mode: GameMode, events: Vec<HistoricalEvent>, timed: bool) -> Self {
        Self {
            mode,
            events,
            current_index: 0,
            score: 0,
            streak: 0,
            best_streak: 0,
            hints_revealed: 0,
            is_answered: false,
            is_correct: false,
            timed,
            timer: timed.then(|| Countdown::new(TIMED_SECONDS)),
            guesses_used: 0,
            correct_count: 0,
            answered_ids: Vec::new(),
            image_uri: None,
            image_loading: false,
        }
    }

    /// Start a classic game: guess the year, optionally against the
    /// clock.
    pub fn start_classic(catalog: &EventCatalog, timed: bool, rng: &mut StdRng) -> Self {
        let mode = if timed { GameMode::Timed } else { GameMode::Classic };
        Self::new(mode, select::pick_random(catalog, EVENTS_PER_GAME, rng), timed)
    }

    /// Start the daily challenge: the same seeded event set for every
    /// player with the same `date_key` (an ISO calendar date), always
    /// timed.
    pub fn start_daily(catalog: &EventCatalog, date_key: &str) -> Self {
        Self::new(
            GameMode::Daily,
            select::pick_seeded_by_date(catalog, EVENTS_PER_GAME, date_key),
            true,
        )
    }

    /// Start an era-explorer game: name the era an event belongs to.
    pub fn start_era(catalog: &EventCatalog, rng: &mut StdRng) -> Self {
        Self::new(
            GameMode::Era,
            select::pick_random(catalog, EVENTS_PER_GAME, rng),
            false,
        )
    }

    /// Start a map-quest game: name where an event took place.
    pub fn start_map(catalog: &EventCatalog, rng: &mut StdRng) -> Self {
        Self::new(
            GameMode::Map,
            select::pick_random(catalog, EVENTS_PER_GAME, rng),
            false,
        )
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn events(&self) -> &[HistoricalEvent] {
        &self.events
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_event(&self) -> Option<&HistoricalEvent> {
        self.events.get(self.current_index)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    pub fn hints_revealed(&self) -> usize {
        self.hints_revealed
    }

    pub fn is_answered(&self) -> bool {
        self.is_answered
    }

    /// Only meaningful while `is_answered` is true.
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    pub fn is_timed(&self) -> bool {
        self.timed
    }

    /// Seconds left on the current question, if a countdown is running.
    pub fn time_remaining(&self) -> Option<u32> {
        self.timer.map(|t| t.remaining)
    }

    pub fn guesses_used(&self) -> u32 {
        self.guesses_used
    }

    pub fn image_uri(&self) -> Option<&str> {
        self.image_uri.as_deref()
    }

    pub fn image_loading(&self) -> bool {
        self.image_loading
    }

    /// True once the last question has been answered.
    pub fn is_complete(&self) -> bool {
        self.is_answered && self.current_index + 1 >= self.events.len()
    }

    /// Evaluate an answer under the current mode's rule.
    ///
    /// Classic/timed/daily parse the text as a year (±10); era compares
    /// normalized text against the era key exactly (not fuzzily — the
    /// asymmetry with `scoring::check_answer` is intentional); map
    /// accepts normalized equality or the location containing the
    /// guess. Malformed or empty input is a wrong answer, never an
    /// error.
    pub fn submit_answer(&mut self, raw_answer: &str) -> AnswerOutcome {
        if self.is_answered {
            return AnswerOutcome::Ignored;
        }
        let Some(event) = self.events.get(self.current_index) else {
            return AnswerOutcome::Ignored;
        };
        let event_id = event.id;
        let difficulty = event.difficulty;

        let correct = match self.mode {
            GameMode::Classic | GameMode::Timed | GameMode::Daily => {
                match raw_answer.trim().parse::<i64>() {
                    Ok(guessed) => {
                        (guessed - i64::from(event.year)).abs() <= SESSION_YEAR_TOLERANCE
                    }
                    Err(_) => false,
                }
            }
            GameMode::Era => normalize(raw_answer) == event.era.key(),
            GameMode::Map => {
                let guess = normalize(raw_answer);
                let location = normalize(&event.location);
                !guess.is_empty() && (guess == location || location.contains(&guess))
            }
            // Timeline rounds are answered by reordering, not text.
            GameMode::Timeline => return AnswerOutcome::Ignored,
        };

        self.guesses_used += 1;

        if correct {
            let time_bonus = match self.timer.take() {
                Some(countdown) => scoring::calculate_time_bonus(countdown.remaining, countdown.total),
                None => 0,
            };
            let points = scoring::calculate_score(
                difficulty,
                self.hints_revealed as u32,
                self.streak,
                time_bonus,
            );
            self.score += points;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
            self.correct_count += 1;
            self.close_question(true, event_id);
            AnswerOutcome::Correct { points }
        } else if self.guesses_used >= MAX_GUESSES {
            self.timer = None;
            self.streak = 0;
            self.close_question(false, event_id);
            AnswerOutcome::OutOfGuesses
        } else {
            AnswerOutcome::Incorrect {
                guesses_remaining: MAX_GUESSES - self.guesses_used,
            }
        }
    }

    /// Reveal the next hint for the current question and return it.
    ///
    /// The point cost is applied later, at scoring time, based on how
    /// many hints were revealed. No-op (returns None) once the question
    /// is answered or all hints are out.
    pub fn reveal_hint(&mut self) -> Option<&str> {
        if self.is_answered {
            return None;
        }
        let hint_count = self.events.get(self.current_index)?.hints.len();
        if self.hints_revealed >= hint_count {
            return None;
        }
        let index = self.hints_revealed;
        self.hints_revealed += 1;
        Some(self.events[self.current_index].hints[index].as_str())
    }

    /// Advance to the next question, resetting per-question state and
    /// re-arming the countdown in timed sessions. Returns false (and
    /// changes nothing) when already at the last question.
    pub fn next_event(&mut self) -> bool {
        if self.current_index + 1 >= self.events.len() {
            return false;
        }
        self.current_index += 1;
        self.is_answered = false;
        self.is_correct = false;
        self.hints_revealed = 0;
        self.guesses_used = 0;
        self.image_uri = None;
        self.image_loading = false;
        self.timer = self.timed.then(|| Countdown::new(TIMED_SECONDS));
        true
    }

    /// Concede the current question: closed as incorrect, streak reset.
    /// Returns false if the question was already answered.
    pub fn give_up(&mut self) -> bool {
        if self.is_answered {
            return false;
        }
        let Some(event) = self.events.get(self.current_index) else {
            return false;
        };
        let event_id = event.id;
        self.timer = None;
        self.streak = 0;
        self.close_question(false, event_id);
        true
    }

    /// Advance the countdown by one second. The hosting app calls this
    /// once per second while a timed question is open; at zero the
    /// question is closed as incorrect and the streak resets.
    pub fn tick(&mut self) -> TickOutcome {
        if self.is_answered {
            return TickOutcome::Idle;
        }
        let Some(countdown) = self.timer.as_mut() else {
            return TickOutcome::Idle;
        };
        if countdown.tick() {
            self.timer = None;
            self.streak = 0;
            if let Some(event) = self.events.get(self.current_index) {
                let event_id = event.id;
                self.close_question(false, event_id);
            }
            TickOutcome::Expired
        } else {
            TickOutcome::Running {
                remaining: self.remaining_or_zero(),
            }
        }
    }

    /// Look up the current event's image through the asset boundary.
    /// An absent image simply clears the loading flag.
    pub fn load_image<A: VisualAssets>(&mut self, assets: &A) {
        if let Some(event) = self.events.get(self.current_index) {
            self.image_uri = assets.image_for(event.id);
        }
        self.image_loading = false;
    }

    /// The tuple handed to the persistence layer at session end.
    pub fn outcome(&self) -> SessionOutcome {
        SessionOutcome {
            score_delta: self.score,
            correct_count: self.correct_count,
            total_count: self.events.len() as u32,
            best_streak: self.best_streak,
            answered_event_ids: self.answered_ids.iter().copied().collect(),
        }
    }

    /// Fold a submitted timeline round's points into this session.
    pub(crate) fn apply_timeline_points(&mut self, points: u32) {
        self.score += points;
        self.is_answered = true;
    }

    fn close_question(&mut self, correct: bool, event_id: EventId) {
        self.is_answered = true;
        self.is_correct = correct;
        self.answered_ids.push(event_id);
    }

    fn remaining_or_zero(&self) -> u32 {
        self.timer.map(|t| t.remaining).unwrap_or(0)
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::event::{Difficulty, Era};

    fn make_event(id: u32, year: i32) -> HistoricalEvent {
        HistoricalEvent {
            id: EventId(id),
            name: format!("Event {}", id),
            era: Era::Enlightenment,
            year,
            location: "Philadelphia, Pennsylvania".to_string(),
            description: String::new(),
            fun_fact: String::new(),
            difficulty: Difficulty::Medium,
            hints: vec!["First hint".to_string(), "Second hint".to_string()],
            accepted_answers: Vec::new(),
        }
    }

    fn classic_session(years: &[i32]) -> GameSession {
        let events = years
            .iter()
            .enumerate()
            .map(|(i, &year)| make_event(i as u32, year))
            .collect();
        GameSession::new(GameMode::Classic, events, false)
    }

    #[test]
    fn year_tolerance_is_ten_inclusive() {
        let mut session = classic_session(&[1776]);
        assert!(matches!(
            session.submit_answer("1786"),
            AnswerOutcome::Correct { .. }
        ));

        let mut session = classic_session(&[1776]);
        assert_eq!(
            session.submit_answer("1787"),
            AnswerOutcome::Incorrect {
                guesses_remaining: 2
            }
        );
        assert!(!session.is_answered());
        assert_eq!(session.guesses_used(), 1);
    }

    #[test]
    fn wrong_then_right_guess_scores() {
        let mut session = classic_session(&[1776]);
        assert_eq!(
            session.submit_answer("1700"),
            AnswerOutcome::Incorrect {
                guesses_remaining: 2
            }
        );
        let outcome = session.submit_answer("1776");
        assert_eq!(outcome, AnswerOutcome::Correct { points: 200 });
        assert!(session.is_answered());
        assert!(session.is_correct());
        assert_eq!(session.streak(), 1);
        assert_eq!(session.best_streak(), 1);
        assert_eq!(session.score(), 200);
    }

    #[test]
    fn three_wrong_guesses_close_the_question_and_reset_streak() {
        let mut session = classic_session(&[1776, 1789]);
        assert!(matches!(
            session.submit_answer("1776"),
            AnswerOutcome::Correct { .. }
        ));
        assert_eq!(session.streak(), 1);
        assert!(session.next_event());

        session.submit_answer("1000");
        session.submit_answer("1001");
        assert_eq!(session.submit_answer("1002"), AnswerOutcome::OutOfGuesses);
        assert!(session.is_answered());
        assert!(!session.is_correct());
        assert_eq!(session.streak(), 0);
        assert_eq!(session.best_streak(), 1);
        assert_eq!(session.guesses_used(), 3);
    }

    #[test]
    fn malformed_year_counts_as_wrong_guess() {
        let mut session = classic_session(&[1776]);
        assert_eq!(
            session.submit_answer("seventeen seventy-six"),
            AnswerOutcome::Incorrect {
                guesses_remaining: 2
            }
        );
        assert_eq!(
            session.submit_answer(""),
            AnswerOutcome::Incorrect {
                guesses_remaining: 1
            }
        );
    }

    #[test]
    fn submit_after_answered_is_ignored() {
        let mut session = classic_session(&[1776]);
        session.submit_answer("1776");
        let score = session.score();
        assert_eq!(session.submit_answer("1776"), AnswerOutcome::Ignored);
        assert_eq!(session.score(), score);
        assert_eq!(session.guesses_used(), 1);
    }

    #[test]
    fn hint_penalty_applies_at_scoring_time() {
        let mut session = classic_session(&[1776]);
        assert_eq!(session.reveal_hint(), Some("First hint"));
        assert_eq!(session.reveal_hint(), Some("Second hint"));
        assert_eq!(session.reveal_hint(), None);
        assert_eq!(session.hints_revealed(), 2);

        let outcome = session.submit_answer("1776");
        // 200 base - 2 * 25 hint penalty.
        assert_eq!(outcome, AnswerOutcome::Correct { points: 150 });
    }

    #[test]
    fn hint_after_answered_is_ignored() {
        let mut session = classic_session(&[1776]);
        session.submit_answer("1776");
        assert_eq!(session.reveal_hint(), None);
    }

    #[test]
    fn next_event_resets_per_question_state() {
        let mut session = classic_session(&[1776, 1789]);
        session.reveal_hint();
        session.submit_answer("1776");
        assert!(session.next_event());

        assert_eq!(session.current_index(), 1);
        assert!(!session.is_answered());
        assert_eq!(session.hints_revealed(), 0);
        assert_eq!(session.guesses_used(), 0);
        assert!(!session.image_loading());
        assert!(session.image_uri().is_none());
        // Score and streak carry across questions; the revealed hint
        // already cost 25 points at scoring time.
        assert_eq!(session.streak(), 1);
        assert_eq!(session.score(), 175);
    }

    #[test]
    fn next_event_past_the_end_is_ignored() {
        let mut session = classic_session(&[1776]);
        session.submit_answer("1776");
        assert!(!session.next_event());
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn give_up_closes_and_resets_streak() {
        let mut session = classic_session(&[1776, 1789]);
        session.submit_answer("1776");
        session.next_event();
        assert!(session.give_up());
        assert!(session.is_answered());
        assert!(!session.is_correct());
        assert_eq!(session.streak(), 0);
        // A second give_up is a no-op.
        assert!(!session.give_up());
    }

    #[test]
    fn streak_bonus_grows_with_consecutive_correct() {
        let mut session = classic_session(&[1700, 1710, 1720]);
        assert_eq!(
            session.submit_answer("1700"),
            AnswerOutcome::Correct { points: 200 }
        );
        session.next_event();
        // Streak 1 at scoring time: 200 + 10.
        assert_eq!(
            session.submit_answer("1710"),
            AnswerOutcome::Correct { points: 210 }
        );
        session.next_event();
        assert_eq!(
            session.submit_answer("1720"),
            AnswerOutcome::Correct { points: 220 }
        );
        assert_eq!(session.streak(), 3);
        assert_eq!(session.score(), 630);
    }

    #[test]
    fn timed_session_counts_down_and_expires() {
        let events = vec![make_event(0, 1776)];
        let mut session = GameSession::new(GameMode::Timed, events, true);
        assert_eq!(session.time_remaining(), Some(TIMED_SECONDS));

        for remaining in (1..TIMED_SECONDS).rev() {
            assert_eq!(session.tick(), TickOutcome::Running { remaining });
        }
        assert_eq!(session.tick(), TickOutcome::Expired);
        assert!(session.is_answered());
        assert!(!session.is_correct());
        assert_eq!(session.streak(), 0);
        assert_eq!(session.time_remaining(), None);
        // No countdown survives past the answer.
        assert_eq!(session.tick(), TickOutcome::Idle);
    }

    #[test]
    fn correct_answer_stops_the_clock_and_earns_time_bonus() {
        let events = vec![make_event(0, 1776)];
        let mut session = GameSession::new(GameMode::Timed, events, true);
        // Full clock: 200 base + 50 time bonus.
        let outcome = session.submit_answer("1776");
        assert_eq!(outcome, AnswerOutcome::Correct { points: 250 });
        assert_eq!(session.time_remaining(), None);
        assert_eq!(session.tick(), TickOutcome::Idle);
    }

    #[test]
    fn time_bonus_shrinks_as_the_clock_runs() {
        let events = vec![make_event(0, 1776)];
        let mut session = GameSession::new(GameMode::Timed, events, true);
        for _ in 0..15 {
            session.tick();
        }
        // Half clock: 200 base + 25 time bonus.
        assert_eq!(
            session.submit_answer("1776"),
            AnswerOutcome::Correct { points: 225 }
        );
    }

    #[test]
    fn advance_rearms_the_countdown() {
        let events = vec![make_event(0, 1776), make_event(1, 1789)];
        let mut session = GameSession::new(GameMode::Timed, events, true);
        for _ in 0..10 {
            session.tick();
        }
        session.submit_answer("1776");
        session.next_event();
        assert_eq!(session.time_remaining(), Some(TIMED_SECONDS));
    }

    #[test]
    fn untimed_session_never_ticks() {
        let mut session = classic_session(&[1776]);
        assert_eq!(session.time_remaining(), None);
        assert_eq!(session.tick(), TickOutcome::Idle);
        assert!(!session.is_answered());
    }

    #[test]
    fn era_mode_is_exact_equality_not_fuzzy() {
        let events = vec![make_event(0, 1776)];
        let mut session = GameSession::new(GameMode::Era, events, false);
        assert_eq!(
            // Close but not equal: fuzzy matching would accept this.
            session.submit_answer("enlightenmant"),
            AnswerOutcome::Incorrect {
                guesses_remaining: 2
            }
        );
        assert!(matches!(
            session.submit_answer("  Enlightenment "),
            AnswerOutcome::Correct { .. }
        ));
    }

    #[test]
    fn map_mode_accepts_substring_of_location() {
        let events = vec![make_event(0, 1776)];
        let mut session = GameSession::new(GameMode::Map, events, false);
        assert!(matches!(
            session.submit_answer("philadelphia"),
            AnswerOutcome::Correct { .. }
        ));
    }

    #[test]
    fn map_mode_rejects_empty_guess() {
        let events = vec![make_event(0, 1776)];
        let mut session = GameSession::new(GameMode::Map, events, false);
        assert_eq!(
            session.submit_answer("   "),
            AnswerOutcome::Incorrect {
                guesses_remaining: 2
            }
        );
    }

    #[test]
    fn completion_requires_last_question_answered() {
        let mut session = classic_session(&[1776, 1789]);
        assert!(!session.is_complete());
        session.submit_answer("1776");
        // Answered, but not the last question.
        assert!(!session.is_complete());
        session.next_event();
        assert!(!session.is_complete());
        session.submit_answer("1789");
        assert!(session.is_complete());
    }

    #[test]
    fn outcome_reports_the_session_summary() {
        let mut session = classic_session(&[1776, 1789, 1800]);
        session.submit_answer("1776");
        session.next_event();
        session.give_up();
        session.next_event();
        session.submit_answer("1800");

        let outcome = session.outcome();
        assert_eq!(outcome.correct_count, 2);
        assert_eq!(outcome.total_count, 3);
        assert_eq!(outcome.best_streak, 1);
        assert_eq!(outcome.score_delta, session.score());
        assert_eq!(outcome.answered_event_ids.len(), 3);
    }

    #[test]
    fn empty_session_absorbs_every_operation() {
        let mut session = GameSession::new(GameMode::Classic, Vec::new(), false);
        assert_eq!(session.submit_answer("1776"), AnswerOutcome::Ignored);
        assert_eq!(session.reveal_hint(), None);
        assert!(!session.next_event());
        assert!(!session.give_up());
        assert!(!session.is_complete());
    }

    struct FakeAssets;

    impl VisualAssets for FakeAssets {
        fn image_for(&self, id: EventId) -> Option<String> {
            (id == EventId(0)).then(|| "asset://event-0.png".to_string())
        }
    }

    #[test]
    fn load_image_reads_the_asset_boundary() {
        let mut session = classic_session(&[1776, 1789]);
        // Idle until the host actually starts a lookup.
        assert!(!session.image_loading());
        session.load_image(&FakeAssets);
        assert_eq!(session.image_uri(), Some("asset://event-0.png"));
        assert!(!session.image_loading());

        session.submit_answer("1776");
        session.next_event();
        session.load_image(&FakeAssets);
        // Missing image is "no image yet", not an error.
        assert_eq!(session.image_uri(), None);
        assert!(!session.image_loading());
    }
}
