//! Scoring formulas and answer matching.
//!
//! Everything here is a pure function: the session state machine calls
//! into this module but nothing here touches session state. The point
//! values are tuned for positive reinforcement — a correct answer never
//! scores below [`MIN_SCORE`], no matter how many hints were burned.

use crate::schema::event::Difficulty;

/// Points deducted per hint revealed, applied at scoring time.
pub const HINT_PENALTY: u32 = 25;
/// Streak bonus per consecutive correct answer.
pub const STREAK_BONUS_STEP: u32 = 10;
/// Cap on the total streak bonus.
pub const STREAK_BONUS_CAP: u32 = 100;
/// Floor on the points awarded for any correct answer.
pub const MIN_SCORE: u32 = 10;
/// Maximum time bonus on a timed question (full clock remaining).
pub const MAX_TIME_BONUS: u32 = 50;

/// Similarity threshold above which a free-text answer counts as a
/// match. Deliberately forgiving of typos and phrasing.
pub const ANSWER_SIMILARITY_THRESHOLD: f64 = 0.75;

/// Default year tolerance for the standalone [`check_year_answer`]
/// helper. The live session path uses its own tighter ±10; the two are
/// intentionally separate.
pub const DEFAULT_YEAR_TOLERANCE: i32 = 50;

/// Points for a correct answer.
///
/// Base points by difficulty, minus the hint penalty, plus a capped
/// streak bonus and any time bonus, floored at [`MIN_SCORE`].
pub fn calculate_score(
    difficulty: Difficulty,
    hints_used: u32,
    streak: u32,
    time_bonus: u32,
) -> u32 {
    let base = i64::from(difficulty.base_points());
    let hint_penalty = i64::from(hints_used) * i64::from(HINT_PENALTY);
    let streak_bonus = i64::from(
        (streak.saturating_mul(STREAK_BONUS_STEP)).min(STREAK_BONUS_CAP),
    );
    let total = base - hint_penalty + streak_bonus + i64::from(time_bonus);
    total.max(i64::from(MIN_SCORE)) as u32
}

/// Time bonus for a timed question, scaled linearly by the fraction of
/// the clock remaining: a full clock is worth [`MAX_TIME_BONUS`].
pub fn calculate_time_bonus(time_remaining: u32, total_time: u32) -> u32 {
    if total_time == 0 {
        return 0;
    }
    let fraction = (f64::from(time_remaining) / f64::from(total_time)).clamp(0.0, 1.0);
    (fraction * f64::from(MAX_TIME_BONUS)).round() as u32
}

/// Generic timeline score: up to 200 points proportional to correct
/// placements, plus a flat 100 for a perfect ordering.
///
/// The live timeline session scores with its own linear 1000-point
/// formula (see `core::timeline`); the two are intentionally distinct.
pub fn calculate_timeline_score(correct_positions: u32, total_events: u32) -> u32 {
    if total_events == 0 {
        return 0;
    }
    let base = (f64::from(correct_positions) / f64::from(total_events) * 200.0).round() as u32;
    let perfect_bonus = if correct_positions == total_events { 100 } else { 0 };
    base + perfect_bonus
}

/// Case-insensitive normalized Levenshtein similarity in `[0, 1]`.
///
/// 1.0 for a case-insensitive exact match (including two empty
/// strings); 0.0 when exactly one side is empty.
pub fn string_similarity(s1: &str, s2: &str) -> f64 {
    let a: Vec<char> = s1.to_lowercase().chars().collect();
    let b: Vec<char> = s2.to_lowercase().chars().collect();

    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    // Two-row Levenshtein.
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr: Vec<usize> = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let distance = prev[b.len()];
    1.0 - distance as f64 / a.len().max(b.len()) as f64
}

/// Whether a free-text answer matches any accepted answer.
///
/// The guess is trimmed first; an empty guess never matches. Matching
/// is fuzzy: similarity above [`ANSWER_SIMILARITY_THRESHOLD`] to any
/// single accepted answer is enough.
pub fn check_answer(accepted_answers: &[String], user_answer: &str) -> bool {
    let trimmed = user_answer.trim();
    if trimmed.is_empty() {
        return false;
    }
    accepted_answers
        .iter()
        .any(|accepted| string_similarity(accepted, trimmed) > ANSWER_SIMILARITY_THRESHOLD)
}

/// Whether a guessed year lands within `tolerance` of the actual year.
///
/// Standalone helper with a loose default ([`DEFAULT_YEAR_TOLERANCE`]);
/// the session's own classic/daily path inlines a tighter ±10.
pub fn check_year_answer(actual_year: i32, guessed_year: i32, tolerance: i32) -> bool {
    (i64::from(actual_year) - i64::from(guessed_year)).abs() <= i64::from(tolerance)
}

/// Whether a guessed location names the event's location.
///
/// The actual location is split on commas and whitespace into parts
/// longer than two characters; the trimmed lowercase guess matches if
/// it contains any part or any part contains it. An empty guess never
/// matches.
pub fn check_location_answer(actual_location: &str, guessed_location: &str) -> bool {
    let guess = guessed_location.trim().to_lowercase();
    if guess.is_empty() {
        return false;
    }
    actual_location
        .to_lowercase()
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| part.chars().count() > 2)
        .any(|part| guess.contains(part) || part.contains(&guess))
}

/// Whole-percentage accuracy, 0 for an empty total.
pub fn accuracy_percent(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(correct) / f64::from(total) * 100.0).round() as u32
}
