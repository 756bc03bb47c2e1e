//! Event selection — how each mode draws its question set from the
//! catalog.
//!
//! Three samplers: plain random (classic, era, map), date-seeded
//! deterministic (daily challenge), and year-spread (timeline). All of
//! them degrade to returning the whole catalog when asked for more
//! events than exist.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::schema::catalog::EventCatalog;
use crate::schema::event::HistoricalEvent;

/// Uniform sampling without replacement. Non-deterministic across
/// calls; pass a seeded `StdRng` in tests for reproducibility.
pub fn pick_random(catalog: &EventCatalog, count: usize, rng: &mut StdRng) -> Vec<HistoricalEvent> {
    let mut events: Vec<HistoricalEvent> = catalog.events().to_vec();
    events.shuffle(rng);
    events.truncate(count);
    events
}

/// Deterministic selection keyed by a calendar-date string.
///
/// Contract: the same `date_key` always yields the same ordered subset,
/// so every player sees an identical daily challenge. The scheme is
/// version-frozen — changing the hash or the generator silently changes
/// the identity of every past daily challenge:
///
/// 1. Hash the key with the wrapping 32-bit recurrence
///    `h = h * 31 + c` over its Unicode scalar values, then take the
///    unsigned absolute value.
/// 2. Drive a Fisher–Yates shuffle of the full catalog with the
///    Numerical Recipes LCG `s = s * 1664525 + 1013904223 (mod 2^32)`.
/// 3. Take the first `count` events.
///
/// Deliberately independent of the `rand` crate so the contract cannot
/// drift with a dependency upgrade.
pub fn pick_seeded_by_date(
    catalog: &EventCatalog,
    count: usize,
    date_key: &str,
) -> Vec<HistoricalEvent> {
    let mut events: Vec<HistoricalEvent> = catalog.events().to_vec();
    let mut lcg = Lcg::new(date_seed(date_key));
    seeded_shuffle(&mut events, &mut lcg);
    events.truncate(count);
    events
}

/// Selection spread across the full year range: sort by year, then take
/// one event per even index stride with a random offset inside the
/// stride. Keeps timeline rounds from clustering in a single period.
pub fn pick_spread_years(
    catalog: &EventCatalog,
    count: usize,
    rng: &mut StdRng,
) -> Vec<HistoricalEvent> {
    if count == 0 {
        return Vec::new();
    }

    let mut sorted: Vec<HistoricalEvent> = catalog.events().to_vec();
    sorted.sort_by_key(|e| e.year);

    if sorted.len() <= count {
        return sorted;
    }

    let step = sorted.len() / count;
    let mut picked = Vec::with_capacity(count);
    for i in 0..count {
        let index = (i * step + rng.gen_range(0..step)).min(sorted.len() - 1);
        picked.push(sorted[index].clone());
    }
    picked
}

/// The frozen date-key hash: wrapping `h * 31 + c`.
fn date_seed(date_key: &str) -> u32 {
    let mut hash: i32 = 0;
    for c in date_key.chars() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(c as i32);
    }
    hash.unsigned_abs()
}

/// The frozen linear-congruential generator behind the daily shuffle.
struct Lcg {
    state: u32,
}

impl Lcg {
    fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next value in `[0, 1]`.
    fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        f64::from(self.state) / f64::from(u32::MAX)
    }
}

/// Fisher–Yates driven by the frozen generator.
fn seeded_shuffle(events: &mut [HistoricalEvent], lcg: &mut Lcg) {
    for i in (1..events.len()).rev() {
        let j = ((lcg.next_f64() * (i + 1) as f64) as usize).min(i);
        events.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::event::{Difficulty, Era, EventId};
    use rand::SeedableRng;

    fn make_catalog(size: u32) -> EventCatalog {
        let events = (0..size)
            .map(|i| HistoricalEvent {
                id: EventId(i),
                name: format!("Event {}", i),
                era: Era::Modern,
                year: 1800 + i as i32 * 7,
                location: "Somewhere".to_string(),
                description: String::new(),
                fun_fact: String::new(),
                difficulty: Difficulty::Easy,
                hints: Vec::new(),
                accepted_answers: Vec::new(),
            })
            .collect();
        EventCatalog::from_events(events).unwrap()
    }

    #[test]
    fn pick_random_returns_requested_count() {
        let catalog = make_catalog(20);
        let mut rng = StdRng::seed_from_u64(42);
        let picked = pick_random(&catalog, 5, &mut rng);
        assert_eq!(picked.len(), 5);
    }

    #[test]
    fn pick_random_without_replacement() {
        let catalog = make_catalog(20);
        let mut rng = StdRng::seed_from_u64(42);
        let picked = pick_random(&catalog, 20, &mut rng);
        let mut ids: Vec<u32> = picked.iter().map(|e| e.id.0).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn pick_random_underflow_returns_whole_catalog() {
        let catalog = make_catalog(3);
        let mut rng = StdRng::seed_from_u64(42);
        let picked = pick_random(&catalog, 10, &mut rng);
        assert_eq!(picked.len(), 3);
    }

    #[test]
    fn seeded_pick_is_deterministic_per_date() {
        let catalog = make_catalog(30);
        let first = pick_seeded_by_date(&catalog, 5, "2024-01-01");
        let second = pick_seeded_by_date(&catalog, 5, "2024-01-01");
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }

    #[test]
    fn seeded_pick_varies_across_dates() {
        let catalog = make_catalog(30);
        let jan1 = pick_seeded_by_date(&catalog, 5, "2024-01-01");
        let jan2 = pick_seeded_by_date(&catalog, 5, "2024-01-02");
        // Not guaranteed by the contract, but with 30 events two dates
        // colliding on all five picks would indicate a broken seed.
        assert_ne!(jan1, jan2);
    }

    #[test]
    fn seeded_pick_underflow_returns_whole_catalog() {
        let catalog = make_catalog(3);
        let picked = pick_seeded_by_date(&catalog, 10, "2024-06-15");
        assert_eq!(picked.len(), 3);
    }

    #[test]
    fn date_seed_is_frozen() {
        // Pinned values: changing the hash changes every past daily
        // challenge, so these must never need updating.
        assert_eq!(date_seed(""), 0);
        assert_eq!(date_seed("a"), 97);
        assert_eq!(date_seed("2024-01-01"), date_seed("2024-01-01"));
        assert_ne!(date_seed("2024-01-01"), date_seed("2024-01-02"));
    }

    #[test]
    fn lcg_is_frozen() {
        let mut lcg = Lcg::new(0);
        lcg.next_f64();
        assert_eq!(lcg.state, 1_013_904_223);
        lcg.next_f64();
        assert_eq!(lcg.state, 1_196_435_762);
    }

    #[test]
    fn spread_years_returns_sorted_spread() {
        let catalog = make_catalog(25);
        let mut rng = StdRng::seed_from_u64(42);
        let picked = pick_spread_years(&catalog, 5, &mut rng);
        assert_eq!(picked.len(), 5);
        for pair in picked.windows(2) {
            assert!(pair[0].year < pair[1].year, "spread picks must ascend");
        }
    }

    #[test]
    fn spread_years_zero_count_is_empty() {
        let catalog = make_catalog(25);
        let mut rng = StdRng::seed_from_u64(42);
        assert!(pick_spread_years(&catalog, 0, &mut rng).is_empty());
    }

    #[test]
    fn spread_years_underflow_returns_sorted_catalog() {
        let catalog = make_catalog(4);
        let mut rng = StdRng::seed_from_u64(42);
        let picked = pick_spread_years(&catalog, 10, &mut rng);
        assert_eq!(picked.len(), 4);
        for pair in picked.windows(2) {
            assert!(pair[0].year <= pair[1].year);
        }
    }
}
