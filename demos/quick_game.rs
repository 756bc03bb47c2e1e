/// Quick Game demo — a scripted classic session from start to outcome.
///
/// Loads the test fixture catalog, plays a five-question classic game
/// (one hint taken, one question conceded), and folds the outcome into
/// a fresh profile.
///
/// Run with: cargo run --example quick_game

use chronicle_engine::core::session::{AnswerOutcome, GameSession};
use chronicle_engine::schema::catalog::EventCatalog;
use chronicle_engine::schema::event::format_year;
use chronicle_engine::schema::profile::UserProfile;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    let catalog = EventCatalog::load_from_ron(std::path::Path::new("tests/fixtures/catalog.ron"))
        .expect("Failed to load fixture catalog");

    let mut rng = StdRng::seed_from_u64(2026);
    let mut session = GameSession::start_classic(&catalog, false, &mut rng);

    println!("=== Classic game: guess the year ===\n");

    let mut question = 1;
    loop {
        let event = session.current_event().expect("session has a current event").clone();
        println!("Q{}: {} — {}", question, event.name, event.location);

        match question {
            // Take a hint before answering.
            2 => {
                if let Some(hint) = session.reveal_hint() {
                    println!("    hint: {}", hint);
                }
            }
            // Concede one question outright.
            4 => {
                session.give_up();
                println!(
                    "    gave up — it was {} ({})",
                    format_year(event.year),
                    event.fun_fact
                );
            }
            _ => {}
        }

        if !session.is_answered() {
            match session.submit_answer(&event.year.to_string()) {
                AnswerOutcome::Correct { points } => {
                    println!(
                        "    {} — correct, +{} points (streak {})",
                        format_year(event.year),
                        points,
                        session.streak()
                    );
                }
                other => println!("    unexpected outcome: {:?}", other),
            }
        }

        if !session.next_event() {
            break;
        }
        question += 1;
    }

    let outcome = session.outcome();
    println!(
        "\nFinal: {} points, {}/{} correct, best streak {}",
        outcome.score_delta, outcome.correct_count, outcome.total_count, outcome.best_streak
    );

    let mut profile = UserProfile::default();
    let unlocked = profile.record_game(&outcome);
    for achievement in unlocked {
        println!("Achievement unlocked: {}", achievement.display_name());
    }
    println!(
        "Profile: {} game(s), {} total points, {}% accuracy",
        profile.total_games_played,
        profile.total_score,
        profile.accuracy_percent()
    );
}
