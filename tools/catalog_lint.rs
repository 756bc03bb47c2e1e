/// Catalog Linter — validates an event catalog RON file.
///
/// Usage: catalog_lint <catalog.ron> [--min-hints <n>]
///
/// Errors (exit 1): unreadable/unparseable file, duplicate event ids.
/// Warnings: events below the hint minimum, events with no accepted
/// answers, empty locations.

use chronicle_engine::schema::catalog::EventCatalog;
use chronicle_engine::schema::event::format_year;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: catalog_lint <catalog.ron> [--min-hints <n>]");
        process::exit(0);
    }

    let catalog_path = &args[1];
    let mut min_hints = 1usize;

    let mut i = 2;
    while i < args.len() {
        if args[i] == "--min-hints" && i + 1 < args.len() {
            i += 1;
            min_hints = args[i].parse().unwrap_or(1);
        }
        i += 1;
    }

    let catalog = match EventCatalog::load_from_ron(Path::new(catalog_path)) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("ERROR: Failed to load catalog: {}", e);
            process::exit(1);
        }
    };

    let mut warnings = 0;

    for event in catalog.iter() {
        if event.hints.len() < min_hints {
            println!(
                "WARNING: event {} ({}) has {} hint(s), expected at least {}",
                event.id.0,
                event.name,
                event.hints.len(),
                min_hints
            );
            warnings += 1;
        }
        if event.accepted_answers.is_empty() {
            println!(
                "WARNING: event {} ({}) has no accepted answers",
                event.id.0, event.name
            );
            warnings += 1;
        }
        if event.location.trim().is_empty() {
            println!(
                "WARNING: event {} ({}) has an empty location",
                event.id.0, event.name
            );
            warnings += 1;
        }
    }

    let years: Vec<i32> = catalog.iter().map(|e| e.year).collect();
    if let (Some(&oldest), Some(&newest)) = (years.iter().min(), years.iter().max()) {
        println!(
            "{} events spanning {} to {}",
            catalog.len(),
            format_year(oldest),
            format_year(newest)
        );
    } else {
        println!("0 events");
    }

    if warnings > 0 {
        println!("{} warning(s)", warnings);
    } else {
        println!("OK");
    }
}
