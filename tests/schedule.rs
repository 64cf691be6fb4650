use std::fs;
use std::path::PathBuf;

use zoh26_calendar::config;
use zoh26_calendar::game::{Category, Game, PhaseKey};
use zoh26_calendar::postprocess::{assign_playoff_indices, is_relevant};
use zoh26_calendar::schedule_fetch::{FetchedPage, run_extractors};

use chrono::TimeZone;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn mk_game(
    category: Category,
    day: u32,
    hour: u32,
    team1: &str,
    team2: &str,
    phase: PhaseKey,
) -> Game {
    let start = config::venue_tz()
        .with_ymd_and_hms(2026, 2, day, hour, 0, 0)
        .unwrap();
    Game::new(
        category,
        start,
        team1.to_string(),
        team2.to_string(),
        phase,
        None,
    )
}

#[test]
fn playoff_indices_are_chronological_and_contiguous_per_phase() {
    // Deliberately out of order and mixed across categories.
    let mut games = vec![
        mk_game(Category::Men, 20, 18, "TBD", "TBD", PhaseKey::Semifinals),
        mk_game(Category::Men, 12, 14, "CZE", "FIN", PhaseKey::Preliminary),
        mk_game(Category::Men, 20, 13, "TBD", "TBD", PhaseKey::Semifinals),
        mk_game(Category::Women, 19, 12, "TBD", "TBD", PhaseKey::Quarterfinals),
        mk_game(Category::Men, 22, 14, "TBD", "TBD", PhaseKey::Gold),
        mk_game(Category::Women, 19, 16, "TBD", "TBD", PhaseKey::Quarterfinals),
    ];
    assign_playoff_indices(&mut games);

    assert_eq!(games[0].playoff_index, Some(2));
    assert_eq!(games[1].playoff_index, None);
    assert_eq!(games[2].playoff_index, Some(1));
    assert_eq!(games[3].playoff_index, Some(1));
    assert_eq!(games[4].playoff_index, Some(1));
    assert_eq!(games[5].playoff_index, Some(2));
}

#[test]
fn relevance_keeps_playoffs_and_tracked_team_only() {
    let tracked = mk_game(Category::Men, 12, 14, "CZE", "FIN", PhaseKey::Preliminary);
    let foreign = mk_game(Category::Men, 12, 18, "FIN", "SWE", PhaseKey::Preliminary);
    let playoff = mk_game(Category::Men, 19, 12, "FIN", "SWE", PhaseKey::Quarterfinals);

    assert!(is_relevant(&tracked));
    assert!(!is_relevant(&foreign));
    assert!(is_relevant(&playoff));
}

// The table strategy finds the wikitable game, so the vevent row in the same
// document must never be reached.
#[test]
fn first_non_empty_strategy_wins() {
    let html = read_fixture("mixed.html");
    let page = FetchedPage {
        url: "https://en.wikipedia.org/wiki/Ice_hockey_at_the_2026_Winter_Olympics",
        html: &html,
    };
    let games = run_extractors(&page, Category::Men);
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].team1, "CZE");
    assert_eq!(games[0].team2, "FIN");
}

// No wikitable in this document: the cascade must fall through to the
// micro-format rows on the same fetched page, without re-fetching anything.
#[test]
fn cascade_falls_back_to_vevent_rows() {
    let html = read_fixture("vevents.html");
    let page = FetchedPage {
        url: "https://en.wikipedia.org/wiki/Ice_hockey_at_the_2026_Winter_Olympics",
        html: &html,
    };
    let games = run_extractors(&page, Category::Men);
    assert_eq!(games.len(), 4);
    assert!(games.iter().any(|game| game.phase_key == PhaseKey::Gold));
}
