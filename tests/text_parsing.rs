use std::fs;
use std::path::PathBuf;

use zoh26_calendar::game::{Category, FinishType, PhaseKey};
use zoh26_calendar::text_parse::parse_page_text;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

// The fixture carries script/style blocks naming teams and a box-score noise
// line; none of them may leak into the parsed schedule.
#[test]
fn parses_rendered_text_fixture() {
    let html = read_fixture("page_text.html");
    let games = parse_page_text(&html, Category::Women);
    assert_eq!(games.len(), 4);
}

#[test]
fn group_game_with_score_and_venue_on_next_line() {
    let html = read_fixture("page_text.html");
    let games = parse_page_text(&html, Category::Women);

    let first = &games[0];
    assert_eq!(first.team1, "CZE");
    assert_eq!(first.team2, "FIN");
    assert_eq!(first.phase_key, PhaseKey::Preliminary);
    assert_eq!(first.group_label.as_deref(), Some("Skupina A"));
    assert_eq!(first.start.to_rfc3339(), "2026-02-10T13:10:00+01:00");
    assert_eq!(first.score1, Some(2));
    assert_eq!(first.score2, Some(1));
    assert_eq!(first.finish, Some(FinishType::Overtime));
    // First match in the fixed venue list wins, even against the longer name.
    assert_eq!(first.venue.as_deref(), Some("PalaItalia"));
}

#[test]
fn time_marker_updates_between_games() {
    let html = read_fixture("page_text.html");
    let games = parse_page_text(&html, Category::Women);

    let second = &games[1];
    assert_eq!(second.team1, "SWE");
    assert_eq!(second.team2, "USA");
    assert_eq!(second.start.to_rfc3339(), "2026-02-10T17:40:00+01:00");
    assert!(second.score1.is_none());
    assert!(second.finish.is_none());
    assert_eq!(second.venue.as_deref(), Some("Fiera Milano"));
}

#[test]
fn literal_tbd_placeholder_is_recognized() {
    let html = read_fixture("page_text.html");
    let games = parse_page_text(&html, Category::Women);

    let placeholder = &games[2];
    assert_eq!(placeholder.team1, "TBD");
    assert_eq!(placeholder.team2, "TBD");
    assert_eq!(placeholder.phase_key, PhaseKey::Quarterfinals);
    assert_eq!(placeholder.group_label, None);
    assert_eq!(placeholder.start.to_rfc3339(), "2026-02-19T15:00:00+01:00");
}

#[test]
fn knockout_marker_switches_phase_and_clears_group() {
    let html = read_fixture("page_text.html");
    let games = parse_page_text(&html, Category::Women);

    let gold = &games[3];
    assert_eq!(gold.team1, "CZE");
    assert_eq!(gold.team2, "USA");
    assert_eq!(gold.phase_key, PhaseKey::Gold);
    assert_eq!(gold.group_label, None);
    assert_eq!(gold.score1, Some(4));
    assert_eq!(gold.score2, Some(3));
    assert_eq!(gold.finish, Some(FinishType::Shootout));
}

#[test]
fn finish_is_present_iff_scores_are() {
    let html = read_fixture("page_text.html");
    for game in parse_page_text(&html, Category::Women) {
        assert_eq!(
            game.finish.is_some(),
            game.score1.is_some() && game.score2.is_some()
        );
    }
}
