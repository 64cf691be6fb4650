//! Second strategy: calendar-event micro-format rows (`table.vevent
//! tr.summary`). More rigid than the data tables but survives layouts where
//! the schedule tables are split into per-day fragments.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::game::{Category, Game, PhaseKey};
use crate::htmltext::element_text;
use crate::teams;
use crate::tokens;

// Headings and event rows are consumed in one document-order pass so each row
// sees the nearest preceding section heading.
static SCAN_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2, h3, table.vevent tr.summary").expect("scan selector"));
static TD_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("td selector"));
static ANCHOR_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("anchor selector"));

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2}\s+[A-Za-z]+\s+2026)").expect("vevent date regex"));

fn phase_from_heading(heading: Option<&(String, String)>) -> (PhaseKey, Option<String>) {
    let Some((id, text)) = heading else {
        return (PhaseKey::Preliminary, None);
    };
    if id.contains("group_a") || text.contains("group a") {
        (PhaseKey::Preliminary, Some("Skupina A".to_string()))
    } else if id.contains("group_b") || text.contains("group b") {
        (PhaseKey::Preliminary, Some("Skupina B".to_string()))
    } else if id.contains("quarter") || text.contains("quarter") {
        (PhaseKey::Quarterfinals, None)
    } else if id.contains("semi") || text.contains("semi") {
        (PhaseKey::Semifinals, None)
    } else if id.contains("bronze") || text.contains("bronze") {
        (PhaseKey::Bronze, None)
    } else if id.contains("gold")
        || text.contains("gold")
        || id.contains("final")
        || text.contains("final")
    {
        (PhaseKey::Gold, None)
    } else {
        (PhaseKey::Preliminary, None)
    }
}

pub fn parse_event_rows(html: &str, category: Category) -> Vec<Game> {
    let document = Html::parse_document(html);
    let mut games = Vec::new();
    let mut heading: Option<(String, String)> = None;

    for node in document.select(&SCAN_SEL) {
        let name = node.value().name();
        if name.eq_ignore_ascii_case("h2") || name.eq_ignore_ascii_case("h3") {
            let id = node.value().attr("id").unwrap_or("").to_lowercase();
            let text = element_text(&node).to_lowercase();
            heading = Some((id, text));
            continue;
        }

        let cells: Vec<ElementRef> = node.select(&TD_SEL).collect();
        if cells.len() < 4 {
            continue;
        }

        let left_text = element_text(&cells[0]);
        let Some(date) = DATE_RE
            .captures(&left_text)
            .and_then(|caps| tokens::parse_textual_date(&caps[1]))
        else {
            continue;
        };
        let Some(time) = tokens::find_time_token(&left_text) else {
            continue;
        };
        let Some(start) = tokens::localize(date, time) else {
            continue;
        };

        let team1 = teams::normalize_team_name(&element_text(&cells[1]));
        let team2 = teams::normalize_team_name(&element_text(&cells[3]));

        let center_text = element_text(&cells[2]);
        let score = tokens::parse_score(&center_text);

        let venue = cells
            .get(4)
            .map(|cell| element_text(cell))
            .filter(|text| !text.is_empty());

        // Heading-based phase inference is coarse; the per-row anchor in the
        // date cell overrides it when present.
        let (mut phase_key, mut group_label) = phase_from_heading(heading.as_ref());
        let anchor_text = left_text.to_lowercase();
        let anchor_key = cells[0]
            .select(&ANCHOR_SEL)
            .next()
            .and_then(|anchor| anchor.value().attr("href"))
            .filter(|href| href.starts_with('#'))
            .map(|href| href[1..].to_lowercase())
            .unwrap_or_default();
        if anchor_key.contains("group_a") || anchor_text.contains("group a") {
            phase_key = PhaseKey::Preliminary;
            group_label = Some("Skupina A".to_string());
        } else if anchor_key.contains("group_b") || anchor_text.contains("group b") {
            phase_key = PhaseKey::Preliminary;
            group_label = Some("Skupina B".to_string());
        } else if anchor_key.contains("quarter") {
            phase_key = PhaseKey::Quarterfinals;
            group_label = None;
        } else if anchor_key.contains("semi") {
            phase_key = PhaseKey::Semifinals;
            group_label = None;
        } else if anchor_key.contains("bronze") {
            phase_key = PhaseKey::Bronze;
            group_label = None;
        } else if anchor_key.contains("gold") || anchor_key.contains("final") {
            phase_key = PhaseKey::Gold;
            group_label = None;
        }

        let mut game = Game::new(category, start, team1, team2, phase_key, group_label);
        game.venue = venue;
        if let Some((score1, score2)) = score {
            game.score1 = Some(score1);
            game.score2 = Some(score2);
            game.finish = Some(tokens::classify_finish(&center_text));
        }
        games.push(game);
    }

    games
}
