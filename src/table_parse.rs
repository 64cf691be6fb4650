//! Highest-priority extraction strategy: general-purpose data tables with a
//! header row naming the date/time/venue/team columns.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::game::{self, Category, Game, PhaseKey};
use crate::htmltext::element_text;
use crate::teams::{self, TBD};
use crate::tokens;

static TABLE_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table.wikitable").expect("table selector"));
static CAPTION_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("caption").expect("caption selector"));
static HEADER_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("th").expect("th selector"));
static ROW_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("tr selector"));
static CELL_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("th, td").expect("cell selector"));

#[derive(Debug, Default)]
struct ColumnMap {
    date: Option<usize>,
    time: Option<usize>,
    venue: Option<usize>,
    team1: Option<usize>,
    team2: Option<usize>,
}

/// Column order and presence vary per table, so columns are located by fuzzy
/// keyword match over every header cell. Date/time/venue keep the first hit,
/// team columns the last one.
fn locate_columns(headers: &[String]) -> ColumnMap {
    let mut cols = ColumnMap::default();
    for (idx, header) in headers.iter().enumerate() {
        if cols.date.is_none() && header.contains("date") {
            cols.date = Some(idx);
        }
        if cols.time.is_none() && header.contains("time") {
            cols.time = Some(idx);
        }
        if cols.venue.is_none() && header.contains("venue") {
            cols.venue = Some(idx);
        }
        if header.contains("home") || header.contains("team 1") {
            cols.team1 = Some(idx);
        }
        if header.contains("away") || header.contains("team 2") {
            cols.team2 = Some(idx);
        }
    }
    cols
}

pub fn parse_schedule_tables(html: &str, category: Category) -> Vec<Game> {
    let document = Html::parse_document(html);
    let mut games = Vec::new();

    for table in document.select(&TABLE_SEL) {
        let caption_text = table
            .select(&CAPTION_SEL)
            .next()
            .map(|caption| element_text(&caption))
            .unwrap_or_default();

        let headers: Vec<String> = table
            .select(&HEADER_SEL)
            .map(|header| element_text(&header).to_lowercase())
            .collect();
        let cols = locate_columns(&headers);

        // A date cell spans several rows in the source; rows without their
        // own date reuse the last one seen in this table.
        let mut current_date: Option<NaiveDate> = None;

        for row in table.select(&ROW_SEL) {
            let texts: Vec<String> = row.select(&CELL_SEL).map(|cell| element_text(&cell)).collect();
            if texts.is_empty() {
                continue;
            }
            let row_text = texts.join(" ");
            if row_text.trim().is_empty() || row_text.to_lowercase().contains("schedule") {
                continue;
            }

            let raw_date = cols
                .date
                .and_then(|idx| texts.get(idx))
                .map(String::as_str)
                .unwrap_or("");
            if !raw_date.is_empty() {
                let candidate = raw_date.trim().to_lowercase();
                if candidate != "date" && candidate != "datum" {
                    if let Some(date) = tokens::parse_textual_date(raw_date) {
                        current_date = Some(date);
                    }
                }
            }

            let raw_time = cols
                .time
                .and_then(|idx| texts.get(idx))
                .map(String::as_str)
                .unwrap_or("");
            let time_hay = if raw_time.is_empty() {
                row_text.as_str()
            } else {
                raw_time
            };
            let Some(time) = tokens::find_time_token(time_hay) else {
                continue;
            };
            let Some(date) = current_date else {
                continue;
            };
            let Some(start) = tokens::localize(date, time) else {
                continue;
            };

            let phase_text = format!("{caption_text} {row_text}");
            let phase_key = PhaseKey::from_text(&phase_text);
            let group_label = if phase_key == PhaseKey::Preliminary {
                game::group_label_from_text(&phase_text)
            } else {
                None
            };

            let mut team1 = cols
                .team1
                .and_then(|idx| texts.get(idx))
                .map(|text| teams::normalize_team_name(text))
                .unwrap_or_else(|| TBD.to_string());
            let mut team2 = cols
                .team2
                .and_then(|idx| texts.get(idx))
                .map(|text| teams::normalize_team_name(text))
                .unwrap_or_else(|| TBD.to_string());
            if team1 == TBD || team2 == TBD {
                // Last resort: first two recognizable codes anywhere in the
                // row, left to right. A venue cell with an embedded code
                // token can steal a slot here.
                let mut found: Vec<String> = Vec::new();
                for text in &texts {
                    let code = teams::normalize_team_name(text);
                    if code != TBD && !found.contains(&code) {
                        found.push(code);
                    }
                }
                if found.len() >= 2 {
                    team2 = found.remove(1);
                    team1 = found.remove(0);
                }
            }

            let venue = cols
                .venue
                .and_then(|idx| texts.get(idx))
                .map(|text| text.trim())
                .filter(|text| !text.is_empty())
                .map(str::to_string);

            let mut game = Game::new(category, start, team1, team2, phase_key, group_label);
            game.venue = venue;
            games.push(game);
        }
    }

    games
}
