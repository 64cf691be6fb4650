//! Terminal fallback strategy: the page's raw wiki markup fetched from the
//! parse API. Works even when the rendered page omits the schedule; may
//! legitimately find nothing.

use anyhow::Result;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::game::{Category, FinishType, Game, PhaseKey};
use crate::http_client;
use crate::teams::{self, TBD, VENUES};
use crate::tokens;

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/wiki/([^#?]+)").expect("title regex"));
static GROUP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Group\s+([A-Z])").expect("group heading regex"));
static ROW_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2}\s+February\s+2026)").expect("row date regex"));
static FLAG_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\{\{flag\|([^}|]+)",
        r"\{\{flagicon\|([^}|]+)",
        r"\{\{flagcountry\|([^}|]+)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("flag regex"))
    .collect()
});

#[derive(Debug, Deserialize)]
struct ParseResponse {
    #[serde(default)]
    parse: Option<ParseBody>,
}

#[derive(Debug, Deserialize)]
struct ParseBody {
    #[serde(default)]
    wikitext: Option<WikitextBody>,
}

#[derive(Debug, Deserialize)]
struct WikitextBody {
    #[serde(rename = "*", default)]
    content: Option<String>,
}

pub fn fetch_from_api(page_url: &str, category: Category) -> Result<Vec<Game>> {
    let Some(title) = page_title(page_url) else {
        return Ok(Vec::new());
    };
    let api_url = format!(
        "https://en.wikipedia.org/w/api.php?action=parse&prop=wikitext&format=json&page={title}"
    );
    let body = http_client::fetch_text(&api_url)?;
    let Some(wikitext) = extract_wikitext(&body) else {
        return Ok(Vec::new());
    };
    Ok(parse_wikitext(&wikitext, category))
}

pub fn page_title(url: &str) -> Option<&str> {
    TITLE_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Malformed or unexpected API JSON yields nothing rather than an error;
/// this is the last strategy in the cascade and degrades silently.
pub fn extract_wikitext(body: &str) -> Option<String> {
    let response: ParseResponse = serde_json::from_str(body).ok()?;
    response
        .parse?
        .wikitext?
        .content
        .filter(|content| !content.is_empty())
}

#[derive(Debug)]
struct MarkupContext {
    phase: PhaseKey,
    group: Option<String>,
    date: Option<NaiveDate>,
}

fn update_context(ctx: &mut MarkupContext, line: &str) {
    if line.starts_with("===") && line.contains("Group ") {
        if let Some(caps) = GROUP_RE.captures(line) {
            ctx.group = Some(format!("Skupina {}", &caps[1]));
            ctx.phase = PhaseKey::Preliminary;
        }
    }
    if line.starts_with("==") {
        if line.contains("Quarter") {
            ctx.phase = PhaseKey::Quarterfinals;
            ctx.group = None;
        } else if line.contains("Semi") {
            ctx.phase = PhaseKey::Semifinals;
            ctx.group = None;
        } else if line.contains("Bronze") {
            ctx.phase = PhaseKey::Bronze;
            ctx.group = None;
        } else if line.contains("Gold") || line.contains("Final") {
            ctx.phase = PhaseKey::Gold;
            ctx.group = None;
        }
    }
}

/// Two distinct resolvable teams from the flag templates, in order of
/// appearance per template kind.
fn extract_teams(row_text: &str) -> Option<(String, String)> {
    let mut codes: Vec<String> = Vec::new();
    for regex in FLAG_RES.iter() {
        for caps in regex.captures_iter(row_text) {
            let code = teams::normalize_team_name(&caps[1]);
            if code != TBD && !codes.contains(&code) {
                codes.push(code);
            }
        }
    }
    if codes.len() >= 2 {
        let team2 = codes.swap_remove(1);
        let team1 = codes.swap_remove(0);
        Some((team1, team2))
    } else {
        None
    }
}

fn flush_row(row_text: &str, ctx: &mut MarkupContext, category: Category) -> Option<Game> {
    if let Some(caps) = ROW_DATE_RE.captures(row_text) {
        ctx.date = tokens::parse_textual_date(&caps[1]);
    }
    let date = ctx.date?;
    let time = tokens::find_time_token(row_text)?;
    let start = tokens::localize(date, time)?;
    let (team1, team2) = extract_teams(row_text)?;

    let mut game = Game::new(category, start, team1, team2, ctx.phase, ctx.group.clone());
    if let Some((score1, score2)) = tokens::parse_score(row_text) {
        game.score1 = Some(score1);
        game.score2 = Some(score2);
        // Markup abbreviations are uppercase; keep the match case-sensitive
        // so template noise like "sortable" stays inert.
        game.finish = Some(if row_text.contains("SO") {
            FinishType::Shootout
        } else if row_text.contains("OT") {
            FinishType::Overtime
        } else {
            FinishType::Regulation
        });
    }
    game.venue = VENUES
        .iter()
        .find(|venue| row_text.contains(*venue))
        .map(|venue| venue.to_string());
    Some(game)
}

/// Rows are accumulated between `|-` separators and parsed as one blob of
/// markup when the separator arrives.
pub fn parse_wikitext(wikitext: &str, category: Category) -> Vec<Game> {
    let mut games = Vec::new();
    let mut ctx = MarkupContext {
        phase: PhaseKey::Preliminary,
        group: None,
        date: None,
    };
    let mut row_buffer: Vec<&str> = Vec::new();

    for line in wikitext.lines() {
        update_context(&mut ctx, line);
        if line.starts_with("|-") {
            let row_text = row_buffer.join(" ");
            row_buffer.clear();
            if let Some(game) = flush_row(&row_text, &mut ctx, category) {
                games.push(game);
            }
        } else {
            row_buffer.push(line);
        }
    }

    games
}
