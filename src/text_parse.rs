//! Third strategy: line-by-line scan of the rendered page text. Used when
//! neither the data tables nor the micro-format rows are recognizable; keeps
//! a running context of the most recent date/time/phase/group markers.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::game::{Category, Game, PhaseKey};
use crate::htmltext::{collapse_ws, page_text};
use crate::teams::{self, TBD};
use crate::tokens;

static GROUP_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bGroup\s+([A-Z])\b").expect("group line regex"));
static QUARTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Quarter-finals|Quarterfinals").expect("quarterfinal regex"));
static SEMI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Semi-finals|Semifinals").expect("semifinal regex"));
static BRONZE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Bronze medal game|Bronze").expect("bronze regex"));
static GOLD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Gold medal game|Gold|Final").expect("gold regex"));
static DATE_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2}\s+[A-Za-z]+\s+20\d{2})\b").expect("date line regex"));
static TIME_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{1,2}:\d{2}$").expect("time line regex"));

/// Box-score furniture that must never be mistaken for a game line.
const NOISE_KEYWORDS: [&str; 4] = ["attendance", "goalies", "referees", "linesmen"];

/// Scan state carried across lines. Marker lines mutate it; game lines read
/// it. Entering a knockout phase clears the group.
#[derive(Debug)]
pub struct ScanContext {
    pub date: Option<NaiveDate>,
    pub time: Option<(u32, u32)>,
    pub phase: PhaseKey,
    pub group: Option<String>,
}

impl Default for ScanContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanContext {
    pub fn new() -> Self {
        ScanContext {
            date: None,
            time: None,
            phase: PhaseKey::Preliminary,
            group: None,
        }
    }

    /// Returns true when the line was consumed as a context marker.
    pub fn apply_marker(&mut self, line: &str) -> bool {
        if let Some(caps) = GROUP_LINE_RE.captures(line) {
            self.group = Some(format!("Skupina {}", &caps[1]));
            self.phase = PhaseKey::Preliminary;
            return true;
        }
        if QUARTER_RE.is_match(line) {
            self.enter_knockout(PhaseKey::Quarterfinals);
            return true;
        }
        if SEMI_RE.is_match(line) {
            self.enter_knockout(PhaseKey::Semifinals);
            return true;
        }
        if BRONZE_RE.is_match(line) {
            self.enter_knockout(PhaseKey::Bronze);
            return true;
        }
        if GOLD_RE.is_match(line) {
            self.enter_knockout(PhaseKey::Gold);
            return true;
        }
        if let Some(caps) = DATE_LINE_RE.captures(line) {
            self.date = tokens::parse_textual_date(&caps[1]);
            return true;
        }
        if TIME_LINE_RE.is_match(line) {
            self.time = tokens::find_time_token(line);
            return true;
        }
        false
    }

    fn enter_knockout(&mut self, phase: PhaseKey) {
        self.phase = phase;
        self.group = None;
    }
}

pub fn parse_page_text(html: &str, category: Category) -> Vec<Game> {
    let text = page_text(html);
    let lines: Vec<String> = text
        .lines()
        .map(collapse_ws)
        .filter(|line| !line.is_empty())
        .collect();
    parse_lines(&lines, category)
}

pub fn parse_lines(lines: &[String], category: Category) -> Vec<Game> {
    let mut ctx = ScanContext::new();
    let mut games = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let line = &lines[i];
        if ctx.apply_marker(line) {
            i += 1;
            continue;
        }
        let (Some(date), Some(time)) = (ctx.date, ctx.time) else {
            i += 1;
            continue;
        };

        let lower = line.to_lowercase();
        if NOISE_KEYWORDS.iter().any(|keyword| lower.contains(keyword)) {
            i += 1;
            continue;
        }

        let mentions = teams::find_team_mentions(&lower);
        let is_placeholder = lower.contains("tbd v tbd");
        if mentions.len() >= 2 || is_placeholder {
            let (team1, team2) = if is_placeholder {
                (TBD.to_string(), TBD.to_string())
            } else {
                let mut positions = mentions;
                positions.sort_by_key(|mention| mention.0);
                (
                    teams::normalize_team_name(positions[0].1),
                    teams::normalize_team_name(positions[1].1),
                )
            };

            let score = tokens::parse_score(line);
            // The venue is often printed on its own line right after the
            // game line.
            let venue = teams::find_venue(&lower)
                .or_else(|| {
                    lines
                        .get(i + 1)
                        .and_then(|next| teams::find_venue(&next.to_lowercase()))
                })
                .map(str::to_string);

            if let Some(start) = tokens::localize(date, time) {
                let mut game =
                    Game::new(category, start, team1, team2, ctx.phase, ctx.group.clone());
                game.venue = venue;
                if let Some((score1, score2)) = score {
                    game.score1 = Some(score1);
                    game.score2 = Some(score2);
                    game.finish = Some(tokens::classify_finish(line));
                }
                games.push(game);
            }
        }
        i += 1;
    }

    games
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_marker_sets_group_and_resets_phase() {
        let mut ctx = ScanContext::new();
        ctx.phase = PhaseKey::Quarterfinals;
        assert!(ctx.apply_marker("Group B"));
        assert_eq!(ctx.phase, PhaseKey::Preliminary);
        assert_eq!(ctx.group.as_deref(), Some("Skupina B"));
    }

    #[test]
    fn knockout_marker_clears_group() {
        let mut ctx = ScanContext::new();
        assert!(ctx.apply_marker("Group A"));
        assert!(ctx.apply_marker("Quarter-finals"));
        assert_eq!(ctx.phase, PhaseKey::Quarterfinals);
        assert_eq!(ctx.group, None);
    }

    #[test]
    fn date_marker_with_bad_month_resets_date() {
        let mut ctx = ScanContext::new();
        assert!(ctx.apply_marker("10 February 2026"));
        assert!(ctx.date.is_some());
        assert!(ctx.apply_marker("10 Frobnuary 2026"));
        assert_eq!(ctx.date, None);
    }

    #[test]
    fn bare_time_line_is_a_marker_but_inline_time_is_not() {
        let mut ctx = ScanContext::new();
        assert!(ctx.apply_marker("13:10"));
        assert_eq!(ctx.time, Some((13, 10)));
        assert!(!ctx.apply_marker("puck drop at 13:10 local"));
    }

    #[test]
    fn game_lines_are_not_markers() {
        let mut ctx = ScanContext::new();
        assert!(!ctx.apply_marker("Czech Republic 2 – 1 Finland (OT)"));
    }
}
