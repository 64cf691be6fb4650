//! Calendar emission: finalized games in, ICS documents out.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use icalendar::{Calendar, Component, Event, EventLike, Property};
use sha2::{Digest, Sha256};

use crate::config;
use crate::game::Game;
use crate::teams::{self, TBD};

const PRODID: &str = "-//zoh-hokej-2026-ics//CZ";
const UID_DOMAIN: &str = "zoh-hokej-ics";
const GAME_DURATION_HOURS: i64 = 3;

/// Stable identifier so re-imports update events instead of duplicating
/// them.
pub fn build_uid(game: &Game) -> String {
    let base = format!(
        "{}|{}|{}|{}",
        game.category.key(),
        game.start.format("%Y-%m-%d %H:%M"),
        game.team1,
        game.team2
    );
    let digest = Sha256::digest(base.as_bytes());
    let hex: String = digest.iter().map(|byte| format!("{byte:02x}")).collect();
    format!("{hex}@{UID_DOMAIN}")
}

pub fn build_summary(game: &Game) -> String {
    let mut prefix = game.category.gender_emoji().to_string();
    if let Some(medal) = game.phase_key.medal_emoji() {
        prefix.push(' ');
        prefix.push_str(medal);
    }

    // An undetermined playoff slot gets a "Semifinále 2" style label instead
    // of two TBD team names.
    if game.phase_key.is_playoff() && (game.team1 == TBD || game.team2 == TBD) {
        let index = game.playoff_index.unwrap_or(1);
        return format!("{prefix} {} {index}", game.phase_label);
    }

    let team1 = teams::team_display_with_flag(&game.team1);
    let team2 = teams::team_display_with_flag(&game.team2);
    let mut summary = format!("{prefix} {team1} – {team2}");
    if let (Some(score1), Some(score2), Some(finish)) = (game.score1, game.score2, game.finish) {
        summary.push_str(&format!(" {score1}:{score2} ({})", finish.abbrev()));
    }
    summary
}

pub fn build_description(game: &Game) -> String {
    let mut parts: Vec<&str> = Vec::new();
    parts.push(game.group_label.as_deref().unwrap_or(game.phase_label));
    if let Some(venue) = game.venue.as_deref() {
        parts.push(venue);
    }
    if let Some(note) = game.note.as_deref() {
        parts.push(note);
    }
    parts.join("\n")
}

pub fn games_to_calendar(games: &[Game], calendar_name: &str) -> Calendar {
    let mut calendar = Calendar::new();
    calendar
        .name(calendar_name)
        .timezone(config::CALENDAR_TIMEZONE)
        .append_property(Property::new("PRODID", PRODID));

    for game in games {
        let start = game.start.with_timezone(&Utc);
        let end = (game.start + Duration::hours(GAME_DURATION_HOURS)).with_timezone(&Utc);

        let mut event = Event::new();
        event
            .summary(&build_summary(game))
            .starts(start)
            .ends(end)
            .uid(&build_uid(game));
        let description = build_description(game);
        if !description.is_empty() {
            event.description(&description);
        }
        calendar.push(event.done());
    }

    calendar
}

pub fn write_calendar(calendar: &Calendar, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    }
    fs::write(path, calendar.to_string())
        .with_context(|| format!("failed to write {}", path.display()))
}
