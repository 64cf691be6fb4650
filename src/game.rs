use chrono::{DateTime, FixedOffset};
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Women,
    Men,
}

impl Category {
    pub fn key(self) -> &'static str {
        match self {
            Category::Women => "women",
            Category::Men => "men",
        }
    }

    pub fn gender_emoji(self) -> &'static str {
        match self {
            Category::Women => "👩",
            Category::Men => "👨",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseKey {
    Preliminary,
    Quarterfinals,
    Semifinals,
    Bronze,
    Gold,
}

impl PhaseKey {
    pub fn is_playoff(self) -> bool {
        !matches!(self, PhaseKey::Preliminary)
    }

    pub fn label_cz(self) -> &'static str {
        match self {
            PhaseKey::Preliminary => "Skupina",
            PhaseKey::Quarterfinals => "Čtvrtfinále",
            PhaseKey::Semifinals => "Semifinále",
            PhaseKey::Bronze => "O bronz",
            PhaseKey::Gold => "Finále",
        }
    }

    pub fn medal_emoji(self) -> Option<&'static str> {
        match self {
            PhaseKey::Bronze => Some("🥉"),
            PhaseKey::Gold => Some("🥇"),
            _ => None,
        }
    }

    /// Keyword classification of free text describing a round. Priority
    /// matters: "final" alone must not shadow the earlier rounds, and bronze
    /// beats gold so "Bronze medal game ... final score" stays bronze.
    pub fn from_text(text: &str) -> PhaseKey {
        let lower = text.to_lowercase();
        if lower.contains("quarterfinal") || lower.contains("quarter-final") {
            PhaseKey::Quarterfinals
        } else if lower.contains("semifinal") || lower.contains("semi-final") {
            PhaseKey::Semifinals
        } else if lower.contains("bronze") {
            PhaseKey::Bronze
        } else if lower.contains("gold") || lower.contains("final") {
            PhaseKey::Gold
        } else {
            PhaseKey::Preliminary
        }
    }
}

static GROUP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Group\s+([A-Z])\b").expect("group regex"));

/// "Group X" -> localized "Skupina X"; absent when no group letter is found.
pub fn group_label_from_text(text: &str) -> Option<String> {
    GROUP_RE
        .captures(text)
        .map(|caps| format!("Skupina {}", &caps[1]))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishType {
    Regulation,
    Overtime,
    Shootout,
}

impl FinishType {
    pub fn abbrev(self) -> &'static str {
        match self {
            FinishType::Regulation => "FT",
            FinishType::Overtime => "OT",
            FinishType::Shootout => "SO",
        }
    }
}

/// One scheduled (or finished) game. Created by exactly one extraction
/// strategy, later amended only with the playoff index.
#[derive(Debug, Clone)]
pub struct Game {
    pub category: Category,
    pub start: DateTime<FixedOffset>,
    pub team1: String,
    pub team2: String,
    pub phase_key: PhaseKey,
    pub phase_label: &'static str,
    pub group_label: Option<String>,
    pub venue: Option<String>,
    pub note: Option<String>,
    pub score1: Option<u32>,
    pub score2: Option<u32>,
    pub finish: Option<FinishType>,
    pub playoff_index: Option<u32>,
}

impl Game {
    pub fn new(
        category: Category,
        start: DateTime<FixedOffset>,
        team1: String,
        team2: String,
        phase_key: PhaseKey,
        group_label: Option<String>,
    ) -> Self {
        Game {
            category,
            start,
            team1,
            team2,
            phase_key,
            phase_label: phase_key.label_cz(),
            group_label,
            venue: None,
            note: None,
            score1: None,
            score2: None,
            finish: None,
            playoff_index: None,
        }
    }
}
