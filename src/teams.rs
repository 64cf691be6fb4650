use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

/// Sentinel for an undetermined bracket slot.
pub const TBD: &str = "TBD";

/// Full source-document team names -> canonical IIHF codes.
const TEAM_CODE_ALIASES: &[(&str, &str)] = &[
    ("Czech Republic", "CZE"),
    ("Czechia", "CZE"),
    ("Czech Republic (CZE)", "CZE"),
    ("Finland", "FIN"),
    ("Sweden", "SWE"),
    ("United States", "USA"),
    ("United States of America", "USA"),
    ("Canada", "CAN"),
    ("Switzerland", "SUI"),
    ("Germany", "GER"),
    ("Slovakia", "SVK"),
    ("Latvia", "LAT"),
    ("Denmark", "DEN"),
    ("Norway", "NOR"),
    ("Austria", "AUT"),
    ("France", "FRA"),
    ("Italy", "ITA"),
    ("Japan", "JPN"),
    ("China", "CHN"),
    ("South Korea", "KOR"),
];

const TEAM_NAMES_CZ: &[(&str, &str)] = &[
    ("CZE", "Česko"),
    ("FIN", "Finsko"),
    ("SWE", "Švédsko"),
    ("USA", "USA"),
    ("CAN", "Kanada"),
    ("SUI", "Švýcarsko"),
    ("GER", "Německo"),
    ("SVK", "Slovensko"),
    ("LAT", "Lotyšsko"),
    ("DEN", "Dánsko"),
    ("NOR", "Norsko"),
    ("AUT", "Rakousko"),
    ("FRA", "Francie"),
    ("ITA", "Itálie"),
    ("JPN", "Japonsko"),
    ("CHN", "Čína"),
    ("KOR", "Jižní Korea"),
];

const TEAM_FLAGS: &[(&str, &str)] = &[
    ("CZE", "🇨🇿"),
    ("FIN", "🇫🇮"),
    ("SWE", "🇸🇪"),
    ("USA", "🇺🇸"),
    ("CAN", "🇨🇦"),
    ("SUI", "🇨🇭"),
    ("GER", "🇩🇪"),
    ("SVK", "🇸🇰"),
    ("LAT", "🇱🇻"),
    ("DEN", "🇩🇰"),
    ("NOR", "🇳🇴"),
    ("AUT", "🇦🇹"),
    ("FRA", "🇫🇷"),
    ("ITA", "🇮🇹"),
    ("JPN", "🇯🇵"),
    ("CHN", "🇨🇳"),
    ("KOR", "🇰🇷"),
];

/// Arena names as they appear in the source document. Order matters for the
/// first-match scan, so the short "PalaItalia" form wins over the long one.
pub const VENUES: &[&str] = &["PalaItalia", "Fiera Milano", "PalaItalia Santa Giulia"];

static ALIAS_LOOKUP: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    TEAM_CODE_ALIASES
        .iter()
        .map(|(name, code)| (name.to_lowercase(), *code))
        .collect()
});

static NAME_LOOKUP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| TEAM_NAMES_CZ.iter().copied().collect());

static FLAG_LOOKUP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| TEAM_FLAGS.iter().copied().collect());

/// Lowercased alias names ordered longest first, with the bare "tbd"
/// placeholder appended. The ordering stops a shorter alias from claiming a
/// span inside a longer one ("United States" inside "United States of
/// America").
static ALIAS_NAMES_LONGEST_FIRST: Lazy<Vec<String>> = Lazy::new(|| {
    let mut names: Vec<String> = TEAM_CODE_ALIASES
        .iter()
        .map(|(name, _)| name.to_lowercase())
        .collect();
    names.sort_by(|a, b| b.len().cmp(&a.len()));
    names.push("tbd".to_string());
    names
});

static FOOTNOTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\]").expect("footnote regex"));
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));
static CODE_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z]{3})\b").expect("code token regex"));

/// Uppercase/trim an already-short code; empty input is an open slot.
pub fn normalize_team_code(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        TBD.to_string()
    } else {
        trimmed.to_uppercase()
    }
}

/// Map free source text to a canonical code. Strips footnote markers,
/// collapses whitespace, then tries the alias table and finally any embedded
/// three-letter uppercase token. Everything downstream relies on the result
/// being a known code or TBD, never raw text.
pub fn normalize_team_name(raw: &str) -> String {
    let without_footnotes = FOOTNOTE_RE.replace_all(raw, "");
    let cleaned = WS_RE.replace_all(&without_footnotes, " ");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return TBD.to_string();
    }
    if let Some(code) = ALIAS_LOOKUP.get(&cleaned.to_lowercase()) {
        return (*code).to_string();
    }
    if let Some(caps) = CODE_TOKEN_RE.captures(cleaned) {
        return caps[1].to_string();
    }
    TBD.to_string()
}

/// Find alias substrings in an already-lowercased line, longest alias first.
/// A hit whose span overlaps an earlier (longer) hit is discarded.
pub fn find_team_mentions(lower_line: &str) -> Vec<(usize, &'static str)> {
    let mut found: Vec<(usize, usize, &'static str)> = Vec::new();
    for name in ALIAS_NAMES_LONGEST_FIRST.iter() {
        if let Some(idx) = lower_line.find(name.as_str()) {
            let end = idx + name.len();
            let overlaps = found
                .iter()
                .any(|&(start, stop, _)| idx < stop && end > start);
            if !overlaps {
                found.push((idx, end, name.as_str()));
            }
        }
    }
    found.into_iter().map(|(idx, _, name)| (idx, name)).collect()
}

/// First known venue contained in an already-lowercased line.
pub fn find_venue(lower_text: &str) -> Option<&'static str> {
    VENUES
        .iter()
        .find(|venue| lower_text.contains(&venue.to_lowercase()))
        .copied()
}

pub fn team_display(code: &str) -> &str {
    NAME_LOOKUP.get(code).copied().unwrap_or(code)
}

pub fn team_display_with_flag(code: &str) -> String {
    if code == TBD {
        return "TBD 🏒".to_string();
    }
    let name = team_display(code);
    match FLAG_LOOKUP.get(code) {
        Some(flag) => format!("{flag} {name}"),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_lookup_is_case_insensitive() {
        assert_eq!(normalize_team_name("czech republic"), "CZE");
        assert_eq!(normalize_team_name("Czechia"), "CZE");
        assert_eq!(normalize_team_name("SOUTH KOREA"), "KOR");
    }

    #[test]
    fn footnotes_and_whitespace_are_stripped() {
        assert_eq!(normalize_team_name("Canada[a]"), "CAN");
        assert_eq!(normalize_team_name("  United   States [note 1] "), "USA");
    }

    #[test]
    fn embedded_code_token_is_used() {
        assert_eq!(normalize_team_name("Team GER (host)"), "GER");
    }

    #[test]
    fn normalization_is_idempotent_on_codes() {
        for (_, code) in TEAM_CODE_ALIASES {
            assert_eq!(normalize_team_name(code), *code);
        }
    }

    #[test]
    fn unknown_or_empty_yields_tbd() {
        assert_eq!(normalize_team_name(""), "TBD");
        assert_eq!(normalize_team_name("[b]"), "TBD");
        assert_eq!(normalize_team_name("Unknownland"), "TBD");
        assert_eq!(normalize_team_code(""), "TBD");
        assert_eq!(normalize_team_code(" cze "), "CZE");
    }

    #[test]
    fn longer_alias_suppresses_contained_shorter_one() {
        let mentions = find_team_mentions("united states of america vs canada");
        let codes: Vec<String> = {
            let mut sorted = mentions.clone();
            sorted.sort_by_key(|m| m.0);
            sorted.iter().map(|m| normalize_team_name(m.1)).collect()
        };
        assert_eq!(codes, vec!["USA".to_string(), "CAN".to_string()]);
    }

    #[test]
    fn venue_scan_prefers_list_order() {
        assert_eq!(
            find_venue("played at palaitalia santa giulia"),
            Some("PalaItalia")
        );
        assert_eq!(find_venue("fiera milano rho"), Some("Fiera Milano"));
        assert_eq!(find_venue("somewhere else"), None);
    }

    #[test]
    fn display_with_flag() {
        assert_eq!(team_display_with_flag("CZE"), "🇨🇿 Česko");
        assert_eq!(team_display_with_flag("TBD"), "TBD 🏒");
        assert_eq!(team_display_with_flag("GBR"), "GBR");
    }
}
