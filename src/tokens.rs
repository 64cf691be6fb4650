//! Token recognition shared by the extraction strategies: dates, times,
//! scores and finish-type abbreviations.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config;
use crate::game::FinishType;

const MONTHS: [(&str, u32); 12] = [
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("may", 5),
    ("jun", 6),
    ("jul", 7),
    ("aug", 8),
    ("sep", 9),
    ("oct", 10),
    ("nov", 11),
    ("dec", 12),
];

static DAY_FIRST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2})(?:st|nd|rd|th)?\s+([A-Za-z]{3,})\.?(?:\s+(\d{4}))?\b")
        .expect("day-first date regex")
});
static MONTH_FIRST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Za-z]{3,})\.?\s+(\d{1,2})(?:st|nd|rd|th)?(?:,\s*(\d{4}))?\b")
        .expect("month-first date regex")
});
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2}):(\d{2})\b").expect("time regex"));
static SCORE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*[–-]\s*(\d+)").expect("score regex"));
static SHOOTOUT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)GWS|SO").expect("shootout regex"));
static OVERTIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)OT").expect("overtime regex"));

fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    MONTHS
        .iter()
        .find(|(prefix, _)| lower.starts_with(prefix))
        .map(|(_, month)| *month)
}

fn build_date(month_name: &str, day: &str, year: Option<&str>) -> Option<NaiveDate> {
    let month = month_from_name(month_name)?;
    let day: u32 = day.parse().ok()?;
    let mut year: i32 = year.and_then(|y| y.parse().ok()).unwrap_or(config::YEAR);
    // Ambiguous parses that defaulted to 1900 belong to the tournament year.
    if year == 1900 {
        year = config::YEAR;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Fuzzy date recognition over free text, day-first preferred. A missing
/// year defaults to the tournament year.
pub fn parse_textual_date(text: &str) -> Option<NaiveDate> {
    for caps in DAY_FIRST_RE.captures_iter(text) {
        if let Some(date) = build_date(&caps[2], &caps[1], caps.get(3).map(|m| m.as_str())) {
            return Some(date);
        }
    }
    for caps in MONTH_FIRST_RE.captures_iter(text) {
        if let Some(date) = build_date(&caps[1], &caps[2], caps.get(3).map(|m| m.as_str())) {
            return Some(date);
        }
    }
    None
}

/// First "HH:MM" token in the text, range-checked.
pub fn find_time_token(text: &str) -> Option<(u32, u32)> {
    let caps = TIME_RE.captures(text)?;
    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

/// First "N–N" (or "N-N") score pair in the text.
pub fn parse_score(text: &str) -> Option<(u32, u32)> {
    let caps = SCORE_RE.captures(text)?;
    Some((caps[1].parse().ok()?, caps[2].parse().ok()?))
}

/// Finish-type classification from accompanying abbreviations. Only
/// meaningful when a score is present. Substring-based, so stray "OT"/"SO"
/// letters in unrelated text will misclassify.
pub fn classify_finish(text: &str) -> FinishType {
    if SHOOTOUT_RE.is_match(text) {
        FinishType::Shootout
    } else if OVERTIME_RE.is_match(text) {
        FinishType::Overtime
    } else {
        FinishType::Regulation
    }
}

/// Attach the venue civil timezone to a parsed date + time.
pub fn localize(date: NaiveDate, time: (u32, u32)) -> Option<DateTime<FixedOffset>> {
    let naive = date.and_hms_opt(time.0, time.1, 0)?;
    config::venue_tz().from_local_datetime(&naive).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_first_date_with_year() {
        assert_eq!(
            parse_textual_date("Wednesday 11 February 2026"),
            NaiveDate::from_ymd_opt(2026, 2, 11)
        );
    }

    #[test]
    fn missing_year_defaults_to_tournament_year() {
        assert_eq!(
            parse_textual_date("10 February"),
            NaiveDate::from_ymd_opt(2026, 2, 10)
        );
    }

    #[test]
    fn year_1900_is_rewritten() {
        assert_eq!(
            parse_textual_date("10 February 1900"),
            NaiveDate::from_ymd_opt(2026, 2, 10)
        );
    }

    #[test]
    fn month_first_order_is_accepted() {
        assert_eq!(
            parse_textual_date("February 11, 2026"),
            NaiveDate::from_ymd_opt(2026, 2, 11)
        );
    }

    #[test]
    fn garbage_dates_are_rejected() {
        assert_eq!(parse_textual_date("32 February 2026"), None);
        assert_eq!(parse_textual_date("10 Frobnuary 2026"), None);
        assert_eq!(parse_textual_date("kickoff at noon"), None);
    }

    #[test]
    fn time_token_is_range_checked() {
        assert_eq!(find_time_token("puck drop 14:10 local"), Some((14, 10)));
        assert_eq!(find_time_token("99:99"), None);
        assert_eq!(find_time_token("no time here"), None);
    }

    #[test]
    fn score_accepts_both_dashes() {
        assert_eq!(parse_score("3 – 2"), Some((3, 2)));
        assert_eq!(parse_score("3-2"), Some((3, 2)));
        assert_eq!(parse_score("three to two"), None);
    }

    #[test]
    fn finish_classification() {
        assert_eq!(classify_finish("4 – 3 GWS"), FinishType::Shootout);
        assert_eq!(classify_finish("4 – 3 (SO)"), FinishType::Shootout);
        assert_eq!(classify_finish("4 – 3 (OT)"), FinishType::Overtime);
        assert_eq!(classify_finish("4 – 3"), FinishType::Regulation);
    }

    #[test]
    fn localize_attaches_venue_offset() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let start = localize(date, (13, 10)).unwrap();
        assert_eq!(start.to_rfc3339(), "2026-02-10T13:10:00+01:00");
    }
}
