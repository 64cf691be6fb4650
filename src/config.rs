use chrono::FixedOffset;

use crate::game::Category;

/// Tournament year; ambiguous date parses default to it.
pub const YEAR: i32 = 2026;

/// National team whose preliminary games are always kept.
pub const TRACKED_TEAM: &str = "CZE";

/// Display timezone advertised at the calendar level.
pub const CALENDAR_TIMEZONE: &str = "Europe/Prague";

pub const DEFAULT_DIST_DIR: &str = "dist";
pub const COMBINED_OUT_FILE: &str = "zoh-2026-hokej-cesko.ics";
pub const COMBINED_CALENDAR_NAME: &str = "ZOH 2026 – hokej (Česko)";

#[derive(Debug, Clone, Copy)]
pub struct CategoryConfig {
    pub category: Category,
    pub label: &'static str,
    pub wikipedia_url: &'static str,
    pub out_file: &'static str,
}

pub const CATEGORIES: [CategoryConfig; 2] = [
    CategoryConfig {
        category: Category::Women,
        label: "ženy",
        wikipedia_url:
            "https://en.wikipedia.org/wiki/Ice_hockey_at_the_2026_Winter_Olympics_%E2%80%93_Women%27s_tournament",
        out_file: "zoh-2026-hokej-zeny-cze.ics",
    },
    CategoryConfig {
        category: Category::Men,
        label: "muži",
        wikipedia_url:
            "https://en.wikipedia.org/wiki/Ice_hockey_at_the_2026_Winter_Olympics_%E2%80%93_Men%27s_tournament",
        out_file: "zoh-2026-hokej-muzi-cze.ics",
    },
];

/// Civil timezone of the venue. Both arenas sit in CET and the tournament
/// ends before the DST switch, so a fixed +01:00 offset is exact.
pub fn venue_tz() -> FixedOffset {
    FixedOffset::east_opt(3600).expect("CET offset is valid")
}
