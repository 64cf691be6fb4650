//! Strategy cascade: one fetch, four extractors tried in order of decreasing
//! reliability, first non-empty result wins.

use anyhow::Result;
use log::{info, warn};

use crate::config::CategoryConfig;
use crate::game::{Category, Game};
use crate::http_client;
use crate::{table_parse, text_parse, vevent_parse, wikitext_parse};

/// A fetched source document plus the URL it came from; the terminal
/// strategy derives its API endpoint from the URL.
pub struct FetchedPage<'a> {
    pub url: &'a str,
    pub html: &'a str,
}

type Extractor = fn(&FetchedPage<'_>, Category) -> Vec<Game>;

const EXTRACTORS: [(&str, Extractor); 4] = [
    ("wikitable", extract_tables),
    ("vevent", extract_event_rows),
    ("page text", extract_page_text),
    ("wikitext api", extract_wikitext_api),
];

fn extract_tables(page: &FetchedPage<'_>, category: Category) -> Vec<Game> {
    table_parse::parse_schedule_tables(page.html, category)
}

fn extract_event_rows(page: &FetchedPage<'_>, category: Category) -> Vec<Game> {
    vevent_parse::parse_event_rows(page.html, category)
}

fn extract_page_text(page: &FetchedPage<'_>, category: Category) -> Vec<Game> {
    text_parse::parse_page_text(page.html, category)
}

fn extract_wikitext_api(page: &FetchedPage<'_>, category: Category) -> Vec<Game> {
    match wikitext_parse::fetch_from_api(page.url, category) {
        Ok(games) => games,
        Err(err) => {
            warn!("wikitext api fetch failed: {err:#}");
            Vec::new()
        }
    }
}

/// Run the cascade against an already-fetched document. Strategies 1-3 reuse
/// the same document; only the terminal strategy touches the network again.
pub fn run_extractors(page: &FetchedPage<'_>, category: Category) -> Vec<Game> {
    for (name, extract) in EXTRACTORS {
        let games = extract(page, category);
        info!("{name} parsed games: {}", games.len());
        if !games.is_empty() {
            return games;
        }
    }
    Vec::new()
}

/// Load one category's schedule. A fetch failure is logged and downgraded to
/// "no games"; it never aborts the whole run.
pub fn load_schedule(cfg: &CategoryConfig) -> Vec<Game> {
    match try_load(cfg) {
        Ok(games) => games,
        Err(err) => {
            warn!("schedule fetch failed for {}: {err:#}", cfg.label);
            Vec::new()
        }
    }
}

fn try_load(cfg: &CategoryConfig) -> Result<Vec<Game>> {
    let html = http_client::fetch_text(cfg.wikipedia_url)?;
    let page = FetchedPage {
        url: cfg.wikipedia_url,
        html: &html,
    };
    Ok(run_extractors(&page, cfg.category))
}
