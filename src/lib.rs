//! ICS calendar generator for the 2026 Olympic ice hockey tournaments.
//!
//! Scrapes the two tournament articles, recovers the schedule through a
//! cascade of progressively less-structured parsers, and writes one calendar
//! per category plus a combined one.

pub mod config;
pub mod game;
pub mod htmltext;
pub mod http_client;
pub mod ics_export;
pub mod postprocess;
pub mod schedule_fetch;
pub mod table_parse;
pub mod teams;
pub mod text_parse;
pub mod tokens;
pub mod vevent_parse;
pub mod wikitext_parse;
