use std::env;
use std::path::PathBuf;

use anyhow::Result;
use log::{info, warn};

use zoh26_calendar::config::{self, CATEGORIES};
use zoh26_calendar::game::Game;
use zoh26_calendar::{ics_export, postprocess, schedule_fetch};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let dist_dir = env::var("ZOH_DIST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(config::DEFAULT_DIST_DIR));

    let mut combined: Vec<Game> = Vec::new();
    for cfg in &CATEGORIES {
        let mut games = schedule_fetch::load_schedule(cfg);
        if games.is_empty() {
            warn!("No games for {}, skipping", cfg.label);
            continue;
        }

        postprocess::assign_playoff_indices(&mut games);
        games.retain(postprocess::is_relevant);
        games.sort_by_key(|game| game.start);

        let calendar = ics_export::games_to_calendar(
            &games,
            &format!("ZOH 2026 – hokej ({})", cfg.label),
        );
        let out_path = dist_dir.join(cfg.out_file);
        ics_export::write_calendar(&calendar, &out_path)?;
        info!("Wrote {}", out_path.display());

        combined.extend(games);
    }

    if !combined.is_empty() {
        combined.sort_by_key(|game| game.start);
        let calendar =
            ics_export::games_to_calendar(&combined, config::COMBINED_CALENDAR_NAME);
        let out_path = dist_dir.join(config::COMBINED_OUT_FILE);
        ics_export::write_calendar(&calendar, &out_path)?;
        info!("Wrote {}", out_path.display());
    }

    Ok(())
}
