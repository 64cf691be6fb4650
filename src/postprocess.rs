//! Post-extraction passes: playoff slot numbering, relevance filter, final
//! ordering.

use std::collections::HashMap;

use crate::config::TRACKED_TEAM;
use crate::game::{Game, PhaseKey};

/// Number playoff games 1..N per phase in chronological order. Must run
/// before the relevance filter so the numbering reflects the full bracket.
pub fn assign_playoff_indices(games: &mut [Game]) {
    let mut order: Vec<usize> = (0..games.len()).collect();
    order.sort_by_key(|&idx| games[idx].start);

    let mut counters: HashMap<PhaseKey, u32> = HashMap::new();
    for idx in order {
        let phase = games[idx].phase_key;
        if phase.is_playoff() {
            let counter = counters.entry(phase).or_insert(0);
            *counter += 1;
            games[idx].playoff_index = Some(*counter);
        }
    }
}

/// Playoff games always matter; preliminary games only when the tracked team
/// plays.
pub fn is_relevant(game: &Game) -> bool {
    game.phase_key.is_playoff() || game.team1 == TRACKED_TEAM || game.team2 == TRACKED_TEAM
}
