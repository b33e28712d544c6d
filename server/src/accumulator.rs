//! Per-match aggregation of kill events
//!
//! Scoring rules:
//! - every parsed kill counts toward the match total, whoever is involved
//! - a player kill gives the killer +1 and makes sure the victim has an entry
//! - a world kill gives the victim -1
//! - the world itself never appears in the roster or the score map
//!
//! A victim that never scores keeps an explicit zero entry.

use crate::extractor::KillEvent;
use log::trace;
use shared::{MatchReport, WORLD_PLAYER};
use std::collections::{BTreeMap, BTreeSet};

/// Mutable state of the one open match
#[derive(Debug, Clone)]
pub struct MatchAccumulator {
    name: String,
    total_kills: u32,
    players: BTreeSet<String>,
    kills: BTreeMap<String, i32>,
}

impl MatchAccumulator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total_kills: 0,
            players: BTreeSet::new(),
            kills: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_kills(&self) -> u32 {
        self.total_kills
    }

    /// Applies one successfully extracted kill
    pub fn apply(&mut self, event: &KillEvent<'_>) {
        self.total_kills += 1;

        self.add_player(event.victim);
        self.add_player(event.killer);

        if event.is_world_kill() {
            self.adjust_score(event.victim, -1);
        } else {
            self.adjust_score(event.victim, 0);
            self.adjust_score(event.killer, 1);
        }

        trace!(
            "{}: {} killed {} ({} kills so far)",
            self.name,
            event.killer,
            event.victim,
            self.total_kills
        );
    }

    fn add_player(&mut self, player: &str) {
        if player != WORLD_PLAYER && !self.players.contains(player) {
            self.players.insert(player.to_string());
        }
    }

    /// Adds `delta` to the score of `player`, creating the entry at zero if
    /// missing. The world never gets an entry.
    fn adjust_score(&mut self, player: &str, delta: i32) {
        if player == WORLD_PLAYER {
            return;
        }
        *self.kills.entry(player.to_string()).or_insert(0) += delta;
    }

    /// Closes the match and hands out its immutable report
    pub fn finalize(self) -> MatchReport {
        MatchReport {
            name: self.name,
            total_kills: self.total_kills,
            players: self.players,
            kills: self.kills,
        }
    }
}
