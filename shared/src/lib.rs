use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Tag that opens a new match in a server log
pub const BOUNDARY_TAG: &str = "InitGame";
/// Tag that marks a kill record
pub const KILL_TAG: &str = "Kill:";
/// Pseudo-participant credited with environmental deaths
pub const WORLD_PLAYER: &str = "<world>";
pub const MATCH_NAME_PREFIX: &str = "game_";
pub const DEFAULT_LOG_FILE: &str = "games.log";

/// Largest UDP payload we are willing to send or receive
pub const MAX_DATAGRAM_SIZE: usize = 65_507;

/// Builds the sequential name of the `ordinal`-th match (1-based)
pub fn match_name(ordinal: u32) -> String {
    format!("{}{}", MATCH_NAME_PREFIX, ordinal)
}

/// Case-insensitive comparison used for match lookups
pub fn match_name_eq(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum Packet {
    ListMatches {
        request_id: u32,
    },
    FindMatch {
        request_id: u32,
        name: String,
    },

    MatchList {
        request_id: u32,
        matches: Vec<MatchReport>,
    },
    MatchFound {
        request_id: u32,
        report: MatchReport,
    },
    MatchNotFound {
        request_id: u32,
        name: String,
    },
    Unavailable {
        request_id: u32,
        reason: String,
    },
}

impl Packet {
    pub fn request_id(&self) -> u32 {
        match self {
            Packet::ListMatches { request_id }
            | Packet::FindMatch { request_id, .. }
            | Packet::MatchList { request_id, .. }
            | Packet::MatchFound { request_id, .. }
            | Packet::MatchNotFound { request_id, .. }
            | Packet::Unavailable { request_id, .. } => *request_id,
        }
    }

    /// True for packets a client sends to the server
    pub fn is_request(&self) -> bool {
        matches!(self, Packet::ListMatches { .. } | Packet::FindMatch { .. })
    }
}

/// Aggregated result of one match segment
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub name: String,
    pub total_kills: u32,
    pub players: BTreeSet<String>,
    pub kills: BTreeMap<String, i32>,
}

impl MatchReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn score(&self, player: &str) -> Option<i32> {
        self.kills.get(player).copied()
    }

    /// Players ordered by score, highest first; ties ordered by name
    pub fn ranking(&self) -> Vec<(&str, i32)> {
        let mut ranking: Vec<(&str, i32)> = self
            .kills
            .iter()
            .map(|(player, score)| (player.as_str(), *score))
            .collect();
        ranking.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranking
    }
}
