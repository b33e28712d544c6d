//! Line classification for Quake 3 Arena server logs
//!
//! Only two tags matter for frag counting: the tag that opens a new match and
//! the tag that records a kill. Every other line (client connects, chat,
//! item pickups, scoreboard dumps) is irrelevant and is dropped by the reducer.

use shared::{BOUNDARY_TAG, KILL_TAG};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Start of a new match
    Boundary,
    /// A kill record, not yet parsed
    Frag,
    Irrelevant,
}

/// Classifies a raw log line. Total over all strings; boundary wins if both
/// tags are present.
pub fn classify(line: &str) -> LineKind {
    if line.contains(BOUNDARY_TAG) {
        LineKind::Boundary
    } else if line.contains(KILL_TAG) {
        LineKind::Frag
    } else {
        LineKind::Irrelevant
    }
}
