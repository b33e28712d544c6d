//! Log reduction: partitions a line stream into matches and folds kills into
//! per-match reports.
//!
//! The reducer is a two-state machine. Before the first `InitGame` there is
//! no open match and kill lines are dropped. Every `InitGame` closes the open
//! match (if any) and opens the next one, named `game_1`, `game_2`, ... in
//! encounter order. End of input closes whatever is still open.
//!
//! Full scans and lookups by name share the same pass; a lookup simply stops
//! once the match it wants has been closed, without reading further lines.

use crate::accumulator::MatchAccumulator;
use crate::classifier::{classify, LineKind};
use crate::extractor::extract_kill;
use log::debug;
use shared::{match_name, match_name_eq, MatchReport};
use std::ops::ControlFlow;

#[derive(Debug)]
enum ReducerState {
    NoOpenMatch,
    OpenMatch(MatchAccumulator),
}

/// Single-pass state machine over log lines
#[derive(Debug)]
pub struct LogReducer {
    state: ReducerState,
    matches_seen: u32,
}

impl Default for LogReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl LogReducer {
    pub fn new() -> Self {
        Self {
            state: ReducerState::NoOpenMatch,
            matches_seen: 0,
        }
    }

    /// Name of the match currently being accumulated
    pub fn open_match(&self) -> Option<&str> {
        match &self.state {
            ReducerState::OpenMatch(acc) => Some(acc.name()),
            ReducerState::NoOpenMatch => None,
        }
    }

    /// Feeds one line. Returns the report of the match this line closed, if any.
    pub fn feed(&mut self, line: &str) -> Option<MatchReport> {
        match classify(line) {
            LineKind::Boundary => {
                self.matches_seen += 1;
                let next = MatchAccumulator::new(match_name(self.matches_seen));
                match std::mem::replace(&mut self.state, ReducerState::OpenMatch(next)) {
                    ReducerState::OpenMatch(previous) => Some(previous.finalize()),
                    ReducerState::NoOpenMatch => None,
                }
            }
            LineKind::Frag => {
                match &mut self.state {
                    ReducerState::OpenMatch(acc) => match extract_kill(line) {
                        Some(event) => acc.apply(&event),
                        None => debug!("Skipping malformed kill line: {}", line.trim()),
                    },
                    ReducerState::NoOpenMatch => {
                        debug!("Skipping kill line before first match: {}", line.trim())
                    }
                }
                None
            }
            LineKind::Irrelevant => None,
        }
    }

    /// Ends the input, closing the open match if there is one
    pub fn finish(self) -> Option<MatchReport> {
        match self.state {
            ReducerState::OpenMatch(acc) => Some(acc.finalize()),
            ReducerState::NoOpenMatch => None,
        }
    }
}

/// Runs one reduction pass, handing each closed match to `on_report` in
/// encounter order. Returning `ControlFlow::Break` stops the pass; no further
/// lines are pulled from `lines`.
pub fn reduce<I, S, F>(lines: I, mut on_report: F)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: FnMut(MatchReport) -> ControlFlow<()>,
{
    let mut reducer = LogReducer::new();

    for line in lines {
        if let Some(report) = reducer.feed(line.as_ref()) {
            if on_report(report).is_break() {
                return;
            }
        }
    }

    if let Some(report) = reducer.finish() {
        let _ = on_report(report);
    }
}

/// Every match in the log, in encounter order
pub fn list_matches<I, S>(lines: I) -> Vec<MatchReport>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut reports = Vec::new();
    reduce(lines, |report| {
        reports.push(report);
        ControlFlow::Continue(())
    });
    reports
}

/// The match named `name` (case-insensitive), or `None`
pub fn find_match<I, S>(lines: I, name: &str) -> Option<MatchReport>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut found = None;
    reduce(lines, |report| {
        if match_name_eq(&report.name, name) {
            found = Some(report);
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    found
}
