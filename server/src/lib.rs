//! # Frag Log Server Library
//!
//! This library turns a Quake 3 Arena server log into per-match frag reports
//! and answers queries about them over UDP.
//!
//! ## Parsing Pipeline
//!
//! A log is processed in one sequential pass:
//!
//! ```text
//! raw lines -> classifier -> { InitGame -> close open match, open next one
//!                              Kill:    -> extractor -> accumulator }
//!           -> reducer collects closed matches
//! ```
//!
//! The pipeline never fails. Kill lines that don't parse, and kill lines seen
//! before the first `InitGame`, are skipped without touching any counter.
//!
//! ## Module Organization
//!
//! ### Classifier Module (`classifier`)
//! Decides whether a line opens a match, records a kill, or is noise.
//!
//! ### Extractor Module (`extractor`)
//! Pulls the killer and victim names out of a kill record.
//!
//! ### Accumulator Module (`accumulator`)
//! Holds the open match and applies the scoring rules:
//! - player kills give the killer +1
//! - world kills give the victim -1
//! - `<world>` never shows up in players or scores
//!
//! ### Reducer Module (`reducer`)
//! Drives the state machine and exposes `list_matches` and `find_match`.
//!
//! ### Log Source Module (`log_source`)
//! Supplies lines from a file or from memory; the only fallible step.
//!
//! ### Network Module (`network`)
//! UDP query service. Every request re-reads the log and runs its own
//! reducer on a blocking worker, so concurrent queries share nothing but the
//! read-only source.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::log_source::{list_matches_from, FileLogSource};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = FileLogSource::new("games.log");
//!     for report in list_matches_from(&source)? {
//!         println!("{}: {} kills", report.name, report.total_kills);
//!     }
//!     Ok(())
//! }
//! ```

pub mod accumulator;
pub mod classifier;
pub mod extractor;
pub mod log_source;
pub mod network;
pub mod reducer;

pub use log_source::{find_match_from, list_matches_from, FileLogSource, LineSource};
pub use reducer::{find_match, list_matches};
