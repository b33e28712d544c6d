//! Killer/victim extraction from kill records
//!
//! A kill record looks like
//! `  22:06 Kill: 2 3 7: Isgalamido killed Mocinha by MOD_ROCKET_SPLASH`.
//! The numeric triple and the means-of-death token are ignored; only the two
//! names around ` killed ` are kept. Anything that doesn't fit that shape
//! yields `None` and is treated by the caller as if the line were irrelevant.

use shared::{KILL_TAG, WORLD_PLAYER};

const DESCRIPTION_SEPARATOR: char = ':';
const CAUSE_SEPARATOR: &str = " by ";
const KILL_SEPARATOR: &str = " killed ";

/// One parsed kill, borrowing the names from the source line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KillEvent<'a> {
    pub killer: &'a str,
    pub victim: &'a str,
}

impl<'a> KillEvent<'a> {
    /// Environmental death: the world gets the kill, not a player
    pub fn is_world_kill(&self) -> bool {
        self.killer == WORLD_PLAYER
    }
}

/// Extracts the killer and victim from a line classified as a frag event
pub fn extract_kill(line: &str) -> Option<KillEvent<'_>> {
    let tag_start = line.find(KILL_TAG)?;
    let payload = line[tag_start + KILL_TAG.len()..].trim();

    let (_, description) = payload.split_once(DESCRIPTION_SEPARATOR)?;
    let description = description.trim();

    let cause_start = description.find(CAUSE_SEPARATOR)?;
    let clause = description[..cause_start].trim();

    let mut parts = clause.split(KILL_SEPARATOR);
    let killer = parts.next()?.trim();
    let victim = parts.next()?.trim();
    if parts.next().is_some() || killer.is_empty() || victim.is_empty() {
        return None;
    }

    Some(KillEvent { killer, victim })
}
