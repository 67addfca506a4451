//! Line classification for Quake 3 server logs.
//!
//! Every test is a plain substring containment check against a fixed
//! marker. Kill lines additionally go through [`parse_kill`], which pulls
//! the killer, victim and means of death out of the line text.

use std::borrow::Cow;

use crate::error::{Result, StatsError};
use crate::models::KillEvent;

// ── Markers ───────────────────────────────────────────────────────────────────

pub const INIT_GAME: &str = "InitGame";
pub const SHUTDOWN_GAME: &str = "ShutdownGame";
pub const KILL: &str = "Kill";
pub const CLIENT_CONNECT: &str = "ClientConnect";
/// Killer or cause used for environmental deaths (falling, lava, ...).
pub const WORLD: &str = "<world>";

/// Space-delimited token that marks a structured kill line.
const KILL_TOKEN: &str = "Kill:";
const KILLED_SEPARATOR: &str = " killed ";
const BY_SEPARATOR: &str = " by ";

// ── LineMarker ────────────────────────────────────────────────────────────────

/// A category a log line can belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMarker {
    SessionStart,
    SessionEnd,
    Kill,
    Connection,
    /// Item pickups by one player id (`Item: <id>`).
    ItemPickup(String),
    World,
}

impl LineMarker {
    /// The substring a line must contain to belong to this category.
    pub fn pattern(&self) -> Cow<'_, str> {
        match self {
            LineMarker::SessionStart => Cow::Borrowed(INIT_GAME),
            LineMarker::SessionEnd => Cow::Borrowed(SHUTDOWN_GAME),
            LineMarker::Kill => Cow::Borrowed(KILL),
            LineMarker::Connection => Cow::Borrowed(CLIENT_CONNECT),
            LineMarker::ItemPickup(player_id) => Cow::Owned(format!("Item: {player_id}")),
            LineMarker::World => Cow::Borrowed(WORLD),
        }
    }

    pub fn matches(&self, line: &str) -> bool {
        line.contains(self.pattern().as_ref())
    }
}

// ── Predicates ────────────────────────────────────────────────────────────────

pub fn is_session_start(line: &str) -> bool {
    line.contains(INIT_GAME)
}

pub fn is_session_end(line: &str) -> bool {
    line.contains(SHUTDOWN_GAME)
}

/// Any line mentioning `Kill`, structured or not.
pub fn is_kill(line: &str) -> bool {
    line.contains(KILL)
}

pub fn is_connection(line: &str) -> bool {
    line.contains(CLIENT_CONNECT)
}

pub fn is_item_pickup(line: &str, player_id: &str) -> bool {
    LineMarker::ItemPickup(player_id.to_string()).matches(line)
}

pub fn mentions_world(line: &str) -> bool {
    line.contains(WORLD)
}

// ── Kill extraction ───────────────────────────────────────────────────────────

/// Extract the structured kill from a log line.
///
/// Returns `Ok(None)` when no space-delimited token equals `Kill:`; such
/// lines may still count as kills for [`is_kill`]. Otherwise the text after
/// the last `:` is read as `<killer> killed <killed> by <cause>`, each part
/// trimmed. A `Kill:` line missing either separator yields
/// [`StatsError::MalformedLine`].
///
/// ```
/// use stats_core::classifier::parse_kill;
///
/// let line = "  0:25 Kill: 2 3 6: Isgalamido killed Mocinha by MOD_ROCKET";
/// let kill = parse_kill(line).unwrap().unwrap();
/// assert_eq!(kill.killer, "Isgalamido");
/// assert_eq!(kill.killed, "Mocinha");
/// assert_eq!(kill.cause, "MOD_ROCKET");
/// ```
pub fn parse_kill(line: &str) -> Result<Option<KillEvent>> {
    if !line.split(' ').any(|token| token == KILL_TOKEN) {
        return Ok(None);
    }

    let details = line
        .rsplit_once(':')
        .map(|(_, tail)| tail)
        .unwrap_or(line);

    let mut killer_split = details.split(KILLED_SEPARATOR);
    let killer = killer_split.next().unwrap_or_default();
    let Some(rest) = killer_split.next() else {
        return Err(StatsError::MalformedLine(line.to_string()));
    };

    let mut cause_split = rest.split(BY_SEPARATOR);
    let killed = cause_split.next().unwrap_or_default();
    let Some(cause) = cause_split.next() else {
        return Err(StatsError::MalformedLine(line.to_string()));
    };

    Ok(Some(KillEvent::new(killer.trim(), killed.trim(), cause.trim())))
}

/// `true` when the kill's cause is the world sentinel.
pub fn is_world_cause(kill: &KillEvent) -> bool {
    kill.cause.starts_with(WORLD)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
