use serde::{Deserialize, Serialize};

/// A single structured kill extracted from a `Kill:` log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillEvent {
    /// Name of the player (or `<world>`) credited with the kill.
    pub killer: String,
    /// Name of the player who died.
    pub killed: String,
    /// Means of death, e.g. `MOD_ROCKET`.
    pub cause: String,
}

impl KillEvent {
    pub fn new(
        killer: impl Into<String>,
        killed: impl Into<String>,
        cause: impl Into<String>,
    ) -> Self {
        Self {
            killer: killer.into(),
            killed: killed.into(),
            cause: cause.into(),
        }
    }
}

/// One game round: every line from an `InitGame` marker up to and including
/// the `ShutdownGame` marker that closed it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    lines: Vec<String>,
}

impl Session {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Raw lines in log order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<Vec<String>> for Session {
    fn from(lines: Vec<String>) -> Self {
        Self::new(lines)
    }
}

/// Count of occurrences for one distinct key (a cause or a killer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub key: String,
    pub quantity: u32,
}

/// Zero-sum kill score of one player within a single game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub player: String,
    pub score: i64,
}

/// Per-game statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatistics {
    /// Lines containing the `Kill` marker.
    pub total_kills: usize,
    /// Structured kills whose cause is not `<world>`, in line order.
    pub kills_by_cause: Vec<KillEvent>,
    /// Lines containing `<world>`. Counts lines, not events, so it does not
    /// add up with `kills_by_cause`.
    pub kills_by_world: usize,
    pub ranking_causes: Vec<RankingEntry>,
    pub ranking_killers: Vec<RankingEntry>,
}

/// Score leaderboard for a single game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRanking {
    pub ranking: Vec<ScoreEntry>,
    pub kills_by_cause: Vec<KillEvent>,
}

/// Statistics over every game in the log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStatistics {
    /// Session count plus one (historical off-by-one, kept as reported).
    pub total_games: usize,
    /// One entry per session, most recent first.
    pub statistics: Vec<SessionStatistics>,
}
