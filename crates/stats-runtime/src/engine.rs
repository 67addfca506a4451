//! Query facade over the most recently ingested log.
//!
//! [`StatsEngine`] holds one immutable [`LogSnapshot`] behind an
//! [`ArcSwapOption`]. [`StatsEngine::ingest`] builds the complete snapshot
//! first and then swaps it in, so concurrent readers see either the previous
//! log or the new one and never a mix of both. Every query loads the current
//! snapshot once and answers from it; a failed query has no side effects.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use chrono::{DateTime, Utc};
use serde::Serialize;
use stats_core::classifier::LineMarker;
use stats_core::error::{Result, StatsError};
use stats_core::models::{AggregateStatistics, Session, SessionRanking, SessionStatistics};
use stats_data::aggregator::StatisticsAggregator;
use stats_data::segmenter::group_sessions;
use tracing::{debug, info};

// ── LogSnapshot ───────────────────────────────────────────────────────────────

/// Everything derived from one ingested log.
#[derive(Debug)]
pub struct LogSnapshot {
    lines: Vec<String>,
    /// Most recent game first.
    sessions: Vec<Session>,
    /// Parallel to `sessions`.
    statistics: Vec<SessionStatistics>,
    ingested_at: DateTime<Utc>,
}

impl LogSnapshot {
    fn build(lines: Vec<String>) -> Self {
        let sessions = group_sessions(&lines);
        let statistics = sessions
            .iter()
            .map(StatisticsAggregator::session_statistics)
            .collect();

        Self {
            lines,
            sessions,
            statistics,
            ingested_at: Utc::now(),
        }
    }

    fn session(&self, index: usize) -> Result<&Session> {
        self.sessions.get(index).ok_or(StatsError::NotFound {
            index,
            count: self.sessions.len(),
        })
    }
}

/// Summary of the held log, suitable for status output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotInfo {
    pub ingested_at: DateTime<Utc>,
    pub line_count: usize,
    pub session_count: usize,
}

// ── StatsEngine ───────────────────────────────────────────────────────────────

/// Owner of the current log and the single surface callers query.
///
/// # Example
/// ```
/// use stats_runtime::engine::StatsEngine;
///
/// let engine = StatsEngine::new();
/// engine.ingest(vec![
///     "  0:00 InitGame:".to_string(),
///     "  0:25 Kill: 2 3 6: Isgalamido killed Mocinha by MOD_ROCKET".to_string(),
///     "  1:00 ShutdownGame:".to_string(),
/// ]);
/// let stats = engine.session_statistics_by_id(0).unwrap();
/// assert_eq!(stats.total_kills, 1);
/// ```
#[derive(Debug, Default)]
pub struct StatsEngine {
    current: ArcSwapOption<LogSnapshot>,
}

impl StatsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Ingestion ─────────────────────────────────────────────────────────

    /// Replace the held log with `lines`.
    pub fn ingest(&self, lines: Vec<String>) {
        let snapshot = LogSnapshot::build(lines);
        info!(
            lines = snapshot.lines.len(),
            sessions = snapshot.sessions.len(),
            "log processed"
        );
        self.current.store(Some(Arc::new(snapshot)));
    }

    /// Load the current snapshot, or fail with [`StatsError::NotReady`].
    pub fn snapshot(&self) -> Result<Arc<LogSnapshot>> {
        self.current.load_full().ok_or(StatsError::NotReady)
    }

    pub fn info(&self) -> Result<SnapshotInfo> {
        let snapshot = self.snapshot()?;
        Ok(SnapshotInfo {
            ingested_at: snapshot.ingested_at,
            line_count: snapshot.lines.len(),
            session_count: snapshot.sessions.len(),
        })
    }

    pub fn ingested_at(&self) -> Result<DateTime<Utc>> {
        Ok(self.snapshot()?.ingested_at)
    }

    pub fn session_count(&self) -> Result<usize> {
        Ok(self.snapshot()?.sessions.len())
    }

    // ── Line queries ──────────────────────────────────────────────────────

    pub fn all_lines(&self) -> Result<Vec<String>> {
        Ok(self.snapshot()?.lines.clone())
    }

    /// Lines containing `marker`'s pattern, in log order.
    pub fn filter_by_marker(&self, marker: &LineMarker) -> Result<Vec<String>> {
        let snapshot = self.snapshot()?;
        let pattern = marker.pattern();
        let matched: Vec<String> = snapshot
            .lines
            .iter()
            .filter(|line| line.contains(pattern.as_ref()))
            .cloned()
            .collect();
        debug!(marker = %pattern, matched = matched.len(), "filtered lines");
        Ok(matched)
    }

    pub fn init_games(&self) -> Result<Vec<String>> {
        self.filter_by_marker(&LineMarker::SessionStart)
    }

    pub fn client_connections(&self) -> Result<Vec<String>> {
        self.filter_by_marker(&LineMarker::Connection)
    }

    pub fn kills(&self) -> Result<Vec<String>> {
        self.filter_by_marker(&LineMarker::Kill)
    }

    pub fn items_collected(&self, player_id: &str) -> Result<Vec<String>> {
        self.filter_by_marker(&LineMarker::ItemPickup(player_id.to_string()))
    }

    // ── Session queries ───────────────────────────────────────────────────

    /// Sessions, most recently completed first.
    pub fn sessions_in_order(&self) -> Result<Vec<Session>> {
        Ok(self.snapshot()?.sessions.clone())
    }

    pub fn aggregate_statistics(&self) -> Result<AggregateStatistics> {
        let snapshot = self.snapshot()?;
        Ok(StatisticsAggregator::from_statistics(
            snapshot.statistics.clone(),
        ))
    }

    /// Statistics for the session at `index` (0 is the most recent).
    pub fn session_statistics_by_id(&self, index: usize) -> Result<SessionStatistics> {
        let snapshot = self.snapshot()?;
        snapshot
            .statistics
            .get(index)
            .cloned()
            .ok_or(StatsError::NotFound {
                index,
                count: snapshot.sessions.len(),
            })
    }

    /// Score ranking for the session at `index` (0 is the most recent).
    pub fn session_ranking_by_id(&self, index: usize) -> Result<SessionRanking> {
        let snapshot = self.snapshot()?;
        let session = snapshot.session(index)?;
        Ok(StatisticsAggregator::session_ranking(session))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
