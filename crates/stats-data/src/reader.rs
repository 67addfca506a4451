//! Log file loading.
//!
//! Turns a Quake 3 server log on disk into the ordered line list the engine
//! ingests. Nothing is interpreted here; classification happens later.

use std::path::Path;

use stats_core::error::{Result, StatsError};
use tracing::debug;

// ── Public API ────────────────────────────────────────────────────────────────

/// Split raw log content into lines on `'\n'`.
///
/// A trailing newline produces a trailing empty line, and empty content
/// produces a single empty line. A `'\r'` left over from CRLF endings is
/// dropped so marker checks behave the same on both line-ending styles.
pub fn split_log_lines(content: &str) -> Vec<String> {
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

/// Read the log file at `path` and split it into lines.
pub async fn read_log_file(path: &Path) -> Result<Vec<String>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| StatsError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

    let lines = split_log_lines(&content);
    debug!(
        "Read {} lines ({} bytes) from {}",
        lines.len(),
        content.len(),
        path.display()
    );
    Ok(lines)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
