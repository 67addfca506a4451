//! Splits a flat log into game sessions.
//!
//! A session opens at an `InitGame` line and is emitted when a
//! `ShutdownGame` line arrives. The working buffer is only reset by the next
//! `InitGame`, so lines after a shutdown ride along into whatever is emitted
//! next. A segment still open at end of input is never emitted.

use stats_core::classifier::{is_session_end, is_session_start};
use stats_core::models::Session;
use tracing::debug;

/// Group `lines` into sessions, most recently completed first.
pub fn group_sessions(lines: &[String]) -> Vec<Session> {
    let mut sessions: Vec<Session> = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in lines {
        if is_session_start(line) {
            current.clear();
        }

        current.push(line.clone());

        if is_session_end(line) {
            sessions.push(Session::new(current.clone()));
        }
    }

    debug!(
        "Segmented {} lines into {} sessions ({} lines left in open buffer)",
        lines.len(),
        sessions.len(),
        current.len()
    );

    sessions.reverse();
    sessions
}

// ── Tests ─────────────────────────────────────────────────────────────────────
