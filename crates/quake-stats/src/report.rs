//! Turns a view selection into the JSON value printed on stdout.

use anyhow::Context;
use serde_json::Value;
use stats_core::error::StatsError;
use stats_core::settings::Settings;
use stats_runtime::engine::StatsEngine;

/// Run the query selected by `settings.view` against `engine`.
pub fn build_report(engine: &StatsEngine, settings: &Settings) -> anyhow::Result<Value> {
    let value = match settings.view.as_str() {
        "statistics" => serde_json::to_value(engine.aggregate_statistics()?)?,
        "game" => serde_json::to_value(engine.session_statistics_by_id(game_id(settings)?)?)?,
        "ranking" => serde_json::to_value(engine.session_ranking_by_id(game_id(settings)?)?)?,
        "sessions" => serde_json::to_value(engine.sessions_in_order()?)?,
        "lines" => serde_json::to_value(engine.all_lines()?)?,
        "init-games" => serde_json::to_value(engine.init_games()?)?,
        "connections" => serde_json::to_value(engine.client_connections()?)?,
        "kills" => serde_json::to_value(engine.kills()?)?,
        "items" => {
            let player_id = settings
                .player_id
                .as_deref()
                .ok_or_else(|| StatsError::Config("--player-id is required".to_string()))?;
            serde_json::to_value(engine.items_collected(player_id)?)?
        }
        other => return Err(StatsError::Config(format!("unknown view: {other}")).into()),
    };
    Ok(value)
}

/// Serialise `value` for printing.
pub fn render(value: &Value, pretty: bool) -> anyhow::Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    text.context("failed to serialise report")
}

fn game_id(settings: &Settings) -> Result<usize, StatsError> {
    settings
        .game_id
        .ok_or_else(|| StatsError::Config("--game-id is required".to_string()))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
