mod bootstrap;
mod report;

use anyhow::Result;
use stats_core::settings::Settings;
use stats_data::reader::read_log_file;
use stats_runtime::engine::StatsEngine;

#[tokio::main]
async fn main() -> Result<()> {
    let (settings, warnings) = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level)?;
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    tracing::info!("Quake stats v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Log: {}, View: {}",
        settings.log_path.display(),
        settings.view
    );

    settings.validate()?;

    let lines = read_log_file(&settings.log_path).await?;

    let engine = StatsEngine::new();
    engine.ingest(lines);
    if let Ok(info) = engine.info() {
        tracing::debug!(
            lines = info.line_count,
            sessions = info.session_count,
            ingested_at = %info.ingested_at,
            "engine ready"
        );
    }

    let report = report::build_report(&engine, &settings)?;
    println!("{}", report::render(&report, settings.pretty)?);

    Ok(())
}
