use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the Quake log statistics engine.
#[derive(Error, Debug)]
pub enum StatsError {
    /// A query was issued before any log was ingested.
    #[error("No log has been ingested yet")]
    NotReady,

    /// A session index fell outside `[0, count)`.
    #[error("Game with ID {index} not found ({count} games available)")]
    NotFound { index: usize, count: usize },

    /// A kill line carried the `Kill:` token but not the `killed`/`by` fields.
    #[error("Malformed kill line: {0}")]
    MalformedLine(String),

    /// A log file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed or produced.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the stats crates.
pub type Result<T> = std::result::Result<T, StatsError>;
