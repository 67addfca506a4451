use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, StatsError};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// View used when none is given or the restored one cannot run.
pub const DEFAULT_VIEW: &str = "statistics";

/// Game statistics for Quake 3 Arena server logs
#[derive(Parser, Debug, Clone)]
#[command(
    name = "quake-stats",
    about = "Game statistics for Quake 3 Arena server logs",
    version
)]
pub struct Settings {
    /// Path to the server log file
    #[arg(long, env = "QUAKE_STATS_LOG_PATH", default_value = "games.log")]
    pub log_path: PathBuf,

    /// What to report
    #[arg(long, default_value = DEFAULT_VIEW, value_parser = [
        "statistics", "game", "ranking", "sessions", "lines",
        "init-games", "connections", "kills", "items",
    ])]
    pub view: String,

    /// Game index for the `game` and `ranking` views (0 is the most recent)
    #[arg(long)]
    pub game_id: Option<usize>,

    /// Player id for the `items` view
    #[arg(long)]
    pub player_id: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Logging level
    #[arg(
        long,
        env = "QUAKE_STATS_LOG_LEVEL",
        default_value = "INFO",
        value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"]
    )]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.quake-stats/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_id: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,
}

impl LastUsedParams {
    /// Default location of the persisted config file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Config path rooted at `base_dir`.
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".quake-stats").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(StatsError::FileRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Ok(serde_json::from_str(&content)?)
    }

    /// Atomically write params to an explicit path, creating parent
    /// directories if needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<()> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    ///
    /// Problems with the persisted file never abort loading; they come back
    /// as warnings for the caller to log once logging is set up.
    pub fn load_with_last_used() -> (Self, Vec<String>) {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Same as [`Settings::load_with_last_used`] with an explicit argument list
    /// and config path.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> (Self, Vec<String>) {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);
        let mut warnings = Vec::new();

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                warnings.push(format!("failed to clear last-used config: {e}"));
            }
            return (Self::apply_debug(settings), warnings);
        }

        let last = LastUsedParams::load_from(config_path).unwrap_or_else(|e| {
            warnings.push(format!("ignoring unreadable last-used config: {e}"));
            LastUsedParams::default()
        });

        // CLI and environment always win over persisted values.
        if !is_arg_explicitly_set(&matches, "log_path") {
            if let Some(v) = last.log_path {
                settings.log_path = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "view") {
            if let Some(v) = last.view {
                settings.view = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "game_id") && settings.game_id.is_none() {
            settings.game_id = last.game_id;
        }
        if !is_arg_explicitly_set(&matches, "player_id") && settings.player_id.is_none() {
            settings.player_id = last.player_id;
        }
        if !is_arg_explicitly_set(&matches, "pretty") {
            if let Some(v) = last.pretty {
                settings.pretty = v;
            }
        }

        // A restored view that lacks its arguments falls back to the default.
        if !is_arg_explicitly_set(&matches, "view") && settings.validate().is_err() {
            warnings.push(format!(
                "last-used view {} is missing its arguments; using {DEFAULT_VIEW}",
                settings.view
            ));
            settings.view = DEFAULT_VIEW.to_string();
        }

        settings = Self::apply_debug(settings);

        let params = LastUsedParams::from(&settings);
        if let Err(e) = params.save_to(config_path) {
            warnings.push(format!("failed to persist last-used config: {e}"));
        }

        (settings, warnings)
    }

    /// Check that the arguments the selected view needs are present.
    pub fn validate(&self) -> Result<()> {
        match self.view.as_str() {
            "game" | "ranking" if self.game_id.is_none() => Err(StatsError::Config(format!(
                "--game-id is required for the {} view",
                self.view
            ))),
            "items" if self.player_id.is_none() => Err(StatsError::Config(
                "--player-id is required for the items view".to_string(),
            )),
            _ => Ok(()),
        }
    }

    /// `--debug` overrides the log level.
    fn apply_debug(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            log_path: Some(s.log_path.clone()),
            view: Some(s.view.clone()),
            game_id: s.game_id,
            player_id: s.player_id.clone(),
            pretty: Some(s.pretty),
        }
    }
}

/// Returns `true` when `name` was supplied on the command line or through
/// its environment variable (not via default value).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(clap::parser::ValueSource::CommandLine | clap::parser::ValueSource::EnvVariable)
    )
}

// ── Tests ──────────────────────────────────────────────────────────────────────
