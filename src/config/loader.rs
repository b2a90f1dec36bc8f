//! Configuration file loading with precedence handling.

use crate::window::border::{DEFAULT_BORDER_ATTEMPTS, DEFAULT_STAGE_DURATION};
use crate::window::{
    BorderParams, WindowParams, DEFAULT_BUFFER_SIZE, FILLER_OFFSET_PX, TOP_OFFSET_PX,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "ROWSCOPE_CONFIG";

/// Environment variable overriding the buffer size.
pub const BUFFER_SIZE_ENV: &str = "ROWSCOPE_BUFFER_SIZE";

/// Virtual pixel height of one terminal line.
pub const DEFAULT_ROW_HEIGHT: f64 = 20.0;

/// Rows moved per mouse wheel notch.
pub const DEFAULT_WHEEL_ROWS: usize = 3;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown fields.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/rowscope/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Virtual pixel height of one terminal line.
    #[serde(default)]
    pub row_height: Option<f64>,

    /// Rows materialized beyond the viewport on each side.
    #[serde(default)]
    pub buffer_size: Option<usize>,

    /// Minimal scroll offset kept at the top of long lists.
    #[serde(default)]
    pub top_offset: Option<f64>,

    /// Extra height below the last row.
    #[serde(default)]
    pub filler_offset: Option<f64>,

    /// Repeated offsets at an edge before the bounce triggers.
    #[serde(default)]
    pub border_attempts: Option<u32>,

    /// Length of each bounce stage in milliseconds.
    #[serde(default)]
    pub border_stage_ms: Option<u64>,

    /// Rows moved per mouse wheel notch.
    #[serde(default)]
    pub wheel_rows: Option<usize>,

    /// Column delimiter used to align copied rows.
    #[serde(default)]
    pub copy_delimiter: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Virtual pixel height of one terminal line.
    pub row_height: f64,
    /// Buffer rows on each side of the viewport.
    pub buffer_size: usize,
    /// Top offset in pixels.
    pub top_offset: f64,
    /// Filler below the last row in pixels.
    pub filler_offset: f64,
    /// Bounce attempt threshold.
    pub border_attempts: u32,
    /// Bounce stage length.
    pub border_stage: Duration,
    /// Rows per wheel notch.
    pub wheel_rows: usize,
    /// Column delimiter for copied text.
    pub copy_delimiter: Option<String>,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            buffer_size: DEFAULT_BUFFER_SIZE,
            top_offset: TOP_OFFSET_PX,
            filler_offset: FILLER_OFFSET_PX,
            border_attempts: DEFAULT_BORDER_ATTEMPTS,
            border_stage: DEFAULT_STAGE_DURATION,
            wheel_rows: DEFAULT_WHEEL_ROWS,
            copy_delimiter: None,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Window calculation parameters.
    pub fn window_params(&self) -> WindowParams {
        WindowParams {
            buffer_size: self.buffer_size,
            top_offset: self.top_offset,
            filler_offset: self.filler_offset,
        }
    }

    /// Border detection parameters.
    pub fn border_params(&self) -> BorderParams {
        BorderParams {
            attempts: self.border_attempts,
            stage_duration: self.border_stage,
            top_offset: self.top_offset,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/rowscope/rowscope.log` on Unix-like systems, or
/// the platform equivalent. Falls back to the current directory when no
/// state directory exists (macOS, Windows).
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("rowscope").join("rowscope.log")
    } else {
        PathBuf::from("rowscope.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/rowscope/config.toml` on Unix, appropriate path on other platforms.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rowscope").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `ROWSCOPE_CONFIG` environment variable
/// 3. Default path `~/.config/rowscope/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        if env_path.trim().is_empty() {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_ENV} is empty")));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// `ROWSCOPE_BUFFER_SIZE` replaces the buffer size when it parses as an
/// unsigned integer; anything else is ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(value) = std::env::var(BUFFER_SIZE_ENV) {
        match value.trim().parse::<usize>() {
            Ok(buffer_size) => config.buffer_size = buffer_size,
            Err(_) => tracing::warn!(value, "Ignoring unparsable {}", BUFFER_SIZE_ENV),
        }
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// Non-positive row heights are ignored.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        row_height: config
            .row_height
            .filter(|height| *height > 0.0)
            .unwrap_or(defaults.row_height),
        buffer_size: config.buffer_size.unwrap_or(defaults.buffer_size),
        top_offset: config.top_offset.unwrap_or(defaults.top_offset),
        filler_offset: config.filler_offset.unwrap_or(defaults.filler_offset),
        border_attempts: config.border_attempts.unwrap_or(defaults.border_attempts),
        border_stage: config
            .border_stage_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.border_stage),
        wheel_rows: config.wheel_rows.unwrap_or(defaults.wheel_rows),
        copy_delimiter: config.copy_delimiter.or(defaults.copy_delimiter),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Overrides collected from command-line flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    /// `--buffer-size`
    pub buffer_size: Option<usize>,
    /// `--row-height`
    pub row_height: Option<f64>,
    /// `--delimiter`
    pub copy_delimiter: Option<String>,
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(buffer_size) = cli.buffer_size {
        config.buffer_size = buffer_size;
    }

    if let Some(row_height) = cli.row_height.filter(|height| *height > 0.0) {
        config.row_height = row_height;
    }

    if let Some(delimiter) = cli.copy_delimiter {
        config.copy_delimiter = Some(delimiter);
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
