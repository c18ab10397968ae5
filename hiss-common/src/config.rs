//! Configuration loading and config file resolution
//!
//! The TOML file is optional. Every field carries a built-in default, so a
//! missing file (or a missing section) falls back silently to defaults.
//!
//! # Config File Priority
//!
//! 1. Command-line argument (`--config`)
//! 2. Environment variable (`HISS_CONFIG`)
//! 3. Per-user default (`~/.config/hiss/config.toml`), only if it exists

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "HISS_CONFIG";

/// Log levels accepted in `[logging] level`
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Root of the TOML configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub extraction: ExtractionConfig,
    pub audit: AuditConfig,
    pub report: ReportConfig,
    pub logging: LoggingConfig,
}

/// `[extraction]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of hashing workers (1 = sequential)
    pub workers: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self { workers: 1 }
    }
}

/// `[audit]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Write intermediate artifacts (source samples, digests, numbers)
    pub enabled: bool,

    /// Directory receiving `source.bin`, `sha.bin` and `post.bin`
    pub directory: PathBuf,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            directory: PathBuf::from("./hiss-audit"),
        }
    }
}

/// `[report]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub format: ReportFormat,

    /// Append text histograms of source samples and generated numbers
    pub histogram: bool,
}

/// Output format of the run report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format '{}' (expected text or json)", other)),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl TomlConfig {
    /// Reject values that deserialize but make no sense
    pub fn validate(&self) -> Result<()> {
        if self.extraction.workers == 0 {
            return Err(Error::Config(
                "extraction.workers must be at least 1".to_string(),
            ));
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(Error::Config(format!(
                "logging.level '{}' is not one of {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}

/// Parse and validate a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config {}: {}", path.display(), e))
    })?;
    let config: TomlConfig = toml::from_str(&content)?;
    config.validate()?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Where the effective config came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// This path was requested but does not exist; defaults apply
    Missing(PathBuf),
    /// No config file was requested
    Defaults,
}

/// Load the config at `path` and report where it came from.
///
/// Nothing is logged here, so callers can load before tracing is installed
/// and report the [`ConfigSource`] afterwards. A file that exists but fails
/// to parse or validate is an error.
pub fn load_config(path: Option<&Path>) -> Result<(TomlConfig, ConfigSource)> {
    match path {
        None => Ok((TomlConfig::default(), ConfigSource::Defaults)),
        Some(p) if !p.exists() => Ok((
            TomlConfig::default(),
            ConfigSource::Missing(p.to_path_buf()),
        )),
        Some(p) => Ok((load_toml_config(p)?, ConfigSource::File(p.to_path_buf()))),
    }
}

/// Load the config at `path`, or defaults when there is nothing to load.
///
/// A path that does not exist only produces a warning.
pub fn load_or_default(path: Option<&Path>) -> Result<TomlConfig> {
    let (config, source) = load_config(path)?;
    if let ConfigSource::Missing(p) = &source {
        warn!("Config file {} not found, using defaults", p.display());
    }
    Ok(config)
}

/// Resolve which config file to read, following the documented priority.
pub fn resolve_config_path(cli_arg: Option<&Path>, env_var_name: &str) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    default_config_path().filter(|p| p.exists())
}

/// Per-user config location for the platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hiss").join("config.toml"))
}
