//! Run settings resolution for hiss-rng
//!
//! **Priority:** CLI flag → environment (read by clap) → TOML → built-in default
//!
//! The two extraction parameters (`seconds_per_chunk`, `num_random_numbers`)
//! are positional CLI arguments and never come from the TOML file.

use crate::error::{Error, Result};
use hiss_common::config::{ReportFormat, TomlConfig};
use std::path::PathBuf;

/// Values supplied on the command line (or through their env fallbacks)
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub workers: Option<usize>,
    pub audit_dir: Option<PathBuf>,
    pub no_audit: bool,
    pub format: Option<ReportFormat>,
    pub histogram: bool,
    pub log_level: Option<String>,
}

/// Fully resolved settings for one invocation
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub workers: usize,
    /// `Some` when audit artifacts should be written
    pub audit_dir: Option<PathBuf>,
    pub format: ReportFormat,
    pub histogram: bool,
    pub log_level: String,
}

impl RunSettings {
    /// Merge CLI overrides over the TOML config.
    ///
    /// An explicit `--audit-dir` turns auditing on even when the TOML file
    /// leaves it disabled; `--no-audit` wins over both.
    pub fn resolve(cli: &CliOverrides, toml: &TomlConfig) -> Result<Self> {
        let workers = cli.workers.unwrap_or(toml.extraction.workers);
        if workers == 0 {
            return Err(Error::Common(hiss_common::Error::InvalidInput(
                "workers must be at least 1".to_string(),
            )));
        }

        let audit_dir = if cli.no_audit {
            None
        } else if let Some(dir) = &cli.audit_dir {
            Some(dir.clone())
        } else if toml.audit.enabled {
            Some(toml.audit.directory.clone())
        } else {
            None
        };

        let settings = Self {
            workers,
            audit_dir,
            format: cli.format.unwrap_or(toml.report.format),
            histogram: cli.histogram || toml.report.histogram,
            log_level: cli
                .log_level
                .clone()
                .unwrap_or_else(|| toml.logging.level.clone()),
        };

        Ok(settings)
    }
}
