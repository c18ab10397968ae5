//! hiss-rng - Main entry point
//!
//! Reads a noise recording, extracts random numbers from it and prints the
//! entropy report to stdout. Logs go to stderr.
//!
//! ```bash
//! hiss-rng <audio_file> <seconds_per_chunk> <num_random_numbers> [--audit-dir DIR] [--format json]
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use hiss_common::config::{
    load_config, resolve_config_path, ConfigSource, ReportFormat, CONFIG_ENV_VAR,
};
use hiss_rng::audio::{AudioFile, SampleSource};
use hiss_rng::audit::FileAudit;
use hiss_rng::config::{CliOverrides, RunSettings};
use hiss_rng::report::Report;
use hiss_rng::Pipeline;
use tracing::{debug, info, warn};

/// Command-line arguments for hiss-rng
#[derive(Parser, Debug)]
#[command(name = "hiss-rng")]
#[command(about = "Extract random numbers from ambient audio noise")]
#[command(version)]
#[command(allow_negative_numbers = true)]
struct Args {
    /// Noise recording (WAV, FLAC, MP3, AAC, Vorbis)
    audio_file: PathBuf,

    /// Seconds of audio consumed per generated number
    seconds_per_chunk: f64,

    /// How many numbers to generate
    num_random_numbers: usize,

    /// TOML config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Hashing workers (1 = sequential)
    #[arg(short, long, env = "HISS_WORKERS")]
    workers: Option<usize>,

    /// Write source.bin, sha.bin and post.bin into this directory
    #[arg(long, value_name = "DIR", env = "HISS_AUDIT_DIR")]
    audit_dir: Option<PathBuf>,

    /// Do not write audit artifacts even if configured
    #[arg(long)]
    no_audit: bool,

    /// Report format: text or json
    #[arg(short, long)]
    format: Option<ReportFormat>,

    /// Append source and output histograms to the report
    #[arg(long)]
    histogram: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "HISS_LOG_LEVEL")]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            workers: self.workers,
            audit_dir: self.audit_dir.clone(),
            no_audit: self.no_audit,
            format: self.format,
            histogram: self.histogram,
            log_level: self.log_level.clone(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = resolve_config_path(args.config.as_deref(), CONFIG_ENV_VAR);
    let (toml_config, config_source) =
        load_config(config_path.as_deref()).context("Failed to load configuration")?;
    let settings = RunSettings::resolve(&args.overrides(), &toml_config)
        .context("Invalid run settings")?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "hiss_rng={level},hiss_common={level}",
                    level = settings.log_level
                ))
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    match &config_source {
        ConfigSource::File(path) => info!("Config file: {}", path.display()),
        ConfigSource::Missing(path) => {
            warn!("Config file {} not found, using defaults", path.display())
        }
        ConfigSource::Defaults => debug!("No config file, using defaults"),
    }
    debug!("Resolved run settings: {:?}", settings);

    let source = AudioFile::new(&args.audio_file);
    info!("Reading noise source {}", source.name());
    let stream = source
        .read_stream()
        .with_context(|| format!("Failed to read audio from {}", source.name()))?;
    info!(
        "Loaded {} samples at {} Hz ({:.2}s)",
        stream.len(),
        stream.sample_rate(),
        stream.duration_seconds()
    );

    let pipeline = Pipeline::new(args.seconds_per_chunk, args.num_random_numbers)
        .with_workers(settings.workers);

    let output = match &settings.audit_dir {
        Some(dir) => {
            let mut sink = FileAudit::create(dir).context("Failed to prepare audit directory")?;
            info!("Writing audit artifacts to {}", dir.display());
            pipeline.run_with_audit(&stream, &mut sink)
        }
        None => pipeline.run(&stream),
    }
    .context("Random number extraction failed")?;

    let mut report = Report::new(source.name(), &stream, pipeline.settings(), output);
    if settings.histogram {
        report = report.with_histograms(&stream);
    }

    print!("{}", report.render(settings.format)?);
    if settings.format == ReportFormat::Json {
        println!();
    }

    Ok(())
}
