//! Error types for hiss-rng
//!
//! Defines the extraction error taxonomy using thiserror. Every variant aborts
//! the run; nothing here is retried since each operation is a deterministic
//! function of its input.

use thiserror::Error;

/// Main error type for hiss-rng
#[derive(Error, Debug)]
pub enum Error {
    /// Extraction parameters cannot describe a usable window
    #[error(
        "Invalid configuration: {reason} (sample_rate={sample_rate}, seconds_per_chunk={seconds_per_chunk})"
    )]
    InvalidConfiguration {
        reason: String,
        sample_rate: u32,
        seconds_per_chunk: f64,
    },

    /// The source holds fewer samples than the request needs
    #[error(
        "Source too short for seconds_per_chunk={seconds_per_chunk} and num_numbers={count}: \
         need {required} samples, have {available}"
    )]
    InsufficientSource {
        seconds_per_chunk: f64,
        count: usize,
        required: usize,
        available: usize,
    },

    /// Normalized score rendered without fractional digits
    #[error("Malformed score: '{0}' has no fractional digits")]
    MalformedScore(String),

    /// Audio decoding errors
    #[error("Audio decode error: {0}")]
    Decode(String),

    /// Audit sink failed to record an artifact
    #[error("Audit error: {0}")]
    Audit(String),

    /// Hashing worker pool could not be started
    #[error("Worker pool error: {0}")]
    Workers(String),

    /// JSON report could not be produced
    #[error("Report serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Shared configuration errors
    #[error(transparent)]
    Common(#[from] hiss_common::Error),
}

/// Convenience Result type using hiss-rng Error
pub type Result<T> = std::result::Result<T, Error>;
