//! Core audio data types

use crate::error::{Error, Result};

/// Mono integer PCM captured from a noise source.
///
/// Multi-channel material is reduced to its first channel before one of these
/// is built. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioStream {
    sample_rate: u32,
    samples: Vec<i32>,
}

impl AudioStream {
    /// Create a stream, rejecting a zero sample rate or an empty sample list
    pub fn new(sample_rate: u32, samples: Vec<i32>) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::Decode("sample rate must be positive".to_string()));
        }
        if samples.is_empty() {
            return Err(Error::Decode("audio stream contains no samples".to_string()));
        }

        Ok(Self {
            sample_rate,
            samples,
        })
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Samples in capture order
    pub fn samples(&self) -> &[i32] {
        &self.samples
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for a constructed stream
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get duration in seconds
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}
