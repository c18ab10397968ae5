//! Sample sources
//!
//! A [`SampleSource`] hands the pipeline a mono [`AudioStream`] without the
//! pipeline knowing where the samples came from.

use super::decoder::SimpleDecoder;
use super::types::AudioStream;
use crate::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};

/// Anything that can produce a mono integer sample stream.
pub trait SampleSource {
    /// Human-readable identifier used in logs and reports
    fn name(&self) -> String;

    /// Produce the full stream.
    ///
    /// # Errors
    /// Source-specific: decode failures, empty input, zero sample rate.
    fn read_stream(&self) -> Result<AudioStream>;
}

/// Audio file on disk, decoded with symphonia
#[derive(Debug, Clone)]
pub struct AudioFile {
    path: PathBuf,
}

impl AudioFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SampleSource for AudioFile {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn read_stream(&self) -> Result<AudioStream> {
        SimpleDecoder::decode_first_channel(&self.path)
    }
}

/// Seeded uniform noise, for experiments without a recording.
///
/// The same seed always yields the same stream.
#[derive(Debug, Clone)]
pub struct SyntheticNoise {
    pub sample_rate: u32,
    pub len: usize,
    pub min: i32,
    pub max: i32,
    pub seed: u64,
}

impl SyntheticNoise {
    /// Full-scale 16-bit noise
    pub fn pcm16(sample_rate: u32, len: usize, seed: u64) -> Self {
        Self {
            sample_rate,
            len,
            min: i16::MIN as i32,
            max: i16::MAX as i32,
            seed,
        }
    }
}

impl SampleSource for SyntheticNoise {
    fn name(&self) -> String {
        format!("synthetic(seed={}, range={}..={})", self.seed, self.min, self.max)
    }

    fn read_stream(&self) -> Result<AudioStream> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        let samples = (0..self.len).map(|_| rng.gen_range(lo..=hi)).collect();
        AudioStream::new(self.sample_rate, samples)
    }
}
