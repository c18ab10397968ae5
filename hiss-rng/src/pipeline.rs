//! Extraction pipeline
//!
//! stream → chunks → digests → numbers, with Shannon entropy measured on the
//! source samples and on the generated numbers.
//!
//! The chunk request is validated before anything is recorded or hashed, so a
//! failing run leaves no partial output behind.

use crate::audio::AudioStream;
use crate::audit::{AuditSink, NullAudit};
use crate::entropy::shannon_entropy;
use crate::error::{Error, Result};
use crate::extract::{self, ChunkDigest};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

/// Parameters of one extraction run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractionSettings {
    /// Duration of audio consumed per generated number
    pub seconds_per_chunk: f64,
    /// How many numbers to generate
    pub count: usize,
    /// Hashing workers; 1 hashes on the calling thread
    pub workers: usize,
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutput {
    /// Generated numbers in chunk order
    pub numbers: Vec<u8>,
    /// Entropy of the full source sample sequence (bits)
    pub source_entropy: f64,
    /// Entropy of `numbers` (bits)
    pub output_entropy: f64,
    /// Window length used for each number
    pub samples_per_chunk: usize,
}

/// Configured extraction pipeline
#[derive(Debug, Clone)]
pub struct Pipeline {
    settings: ExtractionSettings,
}

impl Pipeline {
    /// Sequential pipeline
    pub fn new(seconds_per_chunk: f64, count: usize) -> Self {
        Self {
            settings: ExtractionSettings {
                seconds_per_chunk,
                count,
                workers: 1,
            },
        }
    }

    /// Hash chunks on `workers` threads (values below 1 are treated as 1).
    ///
    /// Output and audit order are identical to the sequential run.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.settings.workers = workers.max(1);
        self
    }

    pub fn settings(&self) -> &ExtractionSettings {
        &self.settings
    }

    /// Run without auditing
    pub fn run(&self, stream: &AudioStream) -> Result<PipelineOutput> {
        self.run_with_audit(stream, &mut NullAudit)
    }

    /// Run, reporting intermediates to `audit`
    pub fn run_with_audit(
        &self,
        stream: &AudioStream,
        audit: &mut dyn AuditSink,
    ) -> Result<PipelineOutput> {
        let ExtractionSettings {
            seconds_per_chunk,
            count,
            workers,
        } = self.settings;

        let samples_per_chunk = extract::samples_per_chunk(stream.sample_rate(), seconds_per_chunk)?;
        let chunks = extract::chunk(stream.samples(), stream.sample_rate(), seconds_per_chunk, count)?;

        info!(
            "Extracting {} numbers from {} samples at {} Hz ({} samples per chunk)",
            count,
            stream.len(),
            stream.sample_rate(),
            samples_per_chunk
        );

        audit.record_source(stream.samples())?;

        let source_entropy = shannon_entropy(stream.samples());
        info!("Source entropy: {:.6} bits", source_entropy);

        let numbers = if workers > 1 && chunks.len() > 1 {
            Self::extract_parallel(&chunks, workers, audit)?
        } else {
            Self::extract_sequential(&chunks, audit)?
        };

        audit.record_numbers(&numbers)?;

        let output_entropy = shannon_entropy(&numbers);
        info!("Output entropy: {:.6} bits", output_entropy);

        audit.finish()?;

        Ok(PipelineOutput {
            numbers,
            source_entropy,
            output_entropy,
            samples_per_chunk,
        })
    }

    fn extract_sequential(chunks: &[&[i32]], audit: &mut dyn AuditSink) -> Result<Vec<u8>> {
        let mut numbers = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            let digest = extract::digest(chunk);
            numbers.push(Self::record_and_extract(index, &digest, audit)?);
        }
        Ok(numbers)
    }

    fn extract_parallel(
        chunks: &[&[i32]],
        workers: usize,
        audit: &mut dyn AuditSink,
    ) -> Result<Vec<u8>> {
        let pool = Self::worker_pool(workers)?;

        debug!("Hashing {} chunks on {} workers", chunks.len(), workers);

        // par_iter().collect() keeps chunk order
        let digests: Vec<ChunkDigest> =
            pool.install(|| chunks.par_iter().map(|chunk| extract::digest(chunk)).collect());

        digests
            .iter()
            .enumerate()
            .map(|(index, digest)| Self::record_and_extract(index, digest, audit))
            .collect()
    }

    fn worker_pool(workers: usize) -> Result<rayon::ThreadPool> {
        rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("hiss-hash-{}", index))
            .build()
            .map_err(|e| {
                Error::Workers(format!("Failed to start {} hashing workers: {}", workers, e))
            })
    }

    fn record_and_extract(
        index: usize,
        digest: &ChunkDigest,
        audit: &mut dyn AuditSink,
    ) -> Result<u8> {
        audit.record_digest(index, digest)?;
        let number = extract::extract(digest.score)?;
        debug!(
            chunk = index,
            digest = %digest.hex(),
            score = digest.score,
            number,
            "Chunk extracted"
        );
        Ok(number)
    }
}

/// Run a sequential, unaudited pipeline over `stream`
pub fn run(stream: &AudioStream, seconds_per_chunk: f64, count: usize) -> Result<PipelineOutput> {
    Pipeline::new(seconds_per_chunk, count).run(stream)
}
