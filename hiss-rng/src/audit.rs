//! Audit sinks for intermediate extraction artifacts
//!
//! The pipeline reports the raw source samples, each chunk digest and the
//! final numbers to an injected [`AuditSink`]. Recording never influences the
//! computed output. Digests always arrive in chunk-index order, including
//! when hashing runs on several workers.

use crate::error::{Error, Result};
use crate::extract::ChunkDigest;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Source samples file name
pub const SOURCE_FILE: &str = "source.bin";
/// Digest log file name (one hex prefix per line)
pub const DIGEST_FILE: &str = "sha.bin";
/// Generated numbers file name
pub const NUMBERS_FILE: &str = "post.bin";

/// Observer of pipeline intermediates
pub trait AuditSink {
    /// Full source sample sequence, recorded once per run
    fn record_source(&mut self, samples: &[i32]) -> Result<()>;

    /// Digest of chunk `index`; called with strictly increasing indices
    fn record_digest(&mut self, index: usize, digest: &ChunkDigest) -> Result<()>;

    /// Final number sequence, recorded once per run
    fn record_numbers(&mut self, numbers: &[u8]) -> Result<()>;

    /// Called after the last record of a successful run
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudit;

impl AuditSink for NullAudit {
    fn record_source(&mut self, _samples: &[i32]) -> Result<()> {
        Ok(())
    }

    fn record_digest(&mut self, _index: usize, _digest: &ChunkDigest) -> Result<()> {
        Ok(())
    }

    fn record_numbers(&mut self, _numbers: &[u8]) -> Result<()> {
        Ok(())
    }
}

/// Keeps every record in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryAudit {
    pub source: Vec<i32>,
    pub digests: Vec<(usize, String)>,
    pub numbers: Vec<u8>,
    pub finished: bool,
}

impl MemoryAudit {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuditSink for MemoryAudit {
    fn record_source(&mut self, samples: &[i32]) -> Result<()> {
        self.source = samples.to_vec();
        Ok(())
    }

    fn record_digest(&mut self, index: usize, digest: &ChunkDigest) -> Result<()> {
        self.digests.push((index, digest.hex()));
        Ok(())
    }

    fn record_numbers(&mut self, numbers: &[u8]) -> Result<()> {
        self.numbers = numbers.to_vec();
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

/// Writes `source.bin`, `sha.bin` and `post.bin` into a directory.
///
/// All three files are truncated when the sink is created, so each run starts
/// from empty artifacts.
#[derive(Debug)]
pub struct FileAudit {
    directory: PathBuf,
    source: BufWriter<File>,
    digests: BufWriter<File>,
    numbers: BufWriter<File>,
}

impl FileAudit {
    /// Create the directory if needed and truncate the artifact files
    pub fn create<P: AsRef<Path>>(directory: P) -> Result<Self> {
        let directory = directory.as_ref().to_path_buf();
        std::fs::create_dir_all(&directory).map_err(|e| {
            Error::Audit(format!(
                "Failed to create audit directory {}: {}",
                directory.display(),
                e
            ))
        })?;

        let open = |name: &str| -> Result<BufWriter<File>> {
            let path = directory.join(name);
            File::create(&path)
                .map(BufWriter::new)
                .map_err(|e| Error::Audit(format!("Failed to create {}: {}", path.display(), e)))
        };

        let sink = Self {
            source: open(SOURCE_FILE)?,
            digests: open(DIGEST_FILE)?,
            numbers: open(NUMBERS_FILE)?,
            directory,
        };
        debug!("Audit artifacts will be written to {}", sink.directory.display());
        Ok(sink)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl AuditSink for FileAudit {
    fn record_source(&mut self, samples: &[i32]) -> Result<()> {
        writeln!(self.source, "{}", format_list(samples))?;
        self.source.flush()?;
        Ok(())
    }

    fn record_digest(&mut self, _index: usize, digest: &ChunkDigest) -> Result<()> {
        writeln!(self.digests, "{}", digest.hex())?;
        Ok(())
    }

    fn record_numbers(&mut self, numbers: &[u8]) -> Result<()> {
        writeln!(self.numbers, "{}", format_list(numbers))?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.digests.flush()?;
        self.numbers.flush()?;
        Ok(())
    }
}

/// `[a, b, c]`
fn format_list<T: ToString>(values: &[T]) -> String {
    let items: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(", "))
}
