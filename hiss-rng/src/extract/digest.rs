//! Chunk hashing
//!
//! A chunk is serialized as consecutive 32-bit little-endian signed integers,
//! hashed with SHA-256, and the first four digest bytes (big-endian) are
//! scaled into [0, 1].

use sha2::{Digest, Sha256};

/// Largest value a 4-byte digest prefix can take
pub const DIGEST_PREFIX_MAX: u32 = 0xFFFF_FFFF;

/// Truncated hash of one chunk and the score derived from it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkDigest {
    /// First four bytes of the SHA-256 digest
    pub prefix: [u8; 4],
    /// `prefix` (big-endian) divided by `0xFFFFFFFF`
    pub score: f64,
}

impl ChunkDigest {
    /// Prefix as a big-endian integer
    pub fn value(&self) -> u32 {
        u32::from_be_bytes(self.prefix)
    }

    /// Lowercase hex of the prefix, 8 characters
    pub fn hex(&self) -> String {
        self.prefix.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

/// Canonical byte form of a chunk
pub fn chunk_bytes(chunk: &[i32]) -> Vec<u8> {
    chunk.iter().flat_map(|s| s.to_le_bytes()).collect()
}

/// Hash a chunk into a [`ChunkDigest`]
pub fn digest(chunk: &[i32]) -> ChunkDigest {
    let mut hasher = Sha256::new();
    for sample in chunk {
        hasher.update(sample.to_le_bytes());
    }
    let hash = hasher.finalize();

    let prefix = [hash[0], hash[1], hash[2], hash[3]];
    let score = u32::from_be_bytes(prefix) as f64 / DIGEST_PREFIX_MAX as f64;

    ChunkDigest { prefix, score }
}
