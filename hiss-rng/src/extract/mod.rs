//! Chunk → digest → number extraction stages
//!
//! - [`chunker`]: fixed-duration windows over the sample sequence
//! - [`digest`]: SHA-256 of a window, truncated to a score in [0, 1]
//! - [`bits`]: decimal-digit parity bits of the score

pub mod bits;
pub mod chunker;
pub mod digest;

pub use bits::extract;
pub use chunker::{chunk, samples_per_chunk};
pub use digest::{digest, ChunkDigest};
