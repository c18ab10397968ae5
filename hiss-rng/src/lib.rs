//! # hiss-rng
//!
//! Derives random numbers from ambient audio noise and measures how random
//! the input and the output are.
//!
//! **Pipeline:** decoded audio → fixed-duration chunks → SHA-256 → score in
//! [0, 1] → decimal-digit parity bits → number, with 256-bin Shannon entropy
//! estimated before and after.
//!
//! This is an experimentation tool, not a certified TRNG: there are no health
//! tests and no conditioning beyond the single hash pass.

pub mod audio;
pub mod audit;
pub mod config;
pub mod entropy;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod report;

pub use audio::{AudioStream, SampleSource};
pub use error::{Error, Result};
pub use pipeline::{Pipeline, PipelineOutput};
