//! Audio input: decoded streams and the sources that produce them

pub mod decoder;
pub mod source;
pub mod types;

pub use decoder::SimpleDecoder;
pub use source::{AudioFile, SampleSource, SyntheticNoise};
pub use types::AudioStream;
