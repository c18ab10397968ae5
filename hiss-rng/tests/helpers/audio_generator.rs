//! WAV fixture generation
//!
//! Writes small WAV files with known sample values so decoded streams can be
//! compared exactly.

use hound::{SampleFormat, WavSpec, WavWriter};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

fn int_spec(channels: u16, sample_rate: u32, bits_per_sample: u16) -> WavSpec {
    WavSpec {
        channels,
        sample_rate,
        bits_per_sample,
        sample_format: SampleFormat::Int,
    }
}

/// Seeded full-scale 16-bit noise
pub fn noise_i16(len: usize, seed: u64) -> Vec<i16> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen::<i16>()).collect()
}

/// Mono 16-bit PCM
pub fn write_mono_i16<P: AsRef<Path>>(
    path: P,
    sample_rate: u32,
    samples: &[i16],
) -> Result<(), hound::Error> {
    let mut writer = WavWriter::create(path, int_spec(1, sample_rate, 16))?;
    for &s in samples {
        writer.write_sample(s)?;
    }
    writer.finalize()
}

/// Stereo 16-bit PCM, interleaved from separate channel slices
pub fn write_stereo_i16<P: AsRef<Path>>(
    path: P,
    sample_rate: u32,
    left: &[i16],
    right: &[i16],
) -> Result<(), hound::Error> {
    assert_eq!(left.len(), right.len(), "channels must have equal length");
    let mut writer = WavWriter::create(path, int_spec(2, sample_rate, 16))?;
    for (&l, &r) in left.iter().zip(right) {
        writer.write_sample(l)?;
        writer.write_sample(r)?;
    }
    writer.finalize()
}

/// Mono 8-bit PCM (stored unsigned in the file)
pub fn write_mono_i8<P: AsRef<Path>>(
    path: P,
    sample_rate: u32,
    samples: &[i8],
) -> Result<(), hound::Error> {
    let mut writer = WavWriter::create(path, int_spec(1, sample_rate, 8))?;
    for &s in samples {
        writer.write_sample(s)?;
    }
    writer.finalize()
}

/// Mono 24-bit PCM
pub fn write_mono_i24<P: AsRef<Path>>(
    path: P,
    sample_rate: u32,
    samples: &[i32],
) -> Result<(), hound::Error> {
    let mut writer = WavWriter::create(path, int_spec(1, sample_rate, 24))?;
    for &s in samples {
        writer.write_sample(s)?;
    }
    writer.finalize()
}

/// Mono 32-bit float PCM
pub fn write_mono_f32<P: AsRef<Path>>(
    path: P,
    sample_rate: u32,
    samples: &[f32],
) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec)?;
    for &s in samples {
        writer.write_sample(s)?;
    }
    writer.finalize()
}
