//! Fixed-duration windowing of a sample sequence

use crate::error::{Error, Result};

/// Number of whole samples covered by one chunk.
///
/// # Errors
/// `InvalidConfiguration` for a zero sample rate, a non-finite or
/// non-positive duration, or a window shorter than one sample.
pub fn samples_per_chunk(sample_rate: u32, seconds_per_chunk: f64) -> Result<usize> {
    let invalid = |reason: &str| Error::InvalidConfiguration {
        reason: reason.to_string(),
        sample_rate,
        seconds_per_chunk,
    };

    if sample_rate == 0 {
        return Err(invalid("sample rate must be positive"));
    }
    if !seconds_per_chunk.is_finite() || seconds_per_chunk <= 0.0 {
        return Err(invalid("seconds per chunk must be a positive number"));
    }

    let window = (sample_rate as f64 * seconds_per_chunk).floor();
    if window < 1.0 {
        return Err(invalid("chunk window is shorter than one sample"));
    }
    if window > usize::MAX as f64 {
        return Err(invalid("chunk window does not fit in memory"));
    }

    Ok(window as usize)
}

/// Slice `samples` into `count` consecutive, non-overlapping windows.
///
/// Window `i` covers `[i * spc, (i + 1) * spc)`. The whole request is checked
/// up front, so either every window is returned or none is.
///
/// # Errors
/// - `InvalidConfiguration` (see [`samples_per_chunk`])
/// - `InsufficientSource` when the last window ends past `samples.len()`
pub fn chunk(
    samples: &[i32],
    sample_rate: u32,
    seconds_per_chunk: f64,
    count: usize,
) -> Result<Vec<&[i32]>> {
    let spc = samples_per_chunk(sample_rate, seconds_per_chunk)?;

    let required = spc.checked_mul(count).ok_or(Error::InsufficientSource {
        seconds_per_chunk,
        count,
        required: usize::MAX,
        available: samples.len(),
    })?;

    if required > samples.len() {
        return Err(Error::InsufficientSource {
            seconds_per_chunk,
            count,
            required,
            available: samples.len(),
        });
    }

    Ok(samples[..required].chunks_exact(spc).collect())
}
