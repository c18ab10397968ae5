//! Histogram-based Shannon entropy estimation
//!
//! Values are min-max normalized to [0, 1] and counted into equal-width bins.
//! The estimate is `-Σ p·log2(p)` over the non-empty bins, so it is bounded by
//! `log2(bins)` (8 bits for the 256-bin estimator).

use serde::Serialize;

/// Bin count used by [`shannon_entropy`]
pub const ENTROPY_BINS: usize = 256;

/// Equal-width histogram over the observed value range.
///
/// The right edge is inclusive, so the maximum lands in the last bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Lower edge of the first bin
    pub min: f64,
    /// Upper edge of the last bin
    pub max: f64,
    /// Occurrences per bin
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Count `values` into `bins` equal-width bins spanning their min..max.
    ///
    /// A constant input is centred in a unit-wide range, so all values fall
    /// into the middle bin. Returns `None` for empty input or `bins == 0`.
    pub fn from_values<T>(values: &[T], bins: usize) -> Option<Self>
    where
        T: Copy + Into<f64>,
    {
        if values.is_empty() || bins == 0 {
            return None;
        }

        let (mut min, mut max) = min_max(values)?;
        if min == max {
            min -= 0.5;
            max += 0.5;
        }

        let mut counts = vec![0u64; bins];
        let span = max - min;
        for &value in values {
            let normalized = (value.into() - min) / span;
            counts[bin_index(normalized, bins)] += 1;
        }

        Some(Self { min, max, counts })
    }

    /// Total number of counted values
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Width of one bin in value units
    pub fn bin_width(&self) -> f64 {
        (self.max - self.min) / self.counts.len() as f64
    }

    /// Lower edge of bin `index`
    pub fn bin_start(&self, index: usize) -> f64 {
        self.min + index as f64 * self.bin_width()
    }

    /// Per-bin probability (`count / total`)
    pub fn probabilities(&self) -> Vec<f64> {
        let total = self.total() as f64;
        self.counts.iter().map(|&c| c as f64 / total).collect()
    }

    /// Per-bin probability density; integrates to 1 over the range
    pub fn density(&self) -> Vec<f64> {
        let width = self.bin_width();
        self.probabilities().into_iter().map(|p| p / width).collect()
    }
}

/// Shannon entropy (bits) of `values` over a 256-bin histogram.
///
/// Empty and constant inputs have zero entropy.
pub fn shannon_entropy<T>(values: &[T]) -> f64
where
    T: Copy + Into<f64>,
{
    match min_max(values) {
        Some((min, max)) if min != max => {}
        _ => return 0.0,
    }

    let Some(histogram) = Histogram::from_values(values, ENTROPY_BINS) else {
        return 0.0;
    };

    let entropy: f64 = histogram
        .probabilities()
        .into_iter()
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.log2())
        .sum();

    // A single occupied bin sums to -0.0
    entropy.max(0.0)
}

fn min_max<T>(values: &[T]) -> Option<(f64, f64)>
where
    T: Copy + Into<f64>,
{
    let mut iter = values.iter().map(|&v| v.into());
    let first = iter.next()?;
    Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

/// Bin for a value already normalized to [0, 1]
fn bin_index(normalized: f64, bins: usize) -> usize {
    let index = (normalized * bins as f64).floor();
    if index <= 0.0 {
        0
    } else {
        (index as usize).min(bins - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_constant_are_zero() {
        assert_eq!(shannon_entropy::<i32>(&[]), 0.0);
        assert_eq!(shannon_entropy(&[42i32; 1]), 0.0);
        assert_eq!(shannon_entropy(&[-7i32; 1000]), 0.0);
        assert_eq!(shannon_entropy(&[3u8; 16]), 0.0);
    }

    #[test]
    fn test_two_values_one_bit() {
        let values = [0i32, 1, 0, 1];
        assert!((shannon_entropy(&values) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_four_evenly_spaced_values_two_bits() {
        // 0, 1/3, 2/3, 1 land in bins 0, 85, 170, 255
        let values = [0i32, 1, 2, 3];
        assert!((shannon_entropy(&values) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_uniform_bytes_reach_eight_bits() {
        let values: Vec<u8> = (0..=255).collect();
        assert!((shannon_entropy(&values) - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_skewed_distribution() {
        // p = 3/4, 1/4
        let values = [0i32, 0, 0, 10];
        let expected = -(0.75f64 * 0.75f64.log2() + 0.25 * 0.25f64.log2());
        assert!((shannon_entropy(&values) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_affine_rescaling_invariance() {
        let values: Vec<i32> = (0..500).map(|i| (i * 7919 % 1013) - 500).collect();
        let scaled: Vec<i32> = values.iter().map(|v| v * 3 + 1000).collect();
        let base = shannon_entropy(&values);
        assert!(base > 0.0);
        assert!((base - shannon_entropy(&scaled)).abs() < 1e-9);
    }

    #[test]
    fn test_histogram_max_in_last_bin() {
        let hist = Histogram::from_values(&[0i32, 5, 10], 10).unwrap();
        assert_eq!(hist.counts[0], 1);
        assert_eq!(hist.counts[5], 1);
        assert_eq!(hist.counts[9], 1);
        assert_eq!(hist.total(), 3);
    }

    #[test]
    fn test_histogram_constant_input_centred() {
        let hist = Histogram::from_values(&[4i32, 4, 4], 100).unwrap();
        assert_eq!(hist.counts[50], 3);
        assert_eq!(hist.min, 3.5);
        assert_eq!(hist.max, 4.5);
    }

    #[test]
    fn test_histogram_density_integrates_to_one() {
        let values: Vec<u8> = vec![0, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144, 233];
        let hist = Histogram::from_values(&values, 100).unwrap();
        let area: f64 = hist.density().iter().map(|d| d * hist.bin_width()).sum();
        assert!((area - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_histogram_empty_is_none() {
        assert!(Histogram::from_values::<i32>(&[], 10).is_none());
        assert!(Histogram::from_values(&[1i32], 0).is_none());
    }
}
