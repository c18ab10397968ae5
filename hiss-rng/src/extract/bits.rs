//! Decimal-digit parity bit extraction
//!
//! The score is rendered with `f64`'s `Display` (shortest decimal that round
//! trips, positional notation). Up to eight digits after the decimal point each
//! contribute one bit, `1` for an odd digit, most significant first.
//!
//! The width of the result follows the rendering: `0.5` has one fractional
//! digit and so yields a 1-bit number. This is intentional and must not be
//! padded to eight bits.

use crate::error::{Error, Result};

/// Maximum number of fractional digits consumed
pub const MAX_DIGITS: usize = 8;

/// Fractional digits of `score` that feed the bit string, at most [`MAX_DIGITS`].
///
/// # Errors
/// `MalformedScore` when the rendering has no decimal point.
pub fn fractional_digits(score: f64) -> Result<String> {
    let rendered = score.to_string();
    let (_, fraction) = rendered
        .split_once('.')
        .ok_or_else(|| Error::MalformedScore(rendered.clone()))?;

    if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::MalformedScore(rendered.clone()));
    }

    Ok(fraction.chars().take(MAX_DIGITS).collect())
}

/// Derive a random number from a normalized score.
///
/// # Errors
/// `MalformedScore` when `score` renders without fractional digits
/// (an exact integer such as `0` or `1`).
pub fn extract(score: f64) -> Result<u8> {
    let digits = fractional_digits(score)?;

    let number = digits
        .bytes()
        .fold(0u8, |acc, digit| (acc << 1) | ((digit - b'0') & 1));

    Ok(number)
}
