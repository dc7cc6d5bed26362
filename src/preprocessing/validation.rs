//! Precondition checks shared by the quality algorithms.
//!
//! These checks never modify the segment. They either reject it with a
//! [`QualityError`] or, for ADC saturation, report that it cannot be scored.

use crate::error::{QualityError, Result};

/// Fails with [`QualityError::MissingInput`] if the segment holds no samples.
pub fn require_signal(segment: &[f64]) -> Result<()> {
    if segment.is_empty() {
        Err(QualityError::MissingInput("input signal is empty"))
    } else {
        Ok(())
    }
}

/// Unwraps the sampling rate, rejecting an absent or zero rate.
///
/// # Errors
///
/// Returns [`QualityError::MissingInput`] if `sampling_rate` is `None` or `0`.
pub fn require_sampling_rate(sampling_rate: Option<u32>) -> Result<u32> {
    match sampling_rate {
        Some(rate) if rate > 0 => Ok(rate),
        Some(_) => Err(QualityError::MissingInput(
            "sampling rate must be a positive integer",
        )),
        None => Err(QualityError::MissingInput("sampling rate is required")),
    }
}

/// Requires the segment to span at least `seconds` at `sampling_rate`.
///
/// # Errors
///
/// Returns [`QualityError::InsufficientData`] if `len < seconds * sampling_rate`.
pub fn require_duration(
    len: usize,
    sampling_rate: u32,
    seconds: usize,
    reason: &'static str,
) -> Result<()> {
    let required = seconds * sampling_rate as usize;
    if len < required {
        Err(QualityError::InsufficientData {
            reason,
            required,
            actual: len,
        })
    } else {
        Ok(())
    }
}

/// Peak-to-peak amplitude of the segment, `max - min`.
///
/// Returns `NaN` for an empty segment.
pub fn peak_to_peak(segment: &[f64]) -> f64 {
    if segment.is_empty() {
        return f64::NAN;
    }
    let (min, max) = segment
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        });
    max - min
}

/// Checks whether the segment spans the full range of a `bit`-bit ADC.
///
/// A `bit` of `0` disables the check. Otherwise the segment counts as
/// saturated when `max - min >= 2^bit - 1`.
pub fn is_saturated(segment: &[f64], bit: u32) -> bool {
    if bit == 0 {
        return false;
    }
    let full_scale = 2f64.powi(bit as i32) - 1.0;
    peak_to_peak(segment) >= full_scale
}
