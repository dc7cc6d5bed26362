//! EDA signal quality index after Böttcher et al. (2022).
//!
//! The segment is cut into consecutive 2 s windows. A window is usable when
//! its rate of amplitude change `|(max - min) / max|` is below 0.2 and its
//! mean is above 0.05 µS. The index is the fraction of usable windows.
//!
//! # References
//!
//! - Böttcher, S. et al. (2022). *Data quality evaluation in wearable monitoring*.
//!   Scientific Reports, 12, 21412.

use log::warn;
use nalgebra::{DVector, DVectorView};
use rayon::iter::ParallelIterator;
use rayon::slice::ParallelSlice;

use crate::error::{QualityError, Result};
use crate::preprocessing::validation::{require_sampling_rate, require_signal};

/// Window length in seconds.
pub const WINDOW_SECONDS: usize = 2;
/// Segment length the method was designed for, in seconds.
pub const NOMINAL_SECONDS: usize = 60;
/// A window must have a rate of amplitude change strictly below this value.
pub const RAC_THRESHOLD: f64 = 0.2;
/// A window must have a mean strictly above this value.
pub const MIN_WINDOW_MEAN: f64 = 0.05;

/// Computes the Böttcher EDA quality score of a segment.
///
/// # Arguments
///
/// * `x` - EDA samples, whole number of 2 s windows.
/// * `sampling_rate` - Sampling frequency in Hz.
/// * `verbose` - Log a note when the segment is shorter than the 60 s design length.
///
/// # Returns
///
/// The mean of the per-window binary scores, in `[0, 1]`. If any window has a
/// maximum of exactly zero its rate of amplitude change is undefined and the
/// result is `NaN`.
///
/// # Errors
///
/// - [`QualityError::MissingInput`] for an empty segment or a zero sampling rate.
/// - [`QualityError::InsufficientData`] if the length is not a multiple of the window size.
///
/// # Examples
///
/// ```
/// use sqi_algos::analysis::eda::eda_sqi_bottcher;
/// let flat = vec![0.06; 60];
/// assert_eq!(eda_sqi_bottcher(&flat, 1, false).unwrap(), 1.0);
/// ```
pub fn eda_sqi_bottcher(x: &[f64], sampling_rate: u32, verbose: bool) -> Result<f64> {
    require_signal(x)?;
    let sampling_rate = require_sampling_rate(Some(sampling_rate))?;
    let width = WINDOW_SECONDS * sampling_rate as usize;
    if x.len() % width != 0 {
        return Err(QualityError::InsufficientData {
            reason: "EDA segment must hold a whole number of 2s windows",
            required: (x.len() / width + 1) * width,
            actual: x.len(),
        });
    }
    if verbose && x.len() < NOMINAL_SECONDS * sampling_rate as usize {
        warn!(
            "bottcher was designed for a signal of 60s but will be applied to a signal of {}s",
            x.len() as f64 / f64::from(sampling_rate)
        );
    }

    let scores: Vec<f64> = x.par_chunks_exact(width).map(window_score).collect();
    let quality = DVector::from(scores).mean();
    if quality.is_nan() {
        warn!("bottcher is undefined: a 2s window has a maximum of zero");
    }
    Ok(quality)
}

/// Binary score of one window, `NaN` if its maximum is zero.
fn window_score(window: &[f64]) -> f64 {
    let (min, max) = window
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if max == 0.0 {
        return f64::NAN;
    }
    let rac = ((max - min) / max).abs();
    let mean = DVectorView::from(window).mean();
    if rac < RAC_THRESHOLD && mean > MIN_WINDOW_MEAN {
        1.0
    } else {
        0.0
    }
}
