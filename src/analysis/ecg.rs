//! ECG signal quality indices.
//!
//! Currently the following indices are computed locally:
//! - `Level3`: three-level heuristic from heart-rate plausibility and
//!   heartbeat template correlation ([`ecg_sqi_level3`])
//! - `cSQI`: coefficient of variation of RR intervals ([`calc_csqi`])
//! - `hosSQI`: higher-order statistics index ([`calc_hos_sqi`])
//!
//! R-peak detection, peak correction and template extraction are not part of
//! this crate. They are supplied by the caller through [`BeatToolkit`].
//!
//! # References
//!
//! - Zhao, Z., & Zhang, Y. (2018). *SQI quality evaluation mechanism of single-lead ECG signal
//!   based on simple heuristic fusion and fuzzy comprehensive evaluation*. Frontiers in Physiology, 9, 727.
//! - Nardelli, M. et al. (2020). *A tool for the real-time evaluation of ECG signal quality and
//!   activity: Application to submaximal treadmill test in horses*. Biomedical Signal Processing
//!   and Control, 56, 101666.
//! - Rahman, M. S. et al. (2022). *Robustness of electrocardiogram signal quality indices*.
//!   Journal of The Royal Society Interface, 19.

use anyhow::Result as AnyResult;
use core::fmt;
use log::{debug, info, warn};
use nalgebra::DMatrix;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::analysis::advice::{CsqiBand, HosBand};
use crate::analysis::stats::{
    corrcoef, heart_rate, kurtosis, mean, population_std, rr_intervals, skewness,
};
use crate::error::Result;
use crate::preprocessing::validation::{is_saturated, require_duration, require_signal};

/// Minimum segment duration accepted by [`ecg_sqi_level3`], in seconds.
pub const LEVEL3_MIN_SECONDS: usize = 5;
/// Tolerance handed to the peak corrector, in seconds.
pub const RPEAK_TOLERANCE_S: f64 = 0.05;
/// Template window before each R-peak, in seconds.
pub const TEMPLATE_BEFORE_S: f64 = 0.2;
/// Template window after each R-peak, in seconds.
pub const TEMPLATE_AFTER_S: f64 = 0.4;
/// Plausible heart-rate range in beats per minute (inclusive).
pub const HEART_RATE_RANGE_BPM: (f64, f64) = (40.0, 200.0);

/// Beat-level operations on an ECG segment provided by an external toolkit.
///
/// Implementations typically wrap a QRS detector (e.g. the Hamilton
/// segmenter), a local-maximum peak corrector and a fixed-window template
/// extractor.
///
/// # Example
///
/// ```
/// use anyhow::Result;
/// use nalgebra::DMatrix;
/// use sqi_algos::analysis::ecg::BeatToolkit;
///
/// struct KnownBeats(Vec<usize>);
///
/// impl BeatToolkit for KnownBeats {
///     fn detect_rpeaks(&self, _signal: &[f64], _sampling_rate: u32) -> Result<Vec<usize>> {
///         Ok(self.0.clone())
///     }
///     fn correct_rpeaks(&self, _signal: &[f64], rpeaks: &[usize], _sampling_rate: u32, _tol: f64) -> Result<Vec<usize>> {
///         Ok(rpeaks.to_vec())
///     }
///     fn extract_heartbeats(&self, _signal: &[f64], rpeaks: &[usize], _sampling_rate: u32, _before: f64, _after: f64) -> Result<DMatrix<f64>> {
///         Ok(DMatrix::zeros(rpeaks.len(), 0))
///     }
/// }
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait BeatToolkit {
    /// Detects R-peaks and returns their sample indices in ascending order.
    fn detect_rpeaks(&self, signal: &[f64], sampling_rate: u32) -> AnyResult<Vec<usize>>;

    /// Refines R-peak locations within `tol` seconds of the detected ones.
    /// May drop peaks, never adds any.
    fn correct_rpeaks(
        &self,
        signal: &[f64],
        rpeaks: &[usize],
        sampling_rate: u32,
        tol: f64,
    ) -> AnyResult<Vec<usize>>;

    /// Cuts a fixed window (`before`/`after` seconds around each peak) out of
    /// the signal. Returns one row per extracted beat.
    fn extract_heartbeats(
        &self,
        signal: &[f64],
        rpeaks: &[usize],
        sampling_rate: u32,
        before: f64,
        after: f64,
    ) -> AnyResult<DMatrix<f64>>;
}

/// Label produced by [`ecg_sqi_level3`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum QualityLevel {
    /// Unusable: saturated, too few beats or implausible heart rate.
    Low,
    /// Plausible heart rate, beats not consistent enough.
    Medium,
    /// Plausible heart rate and highly correlated beats.
    High,
}

impl QualityLevel {
    /// Numeric score of the label: 0.0, 0.5 or 1.0.
    pub fn score(&self) -> f64 {
        match self {
            QualityLevel::Low => 0.0,
            QualityLevel::Medium => 0.5,
            QualityLevel::High => 1.0,
        }
    }
}

impl From<QualityLevel> for f64 {
    fn from(level: QualityLevel) -> Self {
        level.score()
    }
}

impl fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityLevel::Low => f.write_str("LQ"),
            QualityLevel::Medium => f.write_str("MQ"),
            QualityLevel::High => f.write_str("HQ"),
        }
    }
}

/// Computes the three-level quality of an ECG segment (10 s recommended).
///
/// The cheap checks run first so degenerate segments never reach the
/// all-pairs template correlation:
///
/// 1. **Saturation**: with `bit != 0`, a peak-to-peak amplitude of at least
///    `2^bit - 1` means the ADC clipped and the segment is [`QualityLevel::Low`].
/// 2. **Beats**: R-peaks are detected and corrected (tolerance 0.05 s). Fewer
///    than two peaks is [`QualityLevel::Low`].
/// 3. **Heart rate**: every instantaneous rate must lie in 40..=200 bpm,
///    giving [`QualityLevel::Medium`], otherwise [`QualityLevel::Low`].
/// 4. **Templates**: beats are cut 0.2 s before to 0.4 s after each peak. If
///    the mean of their correlation matrix exceeds `threshold`, the segment is
///    [`QualityLevel::High`].
///
/// # Arguments
///
/// * `segment` - ECG samples.
/// * `sampling_rate` - Sampling frequency in Hz.
/// * `threshold` - Correlation threshold for the high-quality label (0.9 by default in dispatch).
/// * `bit` - ADC resolution in bits, `0` disables the saturation check. BITalino uses 10.
/// * `beats` - Peak detection, correction and template extraction.
///
/// # Errors
///
/// - [`QualityError::MissingInput`](crate::error::QualityError::MissingInput) for an empty segment.
/// - [`QualityError::InsufficientData`](crate::error::QualityError::InsufficientData) for a segment shorter than 5 s.
/// - [`QualityError::Collaborator`](crate::error::QualityError::Collaborator) if `beats` fails.
pub fn ecg_sqi_level3<B>(
    segment: &[f64],
    sampling_rate: u32,
    threshold: f64,
    bit: u32,
    beats: &B,
) -> Result<QualityLevel>
where
    B: BeatToolkit + ?Sized,
{
    require_signal(segment)?;
    if is_saturated(segment, bit) {
        debug!("Level3: segment saturates a {}-bit ADC", bit);
        return Ok(QualityLevel::Low);
    }
    require_duration(
        segment.len(),
        sampling_rate,
        LEVEL3_MIN_SECONDS,
        "Level3 needs a segment of at least 5s",
    )?;

    let detected = beats.detect_rpeaks(segment, sampling_rate)?;
    let rpeaks = beats.correct_rpeaks(segment, &detected, sampling_rate, RPEAK_TOLERANCE_S)?;
    if rpeaks.len() < 2 {
        debug!("Level3: {} corrected R-peaks, need at least 2", rpeaks.len());
        return Ok(QualityLevel::Low);
    }

    let hr = heart_rate(&rr_intervals(&rpeaks), sampling_rate);
    let (lower, upper) = HEART_RATE_RANGE_BPM;
    if !hr.iter().all(|&rate| rate >= lower && rate <= upper) {
        debug!("Level3: heart rate outside {}..={} bpm", lower, upper);
        return Ok(QualityLevel::Low);
    }

    let templates = beats.extract_heartbeats(
        segment,
        &rpeaks,
        sampling_rate,
        TEMPLATE_BEFORE_S,
        TEMPLATE_AFTER_S,
    )?;
    let mean_corr = corrcoef(&templates).mean();
    debug!(
        "Level3: mean template correlation {:.4} over {} beats",
        mean_corr,
        templates.nrows()
    );
    if mean_corr > threshold {
        Ok(QualityLevel::High)
    } else {
        Ok(QualityLevel::Medium)
    }
}

/// Calculates the coefficient of variation of RR intervals (cSQI).
///
/// `cSQI = std(RR) / mean(RR)` with the population standard deviation. Values
/// near 0 indicate a regular rhythm; the index has no upper bound.
///
/// # Arguments
///
/// * `rpeaks` - R-peak sample indices in ascending order.
/// * `verbose` - Log advisory commentary and the qualitative band.
///
/// Never fails. Fewer than two R-peaks or a zero mean interval leave the
/// index undefined and yield a non-finite value.
///
/// # Examples
///
/// ```
/// use sqi_algos::analysis::ecg::calc_csqi;
/// let rpeaks = [0, 250, 500, 750, 1000];
/// assert_eq!(calc_csqi(&rpeaks, false).unwrap(), 0.0);
/// ```
pub fn calc_csqi(rpeaks: &[usize], verbose: bool) -> Result<f64> {
    let rr = rr_intervals(rpeaks);
    let csqi = population_std(&rr) / mean(&rr);
    if rr.is_empty() {
        warn!("cSQI is undefined: fewer than two R-peaks");
    } else if !csqi.is_finite() {
        warn!("cSQI is undefined: mean RR interval is zero");
    }

    if verbose {
        info!("cSQI advice: the segment should be longer than 30s for optimal results");
        info!("cSQI is {:.2} -> {}", csqi, CsqiBand::from_score(csqi));
    }
    Ok(csqi)
}

/// Calculates the higher-order-statistics SQI (hosSQI).
///
/// `hosSQI = |skewness| * kurtosis / 5`, with Fisher (excess) kurtosis. Clean
/// ECG scores near or above 1; the index has no upper bound. The signal should
/// be filtered and at least 5 s long.
///
/// # Errors
///
/// Returns [`QualityError::MissingInput`](crate::error::QualityError::MissingInput)
/// for an empty signal. A constant signal yields `NaN`.
///
/// # Examples
///
/// ```
/// use sqi_algos::analysis::ecg::calc_hos_sqi;
/// let symmetric = [-2.0, -1.0, 0.0, 1.0, 2.0];
/// assert_eq!(calc_hos_sqi(&symmetric, false).unwrap(), 0.0);
/// ```
pub fn calc_hos_sqi(signal: &[f64], verbose: bool) -> Result<f64> {
    require_signal(signal)?;
    let k_sqi = kurtosis(signal, true);
    let s_sqi = skewness(signal);
    debug!("hosSQI: kurtosis {}, skewness {}", k_sqi, s_sqi);

    let hos_sqi = s_sqi.abs() * k_sqi / 5.0;
    if hos_sqi.is_nan() {
        warn!("hosSQI is undefined: signal has zero variance");
    }

    if verbose {
        info!("hosSQI advice: the signal must be at least 5s long and should be filtered");
        info!("hosSQI is a measure without an upper limit");
        info!("hosSQI is {:.2} -> {}", hos_sqi, HosBand::from_score(hos_sqi));
    }
    Ok(hos_sqi)
}
