//! Dispatch layer: runs a requested list of quality methods over one segment.
//!
//! [`quality_ecg`] and [`quality_eda`] validate the segment, parse every
//! requested method name, then score the methods in request order. The first
//! failure aborts the call; no partial result is returned.
//!
//! # Example
//!
//! ```
//! use sqi_algos::quality::quality_eda;
//!
//! let segment = vec![0.06; 120];
//! let result = quality_eda(&segment, &["bottcher"], Some(2), false).unwrap();
//! assert_eq!(result.get("bottcher"), Some(1.0));
//! ```

pub mod config;
pub mod methods;
pub mod result;

pub use config::{EcgQualityConfig, FsqiConfig, FsqiMode};
pub use methods::{EcgMethod, EdaMethod};
pub use result::{QualityResult, QualityScore};

use anyhow::Result as AnyResult;
use log::debug;

use crate::analysis::ecg::{calc_csqi, calc_hos_sqi, ecg_sqi_level3, BeatToolkit};
use crate::analysis::eda::{eda_sqi_bottcher, WINDOW_SECONDS};
use crate::error::{QualityError, Result};
use crate::preprocessing::validation::{require_duration, require_sampling_rate, require_signal};
use methods::parse_methods;

/// Minimum ECG segment duration accepted by [`quality_ecg`], in seconds.
pub const ECG_MIN_SECONDS: usize = 5;

/// Spectral and statistical ECG indices computed outside this crate.
#[cfg_attr(test, mockall::automock)]
pub trait ExternalIndices {
    /// Power spectrum ratio index.
    fn p_sqi(&self, signal: &[f64], f_thr: f64) -> AnyResult<f64>;

    /// Kurtosis index, Fisher or Pearson convention.
    fn k_sqi(&self, signal: &[f64], fisher: bool) -> AnyResult<f64>;

    /// Relative power of the numerator band over the denominator band.
    fn f_sqi(&self, signal: &[f64], sampling_rate: u32, config: &FsqiConfig) -> AnyResult<f64>;
}

/// Computes the requested quality indices for one ECG segment.
///
/// # Arguments
///
/// * `segment` - ECG samples, at least 5 s long.
/// * `methods` - Method names out of `Level3`, `pSQI`, `kSQI`, `fSQI`, `cSQI`,
///   `hosSQI`. Order and repetitions are kept in the result.
/// * `sampling_rate` - Sampling frequency in Hz.
/// * `config` - Method parameters, see [`EcgQualityConfig`].
/// * `beats` - R-peak detection, correction and template extraction, used by
///   `Level3` and `cSQI`.
/// * `indices` - External implementations of `pSQI`, `kSQI` and `fSQI`.
///
/// # Errors
///
/// - [`QualityError::MissingInput`] for an empty segment or absent sampling rate.
/// - [`QualityError::UnknownMethod`] for a name outside the allow-list, before any
///   method runs.
/// - [`QualityError::InsufficientData`] for a segment shorter than 5 s.
/// - [`QualityError::Collaborator`] if `beats` or `indices` fail.
pub fn quality_ecg<M, B, I>(
    segment: &[f64],
    methods: &[M],
    sampling_rate: Option<u32>,
    config: &EcgQualityConfig,
    beats: &B,
    indices: &I,
) -> Result<QualityResult>
where
    M: AsRef<str>,
    B: BeatToolkit + ?Sized,
    I: ExternalIndices + ?Sized,
{
    require_signal(segment)?;
    let sampling_rate = require_sampling_rate(sampling_rate)?;
    let methods: Vec<EcgMethod> = parse_methods(methods)?;
    require_duration(
        segment.len(),
        sampling_rate,
        ECG_MIN_SECONDS,
        "ECG segment must be at least 5s long",
    )?;

    let mut result = QualityResult::with_capacity(methods.len());
    for method in methods {
        let quality = match method {
            EcgMethod::Level3 => {
                ecg_sqi_level3(segment, sampling_rate, config.threshold, config.bit, beats)?
                    .score()
            }
            EcgMethod::PSqi => indices.p_sqi(segment, config.f_thr)?,
            EcgMethod::KSqi => indices.k_sqi(segment, config.fisher)?,
            EcgMethod::FSqi => indices.f_sqi(segment, sampling_rate, &config.fsqi)?,
            EcgMethod::CSqi => {
                let rpeaks = beats.detect_rpeaks(segment, sampling_rate)?;
                calc_csqi(&rpeaks, config.verbose)?
            }
            EcgMethod::HosSqi => calc_hos_sqi(segment, config.verbose)?,
        };
        debug!("{}: {}", method, quality);
        result.push(method.as_str(), quality);
    }
    Ok(result)
}

/// Computes the requested quality indices for one EDA segment.
///
/// # Arguments
///
/// * `x` - EDA samples, longer than one 2 s window.
/// * `methods` - Method names; currently only `bottcher`.
/// * `sampling_rate` - Sampling frequency in Hz.
/// * `verbose` - Emit advisory commentary through the `log` facade.
///
/// # Errors
///
/// - [`QualityError::MissingInput`] for an empty segment or absent sampling rate.
/// - [`QualityError::UnknownMethod`] for a name outside the allow-list.
/// - [`QualityError::InsufficientData`] for a segment of at most 2 s, or one that
///   is not a whole number of 2 s windows.
pub fn quality_eda<M>(
    x: &[f64],
    methods: &[M],
    sampling_rate: Option<u32>,
    verbose: bool,
) -> Result<QualityResult>
where
    M: AsRef<str>,
{
    require_signal(x)?;
    let sampling_rate = require_sampling_rate(sampling_rate)?;
    let methods: Vec<EdaMethod> = parse_methods(methods)?;
    let window = WINDOW_SECONDS * sampling_rate as usize;
    if x.len() <= window {
        return Err(QualityError::InsufficientData {
            reason: "EDA segment must be longer than 2s",
            required: window + 1,
            actual: x.len(),
        });
    }

    let mut result = QualityResult::with_capacity(methods.len());
    for method in methods {
        let quality = match method {
            EdaMethod::Bottcher => eda_sqi_bottcher(x, sampling_rate, verbose)?,
        };
        debug!("{}: {}", method, quality);
        result.push(method.as_str(), quality);
    }
    Ok(result)
}
