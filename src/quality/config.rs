//! Per-call parameters for the ECG dispatch.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How fSQI relates the two spectral bands.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum FsqiMode {
    /// Fixed numerator band.
    #[default]
    Simple,
    /// Numerator band centred on the dominant heart rate.
    Bpm,
}

/// Parameters forwarded to the external fSQI implementation.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FsqiConfig {
    /// Welch segment length in samples.
    pub nseg: usize,
    /// Numerator band in Hz.
    pub num_spectrum: [f64; 2],
    /// Denominator band in Hz, `None` for the full spectrum.
    pub dem_spectrum: Option<[f64; 2]>,
    /// How the numerator band is placed, see [`FsqiMode`].
    pub mode: FsqiMode,
}

impl Default for FsqiConfig {
    fn default() -> Self {
        FsqiConfig {
            nseg: 1024,
            num_spectrum: [5.0, 20.0],
            dem_spectrum: None,
            mode: FsqiMode::Simple,
        }
    }
}

/// Method configuration for [`quality_ecg`](crate::quality::quality_ecg).
///
/// Each method only reads the fields it needs; the rest are ignored.
///
/// # Example
///
/// ```
/// use sqi_algos::quality::EcgQualityConfig;
///
/// let config = EcgQualityConfig {
///     bit: 10,
///     verbose: false,
///     ..Default::default()
/// };
/// assert_eq!(config.threshold, 0.9);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct EcgQualityConfig {
    /// Level3: mean template correlation required for high quality.
    pub threshold: f64,
    /// Level3: ADC resolution in bits, `0` disables the saturation check.
    pub bit: u32,
    /// kSQI: Fisher (excess) kurtosis instead of Pearson.
    pub fisher: bool,
    /// pSQI: frequency threshold.
    pub f_thr: f64,
    /// fSQI parameters.
    pub fsqi: FsqiConfig,
    /// Emit advisory commentary through the `log` facade.
    pub verbose: bool,
}

impl Default for EcgQualityConfig {
    fn default() -> Self {
        EcgQualityConfig {
            threshold: 0.9,
            bit: 0,
            fisher: true,
            f_thr: 0.01,
            fsqi: FsqiConfig::default(),
            verbose: true,
        }
    }
}
