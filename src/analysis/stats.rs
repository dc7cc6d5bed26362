//! Descriptive statistics used by the quality indices.
//!
//! Moment-based estimators are the biased (population) ones, so a normal
//! sample has a Fisher kurtosis near 0 and a Pearson kurtosis near 3.
//! Degenerate inputs (zero variance) yield `NaN` instead of an error.

use nalgebra::{DMatrix, DVectorView};

/// Relative resolution below which the second central moment counts as zero.
const MOMENT_RESOLUTION: f64 = 1e-15;

/// Converts a sequence of R-peak sample indices into RR intervals (in samples).
///
/// # Examples
///
/// ```
/// use sqi_algos::analysis::stats::rr_intervals;
/// assert_eq!(rr_intervals(&[10, 110, 215]), vec![100.0, 105.0]);
/// ```
pub fn rr_intervals(rpeaks: &[usize]) -> Vec<f64> {
    rpeaks
        .windows(2)
        .map(|w| w[1] as f64 - w[0] as f64)
        .collect()
}

/// Instantaneous heart rate in beats per minute for each RR interval.
///
/// A zero interval maps to `inf`.
pub fn heart_rate(rr: &[f64], sampling_rate: u32) -> Vec<f64> {
    let fs = f64::from(sampling_rate);
    rr.iter().map(|&interval| fs * (60.0 / interval)).collect()
}

/// Population standard deviation (`ddof = 0`). `NaN` for empty input.
pub fn population_std(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    let (_, m2, _, _) = central_moments(data);
    m2.sqrt()
}

/// Arithmetic mean. `NaN` for empty input.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        f64::NAN
    } else {
        DVectorView::from(data).mean()
    }
}

/// Sample skewness `m3 / m2^1.5`.
///
/// Returns `NaN` for empty or constant data.
pub fn skewness(data: &[f64]) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    let (mean, m2, m3, _) = central_moments(data);
    if is_degenerate(mean, m2) {
        f64::NAN
    } else {
        m3 / m2.powf(1.5)
    }
}

/// Sample kurtosis `m4 / m2^2`.
///
/// With `fisher` set, 3 is subtracted so that a normal distribution scores 0
/// (excess kurtosis); otherwise the Pearson value is returned.
/// Returns `NaN` for empty or constant data.
pub fn kurtosis(data: &[f64], fisher: bool) -> f64 {
    if data.is_empty() {
        return f64::NAN;
    }
    let (mean, m2, _, m4) = central_moments(data);
    if is_degenerate(mean, m2) {
        return f64::NAN;
    }
    let pearson = m4 / (m2 * m2);
    if fisher {
        pearson - 3.0
    } else {
        pearson
    }
}

/// Pearson correlation matrix between the rows of `rows`.
///
/// Entry `(i, j)` is the correlation of row `i` with row `j`, clipped to
/// `[-1, 1]`. Rows with zero variance produce `NaN` entries.
pub fn corrcoef(rows: &DMatrix<f64>) -> DMatrix<f64> {
    let mut centered = rows.clone();
    for mut row in centered.row_iter_mut() {
        let row_mean = row.mean();
        row.add_scalar_mut(-row_mean);
    }
    // the 1/(n-1) normalisation cancels in the ratio below
    let cov = &centered * centered.transpose();
    let sd = cov.diagonal().map(f64::sqrt);
    DMatrix::from_fn(cov.nrows(), cov.ncols(), |i, j| {
        (cov[(i, j)] / (sd[i] * sd[j])).clamp(-1.0, 1.0)
    })
}

fn is_degenerate(mean: f64, m2: f64) -> bool {
    m2 <= (MOMENT_RESOLUTION * mean).powi(2)
}

/// Returns `(mean, m2, m3, m4)` for non-empty data.
fn central_moments(data: &[f64]) -> (f64, f64, f64, f64) {
    let data = DVectorView::from(data);
    let n = data.len() as f64;
    let mean = data.mean();
    let centered = data.add_scalar(-mean);
    let m2 = centered.dot(&centered) / n;
    let m3 = centered.iter().map(|&d| d * d * d).sum::<f64>() / n;
    let m4 = centered.iter().map(|&d| (d * d) * (d * d)).sum::<f64>() / n;
    (mean, m2, m3, m4)
}
