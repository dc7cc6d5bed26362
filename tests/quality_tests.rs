use anyhow::{anyhow, Result};
use nalgebra::DMatrix;
use rand::{Rng, SeedableRng};
use sqi_algos::analysis::ecg::BeatToolkit;
use sqi_algos::analysis::stats::kurtosis;
use sqi_algos::quality::{
    quality_ecg, quality_eda, EcgQualityConfig, ExternalIndices, FsqiConfig,
};
use sqi_algos::QualityError;

const FS: u32 = 250;

/// Peak picker for clean synthetic ECG: local maxima above a fixed level,
/// separated by a refractory period.
struct ThresholdBeats {
    level: f64,
    refractory_s: f64,
}

impl Default for ThresholdBeats {
    fn default() -> Self {
        ThresholdBeats {
            level: 0.6,
            refractory_s: 0.2,
        }
    }
}

impl BeatToolkit for ThresholdBeats {
    fn detect_rpeaks(&self, signal: &[f64], sampling_rate: u32) -> Result<Vec<usize>> {
        let refractory = (self.refractory_s * sampling_rate as f64) as usize;
        let mut rpeaks: Vec<usize> = Vec::new();
        for i in 1..signal.len().saturating_sub(1) {
            let is_peak = signal[i] > self.level
                && signal[i] >= signal[i - 1]
                && signal[i] >= signal[i + 1];
            let clear = rpeaks.last().map_or(true, |&last| i - last > refractory);
            if is_peak && clear {
                rpeaks.push(i);
            }
        }
        Ok(rpeaks)
    }

    fn correct_rpeaks(
        &self,
        signal: &[f64],
        rpeaks: &[usize],
        sampling_rate: u32,
        tol: f64,
    ) -> Result<Vec<usize>> {
        let tol = (tol * sampling_rate as f64) as usize;
        let mut corrected: Vec<usize> = rpeaks
            .iter()
            .map(|&peak| {
                let start = peak.saturating_sub(tol);
                let end = (peak + tol + 1).min(signal.len());
                (start..end)
                    .max_by(|&a, &b| signal[a].total_cmp(&signal[b]))
                    .unwrap_or(peak)
            })
            .collect();
        corrected.dedup();
        Ok(corrected)
    }

    fn extract_heartbeats(
        &self,
        signal: &[f64],
        rpeaks: &[usize],
        sampling_rate: u32,
        before: f64,
        after: f64,
    ) -> Result<DMatrix<f64>> {
        let before = (before * sampling_rate as f64) as usize;
        let after = (after * sampling_rate as f64) as usize;
        let beats: Vec<&[f64]> = rpeaks
            .iter()
            .filter(|&&peak| peak >= before && peak + after <= signal.len())
            .map(|&peak| &signal[peak - before..peak + after])
            .collect();
        Ok(DMatrix::from_fn(beats.len(), before + after, |i, j| beats[i][j]))
    }
}

/// kSQI from the crate's own kurtosis, spectral indices unavailable.
struct MomentIndices;

impl ExternalIndices for MomentIndices {
    fn p_sqi(&self, _signal: &[f64], _f_thr: f64) -> Result<f64> {
        Err(anyhow!("pSQI is not available"))
    }

    fn k_sqi(&self, signal: &[f64], fisher: bool) -> Result<f64> {
        Ok(kurtosis(signal, fisher))
    }

    fn f_sqi(&self, _signal: &[f64], _sampling_rate: u32, _config: &FsqiConfig) -> Result<f64> {
        Err(anyhow!("fSQI is not available"))
    }
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn gaussian(t: f64, centre: f64, width: f64) -> f64 {
    (-((t - centre) / width).powi(2) / 2.0).exp()
}

/// Synthetic ECG with a QRS spike every `rr` samples and a T wave whose sign
/// alternates beat to beat when `alternating` is set.
fn synthetic_ecg(seconds: usize, rr: usize, alternating: bool, seed: u64) -> Vec<f64> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let len = seconds * FS as usize;
    let mut signal: Vec<f64> = (0..len).map(|_| rng.gen_range(-0.01..0.01)).collect();
    let t_offset = 0.25 * FS as f64;
    for (beat, peak) in (rr / 2..len).step_by(rr).enumerate() {
        let t_sign = if alternating && beat % 2 == 1 { -1.0 } else { 1.0 };
        for (i, sample) in signal.iter_mut().enumerate() {
            let t = i as f64;
            *sample += gaussian(t, peak as f64, 2.0);
            *sample += 0.4 * t_sign * gaussian(t, peak as f64 + t_offset, 15.0);
        }
    }
    signal
}

fn quiet_config() -> EcgQualityConfig {
    EcgQualityConfig {
        verbose: false,
        ..Default::default()
    }
}

#[test]
fn test_level3_clean_ecg_is_high_quality() {
    init_logger();
    // 214 samples at 250 Hz -> ~70 bpm
    let ecg = synthetic_ecg(10, 214, false, 1);
    let result = quality_ecg(
        &ecg,
        &["Level3"],
        Some(FS),
        &EcgQualityConfig::default(),
        &ThresholdBeats::default(),
        &MomentIndices,
    )
    .expect("Level3 should succeed on a clean segment");
    assert_eq!(result.get("Level3"), Some(1.0));
}

#[test]
fn test_level3_inconsistent_beats_are_medium_quality() {
    init_logger();
    let ecg = synthetic_ecg(10, 214, true, 2);
    let result = quality_ecg(
        &ecg,
        &["Level3"],
        Some(FS),
        &quiet_config(),
        &ThresholdBeats::default(),
        &MomentIndices,
    )
    .expect("Level3 should succeed on alternating beats");
    assert_eq!(result.get("Level3"), Some(0.5));
}

#[test]
fn test_level3_tachycardic_rate_is_low_quality() {
    // 50 samples at 250 Hz -> 300 bpm
    let ecg = synthetic_ecg(10, 50, false, 3);
    let result = quality_ecg(
        &ecg,
        &["Level3"],
        Some(FS),
        &quiet_config(),
        &ThresholdBeats {
            level: 0.6,
            refractory_s: 0.1,
        },
        &MomentIndices,
    )
    .expect("Level3 should succeed on a fast rhythm");
    assert_eq!(result.get("Level3"), Some(0.0));
}

#[test]
fn test_level3_saturated_segment() {
    let mut ecg: Vec<f64> = synthetic_ecg(10, 214, false, 4)
        .iter()
        .map(|v| v + 500.0)
        .collect();
    ecg[10] = 0.0;
    ecg[20] = 1023.0;
    let config = EcgQualityConfig {
        bit: 10,
        verbose: false,
        ..Default::default()
    };
    let result = quality_ecg(
        &ecg,
        &["Level3"],
        Some(FS),
        &config,
        &ThresholdBeats::default(),
        &MomentIndices,
    )
    .expect("a saturated segment is scored, not rejected");
    assert_eq!(result.get("Level3"), Some(0.0));
}

#[test]
fn test_local_ecg_indices() {
    init_logger();
    let ecg = synthetic_ecg(10, 214, false, 5);
    let result = quality_ecg(
        &ecg,
        &["cSQI", "hosSQI", "kSQI"],
        Some(FS),
        &EcgQualityConfig::default(),
        &ThresholdBeats::default(),
        &MomentIndices,
    )
    .expect("local indices should succeed");
    assert_eq!(result.names(), vec!["cSQI", "hosSQI", "kSQI"]);
    let csqi = result.get("cSQI").unwrap();
    assert!(csqi.abs() < 1e-12, "regular rhythm should give cSQI 0, got {}", csqi);
    let hos_sqi = result.get("hosSQI").unwrap();
    assert!(hos_sqi > 0.8, "clean ECG should be optimal, got {}", hos_sqi);
    assert!(result.get("kSQI").unwrap() > 0.0);
}

#[test]
fn test_dispatch_preserves_requested_order() {
    let ecg = synthetic_ecg(10, 214, false, 6);
    let result = quality_ecg(
        &ecg,
        &["kSQI", "Level3", "kSQI"],
        Some(FS),
        &quiet_config(),
        &ThresholdBeats::default(),
        &MomentIndices,
    )
    .unwrap();
    assert_eq!(result.len(), 3);
    assert_eq!(result.names(), vec!["kSQI", "Level3", "kSQI"]);
    let values = result.values();
    assert_eq!(values[0].to_bits(), values[2].to_bits());
}

#[test]
fn test_failing_method_aborts_whole_call() {
    let ecg = synthetic_ecg(10, 214, false, 7);
    let result = quality_ecg(
        &ecg,
        &["kSQI", "Level3", "pSQI", "hosSQI"],
        Some(FS),
        &quiet_config(),
        &ThresholdBeats::default(),
        &MomentIndices,
    );
    match result {
        Err(QualityError::Collaborator(err)) => {
            assert!(err.to_string().contains("pSQI"));
        }
        other => panic!("expected a collaborator error, got {:?}", other),
    }
}

#[test]
fn test_unknown_method_rejected() {
    let ecg = synthetic_ecg(10, 214, false, 8);
    let ecg_result = quality_ecg(
        &ecg,
        &["notamethod"],
        Some(FS),
        &quiet_config(),
        &ThresholdBeats::default(),
        &MomentIndices,
    );
    assert!(matches!(
        ecg_result,
        Err(QualityError::UnknownMethod { .. })
    ));

    let eda = vec![0.06; 60];
    let eda_result = quality_eda(&eda, &["notamethod"], Some(1), false);
    assert!(matches!(
        eda_result,
        Err(QualityError::UnknownMethod { .. })
    ));
}

#[test]
fn test_ecg_is_deterministic() {
    let ecg = synthetic_ecg(10, 214, true, 9);
    let methods = ["Level3", "cSQI", "hosSQI", "kSQI"];
    let run = || {
        quality_ecg(
            &ecg,
            &methods,
            Some(FS),
            &quiet_config(),
            &ThresholdBeats::default(),
            &MomentIndices,
        )
        .unwrap()
    };
    let first: Vec<u64> = run().values().iter().map(|v| v.to_bits()).collect();
    let second: Vec<u64> = run().values().iter().map(|v| v.to_bits()).collect();
    assert_eq!(first, second);
}

#[test]
fn test_concurrent_calls_agree() {
    let ecg = synthetic_ecg(10, 214, false, 10);
    let expected = quality_ecg(
        &ecg,
        &["Level3", "hosSQI"],
        Some(FS),
        &quiet_config(),
        &ThresholdBeats::default(),
        &MomentIndices,
    )
    .unwrap();
    let ecg = ecg.as_slice();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(move |_| {
                scope.spawn(move || {
                    quality_ecg(
                        ecg,
                        &["Level3", "hosSQI"],
                        Some(FS),
                        &quiet_config(),
                        &ThresholdBeats::default(),
                        &MomentIndices,
                    )
                    .unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

/// Skin conductance around 2 µS with slow drift. Windows listed in
/// `artifacts` contain a sharp drop.
fn synthetic_eda(seconds: usize, sampling_rate: u32, artifacts: &[usize]) -> Vec<f64> {
    let window = 2 * sampling_rate as usize;
    let mut eda: Vec<f64> = (0..seconds * sampling_rate as usize)
        .map(|i| 2.0 + 0.05 * (i as f64 / 40.0).sin())
        .collect();
    for &w in artifacts {
        eda[w * window + 1] = 0.2;
    }
    eda
}

#[test]
fn test_eda_clean_segment() {
    init_logger();
    let eda = synthetic_eda(60, 4, &[]);
    let result = quality_eda(&eda, &["bottcher"], Some(4), true).unwrap();
    assert_eq!(result.get("bottcher"), Some(1.0));
}

#[test]
fn test_eda_artifact_fraction() {
    let eda = synthetic_eda(60, 4, &[0, 11, 29]);
    let result = quality_eda(&eda, &["bottcher"], Some(4), false).unwrap();
    let score = result.get("bottcher").unwrap();
    assert!((score - 0.9).abs() < 1e-12, "27 of 30 windows usable, got {}", score);
}

#[test]
fn test_eda_short_segment_is_scored() {
    // 10s is below the 60s design length: advisory only
    let eda = synthetic_eda(10, 4, &[]);
    let result = quality_eda(&eda, &["bottcher"], Some(4), true).unwrap();
    assert_eq!(result.get("bottcher"), Some(1.0));
}

#[test]
fn test_eda_all_zero_segment() {
    let eda = vec![0.0; 60];
    let result = quality_eda(&eda, &["bottcher"], Some(1), false).unwrap();
    assert!(result.get("bottcher").unwrap().is_nan());
}
