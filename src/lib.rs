//! Signal Quality Indices (SQI) for ECG and EDA segments
//!
//! This crate scores fixed-length biosignal segments by how usable they are for
//! downstream analysis such as heart-rate estimation. It provides the ECG indices
//! `Level3`, `cSQI` and `hosSQI`, the EDA index of Böttcher et al., and a dispatch
//! layer that runs a list of methods over one segment.
//!
//! Every function is a pure evaluation of one segment: the input is never
//! modified and no state is kept between calls.

pub mod analysis;
pub mod error;
pub mod preprocessing;
pub mod quality;

pub use error::{QualityError, Result};
pub use quality::{quality_ecg, quality_eda, EcgQualityConfig, QualityResult};
