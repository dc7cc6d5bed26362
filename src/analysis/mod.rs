/// This module contains the signal quality indices and their building blocks.
///
/// The available submodules are:
///
/// - `ecg`: ECG indices (`Level3`, `cSQI`, `hosSQI`) and the beat toolkit interface.
/// - `eda`: The Böttcher EDA index.
/// - `stats`: Moments, RR intervals and correlation helpers.
/// - `advice`: Qualitative bands used for advisory output.
pub mod advice;
pub mod ecg;
pub mod eda;
pub mod stats;
