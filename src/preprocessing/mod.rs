//! This module contains checks applied to a segment before it is scored.
//!
//! The `validation` submodule rejects absent or too short segments and detects
//! ADC saturation.
pub mod validation;
