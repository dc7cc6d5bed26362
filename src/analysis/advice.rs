//! Qualitative bands for the unbounded indices.
//!
//! The bands only feed advisory log output. They never change a returned
//! score and can be ignored entirely by non-interactive callers.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Band of a cSQI value (coefficient of variation of RR intervals).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CsqiBand {
    /// cSQI < 0.45
    Optimal,
    /// 0.45 <= cSQI <= 0.64
    Suspicious,
    /// cSQI > 0.64, or undefined
    Unqualified,
}

impl CsqiBand {
    pub fn from_score(csqi: f64) -> Self {
        if csqi < 0.45 {
            CsqiBand::Optimal
        } else if (0.45..=0.64).contains(&csqi) {
            CsqiBand::Suspicious
        } else {
            CsqiBand::Unqualified
        }
    }
}

impl fmt::Display for CsqiBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CsqiBand::Optimal => "Optimal",
            CsqiBand::Suspicious => "Suspicious",
            CsqiBand::Unqualified => "Unqualified",
        };
        f.write_str(label)
    }
}

/// Band of a hosSQI value (higher-order statistics).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum HosBand {
    /// hosSQI > 0.8
    Optimal,
    /// 0.5 < hosSQI <= 0.8
    Acceptable,
    /// hosSQI <= 0.5, or undefined
    Unacceptable,
}

impl HosBand {
    pub fn from_score(hos_sqi: f64) -> Self {
        if hos_sqi > 0.8 {
            HosBand::Optimal
        } else if hos_sqi > 0.5 {
            HosBand::Acceptable
        } else {
            HosBand::Unacceptable
        }
    }
}

impl fmt::Display for HosBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HosBand::Optimal => "Optimal",
            HosBand::Acceptable => "Acceptable",
            HosBand::Unacceptable => "Unacceptable",
        };
        f.write_str(label)
    }
}
