//! Method identifiers accepted by the dispatch functions.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::QualityError;

/// ECG quality methods accepted by [`quality_ecg`](crate::quality::quality_ecg).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
pub enum EcgMethod {
    /// Three-level heuristic (0.0 / 0.5 / 1.0).
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "Level3"))]
    Level3,
    /// Spectral power ratio index (external).
    #[cfg_attr(feature = "serde", serde(rename = "pSQI"))]
    PSqi,
    /// Kurtosis index (external).
    #[cfg_attr(feature = "serde", serde(rename = "kSQI"))]
    KSqi,
    /// Relative spectral band index (external).
    #[cfg_attr(feature = "serde", serde(rename = "fSQI"))]
    FSqi,
    /// Coefficient of variation of RR intervals.
    #[cfg_attr(feature = "serde", serde(rename = "cSQI"))]
    CSqi,
    /// Higher-order statistics index.
    #[cfg_attr(feature = "serde", serde(rename = "hosSQI"))]
    HosSqi,
}

impl EcgMethod {
    /// Every ECG method, in allow-list order.
    pub const ALL: [EcgMethod; 6] = [
        EcgMethod::Level3,
        EcgMethod::PSqi,
        EcgMethod::KSqi,
        EcgMethod::FSqi,
        EcgMethod::CSqi,
        EcgMethod::HosSqi,
    ];

    /// Name accepted by [`quality_ecg`](super::quality_ecg) and used as the result key.
    pub fn as_str(&self) -> &'static str {
        match self {
            EcgMethod::Level3 => "Level3",
            EcgMethod::PSqi => "pSQI",
            EcgMethod::KSqi => "kSQI",
            EcgMethod::FSqi => "fSQI",
            EcgMethod::CSqi => "cSQI",
            EcgMethod::HosSqi => "hosSQI",
        }
    }
}

impl fmt::Display for EcgMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EcgMethod {
    type Err = QualityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EcgMethod::ALL
            .iter()
            .find(|method| method.as_str() == s)
            .copied()
            .ok_or_else(|| unknown_method(s, EcgMethod::ALL.iter().map(EcgMethod::as_str)))
    }
}

/// EDA quality methods accepted by [`quality_eda`](crate::quality::quality_eda).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
pub enum EdaMethod {
    /// Böttcher windowed amplitude-change score.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "bottcher"))]
    Bottcher,
}

impl EdaMethod {
    /// Every EDA method, in allow-list order.
    pub const ALL: [EdaMethod; 1] = [EdaMethod::Bottcher];

    /// Name accepted by [`quality_eda`](super::quality_eda) and used as the result key.
    pub fn as_str(&self) -> &'static str {
        match self {
            EdaMethod::Bottcher => "bottcher",
        }
    }
}

impl fmt::Display for EdaMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdaMethod {
    type Err = QualityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EdaMethod::ALL
            .iter()
            .find(|method| method.as_str() == s)
            .copied()
            .ok_or_else(|| unknown_method(s, EdaMethod::ALL.iter().map(EdaMethod::as_str)))
    }
}

/// Parses every requested name, failing on the first one outside the allow-list.
pub(crate) fn parse_methods<T, M>(methods: &[M]) -> Result<Vec<T>, QualityError>
where
    T: FromStr<Err = QualityError>,
    M: AsRef<str>,
{
    methods.iter().map(|name| name.as_ref().parse()).collect()
}

fn unknown_method<'a>(name: &str, available: impl Iterator<Item = &'a str>) -> QualityError {
    QualityError::UnknownMethod {
        method: name.to_string(),
        available: available.collect::<Vec<_>>().join(", "),
    }
}
