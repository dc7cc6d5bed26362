//! Ordered, named collection of quality scores.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One computed score and the method that produced it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct QualityScore {
    /// Method name as requested.
    pub method: String,
    /// Score, `NaN` when the index is undefined for the segment.
    pub value: f64,
}

/// Scores in the order the methods were requested. Repeated methods appear
/// once per request.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QualityResult {
    scores: Vec<QualityScore>,
}

impl QualityResult {
    /// Empty result with room for `capacity` scores.
    pub fn with_capacity(capacity: usize) -> Self {
        QualityResult {
            scores: Vec::with_capacity(capacity),
        }
    }

    /// Appends a score after the existing ones.
    pub fn push(&mut self, method: impl Into<String>, value: f64) {
        self.scores.push(QualityScore {
            method: method.into(),
            value,
        });
    }

    /// Value of the first entry produced by `method`.
    pub fn get(&self, method: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|score| score.method == method)
            .map(|score| score.value)
    }

    /// Method names in request order, duplicates included.
    pub fn names(&self) -> Vec<&str> {
        self.scores.iter().map(|score| score.method.as_str()).collect()
    }

    /// Score values in request order.
    pub fn values(&self) -> Vec<f64> {
        self.scores.iter().map(|score| score.value).collect()
    }

    /// Iterates over the scores in request order.
    pub fn iter(&self) -> std::slice::Iter<'_, QualityScore> {
        self.scores.iter()
    }

    /// Number of scores.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// `true` if no score has been recorded.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl IntoIterator for QualityResult {
    type Item = QualityScore;
    type IntoIter = std::vec::IntoIter<QualityScore>;

    fn into_iter(self) -> Self::IntoIter {
        self.scores.into_iter()
    }
}

impl<'a> IntoIterator for &'a QualityResult {
    type Item = &'a QualityScore;
    type IntoIter = std::slice::Iter<'a, QualityScore>;

    fn into_iter(self) -> Self::IntoIter {
        self.scores.iter()
    }
}
