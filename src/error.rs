//! Error type shared by the quality algorithms and the dispatch layer.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QualityError>;

/// Errors raised while scoring a segment.
///
/// Numeric degeneracies (a zero denominator in a ratio) are not errors: they
/// surface as `NaN` in the returned score.
#[derive(Debug, Error)]
pub enum QualityError {
    /// The segment or the sampling rate was not provided.
    #[error("missing input: {0}")]
    MissingInput(&'static str),

    /// The segment (or the peak set derived from it) is too short for the method.
    #[error("insufficient data: {reason} (required {required}, got {actual})")]
    InsufficientData {
        reason: &'static str,
        required: usize,
        actual: usize,
    },

    /// A requested method name is not part of the allow-list for the signal type.
    #[error("unknown method `{method}`, expected one of: {available}")]
    UnknownMethod { method: String, available: String },

    /// A peak detector, template extractor or external index failed.
    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}
