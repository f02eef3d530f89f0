//! Error taxonomy.
//!
//! Every fallible operation returns one of the error types below. Input
//! problems are split by kind ([`ValidationError`], [`ShapeError`],
//! [`ConfigurationError`]) and folded into [`DecisionError`] by the
//! decision-maker, which adds the failures that can only arise while ranking.

use thiserror::Error;

/// A value that lies outside its legal domain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("criteria array only accepts '{max}' or '{min}' values, found {found:?}")]
    InvalidCriteria { found: Vec<i64>, min: i64, max: i64 },

    #[error("matrix value at ({row}, {col}) must be finite, got {value}")]
    NonFiniteValue { row: usize, col: usize, value: f64 },

    #[error("weight at index {index} must be finite and non-negative, got {value}")]
    InvalidWeight { index: usize, value: f64 },

    #[error("at least one weight must be non-zero, got {weights:?}")]
    ZeroWeights { weights: Vec<f64> },

    #[error("{what} is not finite for alternative {alternative}")]
    NumericOverflow {
        what: &'static str,
        alternative: usize,
    },
}

/// Inputs whose dimensions do not line up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("decision matrix must have at least one row and one column")]
    Empty,

    #[error("row {row} has {actual} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("{what} has length {actual}, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl ShapeError {
    /// Creates a length mismatch error.
    pub fn length_mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        ShapeError::LengthMismatch {
            what,
            expected,
            actual,
        }
    }
}

/// Invalid decision-maker configuration, detected at construction time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("unknown normalization '{name}', expected one of: {known}")]
    UnknownNormalization { name: String, known: String },

    #[error("side must be 'gt' or 'lt', found '{0}'")]
    UnknownSide(String),

    #[error("epsilon must be finite and non-negative, got {0}")]
    InvalidEpsilon(f64),
}

/// Errors returned by [`DecisionMaker::solve`](crate::dmaker::DecisionMaker::solve).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecisionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Both ideal and anti-ideal distances are zero, so closeness is undefined.
    #[error("alternatives {alternatives:?} coincide with both the ideal and anti-ideal points")]
    DegenerateInput { alternatives: Vec<usize> },

    /// The ranking method broke its own contract. Not caused by user input.
    #[error("internal invariant violated: {reason} (kernel = {kernel:?})")]
    InternalInvariant { reason: String, kernel: Vec<usize> },
}

impl DecisionError {
    /// Creates an internal invariant error.
    pub fn internal(reason: impl Into<String>, kernel: &[usize]) -> Self {
        DecisionError::InternalInvariant {
            reason: reason.into(),
            kernel: kernel.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_criteria_message() {
        let err = ValidationError::InvalidCriteria {
            found: vec![1, 0],
            min: -1,
            max: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("[1, 0]"), "message was: {msg}");
        assert!(msg.contains("'1'"));
        assert!(msg.contains("'-1'"));
    }

    #[test]
    fn test_from_conversions() {
        let err: DecisionError = ShapeError::Empty.into();
        assert!(matches!(err, DecisionError::Shape(ShapeError::Empty)));

        let err: DecisionError = ConfigurationError::InvalidEpsilon(-1.0).into();
        assert!(matches!(err, DecisionError::Configuration(_)));
    }

    #[test]
    fn test_internal_keeps_kernel() {
        let err = DecisionError::internal("no rank-1 alternative", &[2, 3]);
        match err {
            DecisionError::InternalInvariant { kernel, .. } => assert_eq!(kernel, vec![2, 3]),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
