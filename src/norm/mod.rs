//! Normalization strategies.
//!
//! A [`Normalization`] maps one column of values to a comparable scale.
//! The decision-maker applies the matrix strategy to every criterion column
//! independently, and the weight strategy to the whole weight vector.
//!
//! | Name | Formula |
//! |------|---------|
//! | `none` | `x` |
//! | `sum` | `x / Σx` |
//! | `max` | `x / max(x)` |
//! | `vector` | `x / √Σx²` |
//! | `minmax` (`ideal_point`) | `(x - min) / (max - min)` |
//! | `push_negatives` | `x - min` when `min < 0`, else `x` |
//!
//! A zero divisor leaves the column unchanged rather than producing NaN.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::data::DecisionMatrix;
use crate::error::{ConfigurationError, DecisionError, ShapeError, ValidationError};

type NormFn = dyn Fn(&[f64]) -> Vec<f64> + Send + Sync;

/// A user-supplied normalization function with a display name.
#[derive(Clone)]
pub struct CustomNormalization {
    name: String,
    func: Arc<NormFn>,
}

impl CustomNormalization {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[f64]) -> Vec<f64> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for CustomNormalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomNormalization")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Normalization strategy for matrix columns or weight vectors.
///
/// # Examples
///
/// ```
/// use u_mcdm::norm::Normalization;
///
/// let sum: Normalization = "sum".parse().unwrap();
/// let normalized = sum.apply(&[1.0, 3.0]);
/// assert!((normalized[0] - 0.25).abs() < 1e-12);
/// assert!((normalized[1] - 0.75).abs() < 1e-12);
///
/// assert!("softmax".parse::<Normalization>().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub enum Normalization {
    /// Identity.
    None,
    /// Divide by the sum.
    Sum,
    /// Divide by the maximum.
    Max,
    /// Divide by the Euclidean norm.
    #[default]
    Vector,
    /// Rescale to `[0, 1]` using the column range.
    MinMax,
    /// Shift so the minimum becomes zero, only when it is negative.
    PushNegatives,
    /// User-supplied strategy.
    Custom(CustomNormalization),
}

const KNOWN_NAMES: &str = "none, sum, max, vector, minmax, ideal_point, push_negatives";

impl Normalization {
    /// Wraps a closure as a [`Normalization::Custom`].
    pub fn custom<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[f64]) -> Vec<f64> + Send + Sync + 'static,
    {
        Normalization::Custom(CustomNormalization::new(name, func))
    }

    /// Canonical name of the strategy.
    pub fn name(&self) -> &str {
        match self {
            Normalization::None => "none",
            Normalization::Sum => "sum",
            Normalization::Max => "max",
            Normalization::Vector => "vector",
            Normalization::MinMax => "minmax",
            Normalization::PushNegatives => "push_negatives",
            Normalization::Custom(c) => c.name(),
        }
    }

    /// Normalizes a single column or vector.
    ///
    /// Custom strategies may return a different length; callers that need
    /// the length preserved should use [`normalize_vector`](Self::normalize_vector).
    pub fn apply(&self, values: &[f64]) -> Vec<f64> {
        match self {
            Normalization::None => values.to_vec(),
            Normalization::Sum => divide_scaled(values, |scaled| scaled.iter().sum()),
            Normalization::Max => divide_scaled(values, |scaled| {
                scaled.iter().copied().fold(f64::NEG_INFINITY, f64::max)
            }),
            Normalization::Vector => divide_scaled(values, |scaled| {
                scaled.iter().map(|v| v * v).sum::<f64>().sqrt()
            }),
            Normalization::MinMax => {
                // Halved so that `max - min` cannot overflow.
                let (min, max) = min_max(values);
                let range = max / 2.0 - min / 2.0;
                if range == 0.0 {
                    return values.to_vec();
                }
                values.iter().map(|v| (v / 2.0 - min / 2.0) / range).collect()
            }
            Normalization::PushNegatives => {
                let (min, _) = min_max(values);
                if min < 0.0 {
                    values.iter().map(|v| v - min).collect()
                } else {
                    values.to_vec()
                }
            }
            Normalization::Custom(c) => (c.func)(values),
        }
    }

    /// Normalizes every column of `mtx` independently.
    ///
    /// # Errors
    ///
    /// Shape or validation errors when a custom strategy returns a column of
    /// the wrong length or non-finite values.
    pub fn normalize_matrix(&self, mtx: &DecisionMatrix) -> Result<DecisionMatrix, DecisionError> {
        if matches!(self, Normalization::None) {
            return Ok(mtx.clone());
        }
        Ok(mtx.map_columns(|_, column| self.apply(column))?)
    }

    /// Normalizes a whole vector, checking that its length is preserved and
    /// that every output is finite.
    pub fn normalize_vector(&self, values: &[f64]) -> Result<Vec<f64>, DecisionError> {
        let normalized = self.apply(values);
        if normalized.len() != values.len() {
            return Err(ShapeError::length_mismatch(
                "normalized vector",
                values.len(),
                normalized.len(),
            )
            .into());
        }
        if let Some(index) = normalized.iter().position(|v| !v.is_finite()) {
            return Err(ValidationError::InvalidWeight {
                index,
                value: normalized[index],
            }
            .into());
        }
        Ok(normalized)
    }
}

impl fmt::Display for Normalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Normalization {
    type Err = ConfigurationError;

    /// Parses a strategy name. Case-insensitive; `-` and `_` are equivalent.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        match key.as_str() {
            "none" => Ok(Normalization::None),
            "sum" => Ok(Normalization::Sum),
            "max" => Ok(Normalization::Max),
            "vector" => Ok(Normalization::Vector),
            "minmax" | "min_max" | "ideal_point" => Ok(Normalization::MinMax),
            "push_negatives" => Ok(Normalization::PushNegatives),
            _ => Err(ConfigurationError::UnknownNormalization {
                name: s.to_string(),
                known: KNOWN_NAMES.to_string(),
            }),
        }
    }
}

/// Divides `values` by `divisor(values / max|values|)`, so the divisor is
/// computed on values in `[-1, 1]` and cannot overflow.
///
/// A zero divisor leaves the values unchanged. Non-finite inputs propagate
/// as NaN and are rejected by the callers.
fn divide_scaled<F>(values: &[f64], divisor: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let scale = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 {
        return values.to_vec();
    }
    let scaled: Vec<f64> = values.iter().map(|v| v / scale).collect();
    let divisor = divisor(&scaled);
    if divisor == 0.0 {
        return values.to_vec();
    }
    scaled.iter().map(|v| v / divisor).collect()
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}
