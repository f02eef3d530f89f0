//! Numeric helpers.

use std::str::FromStr;

use crate::data::{Criterion, DecisionMatrix};
use crate::error::ConfigurationError;

/// Relative tolerance used by [`approximately_equal`].
pub const RTOL: f64 = 1e-5;

/// Absolute tolerance used by [`approximately_equal`].
pub const ATOL: f64 = 1e-8;

/// Which side of the target [`nearest`] may look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Values greater than or equal to the target (`"gt"`).
    Greater,
    /// Values less than or equal to the target (`"lt"`).
    Less,
}

impl FromStr for Side {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gt" => Ok(Side::Greater),
            "lt" => Ok(Side::Less),
            other => Err(ConfigurationError::UnknownSide(other.to_string())),
        }
    }
}

/// Returns the element of `values` closest to `target`, ignoring NaN.
///
/// With a `side`, only values on that side of the target (inclusive) are
/// considered. Returns `None` when nothing qualifies.
///
/// ```
/// use u_mcdm::util::{nearest, Side};
///
/// let values = [1.0, 4.0, f64::NAN, 7.0];
/// assert_eq!(nearest(&values, 5.0, None), Some(4.0));
/// assert_eq!(nearest(&values, 5.0, Some(Side::Greater)), Some(7.0));
/// assert_eq!(nearest(&values, 8.0, Some(Side::Greater)), None);
/// ```
pub fn nearest(values: &[f64], target: f64, side: Option<Side>) -> Option<f64> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .filter(|&v| match side {
            None => true,
            Some(Side::Greater) => v >= target,
            Some(Side::Less) => v <= target,
        })
        .min_by(|a, b| (a - target).abs().total_cmp(&(b - target).abs()))
}

/// Equality that tolerates floating-point noise for numeric arrays.
pub trait ApproxEq {
    fn approx_eq(&self, other: &Self) -> bool;
}

impl ApproxEq for [f64] {
    /// `|a - b| <= ATOL + RTOL * |b|` element-wise; NaN equals NaN.
    fn approx_eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().zip(other).all(|(&a, &b)| {
                if a.is_nan() || b.is_nan() {
                    return a.is_nan() && b.is_nan();
                }
                if a == b {
                    return true;
                }
                (a - b).abs() <= ATOL + RTOL * b.abs()
            })
    }
}

impl ApproxEq for Vec<f64> {
    fn approx_eq(&self, other: &Self) -> bool {
        self.as_slice().approx_eq(other.as_slice())
    }
}

impl ApproxEq for DecisionMatrix {
    fn approx_eq(&self, other: &Self) -> bool {
        self.shape() == other.shape() && self.as_slice().approx_eq(other.as_slice())
    }
}

macro_rules! exact_approx_eq {
    ($($t:ty),*) => {
        $(impl ApproxEq for $t {
            fn approx_eq(&self, other: &Self) -> bool {
                self == other
            }
        })*
    };
}

exact_approx_eq!(i32, i64, usize, bool, str, String, Criterion, [usize], Vec<usize>);

/// Tolerance-based equality for numeric arrays, exact equality otherwise.
///
/// ```
/// use u_mcdm::util::approximately_equal;
///
/// assert!(approximately_equal(&[1.0, f64::NAN][..], &[1.0 + 1e-10, f64::NAN][..]));
/// assert!(!approximately_equal(&[1.0][..], &[1.1][..]));
/// assert!(approximately_equal("topsis", "topsis"));
/// ```
pub fn approximately_equal<T: ApproxEq + ?Sized>(a: &T, b: &T) -> bool {
    a.approx_eq(b)
}
