//! Criteria directions.

use crate::error::ValidationError;

/// Integer code for a criterion to be minimized.
pub const MIN: i64 = -1;

/// Integer code for a criterion to be maximized.
pub const MAX: i64 = 1;

/// Optimization direction of a single criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Criterion {
    /// Lower values are better (costs, distances, risk).
    Min,
    /// Higher values are better (benefits, quality, throughput).
    Max,
}

impl Criterion {
    /// Decodes the external integer encoding (`-1` / `1`).
    ///
    /// Returns `None` for any other code.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            MIN => Some(Criterion::Min),
            MAX => Some(Criterion::Max),
            _ => None,
        }
    }

    /// Returns the external integer encoding.
    pub fn code(self) -> i64 {
        match self {
            Criterion::Min => MIN,
            Criterion::Max => MAX,
        }
    }

    /// Returns the opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Criterion::Min => Criterion::Max,
            Criterion::Max => Criterion::Min,
        }
    }
}

/// Ordered, immutable sequence of criteria directions.
///
/// # Examples
///
/// ```
/// use u_mcdm::data::{criteriarr, Criterion, CriteriaVector};
///
/// let criteria = criteriarr([1, -1]).unwrap();
/// assert_eq!(criteria.as_slice(), &[Criterion::Max, Criterion::Min]);
///
/// let same = CriteriaVector::from(vec![Criterion::Max, Criterion::Min]);
/// assert_eq!(criteria, same);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CriteriaVector(Vec<Criterion>);

impl CriteriaVector {
    /// Number of criteria.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Criterion> {
        self.0.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Criterion> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[Criterion] {
        &self.0
    }

    /// Returns the integer encoding of every criterion.
    pub fn codes(&self) -> Vec<i64> {
        self.0.iter().map(|c| c.code()).collect()
    }
}

impl From<Vec<Criterion>> for CriteriaVector {
    fn from(criteria: Vec<Criterion>) -> Self {
        Self(criteria)
    }
}

impl From<&[Criterion]> for CriteriaVector {
    fn from(criteria: &[Criterion]) -> Self {
        Self(criteria.to_vec())
    }
}

impl FromIterator<Criterion> for CriteriaVector {
    fn from_iter<T: IntoIterator<Item = Criterion>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Validates integer-encoded criteria and converts them to a [`CriteriaVector`].
///
/// # Errors
///
/// [`ValidationError::InvalidCriteria`] if any code is neither [`MIN`] nor
/// [`MAX`]. The error carries the full offending array.
pub fn criteriarr<I>(codes: I) -> Result<CriteriaVector, ValidationError>
where
    I: IntoIterator,
    I::Item: Into<i64>,
{
    let codes: Vec<i64> = codes.into_iter().map(Into::into).collect();
    let parsed: Option<Vec<Criterion>> = codes.iter().map(|&c| Criterion::from_code(c)).collect();
    match parsed {
        Some(criteria) => Ok(CriteriaVector(criteria)),
        None => Err(ValidationError::InvalidCriteria {
            found: codes,
            min: MIN,
            max: MAX,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        assert_eq!(Criterion::from_code(-1), Some(Criterion::Min));
        assert_eq!(Criterion::from_code(1), Some(Criterion::Max));
        assert_eq!(Criterion::from_code(0), None);
        assert_eq!(Criterion::Min.code(), -1);
        assert_eq!(Criterion::Max.code(), 1);
    }

    #[test]
    fn test_flipped() {
        assert_eq!(Criterion::Min.flipped(), Criterion::Max);
        assert_eq!(Criterion::Max.flipped(), Criterion::Min);
    }

    #[test]
    fn test_criteriarr_valid() {
        let criteria = criteriarr([1i32, -1, 1]).unwrap();
        assert_eq!(criteria.len(), 3);
        assert_eq!(criteria.get(1), Some(Criterion::Min));
        assert_eq!(criteria.codes(), vec![1, -1, 1]);
    }

    #[test]
    fn test_criteriarr_rejects_zero() {
        let err = criteriarr([1i64, 0]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidCriteria {
                found: vec![1, 0],
                min: -1,
                max: 1,
            }
        );
        assert!(err.to_string().contains("[1, 0]"));
    }

    #[test]
    fn test_criteriarr_rejects_other_values() {
        assert!(criteriarr([2i64]).is_err());
        assert!(criteriarr([-1i64, -2]).is_err());
    }

    #[test]
    fn test_criteriarr_empty() {
        let criteria = criteriarr(Vec::<i64>::new()).unwrap();
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_collect() {
        let criteria: CriteriaVector = [Criterion::Max, Criterion::Max].into_iter().collect();
        assert_eq!(criteria.iter().filter(|&c| c == Criterion::Max).count(), 2);
    }
}
