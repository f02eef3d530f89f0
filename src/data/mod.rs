//! Decision problem inputs.
//!
//! - [`Criterion`] / [`CriteriaVector`]: optimization direction per column
//! - [`DecisionMatrix`]: alternatives × criteria values
//! - [`criteriarr`] / [`is_matrix`]: validators for raw inputs

mod criteria;
mod matrix;

pub use criteria::{criteriarr, CriteriaVector, Criterion, MAX, MIN};
pub use matrix::{is_matrix, DecisionMatrix, MatrixError};
