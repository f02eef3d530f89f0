//! Core trait definitions for the decision-maker framework.
//!
//! [`DecisionMethod`] is the contract between the generic
//! [`DecisionMaker`](super::DecisionMaker) and a concrete ranking method.

use std::collections::BTreeMap;

use crate::data::{CriteriaVector, DecisionMatrix};
use crate::error::DecisionError;
use crate::rank::Ranker;

/// Describes what kind of answer a method produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolutionClass {
    /// The method yields a full ranking of every alternative.
    pub alpha: bool,
    /// The method yields a choice only (a subset of good alternatives).
    pub beta: bool,
    /// The method yields a partial order.
    pub gamma: bool,
}

/// Normalized inputs handed to [`DecisionMethod::solve`].
///
/// Built fresh for each solve and dropped afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedData {
    /// Matrix after column-wise normalization.
    pub mtx: DecisionMatrix,
    /// Criteria directions, unchanged.
    pub criteria: CriteriaVector,
    /// Weights after whole-vector normalization.
    pub weights: Vec<f64>,
}

impl NormalizedData {
    /// Number of alternatives.
    pub fn alternatives(&self) -> usize {
        self.mtx.rows()
    }
}

/// What a method returns before the decision-maker assembles a
/// [`Decision`](super::Decision).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MethodOutput {
    /// 1-based position of every alternative.
    pub kernel: Vec<usize>,
    /// Secondary ranking structure, if the method has one.
    pub rank: Option<Vec<usize>>,
    /// Named per-alternative arrays (each of length n).
    pub extra: BTreeMap<String, Vec<f64>>,
}

/// A multi-criteria ranking method.
///
/// Implementors only rank already normalized data; validation,
/// normalization and result assembly are done by
/// [`DecisionMaker`](super::DecisionMaker).
///
/// # Implementing
///
/// ```
/// use u_mcdm::dmaker::{DecisionMethod, MethodOutput, NormalizedData, SolutionClass};
/// use u_mcdm::error::DecisionError;
/// use u_mcdm::rank::Ranker;
///
/// /// Weighted sum of normalized values (all criteria maximized).
/// struct WeightedSum;
///
/// impl DecisionMethod for WeightedSum {
///     fn name(&self) -> &str { "weighted_sum" }
///
///     fn solution_class(&self) -> SolutionClass {
///         SolutionClass { alpha: true, beta: false, gamma: false }
///     }
///
///     fn solve(
///         &self,
///         data: &NormalizedData,
///         ranker: &Ranker,
///     ) -> Result<MethodOutput, DecisionError> {
///         let scores: Vec<f64> = data
///             .mtx
///             .rows_iter()
///             .map(|row| row.iter().zip(&data.weights).map(|(v, w)| v * w).sum())
///             .collect();
///         Ok(MethodOutput {
///             kernel: ranker.rank_descending(&scores),
///             rank: None,
///             extra: [("score".to_string(), scores)].into_iter().collect(),
///         })
///     }
/// }
/// ```
pub trait DecisionMethod: Send + Sync {
    /// Short identifier used in logs and results.
    fn name(&self) -> &str;

    /// Fixed solution-class flags of this method.
    fn solution_class(&self) -> SolutionClass;

    /// Ranks the alternatives of `data`.
    ///
    /// `ranker` carries the caller's tie-breaking configuration and should
    /// be used to turn scores into the kernel.
    fn solve(&self, data: &NormalizedData, ranker: &Ranker) -> Result<MethodOutput, DecisionError>;
}

impl<M: DecisionMethod + ?Sized> DecisionMethod for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn solution_class(&self) -> SolutionClass {
        (**self).solution_class()
    }

    fn solve(&self, data: &NormalizedData, ranker: &Ranker) -> Result<MethodOutput, DecisionError> {
        (**self).solve(data, ranker)
    }
}
