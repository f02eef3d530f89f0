//! Decision-maker execution.
//!
//! [`DecisionMaker`] runs the steps shared by every ranking method:
//! shape checks → weight validation → normalization → method solve →
//! result assembly.

use super::config::DecisionMakerConfig;
use super::result::Decision;
use super::types::{DecisionMethod, MethodOutput, NormalizedData};
use crate::data::{criteriarr, CriteriaVector, DecisionMatrix};
use crate::error::{ConfigurationError, DecisionError, ShapeError, ValidationError};

/// One independent decision problem, used by
/// [`DecisionMaker::solve_batch`].
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub matrix: DecisionMatrix,
    pub criteria: CriteriaVector,
    pub weights: Vec<f64>,
}

impl Problem {
    pub fn new(matrix: DecisionMatrix, criteria: CriteriaVector, weights: Vec<f64>) -> Self {
        Self {
            matrix,
            criteria,
            weights,
        }
    }
}

/// Validates and normalizes inputs, then delegates ranking to a
/// [`DecisionMethod`].
///
/// Holds configuration only. Every [`solve`](Self::solve) is independent,
/// so a single decision-maker can be shared across threads.
///
/// # Usage
///
/// ```
/// use u_mcdm::closeness::Topsis;
/// use u_mcdm::data::{criteriarr, DecisionMatrix};
/// use u_mcdm::dmaker::{DecisionMaker, DecisionMakerConfig};
///
/// let dm = DecisionMaker::new(Topsis::default(), DecisionMakerConfig::default()).unwrap();
///
/// let matrix = DecisionMatrix::from_rows([[1.0, 2.0], [2.0, 1.0], [3.0, 3.0]]).unwrap();
/// let criteria = criteriarr([1, 1]).unwrap();
/// let decision = dm.solve(&matrix, &criteria, &[0.5, 0.5]).unwrap();
///
/// assert_eq!(decision.best_alternative, 2);
/// assert_eq!(decision.kernel[2], 1);
/// ```
#[derive(Debug, Clone)]
pub struct DecisionMaker<M> {
    method: M,
    config: DecisionMakerConfig,
}

impl<M: DecisionMethod> DecisionMaker<M> {
    /// Creates a decision-maker.
    ///
    /// # Errors
    ///
    /// Returns the first configuration problem found by
    /// [`DecisionMakerConfig::validate`].
    pub fn new(method: M, config: DecisionMakerConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self { method, config })
    }

    /// Creates a decision-maker with normalizations given by name.
    ///
    /// Unknown names fail here, never during [`solve`](Self::solve).
    pub fn with_names(method: M, mnorm: &str, wnorm: &str) -> Result<Self, ConfigurationError> {
        let config = DecisionMakerConfig::default().with_norm_names(mnorm, wnorm)?;
        Self::new(method, config)
    }

    pub fn method(&self) -> &M {
        &self.method
    }

    pub fn config(&self) -> &DecisionMakerConfig {
        &self.config
    }

    /// Checks shapes and weights, then normalizes matrix and weights.
    pub fn normalize(
        &self,
        matrix: &DecisionMatrix,
        criteria: &CriteriaVector,
        weights: &[f64],
    ) -> Result<NormalizedData, DecisionError> {
        let m = matrix.cols();
        if criteria.len() != m {
            return Err(ShapeError::length_mismatch("criteria", m, criteria.len()).into());
        }
        if weights.len() != m {
            return Err(ShapeError::length_mismatch("weights", m, weights.len()).into());
        }
        validate_weights(weights)?;

        Ok(NormalizedData {
            mtx: self.config.mnorm.normalize_matrix(matrix)?,
            criteria: criteria.clone(),
            weights: self.config.wnorm.normalize_vector(weights)?,
        })
    }

    /// Ranks the alternatives (rows) of `matrix`.
    ///
    /// # Errors
    ///
    /// - [`DecisionError::Shape`] when criteria or weights do not have one
    ///   entry per column
    /// - [`DecisionError::Validation`] for negative, non-finite or all-zero weights
    /// - whatever the method reports (e.g. [`DecisionError::DegenerateInput`])
    /// - [`DecisionError::InternalInvariant`] when the method returns a
    ///   malformed kernel
    pub fn solve(
        &self,
        matrix: &DecisionMatrix,
        criteria: &CriteriaVector,
        weights: &[f64],
    ) -> Result<Decision, DecisionError> {
        let (n, m) = matrix.shape();
        tracing::debug!(
            method = self.method.name(),
            alternatives = n,
            criteria = m,
            mnorm = %self.config.mnorm,
            wnorm = %self.config.wnorm,
            "solving decision problem"
        );

        let data = self.normalize(matrix, criteria, weights)?;
        let output = self.method.solve(&data, &self.config.ranker())?;
        let decision = self.assemble(n, output)?;

        tracing::debug!(
            method = self.method.name(),
            best_alternative = decision.best_alternative,
            "decision complete"
        );
        Ok(decision)
    }

    /// Like [`solve`](Self::solve) but takes raw rows and integer-coded criteria.
    pub fn solve_rows<R, I>(
        &self,
        rows: &[R],
        criteria: I,
        weights: &[f64],
    ) -> Result<Decision, DecisionError>
    where
        R: AsRef<[f64]>,
        I: IntoIterator,
        I::Item: Into<i64>,
    {
        let criteria = criteriarr(criteria)?;
        let matrix = DecisionMatrix::from_rows(rows)?;
        self.solve(&matrix, &criteria, weights)
    }

    /// Solves independent problems, in parallel when enabled.
    ///
    /// Results are returned in input order; one failing problem does not
    /// affect the others.
    pub fn solve_batch(&self, problems: &[Problem]) -> Vec<Result<Decision, DecisionError>> {
        #[cfg(feature = "parallel")]
        if self.config.parallel {
            use rayon::prelude::*;
            return problems
                .par_iter()
                .map(|p| self.solve(&p.matrix, &p.criteria, &p.weights))
                .collect();
        }

        problems
            .iter()
            .map(|p| self.solve(&p.matrix, &p.criteria, &p.weights))
            .collect()
    }

    fn assemble(&self, n: usize, output: MethodOutput) -> Result<Decision, DecisionError> {
        let MethodOutput { kernel, rank, extra } = output;
        let class = self.method.solution_class();

        if kernel.len() != n {
            return Err(DecisionError::internal(
                format!("kernel has {} entries for {n} alternatives", kernel.len()),
                &kernel,
            ));
        }
        if let Some((name, values)) = extra.iter().find(|(_, v)| v.len() != n) {
            return Err(DecisionError::internal(
                format!("extra '{name}' has {} entries for {n} alternatives", values.len()),
                &kernel,
            ));
        }
        if class.alpha && !is_permutation(&kernel) {
            return Err(DecisionError::internal("kernel is not a permutation of 1..=n", &kernel));
        }

        let mut firsts = kernel.iter().enumerate().filter(|(_, r)| **r == 1).map(|(i, _)| i);
        let best_alternative = match (firsts.next(), firsts.next()) {
            (Some(best), None) => best,
            (None, _) => return Err(DecisionError::internal("no alternative ranked 1", &kernel)),
            (Some(_), Some(_)) => {
                return Err(DecisionError::internal("several alternatives ranked 1", &kernel))
            }
        };

        Ok(Decision {
            method: self.method.name().to_string(),
            kernel,
            rank,
            best_alternative,
            alpha_solution: class.alpha,
            beta_solution: class.beta,
            gamma_solution: class.gamma,
            extra,
        })
    }
}

fn validate_weights(weights: &[f64]) -> Result<(), ValidationError> {
    if let Some((index, &value)) = weights
        .iter()
        .enumerate()
        .find(|(_, w)| !w.is_finite() || (w.is_sign_negative() && **w != 0.0))
    {
        return Err(ValidationError::InvalidWeight { index, value });
    }
    if weights.iter().all(|&w| w == 0.0) {
        return Err(ValidationError::ZeroWeights {
            weights: weights.to_vec(),
        });
    }
    Ok(())
}

fn is_permutation(kernel: &[usize]) -> bool {
    let mut seen = vec![false; kernel.len()];
    kernel.iter().all(|&r| {
        if r == 0 || r > kernel.len() || seen[r - 1] {
            return false;
        }
        seen[r - 1] = true;
        true
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Criterion;
    use crate::dmaker::SolutionClass;
    use crate::norm::Normalization;
    use crate::rank::Ranker;
    use std::collections::BTreeMap;

    /// Ranks by the first normalized column, highest first.
    #[derive(Debug)]
    struct FirstColumn;

    impl DecisionMethod for FirstColumn {
        fn name(&self) -> &str {
            "first_column"
        }
        fn solution_class(&self) -> SolutionClass {
            SolutionClass {
                alpha: true,
                beta: false,
                gamma: false,
            }
        }
        fn solve(
            &self,
            data: &NormalizedData,
            ranker: &Ranker,
        ) -> Result<MethodOutput, DecisionError> {
            let scores = data.mtx.column(0);
            Ok(MethodOutput {
                kernel: ranker.rank_descending(&scores),
                rank: None,
                extra: [("score".to_string(), scores)].into_iter().collect(),
            })
        }
    }

    /// Returns a fixed kernel, to exercise the invariant checks.
    #[derive(Debug)]
    struct Fixed {
        kernel: Vec<usize>,
        alpha: bool,
    }

    impl DecisionMethod for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }
        fn solution_class(&self) -> SolutionClass {
            SolutionClass {
                alpha: self.alpha,
                beta: !self.alpha,
                gamma: false,
            }
        }
        fn solve(
            &self,
            _data: &NormalizedData,
            _ranker: &Ranker,
        ) -> Result<MethodOutput, DecisionError> {
            Ok(MethodOutput {
                kernel: self.kernel.clone(),
                rank: None,
                extra: BTreeMap::new(),
            })
        }
    }

    fn matrix() -> DecisionMatrix {
        DecisionMatrix::from_rows([[1.0, 5.0], [3.0, 4.0], [2.0, 6.0]]).unwrap()
    }

    fn max_max() -> CriteriaVector {
        vec![Criterion::Max, Criterion::Max].into()
    }

    #[test]
    fn test_solve_assembles_decision() {
        let dm = DecisionMaker::new(FirstColumn, DecisionMakerConfig::default()).unwrap();
        let decision = dm.solve(&matrix(), &max_max(), &[1.0, 1.0]).unwrap();

        assert_eq!(decision.method, "first_column");
        assert_eq!(decision.kernel, vec![3, 1, 2]);
        assert_eq!(decision.best_alternative, 1);
        assert!(decision.alpha_solution);
        assert!(!decision.beta_solution);
        assert!(!decision.gamma_solution);
        assert!(decision.rank.is_none());
        assert_eq!(decision.extra("score").map(<[f64]>::len), Some(3));
    }

    #[test]
    fn test_normalize_applies_strategies() {
        let config = DecisionMakerConfig::default()
            .with_mnorm(Normalization::Sum)
            .with_wnorm(Normalization::Sum);
        let dm = DecisionMaker::new(FirstColumn, config).unwrap();
        let data = dm.normalize(&matrix(), &max_max(), &[1.0, 3.0]).unwrap();

        let col: f64 = data.mtx.column(0).iter().sum();
        assert!((col - 1.0).abs() < 1e-12);
        assert!((data.weights[0] - 0.25).abs() < 1e-12);
        assert!((data.weights[1] - 0.75).abs() < 1e-12);
        assert_eq!(data.alternatives(), 3);
    }

    #[test]
    fn test_unknown_norm_fails_at_construction() {
        let err = DecisionMaker::with_names(FirstColumn, "bogus", "sum").unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownNormalization { .. }));

        assert!(DecisionMaker::with_names(FirstColumn, "vector", "sum").is_ok());
    }

    #[test]
    fn test_invalid_epsilon_fails_at_construction() {
        let config = DecisionMakerConfig::default().with_epsilon(-0.1);
        assert!(DecisionMaker::new(FirstColumn, config).is_err());
    }

    #[test]
    fn test_shape_mismatch() {
        let dm = DecisionMaker::new(FirstColumn, DecisionMakerConfig::default()).unwrap();
        let criteria: CriteriaVector = vec![Criterion::Max].into();
        let err = dm.solve(&matrix(), &criteria, &[1.0, 1.0]).unwrap_err();
        assert_eq!(
            err,
            DecisionError::Shape(ShapeError::LengthMismatch {
                what: "criteria",
                expected: 2,
                actual: 1
            })
        );

        let err = dm.solve(&matrix(), &max_max(), &[1.0]).unwrap_err();
        assert!(matches!(
            err,
            DecisionError::Shape(ShapeError::LengthMismatch { what: "weights", .. })
        ));
    }

    #[test]
    fn test_invalid_weights() {
        let dm = DecisionMaker::new(FirstColumn, DecisionMakerConfig::default()).unwrap();

        let err = dm.solve(&matrix(), &max_max(), &[1.0, -0.5]).unwrap_err();
        assert_eq!(
            err,
            DecisionError::Validation(ValidationError::InvalidWeight {
                index: 1,
                value: -0.5
            })
        );

        let err = dm.solve(&matrix(), &max_max(), &[0.0, 0.0]).unwrap_err();
        assert!(matches!(err, DecisionError::Validation(ValidationError::ZeroWeights { .. })));

        let err = dm.solve(&matrix(), &max_max(), &[f64::NAN, 1.0]).unwrap_err();
        assert!(matches!(
            err,
            DecisionError::Validation(ValidationError::InvalidWeight { index: 0, .. })
        ));
    }

    #[test]
    fn test_solve_rows() {
        let dm = DecisionMaker::new(FirstColumn, DecisionMakerConfig::default()).unwrap();
        let rows = vec![vec![1.0, 2.0], vec![4.0, 1.0]];
        let decision = dm.solve_rows(&rows, [1, -1], &[0.5, 0.5]).unwrap();
        assert_eq!(decision.best_alternative, 1);

        let err = dm.solve_rows(&rows, [1, 0], &[0.5, 0.5]).unwrap_err();
        assert!(matches!(err, DecisionError::Validation(ValidationError::InvalidCriteria { .. })));

        let ragged = vec![vec![1.0, 2.0], vec![4.0]];
        let err = dm.solve_rows(&ragged, [1, 1], &[0.5, 0.5]).unwrap_err();
        assert!(matches!(err, DecisionError::Shape(ShapeError::Ragged { .. })));
    }

    #[test]
    fn test_kernel_without_first_place() {
        let method = Fixed {
            kernel: vec![2, 2, 3],
            alpha: false,
        };
        let dm = DecisionMaker::new(method, DecisionMakerConfig::default()).unwrap();
        let err = dm.solve(&matrix(), &max_max(), &[1.0, 1.0]).unwrap_err();
        assert!(matches!(err, DecisionError::InternalInvariant { .. }));
    }

    #[test]
    fn test_kernel_with_duplicate_first_place() {
        let method = Fixed {
            kernel: vec![1, 1, 2],
            alpha: false,
        };
        let dm = DecisionMaker::new(method, DecisionMakerConfig::default()).unwrap();
        let err = dm.solve(&matrix(), &max_max(), &[1.0, 1.0]).unwrap_err();
        match err {
            DecisionError::InternalInvariant { reason, kernel } => {
                assert!(reason.contains("several"));
                assert_eq!(kernel, vec![1, 1, 2]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_full_ranking_must_be_permutation() {
        let method = Fixed {
            kernel: vec![1, 3, 3],
            alpha: true,
        };
        let dm = DecisionMaker::new(method, DecisionMakerConfig::default()).unwrap();
        assert!(matches!(
            dm.solve(&matrix(), &max_max(), &[1.0, 1.0]),
            Err(DecisionError::InternalInvariant { .. })
        ));

        // Without the full-ranking flag a non-permutation with a single winner is accepted.
        let method = Fixed {
            kernel: vec![1, 3, 3],
            alpha: false,
        };
        let dm = DecisionMaker::new(method, DecisionMakerConfig::default()).unwrap();
        let decision = dm.solve(&matrix(), &max_max(), &[1.0, 1.0]).unwrap();
        assert_eq!(decision.best_alternative, 0);
        assert!(decision.beta_solution);
    }

    #[test]
    fn test_kernel_length_checked() {
        let method = Fixed {
            kernel: vec![1, 2],
            alpha: true,
        };
        let dm = DecisionMaker::new(method, DecisionMakerConfig::default()).unwrap();
        assert!(matches!(
            dm.solve(&matrix(), &max_max(), &[1.0, 1.0]),
            Err(DecisionError::InternalInvariant { .. })
        ));
    }

    #[test]
    fn test_solve_batch_keeps_order() {
        let dm = DecisionMaker::new(FirstColumn, DecisionMakerConfig::default()).unwrap();
        let good = Problem::new(matrix(), max_max(), vec![1.0, 1.0]);
        let bad = Problem::new(matrix(), max_max(), vec![1.0]);

        let results = dm.solve_batch(&[good.clone(), bad, good]);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().best_alternative, 1);
    }

    #[test]
    fn test_solve_batch_sequential() {
        let config = DecisionMakerConfig::default().with_parallel(false);
        let dm = DecisionMaker::new(FirstColumn, config).unwrap();
        let problems = vec![Problem::new(matrix(), max_max(), vec![1.0, 1.0]); 4];
        let results = dm.solve_batch(&problems);
        assert!(results.iter().all(|r| r.as_ref().map(|d| d.best_alternative) == Ok(1)));
    }

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&[2, 1, 3]));
        assert!(!is_permutation(&[0, 1, 2]));
        assert!(!is_permutation(&[1, 1, 2]));
        assert!(!is_permutation(&[1, 4, 2]));
        assert!(is_permutation(&[]));
    }
}
