//! TOPSIS ranking.

use std::collections::BTreeMap;

use crate::data::{CriteriaVector, Criterion, DecisionMatrix};
use crate::dmaker::{
    DecisionMaker, DecisionMakerConfig, DecisionMethod, MethodOutput, NormalizedData, SolutionClass,
};
use crate::error::{DecisionError, ShapeError, ValidationError};
use crate::rank::Ranker;

/// Closeness assigned under [`DegeneratePolicy::Neutral`].
const NEUTRAL_CLOSENESS: f64 = 0.5;

/// What to do when an alternative sits on both the ideal and the
/// anti-ideal point, which leaves its closeness undefined (`0 / 0`).
///
/// This only happens when every alternative has the same weighted value on
/// every criterion, including the single-alternative case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DegeneratePolicy {
    /// Assign closeness `0.5`; the alternatives then tie.
    #[default]
    Neutral,

    /// Fail with [`DecisionError::DegenerateInput`].
    Reject,
}

/// Intermediate values of a TOPSIS run.
#[derive(Debug, Clone, PartialEq)]
pub struct TopsisOutcome {
    /// Normalized matrix multiplied by the weights, column by column.
    pub weighted: DecisionMatrix,
    /// Best weighted value per criterion.
    pub ideal: Vec<f64>,
    /// Worst weighted value per criterion.
    pub anti_ideal: Vec<f64>,
    /// Euclidean distance of each alternative to the ideal point.
    pub d_better: Vec<f64>,
    /// Euclidean distance of each alternative to the anti-ideal point.
    pub d_worst: Vec<f64>,
    /// `d_worst / (d_better + d_worst)`, in `[0, 1]`; higher is better.
    pub closeness: Vec<f64>,
}

/// Computes TOPSIS closeness coefficients for already normalized data.
///
/// # Algorithm
///
/// 1. Weight every column: `w[i][j] = nmtx[i][j] * nweights[j]`
/// 2. Ideal point: column max for MAX criteria, column min for MIN criteria
/// 3. Anti-ideal point: column max for MIN criteria, column min otherwise
/// 4. Euclidean distances of each row to both points
/// 5. `closeness = d_worst / (d_better + d_worst)`
///
/// # Errors
///
/// - [`ShapeError::LengthMismatch`] if criteria or weights do not match the columns
/// - [`DecisionError::DegenerateInput`] for zero total distance under
///   [`DegeneratePolicy::Reject`]
///
/// # Example
///
/// ```
/// use u_mcdm::closeness::{topsis, DegeneratePolicy};
/// use u_mcdm::data::{CriteriaVector, Criterion, DecisionMatrix};
///
/// let nmtx = DecisionMatrix::from_rows([[0.0, 1.0], [1.0, 0.0], [1.0, 1.0]]).unwrap();
/// let criteria: CriteriaVector = vec![Criterion::Max, Criterion::Max].into();
///
/// let out = topsis(&nmtx, &criteria, &[0.5, 0.5], DegeneratePolicy::Neutral).unwrap();
/// assert_eq!(out.ideal, vec![0.5, 0.5]);
/// assert_eq!(out.anti_ideal, vec![0.0, 0.0]);
/// assert!((out.closeness[2] - 1.0).abs() < 1e-12);
/// ```
pub fn topsis(
    nmtx: &DecisionMatrix,
    ncriteria: &CriteriaVector,
    nweights: &[f64],
    policy: DegeneratePolicy,
) -> Result<TopsisOutcome, DecisionError> {
    let (n, m) = nmtx.shape();
    if ncriteria.len() != m {
        return Err(ShapeError::length_mismatch("criteria", m, ncriteria.len()).into());
    }
    if nweights.len() != m {
        return Err(ShapeError::length_mismatch("weights", m, nweights.len()).into());
    }

    let weighted = nmtx.map_columns(|j, column| column.iter().map(|v| v * nweights[j]).collect())?;

    let mut mins = vec![f64::INFINITY; m];
    let mut maxs = vec![f64::NEG_INFINITY; m];
    for row in weighted.rows_iter() {
        for (j, &v) in row.iter().enumerate() {
            mins[j] = mins[j].min(v);
            maxs[j] = maxs[j].max(v);
        }
    }

    let ideal: Vec<f64> = ncriteria
        .iter()
        .enumerate()
        .map(|(j, c)| if c == Criterion::Max { maxs[j] } else { mins[j] })
        .collect();
    // Re-derived from the criteria rather than mirrored from `ideal`.
    let anti_ideal: Vec<f64> = ncriteria
        .iter()
        .enumerate()
        .map(|(j, c)| if c == Criterion::Min { maxs[j] } else { mins[j] })
        .collect();
    tracing::trace!(?ideal, ?anti_ideal, "topsis reference points");

    let d_better: Vec<f64> = weighted.rows_iter().map(|row| euclidean(row, &ideal)).collect();
    let d_worst: Vec<f64> = weighted.rows_iter().map(|row| euclidean(row, &anti_ideal)).collect();

    let overflow = (0..n).find_map(|i| match (d_better[i].is_finite(), d_worst[i].is_finite()) {
        (false, _) => Some(("distance to the ideal point", i)),
        (_, false) => Some(("distance to the anti-ideal point", i)),
        _ => None,
    });
    if let Some((what, alternative)) = overflow {
        return Err(ValidationError::NumericOverflow { what, alternative }.into());
    }

    let degenerate: Vec<usize> = (0..n).filter(|&i| d_better[i] + d_worst[i] == 0.0).collect();
    if !degenerate.is_empty() {
        match policy {
            DegeneratePolicy::Reject => {
                return Err(DecisionError::DegenerateInput {
                    alternatives: degenerate,
                })
            }
            DegeneratePolicy::Neutral => tracing::warn!(
                alternatives = ?degenerate,
                closeness = NEUTRAL_CLOSENESS,
                "alternatives coincide with ideal and anti-ideal points"
            ),
        }
    }

    let closeness = d_better
        .iter()
        .zip(&d_worst)
        .map(|(&better, &worst)| {
            let total = better + worst;
            if total == 0.0 {
                NEUTRAL_CLOSENESS
            } else {
                worst / total
            }
        })
        .collect();

    Ok(TopsisOutcome {
        weighted,
        ideal,
        anti_ideal,
        d_better,
        d_worst,
        closeness,
    })
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).fold(0.0, |acc, (x, y)| acc.hypot(x - y))
}

/// TOPSIS ranking method.
///
/// The chosen alternative should have the shortest distance to the ideal
/// solution and the longest distance to the worst one. Criteria are assumed
/// monotonic and compensatory: a poor value on one criterion can be offset
/// by a good value on another.
///
/// # Decision
///
/// - `kernel`: rank by descending closeness
/// - `rank`: always `None`
/// - solution flags: alpha `true`, beta `false`, gamma `true`
/// - `extra["closeness"]`: closeness coefficient per alternative
///
/// # Example
///
/// ```
/// use u_mcdm::closeness::Topsis;
///
/// let dm = Topsis::decision_maker();
/// let decision = dm
///     .solve_rows(&[[250.0, 16.0], [200.0, 16.0], [300.0, 32.0]], [-1, 1], &[1.0, 1.0])
///     .unwrap();
/// assert_eq!(decision.kernel.len(), 3);
/// assert!(decision.extra("closeness").is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Topsis {
    degenerate: DegeneratePolicy,
}

impl Topsis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how zero-distance alternatives are handled.
    pub fn with_degenerate_policy(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate = policy;
        self
    }

    pub fn degenerate_policy(&self) -> DegeneratePolicy {
        self.degenerate
    }

    /// Decision-maker with `mnorm = "vector"` and `wnorm = "sum"`.
    pub fn decision_maker() -> DecisionMaker<Topsis> {
        DecisionMaker::new(Topsis::default(), DecisionMakerConfig::default())
            .expect("default DecisionMakerConfig is valid")
    }
}

impl DecisionMethod for Topsis {
    fn name(&self) -> &str {
        "topsis"
    }

    fn solution_class(&self) -> SolutionClass {
        SolutionClass {
            alpha: true,
            beta: false,
            gamma: true,
        }
    }

    fn solve(&self, data: &NormalizedData, ranker: &Ranker) -> Result<MethodOutput, DecisionError> {
        let outcome = topsis(&data.mtx, &data.criteria, &data.weights, self.degenerate)?;
        let kernel = ranker.rank_descending(&outcome.closeness);

        let mut extra = BTreeMap::new();
        extra.insert("closeness".to_string(), outcome.closeness);

        Ok(MethodOutput {
            kernel,
            rank: None,
            extra,
        })
    }
}
