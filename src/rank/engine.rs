//! Ranking engine.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::cmp::Ordering;

/// Strategy for ordering scores that are equal within epsilon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TieBreaker {
    /// Lower row index gets the better position (deterministic).
    #[default]
    ByIndex,

    /// Tied rows are shuffled. Reproducible when a seed is set.
    Random,
}

/// Converts scores into 1-based rank positions.
///
/// # Examples
///
/// ```
/// use u_mcdm::rank::{Ranker, TieBreaker};
///
/// let ranker = Ranker::new().with_tie_breaker(TieBreaker::ByIndex);
///
/// // Higher is better: 0.9 is first.
/// assert_eq!(ranker.rank_descending(&[0.2, 0.9, 0.5]), vec![3, 1, 2]);
///
/// // Ties resolved by index.
/// assert_eq!(ranker.rank_descending(&[0.5, 0.5]), vec![1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Ranker {
    tie_breaker: TieBreaker,
    epsilon: f64,
    seed: Option<u64>,
}

impl Ranker {
    /// Creates a ranker with index tie-breaking and `epsilon = 1e-9`.
    pub fn new() -> Self {
        Self {
            tie_breaker: TieBreaker::ByIndex,
            epsilon: 1e-9,
            seed: None,
        }
    }

    /// Sets the tie-breaking strategy.
    pub fn with_tie_breaker(mut self, tb: TieBreaker) -> Self {
        self.tie_breaker = tb;
        self
    }

    /// Sets the epsilon for floating-point comparison.
    pub fn with_epsilon(mut self, eps: f64) -> Self {
        self.epsilon = eps;
        self
    }

    /// Sets the seed used by [`TieBreaker::Random`].
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn tie_breaker(&self) -> TieBreaker {
        self.tie_breaker
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Ranks so that the highest score gets position 1.
    pub fn rank_descending(&self, scores: &[f64]) -> Vec<usize> {
        self.rank(scores, true)
    }

    /// Ranks so that the lowest score gets position 1.
    pub fn rank_ascending(&self, scores: &[f64]) -> Vec<usize> {
        self.rank(scores, false)
    }

    /// Returns the row indices ordered from best to worst.
    pub fn order(&self, scores: &[f64], reverse: bool) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..scores.len()).collect();

        // NaN always sorts last, regardless of direction.
        indices.sort_by(|&a, &b| {
            let (sa, sb) = (scores[a], scores[b]);
            match (sa.is_nan(), sb.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) if reverse => sb.total_cmp(&sa),
                (false, false) => sa.total_cmp(&sb),
            }
        });

        let mut rng = match (self.tie_breaker, self.seed) {
            (TieBreaker::Random, Some(seed)) => Some(StdRng::seed_from_u64(seed)),
            (TieBreaker::Random, None) => Some(StdRng::seed_from_u64(rand::random())),
            (TieBreaker::ByIndex, _) => None,
        };

        // Walk the sorted order and resolve each run of tied scores. A run
        // only extends while it stays within epsilon of its first score.
        let mut start = 0;
        while start < indices.len() {
            let anchor = scores[indices[start]];
            let mut end = start + 1;
            while end < indices.len() && self.tied(anchor, scores[indices[end]]) {
                end += 1;
            }
            let group = &mut indices[start..end];
            match rng.as_mut() {
                Some(rng) => group.shuffle(rng),
                None => group.sort_unstable(),
            }
            start = end;
        }

        indices
    }

    fn rank(&self, scores: &[f64], reverse: bool) -> Vec<usize> {
        let mut ranks = vec![0usize; scores.len()];
        for (position, idx) in self.order(scores, reverse).into_iter().enumerate() {
            ranks[idx] = position + 1;
        }
        ranks
    }

    fn tied(&self, a: f64, b: f64) -> bool {
        if a.is_nan() || b.is_nan() {
            return a.is_nan() && b.is_nan();
        }
        (a - b).abs() <= self.epsilon
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new()
    }
}

/// Ranks `scores` with the default [`Ranker`].
///
/// With `reverse = true` the highest score is ranked 1.
pub fn rankdata(scores: &[f64], reverse: bool) -> Vec<usize> {
    Ranker::new().rank(scores, reverse)
}
