//! Decision-maker configuration.
//!
//! [`DecisionMakerConfig`] holds everything that is fixed before any data
//! is seen: normalization strategies and ranking behaviour.

use crate::error::ConfigurationError;
use crate::norm::Normalization;
use crate::rank::{Ranker, TieBreaker};

/// Configuration for a [`DecisionMaker`](super::DecisionMaker).
///
/// # Defaults
///
/// ```
/// use u_mcdm::dmaker::DecisionMakerConfig;
///
/// let config = DecisionMakerConfig::default();
/// assert_eq!(config.mnorm.name(), "vector");
/// assert_eq!(config.wnorm.name(), "sum");
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_mcdm::dmaker::DecisionMakerConfig;
/// use u_mcdm::norm::Normalization;
/// use u_mcdm::rank::TieBreaker;
///
/// let config = DecisionMakerConfig::default()
///     .with_mnorm(Normalization::MinMax)
///     .with_tie_breaker(TieBreaker::Random)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
pub struct DecisionMakerConfig {
    /// Column-wise normalization of the decision matrix.
    pub mnorm: Normalization,

    /// Whole-vector normalization of the weights.
    pub wnorm: Normalization,

    /// How alternatives with equal scores are ordered.
    pub tie_breaker: TieBreaker,

    /// Scores closer than this are considered tied.
    pub epsilon: f64,

    /// Random seed for [`TieBreaker::Random`].
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Whether [`solve_batch`](super::DecisionMaker::solve_batch) solves
    /// problems in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature.
    pub parallel: bool,
}

impl Default for DecisionMakerConfig {
    fn default() -> Self {
        Self {
            mnorm: Normalization::Vector,
            wnorm: Normalization::Sum,
            tie_breaker: TieBreaker::ByIndex,
            epsilon: 1e-9,
            seed: None,
            parallel: true,
        }
    }
}

impl DecisionMakerConfig {
    /// Sets the matrix normalization.
    pub fn with_mnorm(mut self, norm: Normalization) -> Self {
        self.mnorm = norm;
        self
    }

    /// Sets the weight normalization.
    pub fn with_wnorm(mut self, norm: Normalization) -> Self {
        self.wnorm = norm;
        self
    }

    /// Sets both normalizations by name.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::UnknownNormalization`] for an unrecognized name.
    pub fn with_norm_names(mut self, mnorm: &str, wnorm: &str) -> Result<Self, ConfigurationError> {
        self.mnorm = mnorm.parse()?;
        self.wnorm = wnorm.parse()?;
        Ok(self)
    }

    /// Sets the tie-breaking strategy.
    pub fn with_tie_breaker(mut self, tb: TieBreaker) -> Self {
        self.tie_breaker = tb;
        self
    }

    /// Sets the tie epsilon.
    pub fn with_epsilon(mut self, eps: f64) -> Self {
        self.epsilon = eps;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel batch solving.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Builds the [`Ranker`] described by this configuration.
    pub fn ranker(&self) -> Ranker {
        Ranker::new()
            .with_tie_breaker(self.tie_breaker)
            .with_epsilon(self.epsilon)
            .with_seed(self.seed)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(ConfigurationError::InvalidEpsilon(self.epsilon));
        }
        Ok(())
    }
}
