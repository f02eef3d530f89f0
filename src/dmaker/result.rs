//! Decision result.

use std::collections::BTreeMap;

/// Outcome of [`DecisionMaker::solve`](super::DecisionMaker::solve).
///
/// Owned by the caller; holds no reference to the decision-maker.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decision {
    /// Name of the method that produced this decision.
    pub method: String,

    /// 1-based position of every alternative: `kernel[i]` is the rank of row `i`.
    pub kernel: Vec<usize>,

    /// Secondary ranking, if the method has one. Always `None` for TOPSIS.
    pub rank: Option<Vec<usize>>,

    /// Zero-based row index of the alternative ranked 1.
    pub best_alternative: usize,

    /// The method yields a full ranking.
    pub alpha_solution: bool,

    /// The method yields a choice only.
    pub beta_solution: bool,

    /// The method yields a partial order.
    pub gamma_solution: bool,

    /// Method-specific arrays, one value per alternative.
    pub extra: BTreeMap<String, Vec<f64>>,
}

impl Decision {
    /// Number of ranked alternatives.
    pub fn len(&self) -> usize {
        self.kernel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kernel.is_empty()
    }

    /// Looks up a method-specific array by name.
    pub fn extra(&self, name: &str) -> Option<&[f64]> {
        self.extra.get(name).map(Vec::as_slice)
    }

    /// Row indices ordered from best to worst.
    pub fn ranking(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.kernel.len()).collect();
        order.sort_by_key(|&i| (self.kernel[i], i));
        order
    }
}
