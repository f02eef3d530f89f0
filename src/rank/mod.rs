//! Score-to-rank conversion.
//!
//! Turns a vector of scores into 1-based positions, the way every ranking
//! method reports its kernel. Scores closer than an epsilon are treated as
//! tied and ordered by a [`TieBreaker`], so the output is always a
//! permutation of `1..=n`.

mod engine;

pub use engine::{rankdata, Ranker, TieBreaker};
