//! Domain-agnostic multi-criteria decision making.
//!
//! Ranks a set of alternatives evaluated against several, possibly
//! conflicting criteria:
//!
//! - **Decision-maker framework** ([`dmaker`]): validates a decision matrix,
//!   criteria directions and weights, normalizes them, and hands them to a
//!   pluggable ranking method.
//! - **TOPSIS** ([`closeness`]): ranks alternatives by relative closeness to
//!   the ideal and anti-ideal points.
//! - **Normalization** ([`norm`]): column and weight normalization strategies.
//! - **Ranking** ([`rank`]): score-to-rank conversion with tie-breaking.
//!
//! # Example
//!
//! ```
//! use u_mcdm::closeness::Topsis;
//!
//! let dm = Topsis::decision_maker();
//! let decision = dm
//!     .solve_rows(&[[1.0, 2.0], [2.0, 1.0], [3.0, 3.0]], [1, 1], &[0.5, 0.5])
//!     .unwrap();
//!
//! assert_eq!(decision.best_alternative, 2);
//! ```
//!
//! # Architecture
//!
//! Like the rest of the U-Engine algorithm layer, this crate contains no
//! domain concepts. Alternatives and criteria are plain rows and columns;
//! their meaning is defined by consumers.

pub mod closeness;
pub mod data;
pub mod dmaker;
pub mod error;
pub mod norm;
pub mod rank;
pub mod util;
