//! Decision-maker framework.
//!
//! Every ranking method shares the same outer procedure: check that the
//! matrix, criteria and weights agree in shape, normalize them, rank, and
//! package the result. [`DecisionMaker`] implements that procedure once;
//! methods plug in by implementing [`DecisionMethod`].
//!
//! # Key Types
//!
//! - [`DecisionMakerConfig`]: normalization strategies and tie handling
//! - [`DecisionMaker`]: runs validate → normalize → solve → assemble
//! - [`DecisionMethod`]: the single operation a ranking method provides
//! - [`Decision`]: kernel, best alternative, solution flags and extras

mod config;
mod result;
mod runner;
mod types;

pub use config::DecisionMakerConfig;
pub use result::Decision;
pub use runner::{DecisionMaker, Problem};
pub use types::{DecisionMethod, MethodOutput, NormalizedData, SolutionClass};
