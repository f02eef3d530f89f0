//! Methods based on closeness to an ideal solution.
//!
//! - [`Topsis`]: Technique for Order of Preference by Similarity to Ideal
//!   Solution. Ranks alternatives by their relative distance to the ideal
//!   and anti-ideal points.
//!
//! # References
//!
//! - Yoon & Hwang (1981), *Multiple Attribute Decision Making: Methods and Applications*
//! - Opricovic & Tzeng (2004), "Compromise solution by MCDM methods: A comparative
//!   analysis of VIKOR and TOPSIS", EJOR 156(2), 445-455
//! - Tzeng & Huang (2011), *Multiple Attribute Decision Making: Methods and Applications*

mod topsis;

pub use topsis::{topsis, DegeneratePolicy, Topsis, TopsisOutcome};
