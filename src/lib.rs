//! Fuzzy-logic inference for graded clinical diagnosis.
//!
//! Input measurements are fuzzified through [`FuzzyParameter`]s, combined by
//! an [`InferenceEngine`] rule base into per-set [`FiringStrengths`], and
//! reduced to a single score by the [`CenterOfMass`] defuzzifier.

pub mod clinical;
mod compile;
pub mod defuzz;
mod error;
mod evaluate;
pub mod parse;
mod types;

pub use defuzz::{CenterOfMass, ClippedSet, Diagnosis};
pub use error::FuzzdxError;
pub use parse::ParseError;
pub use types::{
    Combinator, ConfigError, Discretization, EvalError, EvaluationReport, FiringStrengths,
    FuzzyParameter, FuzzySet, InferenceEngine, InferenceEngineBuilder, Inputs, Interval,
    MembershipPiece, Rule, RuleBuilder, RuleTerm,
};
