mod engine;
mod error;
mod evaluation_report;
mod firing;
mod fuzzy_set;
mod inputs;
mod membership;
mod parameter;
mod rule;

pub use engine::{InferenceEngine, InferenceEngineBuilder, RuleBuilder};
pub use error::{ConfigError, EvalError};
pub use evaluation_report::EvaluationReport;
pub use firing::FiringStrengths;
pub use fuzzy_set::FuzzySet;
pub use inputs::Inputs;
pub use membership::{Interval, MembershipPiece};
pub use parameter::{Discretization, FuzzyParameter};
pub use rule::{Combinator, Rule, RuleTerm};
