use thiserror::Error;

/// Errors raised while building membership pieces, fuzzy sets, parameters,
/// defuzzifiers or an inference engine. All of them are fatal to startup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid membership piece: {reason}")]
    InvalidPiece { reason: String },

    #[error("linear piece endpoints share x = {x}")]
    DegenerateLine { x: f64 },

    #[error("fuzzy set '{set}' needs at least two knots, got {count}")]
    TooFewKnots { set: String, count: usize },

    #[error("invalid domain [{start}, {end}]")]
    InvalidDomain { start: f64, end: f64 },

    #[error("piece [{start}, {end}] overlaps an existing piece of fuzzy set '{set}'")]
    Overlap { set: String, start: f64, end: f64 },

    #[error("fuzzy set '{set}' has a piece outside the domain of parameter '{parameter}'")]
    PieceOutsideDomain { parameter: String, set: String },

    #[error("duplicate fuzzy set '{set}' in parameter '{parameter}'")]
    DuplicateSet { parameter: String, set: String },

    #[error("duplicate input parameter '{name}'")]
    DuplicateParameter { name: String },

    #[error("stride must be positive, got {stride}")]
    NonPositiveStride { stride: f64 },

    #[error("stride {stride} is too fine to sample [{lo}, {hi}]")]
    TooManySamples { lo: f64, hi: f64, stride: f64 },

    #[error("rule has no antecedent terms")]
    EmptyAntecedent,

    #[error("rule with {terms} antecedent terms has no combinator")]
    MissingCombinator { terms: usize },

    #[error("rule mixes AND and OR in one antecedent list")]
    MixedCombinators,

    #[error("rule has no consequent")]
    MissingConsequent,

    #[error("no output parameter defined")]
    MissingOutput,

    #[error("consequent '{parameter} IS {set}' does not name a set of the output parameter")]
    UnknownConsequent { parameter: String, set: String },
}

/// Errors raised by a single evaluation. They never leave the engine in a
/// changed state; the caller may retry with corrected input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("value {value} is outside the domain [{start}, {end}] of parameter '{parameter}'")]
    OutOfRange {
        parameter: String,
        value: f64,
        start: f64,
        end: f64,
    },

    #[error("unknown parameter '{parameter}'")]
    UnknownParameter { parameter: String },

    #[error("missing input for parameter '{parameter}'")]
    MissingInput { parameter: String },

    #[error("unknown fuzzy set '{set}' in parameter '{parameter}'")]
    UnknownSet { parameter: String, set: String },
}
