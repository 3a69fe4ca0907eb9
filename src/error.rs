use thiserror::Error;

use crate::parse::ParseError;
use crate::{ConfigError, EvalError};

/// Unified error type covering parsing, configuration, evaluation, and I/O.
///
/// Returned by convenience methods like
/// [`InferenceEngine::from_rules()`](crate::InferenceEngine::from_rules) and
/// [`InferenceEngine::from_file()`](crate::InferenceEngine::from_file).
#[derive(Debug, Error)]
pub enum FuzzdxError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_config_error_transparently() {
        let err: FuzzdxError = ConfigError::MissingOutput.into();
        assert_eq!(err.to_string(), "no output parameter defined");
    }

    #[test]
    fn wraps_eval_error_transparently() {
        let err: FuzzdxError = EvalError::MissingInput {
            parameter: "age".into(),
        }
        .into();
        assert!(matches!(err, FuzzdxError::Eval(_)));
        assert_eq!(err.to_string(), "missing input for parameter 'age'");
    }
}
