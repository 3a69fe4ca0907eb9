use std::collections::HashMap;

use tracing::debug;

use crate::{ConfigError, FuzzyParameter, InferenceEngine, Rule};

/// Freeze parameters and rules into an engine.
///
/// Antecedent parameters are resolved per evaluation so that an unknown
/// parameter surfaces as [`EvalError::UnknownParameter`](crate::EvalError)
/// on the call that needs it; consequents are checked here because they can
/// only ever name the output parameter.
pub(crate) fn compile(
    inputs: Vec<FuzzyParameter>,
    output: Option<FuzzyParameter>,
    rules: Vec<Rule>,
) -> Result<InferenceEngine, ConfigError> {
    let output = output.ok_or(ConfigError::MissingOutput)?;
    let inputs = index_inputs(inputs)?;
    check_consequents(&rules, &output)?;

    debug!(
        rules = rules.len(),
        inputs = inputs.len(),
        output = output.external_name(),
        "compiled inference engine"
    );

    Ok(InferenceEngine {
        rules,
        inputs,
        output,
    })
}

fn index_inputs(
    inputs: Vec<FuzzyParameter>,
) -> Result<HashMap<String, FuzzyParameter>, ConfigError> {
    let mut indexed = HashMap::with_capacity(inputs.len());
    for parameter in inputs {
        let name = parameter.external_name().to_owned();
        if indexed.contains_key(&name) {
            return Err(ConfigError::DuplicateParameter { name });
        }
        indexed.insert(name, parameter);
    }
    Ok(indexed)
}

fn check_consequents(rules: &[Rule], output: &FuzzyParameter) -> Result<(), ConfigError> {
    for rule in rules {
        let consequent = rule.consequent();
        if consequent.parameter != output.external_name()
            || output.set(&consequent.fuzzy_set).is_none()
        {
            return Err(ConfigError::UnknownConsequent {
                parameter: consequent.parameter.clone(),
                set: consequent.fuzzy_set.clone(),
            });
        }
    }
    Ok(())
}
