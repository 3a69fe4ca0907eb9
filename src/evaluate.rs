use std::collections::HashMap;
use std::time::Instant;

use tracing::{debug, trace};

use crate::types::EvaluationReport;
use crate::{EvalError, FiringStrengths, FuzzyParameter, Inputs, Rule, RuleTerm};

pub(crate) fn evaluate(
    rules: &[Rule],
    parameters: &HashMap<String, FuzzyParameter>,
    output: &FuzzyParameter,
    inputs: &Inputs,
) -> Result<FiringStrengths, EvalError> {
    run(rules, parameters, output, inputs, None)
}

pub(crate) fn evaluate_detailed(
    rules: &[Rule],
    parameters: &HashMap<String, FuzzyParameter>,
    output: &FuzzyParameter,
    inputs: &Inputs,
) -> Result<EvaluationReport, EvalError> {
    let start = Instant::now();
    let mut rule_strengths = Vec::with_capacity(rules.len());
    let strengths = run(rules, parameters, output, inputs, Some(&mut rule_strengths))?;
    Ok(EvaluationReport::new(
        strengths,
        rule_strengths,
        start.elapsed(),
    ))
}

/// Max-compose every rule into its consequent set, recording per-rule
/// strengths in `record` when given.
fn run(
    rules: &[Rule],
    parameters: &HashMap<String, FuzzyParameter>,
    output: &FuzzyParameter,
    inputs: &Inputs,
    mut record: Option<&mut Vec<(String, f64)>>,
) -> Result<FiringStrengths, EvalError> {
    let mut strengths = FiringStrengths::zeroed(output.set_names());

    for rule in rules {
        let strength = rule_strength(rule, parameters, inputs)?;
        trace!(%rule, strength, "rule evaluated");
        strengths.raise(&rule.consequent().fuzzy_set, strength);
        if let Some(record) = record.as_deref_mut() {
            record.push((rule.to_string(), strength));
        }
    }

    debug!(%strengths, "evaluation finished");
    Ok(strengths)
}

/// Fold the antecedent degrees of one rule with its combinator.
fn rule_strength(
    rule: &Rule,
    parameters: &HashMap<String, FuzzyParameter>,
    inputs: &Inputs,
) -> Result<f64, EvalError> {
    let mut terms = rule.antecedents().iter();
    let Some(first) = terms.next() else {
        return Ok(0.0);
    };
    let mut strength = term_degree(first, parameters, inputs)?;
    if let Some(combinator) = rule.combinator() {
        for term in terms {
            strength = combinator.apply(strength, term_degree(term, parameters, inputs)?);
        }
    }
    Ok(strength)
}

fn term_degree(
    term: &RuleTerm,
    parameters: &HashMap<String, FuzzyParameter>,
    inputs: &Inputs,
) -> Result<f64, EvalError> {
    let parameter = parameters
        .get(&term.parameter)
        .ok_or_else(|| EvalError::UnknownParameter {
            parameter: term.parameter.clone(),
        })?;
    let raw = inputs
        .get(&term.parameter)
        .ok_or_else(|| EvalError::MissingInput {
            parameter: term.parameter.clone(),
        })?;
    let x = parameter.discretization().apply(raw);
    parameter.evaluate_in_set(x, &term.fuzzy_set)
}
