use std::collections::HashMap;
use std::fmt;

use super::error::{ConfigError, EvalError};
use super::evaluation_report::EvaluationReport;
use super::firing::FiringStrengths;
use super::inputs::Inputs;
use super::parameter::FuzzyParameter;
use super::rule::{Combinator, Rule, RuleTerm};
use crate::defuzz::{CenterOfMass, Diagnosis};

/// Builder for constructing an [`InferenceEngine`].
///
/// Parameters and rules are collected, then validated and frozen by
/// [`compile()`](Self::compile).
///
/// # Example
///
/// ```
/// use fuzzdx::{FuzzyParameter, Inputs, InferenceEngineBuilder};
///
/// let mut age = FuzzyParameter::new("Age", "age", 0.0, 100.0).unwrap();
/// age.create_piecewise_set("young", &[(0.0, 1.0), (29.0, 1.0), (38.0, 0.0)]).unwrap();
///
/// let mut health = FuzzyParameter::new("Health", "health", 0.0, 4.0).unwrap();
/// health.create_piecewise_set("healthy", &[(0.0, 1.0), (0.25, 1.0), (1.0, 0.0)]).unwrap();
/// health.create_piecewise_set("sick", &[(0.0, 0.0), (1.0, 1.0), (4.0, 1.0)]).unwrap();
///
/// let engine = InferenceEngineBuilder::new()
///     .input(age)
///     .output(health)
///     .rule(|r| r.when("age", "young").then("health", "healthy"))
///     .compile()
///     .unwrap();
///
/// let strengths = engine.evaluate(&Inputs::new().set("age", 20)).unwrap();
/// assert_eq!(strengths.get("healthy"), Some(1.0));
/// assert_eq!(strengths.get("sick"), Some(0.0));
/// ```
#[derive(Debug, Default)]
pub struct InferenceEngineBuilder {
    inputs: Vec<FuzzyParameter>,
    output: Option<FuzzyParameter>,
    rules: Vec<RuleDraft>,
}

#[derive(Debug)]
enum RuleDraft {
    Built(Rule),
    Pending(RuleBuilder),
}

/// Intermediate builder passed to the rule definition closure.
#[derive(Debug, Default)]
pub struct RuleBuilder {
    label: Option<String>,
    antecedents: Vec<RuleTerm>,
    combinators: Vec<Combinator>,
    consequent: Option<RuleTerm>,
}

impl InferenceEngineBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an input parameter under its external name.
    #[must_use]
    pub fn input(mut self, parameter: FuzzyParameter) -> Self {
        self.inputs.push(parameter);
        self
    }

    #[must_use]
    pub fn inputs(mut self, parameters: impl IntoIterator<Item = FuzzyParameter>) -> Self {
        self.inputs.extend(parameters);
        self
    }

    /// Set the output parameter whose sets rules conclude into.
    #[must_use]
    pub fn output(mut self, parameter: FuzzyParameter) -> Self {
        self.output = Some(parameter);
        self
    }

    /// Define a rule. The closure must call `.then(..)` to set the consequent.
    #[must_use]
    pub fn rule(mut self, f: impl FnOnce(RuleBuilder) -> RuleBuilder) -> Self {
        self.rules.push(RuleDraft::Pending(f(RuleBuilder::default())));
        self
    }

    /// Add an already-built rule, e.g. one produced by the rule-text parser.
    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(RuleDraft::Built(rule));
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules.into_iter().map(RuleDraft::Built));
        self
    }

    /// Validate and freeze the engine.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a rule is malformed, the output parameter is
    /// missing, an input name is registered twice, or a consequent does not
    /// name a set of the output parameter.
    pub fn compile(self) -> Result<InferenceEngine, ConfigError> {
        let rules = self
            .rules
            .into_iter()
            .map(|draft| match draft {
                RuleDraft::Built(rule) => Ok(rule),
                RuleDraft::Pending(builder) => builder.build(),
            })
            .collect::<Result<Vec<_>, _>>()?;
        crate::compile::compile(self.inputs, self.output, rules)
    }
}

impl RuleBuilder {
    /// First antecedent term.
    #[must_use]
    pub fn when(self, parameter: &str, fuzzy_set: &str) -> Self {
        self.push(None, parameter, fuzzy_set)
    }

    #[must_use]
    pub fn and(self, parameter: &str, fuzzy_set: &str) -> Self {
        self.push(Some(Combinator::And), parameter, fuzzy_set)
    }

    #[must_use]
    pub fn or(self, parameter: &str, fuzzy_set: &str) -> Self {
        self.push(Some(Combinator::Or), parameter, fuzzy_set)
    }

    /// Set the consequent term.
    #[must_use]
    pub fn then(mut self, parameter: &str, fuzzy_set: &str) -> Self {
        self.consequent = Some(RuleTerm::new(parameter, fuzzy_set));
        self
    }

    #[must_use]
    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_owned());
        self
    }

    fn push(mut self, combinator: Option<Combinator>, parameter: &str, fuzzy_set: &str) -> Self {
        if let (false, Some(c)) = (self.antecedents.is_empty(), combinator) {
            self.combinators.push(c);
        }
        self.antecedents.push(RuleTerm::new(parameter, fuzzy_set));
        self
    }

    fn build(self) -> Result<Rule, ConfigError> {
        let consequent = self.consequent.ok_or(ConfigError::MissingConsequent)?;
        let terms = self.antecedents.len();
        if terms > 1 && self.combinators.len() + 1 < terms {
            return Err(ConfigError::MissingCombinator { terms });
        }
        let combinator = self.combinators.first().copied();
        if self.combinators.iter().any(|c| Some(*c) != combinator) {
            return Err(ConfigError::MixedCombinators);
        }
        let rule = Rule::new(self.antecedents, combinator, consequent)?;
        Ok(match self.label {
            Some(label) => rule.with_label(&label),
            None => rule,
        })
    }
}

/// A compiled, immutable fuzzy rule base. Thread-safe and designed to live
/// behind `Arc`; every evaluation works on caller-local state.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    pub(crate) rules: Vec<Rule>,
    pub(crate) inputs: HashMap<String, FuzzyParameter>,
    pub(crate) output: FuzzyParameter,
}

impl InferenceEngine {
    #[must_use]
    pub fn builder() -> InferenceEngineBuilder {
        InferenceEngineBuilder::new()
    }

    /// Evaluate every rule against `inputs` and aggregate by maximum per
    /// output set.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError`] on the first term whose parameter is unknown,
    /// whose input is missing or out of range, or whose set does not exist.
    /// No partial result is returned.
    pub fn evaluate(&self, inputs: &Inputs) -> Result<FiringStrengths, EvalError> {
        crate::evaluate::evaluate(&self.rules, &self.inputs, &self.output, inputs)
    }

    /// Evaluate with a per-rule trace.
    ///
    /// # Errors
    ///
    /// Same as [`evaluate()`](Self::evaluate).
    pub fn evaluate_detailed(&self, inputs: &Inputs) -> Result<EvaluationReport, EvalError> {
        crate::evaluate::evaluate_detailed(&self.rules, &self.inputs, &self.output, inputs)
    }

    /// Evaluate and defuzzify into a single score.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError`] from evaluation, or [`EvalError::OutOfRange`] if
    /// the defuzzifier samples outside the output domain.
    pub fn diagnose(
        &self,
        inputs: &Inputs,
        defuzzifier: &CenterOfMass,
    ) -> Result<Diagnosis, EvalError> {
        let strengths = self.evaluate(inputs)?;
        let score = defuzzifier.defuzzify_strengths(&self.output, &strengths)?;
        Ok(Diagnosis::new(score, strengths))
    }

    /// Parse rule text (one rule per line) and compile it against the given
    /// parameters.
    ///
    /// # Errors
    ///
    /// Returns [`FuzzdxError`](crate::FuzzdxError) on parse or configuration failure.
    pub fn from_rules(
        text: &str,
        inputs: impl IntoIterator<Item = FuzzyParameter>,
        output: FuzzyParameter,
    ) -> Result<Self, crate::FuzzdxError> {
        let rules = crate::parse::parse_rules(text)?;
        let engine = InferenceEngineBuilder::new()
            .inputs(inputs)
            .output(output)
            .with_rules(rules)
            .compile()?;
        Ok(engine)
    }

    /// Read a rule file and compile it against the given parameters.
    ///
    /// # Errors
    ///
    /// Returns [`FuzzdxError`](crate::FuzzdxError) on I/O, parse, or configuration failure.
    pub fn from_file(
        path: impl AsRef<std::path::Path>,
        inputs: impl IntoIterator<Item = FuzzyParameter>,
        output: FuzzyParameter,
    ) -> Result<Self, crate::FuzzdxError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_rules(&text, inputs, output)
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn input(&self, external_name: &str) -> Option<&FuzzyParameter> {
        self.inputs.get(external_name)
    }

    /// External names of the input parameters, sorted.
    #[must_use]
    pub fn input_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.inputs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn output(&self) -> &FuzzyParameter {
        &self.output
    }
}

impl fmt::Display for InferenceEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "InferenceEngine({} rules, {} inputs, output '{}' with {} sets)",
            self.rules.len(),
            self.inputs.len(),
            self.output.external_name(),
            self.output.set_names().len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn age() -> FuzzyParameter {
        let mut age = FuzzyParameter::new("Age", "age", 0.0, 100.0).unwrap();
        age.create_piecewise_set("young", &[(0.0, 1.0), (29.0, 1.0), (38.0, 0.0)])
            .unwrap();
        age.create_piecewise_set("old", &[(40.0, 0.0), (48.0, 1.0), (100.0, 1.0)])
            .unwrap();
        age
    }

    fn health() -> FuzzyParameter {
        let mut health = FuzzyParameter::new("Health", "health", 0.0, 4.0).unwrap();
        health
            .create_piecewise_set("healthy", &[(0.0, 1.0), (0.25, 1.0), (1.0, 0.0)])
            .unwrap();
        health
            .create_piecewise_set("sick", &[(0.0, 0.0), (1.0, 1.0), (4.0, 1.0)])
            .unwrap();
        health
    }

    #[test]
    fn builder_collects_rules_in_order() {
        let engine = InferenceEngine::builder()
            .input(age())
            .output(health())
            .rule(|r| r.when("age", "young").then("health", "healthy"))
            .rule(|r| r.when("age", "old").then("health", "sick").label("2"))
            .compile()
            .unwrap();
        assert_eq!(engine.rules().len(), 2);
        assert_eq!(engine.rules()[1].label(), Some("2"));
        assert_eq!(engine.input_names(), vec!["age"]);
        assert_eq!(engine.output().external_name(), "health");
    }

    #[test]
    fn rule_without_then_is_rejected() {
        let err = InferenceEngine::builder()
            .input(age())
            .output(health())
            .rule(|r| r.when("age", "young"))
            .compile()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingConsequent);
    }

    #[test]
    fn mixed_builder_combinators_are_rejected() {
        let err = InferenceEngine::builder()
            .input(age())
            .output(health())
            .rule(|r| {
                r.when("age", "young")
                    .and("age", "old")
                    .or("age", "young")
                    .then("health", "sick")
            })
            .compile()
            .unwrap_err();
        assert_eq!(err, ConfigError::MixedCombinators);
    }

    #[test]
    fn repeated_when_needs_combinator() {
        let err = InferenceEngine::builder()
            .input(age())
            .output(health())
            .rule(|r| {
                r.when("age", "young")
                    .when("age", "old")
                    .then("health", "sick")
            })
            .compile()
            .unwrap_err();
        assert_eq!(err, ConfigError::MissingCombinator { terms: 2 });
    }

    #[test]
    fn leading_and_acts_as_when() {
        let engine = InferenceEngine::builder()
            .input(age())
            .output(health())
            .rule(|r| r.and("age", "young").then("health", "healthy"))
            .compile()
            .unwrap();
        assert_eq!(engine.rules()[0].combinator(), None);
    }

    #[test]
    fn display_summary() {
        let engine = InferenceEngine::builder()
            .input(age())
            .output(health())
            .rule(|r| r.when("age", "young").then("health", "healthy"))
            .compile()
            .unwrap();
        assert_eq!(
            engine.to_string(),
            "InferenceEngine(1 rules, 1 inputs, output 'health' with 2 sets)"
        );
    }

    #[test]
    fn from_rules_parses_and_compiles() {
        let text = "IF (age IS young) THEN health IS healthy;\nIF (age IS old) THEN health IS sick;\n";
        let engine = InferenceEngine::from_rules(text, [age()], health()).unwrap();
        assert_eq!(engine.rules().len(), 2);
        let strengths = engine.evaluate(&Inputs::new().set("age", 70)).unwrap();
        assert_eq!(strengths.get("sick"), Some(1.0));
        assert_eq!(strengths.get("healthy"), Some(0.0));
    }

    #[test]
    fn from_file_missing_path_is_io_error() {
        let err = InferenceEngine::from_file("/nonexistent/heart.fcl", [age()], health())
            .unwrap_err();
        assert!(matches!(err, crate::FuzzdxError::Io(_)));
    }
}
