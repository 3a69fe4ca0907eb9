use std::fmt;
use std::time::Duration;

use super::firing::FiringStrengths;

/// Detailed evaluation report returned by
/// [`InferenceEngine::evaluate_detailed()`](super::engine::InferenceEngine::evaluate_detailed).
///
/// Contains the aggregated strengths, the strength each rule reached in
/// rule order, and the wall-clock duration of the evaluation.
#[derive(Debug, Clone)]
#[must_use]
pub struct EvaluationReport {
    strengths: FiringStrengths,
    rule_strengths: Vec<(String, f64)>,
    duration: Duration,
}

impl EvaluationReport {
    pub(crate) fn new(
        strengths: FiringStrengths,
        rule_strengths: Vec<(String, f64)>,
        duration: Duration,
    ) -> Self {
        Self {
            strengths,
            rule_strengths,
            duration,
        }
    }

    /// Same as [`InferenceEngine::evaluate()`](super::engine::InferenceEngine::evaluate).
    pub fn strengths(&self) -> &FiringStrengths {
        &self.strengths
    }

    /// `(rule, strength)` for every rule, in rule order.
    #[must_use]
    pub fn rule_strengths(&self) -> &[(String, f64)] {
        &self.rule_strengths
    }

    /// Rules that fired with a strength above zero.
    #[must_use]
    pub fn fired(&self) -> Vec<&str> {
        self.rule_strengths
            .iter()
            .filter(|(_, s)| *s > 0.0)
            .map(|(r, _)| r.as_str())
            .collect()
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "strengths: [{}]", self.strengths)?;
        write!(
            f,
            ", fired: {}/{} rules",
            self.fired().len(),
            self.rule_strengths.len()
        )?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}
