use std::fmt;

use super::error::ConfigError;

/// A `<parameter> IS <set>` reference inside a rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleTerm {
    pub parameter: String,
    pub fuzzy_set: String,
}

impl RuleTerm {
    #[must_use]
    pub fn new(parameter: &str, fuzzy_set: &str) -> Self {
        Self {
            parameter: parameter.to_owned(),
            fuzzy_set: fuzzy_set.to_owned(),
        }
    }
}

impl fmt::Display for RuleTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} IS {}", self.parameter, self.fuzzy_set)
    }
}

/// Operator folding antecedent degrees left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Fuzzy AND, the minimum.
    And,
    /// Fuzzy OR, the maximum.
    Or,
}

impl Combinator {
    #[must_use]
    pub fn apply(self, running: f64, term: f64) -> f64 {
        match self {
            Self::And => running.min(term),
            Self::Or => running.max(term),
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
        }
    }
}

/// An `IF ... THEN ...` rule with one combinator shared by all antecedents.
///
/// Produced by the rule-text parser or by
/// [`InferenceEngineBuilder::rule()`](super::InferenceEngineBuilder::rule).
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    label: Option<String>,
    antecedents: Vec<RuleTerm>,
    combinator: Option<Combinator>,
    consequent: RuleTerm,
}

impl Rule {
    /// Build a rule. A combinator given for a single antecedent is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyAntecedent`] for no antecedents and
    /// [`ConfigError::MissingCombinator`] for several antecedents without one.
    pub fn new(
        antecedents: Vec<RuleTerm>,
        combinator: Option<Combinator>,
        consequent: RuleTerm,
    ) -> Result<Self, ConfigError> {
        let combinator = match (antecedents.len(), combinator) {
            (0, _) => return Err(ConfigError::EmptyAntecedent),
            (1, _) => None,
            (_, Some(c)) => Some(c),
            (terms, None) => return Err(ConfigError::MissingCombinator { terms }),
        };
        Ok(Self {
            label: None,
            antecedents,
            combinator,
            consequent,
        })
    }

    #[must_use]
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_owned());
        self
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    #[must_use]
    pub fn antecedents(&self) -> &[RuleTerm] {
        &self.antecedents
    }

    #[must_use]
    pub fn combinator(&self) -> Option<Combinator> {
        self.combinator
    }

    #[must_use]
    pub fn consequent(&self) -> &RuleTerm {
        &self.consequent
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = &self.label {
            write!(f, "RULE {label} : ")?;
        }
        write!(f, "IF ")?;
        for (i, term) in self.antecedents.iter().enumerate() {
            if i > 0 {
                if let Some(c) = self.combinator {
                    write!(f, " {c} ")?;
                }
            }
            write!(f, "{term}")?;
        }
        write!(f, " THEN {}", self.consequent)
    }
}
