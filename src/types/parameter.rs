use std::collections::{BTreeMap, HashMap};

use super::error::{ConfigError, EvalError};
use super::fuzzy_set::{FuzzySet, Home};
use super::membership::{Interval, MembershipPiece};

/// How a raw input value is coerced before it is fuzzified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Discretization {
    /// Use the value as given.
    #[default]
    Continuous,
    /// Truncate toward zero, for integer-coded measurements and categories.
    Integer,
}

impl Discretization {
    #[must_use]
    pub fn apply(self, raw: f64) -> f64 {
        match self {
            Self::Continuous => raw,
            Self::Integer => raw.trunc(),
        }
    }
}

/// A linguistic variable: a group of named fuzzy sets over one domain.
///
/// `name` is a human-readable label; `external_name` is the identifier rule
/// text uses to refer to this parameter.
///
/// # Example
///
/// ```
/// use fuzzdx::FuzzyParameter;
///
/// let mut age = FuzzyParameter::new("Age", "age", 0.0, 100.0).unwrap();
/// age.create_piecewise_set("young", &[(0.0, 1.0), (29.0, 1.0), (38.0, 0.0)]).unwrap();
/// age.create_piecewise_set("mild", &[(33.0, 0.0), (38.0, 1.0), (45.0, 0.0)]).unwrap();
///
/// assert_eq!(age.evaluate_in_set(38.0, "young").unwrap(), 0.0);
/// assert_eq!(age.evaluate_in_set(38.0, "mild").unwrap(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyParameter {
    name: String,
    external_name: String,
    domain: Interval,
    discretization: Discretization,
    sets: HashMap<String, FuzzySet>,
}

impl FuzzyParameter {
    /// Create a parameter with no sets over `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDomain`] for a reversed or non-finite domain.
    pub fn new(
        name: &str,
        external_name: &str,
        start: f64,
        end: f64,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            name: name.to_owned(),
            external_name: external_name.to_owned(),
            domain: Interval::new(start, end)?,
            discretization: Discretization::default(),
            sets: HashMap::new(),
        })
    }

    #[must_use]
    pub fn with_discretization(mut self, discretization: Discretization) -> Self {
        self.discretization = discretization;
        self
    }

    /// Build a set from consecutive `(x, degree)` knots, each pair joined by a
    /// linear piece, and register it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if fewer than two knots are given, two
    /// consecutive knots share an x coordinate, the knots leave the domain,
    /// or `name` is already registered.
    pub fn create_piecewise_set(
        &mut self,
        name: &str,
        points: &[(f64, f64)],
    ) -> Result<(), ConfigError> {
        if points.len() < 2 {
            return Err(ConfigError::TooFewKnots {
                set: name.to_owned(),
                count: points.len(),
            });
        }
        let mut set = FuzzySet::new(name);
        for pair in points.windows(2) {
            set.add(MembershipPiece::linear(pair[0], pair[1])?)?;
        }
        self.add_set(set)
    }

    /// Register a pre-built set, typically a categorical one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateSet`] if a set with the same name
    /// exists, or [`ConfigError::PieceOutsideDomain`] if any piece leaves the
    /// parameter's domain.
    pub fn add_set(&mut self, mut set: FuzzySet) -> Result<(), ConfigError> {
        if self.sets.contains_key(set.name()) {
            return Err(ConfigError::DuplicateSet {
                parameter: self.external_name.clone(),
                set: set.name().to_owned(),
            });
        }
        if set
            .pieces()
            .iter()
            .any(|p| !self.domain.encloses(&p.interval()))
        {
            return Err(ConfigError::PieceOutsideDomain {
                parameter: self.external_name.clone(),
                set: set.name().to_owned(),
            });
        }
        set.home = Some(Home {
            parameter: self.external_name.clone(),
            domain: self.domain,
        });
        self.sets.insert(set.name().to_owned(), set);
        Ok(())
    }

    /// Membership of `x` in every set of this parameter.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::OutOfRange`] if `x` is outside the domain.
    pub fn evaluate(&self, x: f64) -> Result<BTreeMap<String, f64>, EvalError> {
        self.check_domain(x)?;
        self.sets
            .iter()
            .map(|(name, set)| Ok((name.clone(), set.evaluate(x)?)))
            .collect()
    }

    /// Membership of `x` in the set called `set_name`.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::UnknownSet`] if the set does not exist, or
    /// [`EvalError::OutOfRange`] if `x` is outside the domain.
    pub fn evaluate_in_set(&self, x: f64, set_name: &str) -> Result<f64, EvalError> {
        let set = self
            .sets
            .get(set_name)
            .ok_or_else(|| EvalError::UnknownSet {
                parameter: self.external_name.clone(),
                set: set_name.to_owned(),
            })?;
        set.evaluate(x)
    }

    fn check_domain(&self, x: f64) -> Result<(), EvalError> {
        if self.domain.contains(x) {
            Ok(())
        } else {
            Err(EvalError::OutOfRange {
                parameter: self.external_name.clone(),
                value: x,
                start: self.domain.start(),
                end: self.domain.end(),
            })
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn external_name(&self) -> &str {
        &self.external_name
    }

    #[must_use]
    pub fn domain(&self) -> Interval {
        self.domain
    }

    #[must_use]
    pub fn discretization(&self) -> Discretization {
        self.discretization
    }

    #[must_use]
    pub fn set(&self, name: &str) -> Option<&FuzzySet> {
        self.sets.get(name)
    }

    /// Iterate over the sets in no particular order.
    pub fn sets(&self) -> impl Iterator<Item = &FuzzySet> {
        self.sets.values()
    }

    /// Set names in sorted order.
    #[must_use]
    pub fn set_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
