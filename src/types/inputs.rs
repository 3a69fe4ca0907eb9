use std::collections::HashMap;

/// Input vector mapping parameter external names to raw measurements or
/// coded categories.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inputs {
    values: HashMap<String, f64>,
}

impl Inputs {
    /// Create an empty input vector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for a parameter, replacing any earlier value.
    #[must_use]
    pub fn set(mut self, parameter: &str, value: impl Into<f64>) -> Self {
        self.insert(parameter, value.into());
        self
    }

    /// Insert a value (mutable reference version).
    pub fn insert(&mut self, parameter: &str, value: f64) {
        self.values.insert(parameter.to_owned(), value);
    }

    #[must_use]
    pub fn get(&self, parameter: &str) -> Option<f64> {
        self.values.get(parameter).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Inputs {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
