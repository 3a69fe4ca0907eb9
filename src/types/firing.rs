use std::collections::BTreeMap;
use std::fmt;

/// Firing strength of every output set after one evaluation.
///
/// Always holds one entry per output set; sets no rule fired keep `0`.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct FiringStrengths {
    strengths: BTreeMap<String, f64>,
}

impl FiringStrengths {
    pub(crate) fn zeroed<'a>(sets: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            strengths: sets.into_iter().map(|s| (s.to_owned(), 0.0)).collect(),
        }
    }

    /// Max-composition: keep the larger of the current and offered strength.
    pub(crate) fn raise(&mut self, set: &str, strength: f64) {
        if let Some(current) = self.strengths.get_mut(set) {
            if strength > *current {
                *current = strength;
            }
        }
    }

    #[must_use]
    pub fn get(&self, set: &str) -> Option<f64> {
        self.strengths.get(set).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strengths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strengths.is_empty()
    }

    /// Iterate over `(set, strength)` sorted by set name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.strengths.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// The set with the highest strength. Ties go to the first name in order.
    #[must_use]
    pub fn strongest(&self) -> Option<(&str, f64)> {
        self.iter()
            .fold(None, |best: Option<(&str, f64)>, (name, s)| match best {
                Some((_, b)) if b >= s => best,
                _ => Some((name, s)),
            })
    }
}

impl fmt::Display for FiringStrengths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, strength)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name} = {strength:.3}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_has_every_set() {
        let s = FiringStrengths::zeroed(["healthy", "sick_1"]);
        assert_eq!(s.len(), 2);
        assert_eq!(s.get("healthy"), Some(0.0));
        assert_eq!(s.get("sick_9"), None);
    }

    #[test]
    fn raise_keeps_maximum() {
        let mut s = FiringStrengths::zeroed(["healthy"]);
        s.raise("healthy", 0.4);
        s.raise("healthy", 0.2);
        assert_eq!(s.get("healthy"), Some(0.4));
    }

    #[test]
    fn raise_ignores_unknown_set() {
        let mut s = FiringStrengths::zeroed(["healthy"]);
        s.raise("sick_1", 0.9);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn strongest_picks_highest() {
        let mut s = FiringStrengths::zeroed(["healthy", "sick_1", "sick_2"]);
        s.raise("sick_1", 0.7);
        s.raise("sick_2", 0.5);
        assert_eq!(s.strongest(), Some(("sick_1", 0.7)));
    }

    #[test]
    fn display_is_sorted() {
        let mut s = FiringStrengths::zeroed(["sick_1", "healthy"]);
        s.raise("healthy", 1.0);
        assert_eq!(s.to_string(), "healthy = 1.000, sick_1 = 0.000");
    }
}
