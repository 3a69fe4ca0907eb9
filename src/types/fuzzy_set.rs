use super::error::{ConfigError, EvalError};
use super::membership::{Interval, MembershipPiece};

/// The parameter a set belongs to, recorded when the set is registered.
/// Used only for domain checks and error messages.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Home {
    pub(crate) parameter: String,
    pub(crate) domain: Interval,
}

/// A named membership function assembled from disjoint pieces.
///
/// Pieces may touch at a shared endpoint but never overlap. Evaluation scans
/// pieces in insertion order and the first piece whose interval contains `x`
/// answers; points covered by no piece have membership `0`.
///
/// # Example
///
/// ```
/// use fuzzdx::{FuzzySet, MembershipPiece};
///
/// let young = FuzzySet::new("young")
///     .with(MembershipPiece::constant(0.0, 29.0, 1.0).unwrap())
///     .unwrap()
///     .with(MembershipPiece::linear((29.0, 1.0), (38.0, 0.0)).unwrap())
///     .unwrap();
///
/// assert_eq!(young.evaluate(20.0).unwrap(), 1.0);
/// assert_eq!(young.evaluate(50.0).unwrap(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzySet {
    name: String,
    pieces: Vec<MembershipPiece>,
    pub(crate) home: Option<Home>,
}

impl FuzzySet {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            pieces: Vec::new(),
            home: None,
        }
    }

    /// A set holding membership `1` at exactly one integer-coded category.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPiece`] if `code` is not finite.
    pub fn categorical(name: &str, code: f64) -> Result<Self, ConfigError> {
        Self::new(name).with(MembershipPiece::point(code, 1.0)?)
    }

    /// Add a piece.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Overlap`] if the piece intersects an existing
    /// piece anywhere other than a shared endpoint.
    pub fn add(&mut self, piece: MembershipPiece) -> Result<(), ConfigError> {
        let interval = piece.interval();
        if self.pieces.iter().any(|p| p.interval().overlaps(&interval)) {
            return Err(ConfigError::Overlap {
                set: self.name.clone(),
                start: interval.start(),
                end: interval.end(),
            });
        }
        self.pieces.push(piece);
        Ok(())
    }

    /// Builder form of [`add`](Self::add).
    ///
    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn with(mut self, piece: MembershipPiece) -> Result<Self, ConfigError> {
        self.add(piece)?;
        Ok(self)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn pieces(&self) -> &[MembershipPiece] {
        &self.pieces
    }

    /// The smallest interval covering every piece, or `None` for an empty set.
    #[must_use]
    pub fn support(&self) -> Option<Interval> {
        let start = self.pieces.iter().map(|p| p.range().0).reduce(f64::min)?;
        let end = self.pieces.iter().map(|p| p.range().1).reduce(f64::max)?;
        Interval::new(start, end).ok()
    }

    /// Domain of the owning parameter, if the set has been registered with one.
    #[must_use]
    pub fn domain(&self) -> Option<Interval> {
        self.home.as_ref().map(|h| h.domain)
    }

    /// Membership degree of `x`.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::OutOfRange`] if the set belongs to a parameter and
    /// `x` lies outside that parameter's domain.
    pub fn evaluate(&self, x: f64) -> Result<f64, EvalError> {
        if let Some(home) = &self.home {
            if !home.domain.contains(x) {
                return Err(EvalError::OutOfRange {
                    parameter: home.parameter.clone(),
                    value: x,
                    start: home.domain.start(),
                    end: home.domain.end(),
                });
            }
        }
        Ok(self
            .pieces
            .iter()
            .find(|p| p.interval().contains(x))
            .map_or(0.0, |p| p.value_at(x)))
    }

    /// Membership of `x` clipped to `ceiling`.
    ///
    /// # Errors
    ///
    /// See [`evaluate`](Self::evaluate).
    pub fn cut(&self, x: f64, ceiling: f64) -> Result<f64, EvalError> {
        Ok(self.evaluate(x)?.min(ceiling))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn young() -> FuzzySet {
        FuzzySet::new("young")
            .with(MembershipPiece::constant(0.0, 29.0, 1.0).unwrap())
            .unwrap()
            .with(MembershipPiece::linear((29.0, 1.0), (38.0, 0.0)).unwrap())
            .unwrap()
    }

    #[test]
    fn adjacent_pieces_are_accepted() {
        let set = young();
        assert_eq!(set.pieces().len(), 2);
        assert_eq!(set.evaluate(29.0).unwrap(), 1.0);
    }

    #[test]
    fn overlapping_piece_is_rejected() {
        let mut set = young();
        let err = set
            .add(MembershipPiece::linear((35.0, 0.0), (40.0, 1.0)).unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Overlap {
                set: "young".into(),
                start: 35.0,
                end: 40.0
            }
        );
        assert_eq!(set.pieces().len(), 2);
    }

    #[test]
    fn identical_piece_is_rejected() {
        let mut set = young();
        assert!(set
            .add(MembershipPiece::constant(0.0, 29.0, 1.0).unwrap())
            .is_err());
    }

    #[test]
    fn outside_support_is_zero() {
        let set = young();
        assert_eq!(set.evaluate(60.0).unwrap(), 0.0);
        assert_eq!(set.evaluate(-5.0).unwrap(), 0.0);
    }

    #[test]
    fn detached_set_never_range_errors() {
        let set = young();
        assert_eq!(set.evaluate(1.0e9).unwrap(), 0.0);
    }

    #[test]
    fn outside_home_domain_is_range_error() {
        let mut set = young();
        set.home = Some(Home {
            parameter: "age".into(),
            domain: Interval::new(0.0, 100.0).unwrap(),
        });
        assert!(matches!(
            set.evaluate(101.0),
            Err(EvalError::OutOfRange { ref parameter, .. }) if parameter == "age"
        ));
        assert!(set.evaluate(f64::NAN).is_err());
        assert_eq!(set.evaluate(100.0).unwrap(), 0.0);
    }

    #[test]
    fn categorical_set_matches_exact_code() {
        let set = FuzzySet::categorical("asymptomatic", 4.0).unwrap();
        assert_eq!(set.evaluate(4.0).unwrap(), 1.0);
        assert_eq!(set.evaluate(3.0).unwrap(), 0.0);
        assert_eq!(set.evaluate(4.5).unwrap(), 0.0);
    }

    #[test]
    fn cut_clips_to_ceiling() {
        let set = young();
        assert_eq!(set.cut(10.0, 0.3).unwrap(), 0.3);
        assert_eq!(set.cut(60.0, 0.3).unwrap(), 0.0);
    }

    #[test]
    fn support_spans_all_pieces() {
        let support = young().support().unwrap();
        assert_eq!((support.start(), support.end()), (0.0, 38.0));
        assert_eq!(FuzzySet::new("empty").support(), None);
    }

    #[test]
    fn evaluation_is_repeatable() {
        let set = young();
        let first = set.evaluate(33.5).unwrap();
        for _ in 0..10 {
            assert_eq!(set.evaluate(33.5).unwrap(), first);
        }
    }
}
