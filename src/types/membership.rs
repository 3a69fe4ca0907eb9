use std::fmt;

use super::error::ConfigError;

/// A closed interval `[start, end]` on the real line with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    start: f64,
    end: f64,
}

impl Interval {
    /// Create an interval.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDomain`] if either bound is not finite or
    /// `start > end`.
    pub fn new(start: f64, end: f64) -> Result<Self, ConfigError> {
        if !start.is_finite() || !end.is_finite() || start > end {
            return Err(ConfigError::InvalidDomain { start, end });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Whether `x` lies in `[start, end]`. `NaN` is never contained.
    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        self.start <= x && x <= self.end
    }

    /// Whether `other` lies entirely inside this interval.
    #[must_use]
    pub fn encloses(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Whether the two intervals share more than a common endpoint.
    ///
    /// Touching at a coordinate that is an endpoint of both intervals is
    /// allowed; a zero-width interval sitting strictly inside the other is not.
    #[must_use]
    pub fn overlaps(&self, other: &Interval) -> bool {
        let lo = self.start.max(other.start);
        let hi = self.end.min(other.end);
        if lo < hi {
            return true;
        }
        if lo > hi {
            return false;
        }
        !(self.is_endpoint(lo) && other.is_endpoint(lo))
    }

    fn is_endpoint(&self, x: f64) -> bool {
        x == self.start || x == self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// One segment of a fuzzy set's membership function.
///
/// Each piece covers an interval and is only meaningful inside it; the owning
/// [`FuzzySet`](super::FuzzySet) decides which piece answers for a given `x`.
#[derive(Debug, Clone, PartialEq)]
pub enum MembershipPiece {
    /// A plateau holding `value` across `interval`.
    Constant { interval: Interval, value: f64 },
    /// A straight line between two knots, stored left to right.
    Linear {
        from: (f64, f64),
        to: (f64, f64),
        slope: f64,
        intercept: f64,
    },
    /// A single categorical code with membership `value`.
    Point { x: f64, value: f64 },
}

impl MembershipPiece {
    /// A plateau over `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the interval is invalid or `value` is not a
    /// membership degree in `[0, 1]`.
    pub fn constant(start: f64, end: f64, value: f64) -> Result<Self, ConfigError> {
        let interval = Interval::new(start, end)?;
        check_degree(value)?;
        Ok(Self::Constant { interval, value })
    }

    /// The line through two knots. Knots may be given in either order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DegenerateLine`] if both knots share an x
    /// coordinate, or [`ConfigError::InvalidPiece`] for non-finite
    /// coordinates and degrees outside `[0, 1]`.
    pub fn linear(p1: (f64, f64), p2: (f64, f64)) -> Result<Self, ConfigError> {
        if !p1.0.is_finite() || !p2.0.is_finite() {
            return Err(ConfigError::InvalidPiece {
                reason: format!("non-finite knot x in ({}, {})", p1.0, p2.0),
            });
        }
        check_degree(p1.1)?;
        check_degree(p2.1)?;
        if p1.0 == p2.0 {
            return Err(ConfigError::DegenerateLine { x: p1.0 });
        }
        let (from, to) = if p1.0 < p2.0 { (p1, p2) } else { (p2, p1) };
        let slope = (to.1 - from.1) / (to.0 - from.0);
        let intercept = from.1 - slope * from.0;
        Ok(Self::Linear {
            from,
            to,
            slope,
            intercept,
        })
    }

    /// A zero-width piece at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPiece`] if `x` is not finite or `value`
    /// is not in `[0, 1]`.
    pub fn point(x: f64, value: f64) -> Result<Self, ConfigError> {
        if !x.is_finite() {
            return Err(ConfigError::InvalidPiece {
                reason: format!("non-finite point {x}"),
            });
        }
        check_degree(value)?;
        Ok(Self::Point { x, value })
    }

    /// The interval this piece covers.
    #[must_use]
    pub fn interval(&self) -> Interval {
        match *self {
            Self::Constant { interval, .. } => interval,
            Self::Linear { from, to, .. } => Interval {
                start: from.0,
                end: to.0,
            },
            Self::Point { x, .. } => Interval { start: x, end: x },
        }
    }

    /// `(start, end)` of [`interval()`](Self::interval).
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        let interval = self.interval();
        (interval.start, interval.end)
    }

    /// Membership at `x`. Only meaningful when `x` lies in [`range()`](Self::range).
    ///
    /// Linear pieces return their knot degrees exactly at the knots so that
    /// adjacent pieces agree on shared boundaries.
    #[must_use]
    pub fn value_at(&self, x: f64) -> f64 {
        match *self {
            Self::Constant { value, .. } | Self::Point { value, .. } => value,
            Self::Linear {
                from, to, slope, ..
            } => {
                if x == from.0 {
                    from.1
                } else if x == to.0 {
                    to.1
                } else {
                    from.1 + slope * (x - from.0)
                }
            }
        }
    }
}

fn check_degree(value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidPiece {
            reason: format!("membership degree {value} is outside [0, 1]"),
        })
    }
}
