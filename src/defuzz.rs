//! Defuzzification of aggregated output sets into a single score.

use std::fmt;

use tracing::debug;

use crate::clinical::Severity;
use crate::{ConfigError, EvalError, FiringStrengths, FuzzyParameter, FuzzySet};

/// An output set paired with the firing strength it is clipped to.
#[derive(Debug, Clone, Copy)]
pub struct ClippedSet<'a> {
    pub set: &'a FuzzySet,
    pub cut: f64,
}

/// Discretized center-of-mass defuzzifier over `[lo, hi]`.
///
/// Samples `lo, lo + stride, lo + 2*stride, ...` up to and including `hi`
/// and sums `envelope(x) * stride`, where the envelope is the maximum over
/// all output sets of each set's membership clipped to its firing strength.
/// The result is that raw weighted area; it is not divided by the total
/// weight.
///
/// # Example
///
/// ```
/// use fuzzdx::{CenterOfMass, ClippedSet, FuzzySet, MembershipPiece};
///
/// let flat = FuzzySet::new("flat")
///     .with(MembershipPiece::constant(0.0, 1.0, 1.0).unwrap())
///     .unwrap();
/// let com = CenterOfMass::new(0.0, 1.0, 0.25).unwrap();
///
/// // five samples at 0, 0.25, 0.5, 0.75, 1.0, each clipped to 0.5
/// let area = com.defuzzify(&[ClippedSet { set: &flat, cut: 0.5 }]).unwrap();
/// assert!((area - 0.625).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterOfMass {
    lo: f64,
    hi: f64,
    stride: f64,
}

/// Slack when counting samples so `hi` is kept despite rounding in `(hi - lo) / stride`.
const SAMPLE_EPSILON: f64 = 1e-9;

impl CenterOfMass {
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveStride`] unless `stride > 0`,
    /// [`ConfigError::InvalidDomain`] for non-finite bounds or `lo > hi`, and
    /// [`ConfigError::TooManySamples`] when the sample count would not fit in
    /// a `usize`.
    #[allow(clippy::cast_precision_loss)]
    pub fn new(lo: f64, hi: f64, stride: f64) -> Result<Self, ConfigError> {
        if !(stride > 0.0 && stride.is_finite()) {
            return Err(ConfigError::NonPositiveStride { stride });
        }
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(ConfigError::InvalidDomain { start: lo, end: hi });
        }
        let steps = (hi - lo) / stride + SAMPLE_EPSILON;
        if !steps.is_finite() || steps >= usize::MAX as f64 {
            return Err(ConfigError::TooManySamples { lo, hi, stride });
        }
        Ok(Self { lo, hi, stride })
    }

    #[must_use]
    pub fn lo(&self) -> f64 {
        self.lo
    }

    #[must_use]
    pub fn hi(&self) -> f64 {
        self.hi
    }

    #[must_use]
    pub fn stride(&self) -> f64 {
        self.stride
    }

    /// Number of sample points, including both ends when `hi - lo` is a
    /// whole number of strides.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn sample_count(&self) -> usize {
        ((self.hi - self.lo) / self.stride + SAMPLE_EPSILON).floor() as usize + 1
    }

    /// Sample points, computed by index so error does not accumulate.
    #[allow(clippy::cast_precision_loss)]
    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.sample_count()).map(move |i| (self.lo + i as f64 * self.stride).min(self.hi))
    }

    /// Weighted area under the clipped envelope. An empty slice yields `0`.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::OutOfRange`] if a sample falls outside the domain
    /// of a set's parameter.
    pub fn defuzzify(&self, data: &[ClippedSet<'_>]) -> Result<f64, EvalError> {
        let mut total_area = 0.0;
        for x in self.samples() {
            let mut envelope = 0.0_f64;
            for clipped in data {
                envelope = envelope.max(clipped.set.cut(x, clipped.cut)?);
            }
            total_area += envelope * self.stride;
        }
        debug!(
            total_area,
            samples = self.sample_count(),
            stride = self.stride,
            "defuzzified"
        );
        Ok(total_area)
    }

    /// Defuzzify every set of `output`, clipped to its entry in `strengths`.
    /// Sets missing from `strengths` are clipped to `0`.
    ///
    /// # Errors
    ///
    /// See [`defuzzify`](Self::defuzzify).
    pub fn defuzzify_strengths(
        &self,
        output: &FuzzyParameter,
        strengths: &FiringStrengths,
    ) -> Result<f64, EvalError> {
        let data: Vec<ClippedSet<'_>> = output
            .sets()
            .map(|set| ClippedSet {
                set,
                cut: strengths.get(set.name()).unwrap_or(0.0),
            })
            .collect();
        self.defuzzify(&data)
    }
}

/// Score and strengths produced by
/// [`InferenceEngine::diagnose()`](crate::InferenceEngine::diagnose).
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct Diagnosis {
    score: f64,
    strengths: FiringStrengths,
}

impl Diagnosis {
    pub(crate) fn new(score: f64, strengths: FiringStrengths) -> Self {
        Self { score, strengths }
    }

    #[must_use]
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn strengths(&self) -> &FiringStrengths {
        &self.strengths
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        Severity::from_score(self.score)
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.4}", self.severity(), self.score)
    }
}
