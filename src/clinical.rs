//! Heart-disease catalogue: the clinical input parameters, the `health`
//! output parameter, the bundled rule base and severity labels.
//!
//! Integer-coded fields (age, blood pressure, cholesterol, blood sugar,
//! maximum heart rate) and categorical codes are truncated before
//! fuzzification; ECG readings and ST depression (`old_peak`) are used as
//! given.

use std::fmt;

use tracing::warn;

use crate::{
    CenterOfMass, ConfigError, Discretization, FuzzdxError, FuzzyParameter, FuzzySet,
    InferenceEngine,
};

/// The bundled rule base, one rule per line.
pub const RULES: &str = include_str!("../rules/heart.fcl");

type Knots<'a> = &'a [(f64, f64)];

fn piecewise(
    name: &str,
    external_name: &str,
    domain: (f64, f64),
    discretization: Discretization,
    sets: &[(&str, Knots<'_>)],
) -> Result<FuzzyParameter, ConfigError> {
    let mut parameter = FuzzyParameter::new(name, external_name, domain.0, domain.1)?
        .with_discretization(discretization);
    for (set, knots) in sets {
        parameter.create_piecewise_set(set, knots)?;
    }
    Ok(parameter)
}

fn categorical(
    name: &str,
    external_name: &str,
    domain: (f64, f64),
    codes: &[(&str, f64)],
) -> Result<FuzzyParameter, ConfigError> {
    let mut parameter = FuzzyParameter::new(name, external_name, domain.0, domain.1)?
        .with_discretization(Discretization::Integer);
    for (set, code) in codes {
        parameter.add_set(FuzzySet::categorical(set, *code)?)?;
    }
    Ok(parameter)
}

/// Age in years.
///
/// `veryold` keeps full membership from 60 up to the end of the domain. The
/// historical definition stopped at the `(60, 1)` knot, which left every age
/// above 60 with no membership in any set.
///
/// # Errors
///
/// Never fails for the bundled definition; the signature mirrors the other
/// constructors.
pub fn age() -> Result<FuzzyParameter, ConfigError> {
    piecewise(
        "Age",
        "age",
        (0.0, 100.0),
        Discretization::Integer,
        &[
            ("young", &[(0.0, 1.0), (29.0, 1.0), (38.0, 0.0)]),
            ("mild", &[(33.0, 0.0), (38.0, 1.0), (45.0, 0.0)]),
            ("old", &[(40.0, 0.0), (48.0, 1.0), (58.0, 0.0)]),
            ("veryold", &[(52.0, 0.0), (60.0, 1.0), (100.0, 1.0)]),
        ],
    )
}

/// Sex, coded `0` male and `1` female.
///
/// # Errors
///
/// See [`age`].
pub fn sex() -> Result<FuzzyParameter, ConfigError> {
    categorical("Sex", "sex", (0.0, 1.0), &[("male", 0.0), ("female", 1.0)])
}

/// Chest pain type, coded `1` to `4`.
///
/// # Errors
///
/// See [`age`].
pub fn chest_pain() -> Result<FuzzyParameter, ConfigError> {
    categorical(
        "Chest pain",
        "chest_pain",
        (1.0, 4.0),
        &[
            ("typical_anginal", 1.0),
            ("atypical_anginal", 2.0),
            ("non_anginal_pain", 3.0),
            ("asymptomatic", 4.0),
        ],
    )
}

/// Resting blood pressure in mm Hg.
///
/// # Errors
///
/// See [`age`].
pub fn blood_pressure() -> Result<FuzzyParameter, ConfigError> {
    piecewise(
        "Blood pressure",
        "blood_pressure",
        (0.0, 300.0),
        Discretization::Integer,
        &[
            ("low", &[(0.0, 1.0), (111.0, 1.0), (134.0, 0.0)]),
            ("medium", &[(127.0, 0.0), (139.0, 1.0), (153.0, 0.0)]),
            ("high", &[(142.0, 0.0), (157.0, 1.0), (172.0, 0.0)]),
            ("very_high", &[(154.0, 0.0), (171.0, 1.0), (300.0, 1.0)]),
        ],
    )
}

/// Serum cholesterol in mg/dl.
///
/// # Errors
///
/// See [`age`].
pub fn cholesterol() -> Result<FuzzyParameter, ConfigError> {
    piecewise(
        "Cholesterol",
        "cholesterol",
        (0.0, 600.0),
        Discretization::Integer,
        &[
            ("low", &[(0.0, 1.0), (151.0, 1.0), (197.0, 0.0)]),
            ("medium", &[(188.0, 0.0), (215.0, 1.0), (250.0, 0.0)]),
            ("high", &[(217.0, 0.0), (263.0, 1.0), (307.0, 0.0)]),
            ("very_high", &[(281.0, 0.0), (347.0, 1.0), (600.0, 1.0)]),
        ],
    )
}

/// Fasting blood sugar in mg/dl.
///
/// # Errors
///
/// See [`age`].
pub fn blood_sugar() -> Result<FuzzyParameter, ConfigError> {
    piecewise(
        "Blood sugar",
        "blood_sugar",
        (0.0, 400.0),
        Discretization::Integer,
        &[
            ("false", &[(0.0, 1.0), (105.0, 1.0), (120.0, 0.0)]),
            ("true", &[(105.0, 0.0), (120.0, 1.0), (400.0, 1.0)]),
        ],
    )
}

/// Resting ECG reading.
///
/// # Errors
///
/// See [`age`].
pub fn ecg() -> Result<FuzzyParameter, ConfigError> {
    piecewise(
        "ECG",
        "ecg",
        (-0.5, 2.5),
        Discretization::Continuous,
        &[
            ("normal", &[(-0.5, 1.0), (0.0, 1.0), (0.4, 0.0)]),
            ("abnormal", &[(0.2, 0.0), (1.0, 1.0), (1.8, 0.0)]),
            ("hypertrophy", &[(1.4, 0.0), (1.9, 1.0), (2.5, 1.0)]),
        ],
    )
}

/// Maximum heart rate achieved, in beats per minute.
///
/// # Errors
///
/// See [`age`].
pub fn heart_rate() -> Result<FuzzyParameter, ConfigError> {
    piecewise(
        "Maximum heart rate",
        "heart_rate",
        (0.0, 300.0),
        Discretization::Integer,
        &[
            ("low", &[(0.0, 1.0), (100.0, 1.0), (141.0, 0.0)]),
            ("medium", &[(111.0, 0.0), (152.0, 1.0), (194.0, 0.0)]),
            ("high", &[(152.0, 0.0), (210.0, 1.0), (300.0, 1.0)]),
        ],
    )
}

/// Exercise-induced angina, coded `0` no and `1` yes.
///
/// # Errors
///
/// See [`age`].
pub fn exercise() -> Result<FuzzyParameter, ConfigError> {
    categorical(
        "Exercise angina",
        "exercise",
        (0.0, 1.0),
        &[("false", 0.0), ("true", 1.0)],
    )
}

/// ST depression induced by exercise relative to rest.
///
/// # Errors
///
/// See [`age`].
pub fn old_peak() -> Result<FuzzyParameter, ConfigError> {
    piecewise(
        "Old peak",
        "old_peak",
        (0.0, 10.0),
        Discretization::Continuous,
        &[
            ("low", &[(0.0, 1.0), (1.0, 1.0), (2.0, 0.0)]),
            ("risk", &[(1.5, 0.0), (2.8, 1.0), (4.2, 0.0)]),
            ("terrible", &[(2.55, 0.0), (4.0, 1.0), (10.0, 1.0)]),
        ],
    )
}

/// Thallium stress test, coded `3` normal, `6` fixed and `7` reversible defect.
///
/// # Errors
///
/// See [`age`].
pub fn thallium() -> Result<FuzzyParameter, ConfigError> {
    categorical(
        "Thallium",
        "thallium",
        (3.0, 7.0),
        &[("normal", 3.0), ("medium", 6.0), ("high", 7.0)],
    )
}

/// Every clinical input parameter.
///
/// # Errors
///
/// See [`age`].
pub fn inputs() -> Result<Vec<FuzzyParameter>, ConfigError> {
    Ok(vec![
        age()?,
        sex()?,
        chest_pain()?,
        blood_pressure()?,
        cholesterol()?,
        blood_sugar()?,
        ecg()?,
        heart_rate()?,
        exercise()?,
        old_peak()?,
        thallium()?,
    ])
}

/// The `health` output parameter over `[0, 4]`.
///
/// # Errors
///
/// See [`age`].
pub fn output() -> Result<FuzzyParameter, ConfigError> {
    piecewise(
        "Health",
        "health",
        (0.0, 4.0),
        Discretization::Continuous,
        &[
            ("healthy", &[(0.0, 1.0), (0.25, 1.0), (1.0, 0.0)]),
            ("sick_1", &[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]),
            ("sick_2", &[(1.0, 0.0), (2.0, 1.0), (3.0, 0.0)]),
            ("sick_3", &[(2.0, 0.0), (3.0, 1.0), (4.0, 0.0)]),
            ("sick_4", &[(3.0, 0.0), (3.75, 1.0), (4.0, 1.0)]),
        ],
    )
}

/// The clinical parameters compiled with the bundled [`RULES`].
///
/// # Errors
///
/// Returns [`FuzzdxError`] if the bundled definitions fail to parse or compile.
pub fn engine() -> Result<InferenceEngine, FuzzdxError> {
    InferenceEngine::from_rules(RULES, inputs()?, output()?)
}

/// Center of mass over the `health` domain with a `0.01` stride.
///
/// # Errors
///
/// See [`age`].
pub fn defuzzifier() -> Result<CenterOfMass, ConfigError> {
    CenterOfMass::new(0.0, 4.0, 0.01)
}

/// Human-readable grade of a defuzzified score.
///
/// The score is the weighted area under the clipped output envelope, not a
/// position on the `health` domain, so it grows with how much of the output
/// is activated. For reference, `healthy` alone at full strength covers about
/// 0.63, any single sick set at most 1, and all five sets firing fully about
/// 3.19.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Healthy,
    Slight,
    Moderate,
    Severe,
    Critical,
}

impl Severity {
    /// Grade a weighted area: below `0.75` healthy, below `1.5` slight,
    /// below `2.25` moderate, below `3` severe, otherwise critical.
    /// Non-finite scores grade as critical.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if !score.is_finite() {
            warn!(score, "non-finite diagnosis score");
            return Self::Critical;
        }
        match score {
            s if s < 0.75 => Self::Healthy,
            s if s < 1.5 => Self::Slight,
            s if s < 2.25 => Self::Moderate,
            s if s < 3.0 => Self::Severe,
            _ => Self::Critical,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Healthy => "healthy",
            Self::Slight => "slightly sick",
            Self::Moderate => "moderately sick",
            Self::Severe => "severely sick",
            Self::Critical => "critically sick",
        };
        f.write_str(label)
    }
}
