use fuzzdx::{
    CenterOfMass, ClippedSet, ConfigError, Discretization, EvalError, FuzzyParameter, FuzzySet,
    InferenceEngine, Inputs, MembershipPiece, Rule, RuleTerm,
};

fn health() -> FuzzyParameter {
    let mut health = FuzzyParameter::new("Health", "health", 0.0, 4.0).unwrap();
    health
        .create_piecewise_set("healthy", &[(0.0, 1.0), (0.25, 1.0), (1.0, 0.0)])
        .unwrap();
    health
        .create_piecewise_set("sick", &[(3.0, 0.0), (3.75, 1.0), (4.0, 1.0)])
        .unwrap();
    health
}

fn level() -> FuzzyParameter {
    let mut level = FuzzyParameter::new("Level", "level", 0.0, 10.0).unwrap();
    level
        .create_piecewise_set("low", &[(0.0, 1.0), (5.0, 0.0)])
        .unwrap();
    level
        .create_piecewise_set("high", &[(5.0, 0.0), (10.0, 1.0)])
        .unwrap();
    level
}

#[test]
fn empty_rule_base_yields_all_zero_strengths() {
    let engine = InferenceEngine::builder()
        .input(level())
        .output(health())
        .compile()
        .unwrap();
    let s = engine.evaluate(&Inputs::new()).unwrap();
    assert_eq!(s.len(), 2);
    assert!(s.iter().all(|(_, v)| v == 0.0));
}

#[test]
fn zero_strengths_defuzzify_to_zero() {
    let engine = InferenceEngine::builder()
        .input(level())
        .output(health())
        .rule(|r| r.when("level", "high").then("health", "sick"))
        .compile()
        .unwrap();
    let com = CenterOfMass::new(0.0, 4.0, 0.01).unwrap();
    let d = engine
        .diagnose(&Inputs::new().set("level", 0), &com)
        .unwrap();
    assert_eq!(d.score(), 0.0);
}

#[test]
fn input_at_domain_boundary_is_accepted() {
    let engine = InferenceEngine::builder()
        .input(level())
        .output(health())
        .rule(|r| r.when("level", "high").then("health", "sick"))
        .compile()
        .unwrap();
    assert_eq!(
        engine
            .evaluate(&Inputs::new().set("level", 10))
            .unwrap()
            .get("sick"),
        Some(1.0)
    );
    assert_eq!(
        engine
            .evaluate(&Inputs::new().set("level", 0))
            .unwrap()
            .get("sick"),
        Some(0.0)
    );
}

#[test]
fn input_just_outside_domain_is_rejected() {
    let engine = InferenceEngine::builder()
        .input(level())
        .output(health())
        .rule(|r| r.when("level", "low").then("health", "healthy"))
        .compile()
        .unwrap();
    let err = engine
        .evaluate(&Inputs::new().set("level", 10.5))
        .unwrap_err();
    assert_eq!(
        err,
        EvalError::OutOfRange {
            parameter: "level".into(),
            value: 10.5,
            start: 0.0,
            end: 10.0
        }
    );
    assert!(engine.evaluate(&Inputs::new().set("level", -0.1)).is_err());
}

#[test]
fn integer_truncation_happens_before_range_check() {
    let p = level().with_discretization(Discretization::Integer);
    let engine = InferenceEngine::builder()
        .input(p)
        .output(health())
        .rule(|r| r.when("level", "high").then("health", "sick"))
        .compile()
        .unwrap();
    // 10.7 truncates to 10, inside [0, 10]
    let s = engine.evaluate(&Inputs::new().set("level", 10.7)).unwrap();
    assert_eq!(s.get("sick"), Some(1.0));
}

#[test]
fn gap_between_pieces_is_zero() {
    let set = FuzzySet::new("split")
        .with(MembershipPiece::constant(0.0, 1.0, 1.0).unwrap())
        .unwrap()
        .with(MembershipPiece::constant(2.0, 3.0, 0.5).unwrap())
        .unwrap();
    assert_eq!(set.evaluate(1.5).unwrap(), 0.0);
    assert_eq!(set.evaluate(2.5).unwrap(), 0.5);
}

#[test]
fn touching_pieces_agree_at_shared_knot() {
    let mut p = FuzzyParameter::new("P", "p", 0.0, 10.0).unwrap();
    p.create_piecewise_set("tri", &[(2.0, 0.0), (5.0, 1.0), (8.0, 0.0)])
        .unwrap();
    assert_eq!(p.evaluate_in_set(5.0, "tri").unwrap(), 1.0);
    assert_eq!(p.evaluate_in_set(2.0, "tri").unwrap(), 0.0);
    assert_eq!(p.evaluate_in_set(8.0, "tri").unwrap(), 0.0);
}

#[test]
fn overlapping_pieces_are_rejected() {
    let mut set = FuzzySet::new("bad");
    set.add(MembershipPiece::constant(0.0, 2.0, 1.0).unwrap())
        .unwrap();
    let err = set
        .add(MembershipPiece::constant(1.0, 3.0, 0.5).unwrap())
        .unwrap_err();
    assert!(matches!(err, ConfigError::Overlap { .. }));
}

#[test]
fn set_outside_parameter_domain_is_rejected() {
    let mut p = FuzzyParameter::new("P", "p", 0.0, 10.0).unwrap();
    let err = p
        .create_piecewise_set("far", &[(8.0, 0.0), (12.0, 1.0)])
        .unwrap_err();
    assert!(matches!(err, ConfigError::PieceOutsideDomain { .. }));
}

#[test]
fn duplicate_set_is_rejected() {
    let mut p = level();
    let err = p
        .create_piecewise_set("low", &[(0.0, 1.0), (1.0, 0.0)])
        .unwrap_err();
    assert_eq!(
        err,
        ConfigError::DuplicateSet {
            parameter: "level".into(),
            set: "low".into()
        }
    );
}

#[test]
fn membership_degrees_above_one_are_rejected() {
    assert!(MembershipPiece::constant(0.0, 1.0, 1.5).is_err());
    assert!(MembershipPiece::linear((0.0, 0.0), (1.0, -0.1)).is_err());
    assert!(MembershipPiece::point(3.0, 2.0).is_err());
}

#[test]
fn rule_without_antecedents_is_rejected() {
    let err = Rule::new(vec![], None, RuleTerm::new("health", "healthy")).unwrap_err();
    assert_eq!(err, ConfigError::EmptyAntecedent);
}

#[test]
fn builder_rule_without_consequent_is_rejected() {
    let err = InferenceEngine::builder()
        .input(level())
        .output(health())
        .rule(|r| r.when("level", "low"))
        .compile()
        .unwrap_err();
    assert_eq!(err, ConfigError::MissingConsequent);
}

#[test]
fn builder_rule_mixing_and_or_is_rejected() {
    let err = InferenceEngine::builder()
        .input(level())
        .output(health())
        .rule(|r| {
            r.when("level", "low")
                .and("level", "high")
                .or("level", "low")
                .then("health", "sick")
        })
        .compile()
        .unwrap_err();
    assert_eq!(err, ConfigError::MixedCombinators);
}

#[test]
fn defuzzifier_reaching_past_output_domain_fails() {
    let h = health();
    let com = CenterOfMass::new(0.0, 4.5, 0.5).unwrap();
    let data: Vec<ClippedSet<'_>> = h.sets().map(|set| ClippedSet { set, cut: 1.0 }).collect();
    assert!(matches!(
        com.defuzzify(&data),
        Err(EvalError::OutOfRange { .. })
    ));
}

#[test]
fn non_dividing_stride_never_samples_past_hi() {
    let com = CenterOfMass::new(0.0, 4.0, 0.3).unwrap();
    assert!(com.samples().all(|x| x <= 4.0));
    assert_eq!(com.sample_count(), 14);
}
