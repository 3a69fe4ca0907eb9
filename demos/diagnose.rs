//! Diagnose one patient with the bundled heart-disease rule base.
//!
//! ```text
//! RUST_LOG=fuzzdx=debug cargo run --example diagnose -- age=63 cholesterol=290
//! ```
//!
//! Each `name=value` argument overrides a field of the default record.

use fuzzdx::{clinical, Inputs};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut inputs = Inputs::new()
        .set("age", 54)
        .set("sex", 0)
        .set("chest_pain", 3)
        .set("blood_pressure", 130)
        .set("cholesterol", 246)
        .set("blood_sugar", 100)
        .set("ecg", 0)
        .set("heart_rate", 150)
        .set("exercise", 0)
        .set("old_peak", 1.0)
        .set("thallium", 3);

    for arg in std::env::args().skip(1) {
        let Some((name, value)) = arg.split_once('=') else {
            eprintln!("ignoring '{arg}': expected name=value");
            continue;
        };
        match value.parse::<f64>() {
            Ok(v) => inputs.insert(name, v),
            Err(e) => eprintln!("ignoring '{arg}': {e}"),
        }
    }

    let engine = clinical::engine().expect("bundled rules should compile");
    let defuzzifier = clinical::defuzzifier().expect("valid defuzzifier");
    println!("{engine}");

    let report = match engine.evaluate_detailed(&inputs) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("evaluation failed: {e}");
            std::process::exit(1);
        }
    };
    println!("{report}");
    for rule in report.fired() {
        println!("  fired: {rule}");
    }

    match engine.diagnose(&inputs, &defuzzifier) {
        Ok(diagnosis) => {
            println!("strengths: {}", diagnosis.strengths());
            println!("score: {:.4}", diagnosis.score());
            println!("severity: {}", diagnosis.severity());
        }
        Err(e) => {
            eprintln!("diagnosis failed: {e}");
            std::process::exit(1);
        }
    }
}
