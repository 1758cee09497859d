//! Samplers against reduced constraint models.

use quench_adapter_sim::{ExactSampler, SimulatedAnnealingSampler, register_samplers};
use quench_hal::{HalError, Sampler, SamplerConfig, SamplerRegistry};
use quench_ir::{ConstraintSet, Gate, ReductionConfig, validate_and_aggregate};

fn multiplier(product: u8) -> ConstraintSet {
    let mut set = ConstraintSet::new();
    set.add_gate(Gate::And, &["a0", "b1", "and1"]).unwrap();
    set.add_gate(Gate::And, &["a0", "b0", "c0"]).unwrap();
    set.add_gate(Gate::And, &["a1", "b0", "and3"]).unwrap();
    set.add_gate(Gate::And, &["a1", "b1", "and4"]).unwrap();
    set.add_gate(Gate::Xor, &["and1", "and3", "c1"]).unwrap();
    set.add_gate(Gate::And, &["and1", "and3", "and5"]).unwrap();
    set.add_gate(Gate::Xor, &["and5", "and4", "c2"]).unwrap();
    set.add_gate(Gate::And, &["and5", "and4", "c3"]).unwrap();
    for bit in 0..4 {
        set.fix_variable(&format!("c{bit}"), (product >> bit) & 1 == 1);
    }
    set
}

#[tokio::test]
async fn test_exact_sampler_factors_nine() {
    let set = multiplier(9);
    let model = set.to_energy_model(&ReductionConfig::default()).unwrap();
    assert_eq!(model.num_variables(), 14);

    let samples = ExactSampler::new().sample(&model, 1, None).await.unwrap();
    let best = samples.lowest().unwrap();
    assert_eq!(best.energy, 0.0);
    for name in ["a0", "a1", "b0", "b1"] {
        assert_eq!(best.assignment.get(name), Some(true), "{name}");
    }
    let report = validate_and_aggregate(samples, &set).unwrap();
    assert_eq!(report.valid_occurrences(), 1);
}

#[tokio::test]
async fn test_annealer_solves_full_adder() {
    let mut set = ConstraintSet::new();
    set.add_gate(Gate::FullAdder, &["a", "b", "cIn", "s", "cOut"])
        .unwrap();
    set.fix_variable("a", true);
    set.fix_variable("b", true);
    set.fix_variable("cIn", false);
    let model = set.to_energy_model(&ReductionConfig::default()).unwrap();

    let sampler = SimulatedAnnealingSampler::new().with_seed(11).with_sweeps(200);
    let samples = sampler.sample(&model, 40, None).await.unwrap();
    let report = validate_and_aggregate(samples, &set).unwrap();

    assert!(report.valid_fraction() > 0.9, "{}", report.valid_fraction());
    let (key, entry) = report.most_frequent().unwrap();
    assert_eq!(key, "11001");
    assert_eq!(entry.min_energy, 0.0);
}

#[tokio::test]
async fn test_registry_names() {
    let mut registry = SamplerRegistry::new();
    register_samplers(&mut registry);
    assert_eq!(registry.available_samplers(), vec!["exact", "sim"]);

    let sim = registry
        .create(SamplerConfig::new("sim").with_extra("seed", serde_json::json!(1)))
        .unwrap();
    assert_eq!(sim.name(), "sim");
    assert!(sim.capabilities().supports_schedule);

    let exact = registry.create(SamplerConfig::new("exact")).unwrap();
    assert!(!exact.capabilities().supports_schedule);
    assert!(exact.availability().await.unwrap().is_available);

    assert!(matches!(
        registry.create(SamplerConfig::new("qpu")),
        Err(HalError::BackendUnavailable(_))
    ));
}
