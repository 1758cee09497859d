//! Integration tests for the tutorial suite.
//!
//! These run the tutorial problems end to end through the pipeline, using
//! the in-process samplers and a mock sampler that is never available.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use quench_adapter_sim::{ExactSampler, SimulatedAnnealingSampler};
use quench_demos::config::{DemoArgs, SamplerChoice};
use quench_demos::problems::{
    Verdict, biased_not_qubo, coin_model, draw_board, four_queens, full_adder, heads_histogram,
    histogram_lines, multiplier, not_constraints, not_qubo, single_row, tutorial_schedules,
};
use quench_demos::prompt::{ScriptedSource, read_count};
use quench_demos::runners::Pipeline;
use quench_demos::tutorials;
use quench_hal::{
    AnnealSchedule, Capabilities, HalError, HalResult, SampleSet, Sampler, SamplerAvailability,
};
use quench_ir::{EnergyModel, IrError, ReductionConfig};

/// A sampler that is offline and counts how often it was asked to sample.
struct OfflineSampler {
    capabilities: Capabilities,
    sample_calls: AtomicU32,
}

impl OfflineSampler {
    fn new() -> Self {
        Self {
            capabilities: Capabilities::simulator("offline", 10),
            sample_calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl Sampler for OfflineSampler {
    fn name(&self) -> &str {
        "offline"
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<SamplerAvailability> {
        Ok(SamplerAvailability::unavailable("maintenance window"))
    }

    async fn sample(
        &self,
        model: &EnergyModel,
        _num_reads: u32,
        _schedule: Option<&AnnealSchedule>,
    ) -> HalResult<SampleSet> {
        self.sample_calls.fetch_add(1, Ordering::SeqCst);
        Ok(SampleSet::empty(model.variables().clone()))
    }
}

#[tokio::test]
async fn test_unavailable_sampler_stops_pipeline() {
    let sampler = OfflineSampler::new();
    let model = not_qubo().unwrap();
    let result = Pipeline::new(10)
        .run(&sampler, &model, &not_constraints().unwrap())
        .await;

    match result {
        Err(HalError::BackendUnavailable(msg)) => assert_eq!(msg, "maintenance window"),
        other => panic!("expected BackendUnavailable, got {other:?}"),
    }
    assert_eq!(sampler.sample_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_full_adder_with_annealer() {
    let constraints = full_adder().unwrap();
    let model = constraints
        .to_energy_model(&ReductionConfig::default())
        .unwrap();
    let sampler = SimulatedAnnealingSampler::new().with_seed(5).with_sweeps(300);

    let outcome = Pipeline::new(60)
        .run(&sampler, &model, &constraints)
        .await
        .unwrap();
    assert_eq!(outcome.report.total_occurrences(), 60);
    assert!(outcome.report.valid_fraction() > 0.8);
    assert_eq!(outcome.lowest_energy, Some(0.0));
    // Every valid solution is a correct addition.
    for (_, entry) in outcome.report.entries() {
        let a = &entry.assignment;
        let sum = [a.get("a"), a.get("b"), a.get("cIn")]
            .iter()
            .filter(|v| **v == Some(true))
            .count();
        assert_eq!(a.get("s"), Some(sum % 2 == 1));
        assert_eq!(a.get("cOut"), Some(sum >= 2));
    }
}

#[tokio::test]
async fn test_multiplier_factors_nine_exactly() {
    let constraints = multiplier(9).unwrap();
    let model = constraints
        .to_energy_model(&ReductionConfig::default())
        .unwrap();

    let outcome = Pipeline::new(4)
        .run(&ExactSampler::new(), &model, &constraints)
        .await
        .unwrap();
    assert_eq!(outcome.report.num_solutions(), 1);
    let (key, _) = outcome.report.most_frequent().unwrap();
    // Declared order: a0, b1, and1, b0, c0, a1, and3, and4, c1, and5, c2, c3.
    let names = outcome.report.variables();
    let value = |name: &str| {
        let i = names.iter().position(|n| n == name).unwrap();
        &key[i..=i]
    };
    for name in ["a0", "a1", "b0", "b1", "c0", "c3"] {
        assert_eq!(value(name), "1", "{name}");
    }
}

#[test]
fn test_multiplier_rejects_large_product() {
    assert!(matches!(multiplier(16), Err(IrError::InvalidModel(_))));
}

#[tokio::test]
async fn test_four_queens_with_annealer() {
    let row = single_row().unwrap();
    let model = row.to_energy_model(&ReductionConfig::default()).unwrap();
    let sampler = SimulatedAnnealingSampler::new().with_seed(9).with_sweeps(200);
    let outcome = Pipeline::new(100).run(&sampler, &model, &row).await.unwrap();
    assert!(outcome.report.valid_fraction() > 0.9);
    for (key, _) in outcome.report.entries() {
        assert_eq!(key.matches('1').count(), 1, "{key}");
    }

    let board = four_queens().unwrap();
    let model = board.to_energy_model(&ReductionConfig::default()).unwrap();
    let outcome = Pipeline::new(200).run(&sampler, &model, &board).await.unwrap();
    let verdict = Verdict::from_counts(
        outcome.report.valid_occurrences(),
        outcome.report.invalid_occurrences(),
    );
    assert_ne!(verdict, Verdict::StruckOut);
    for (key, entry) in outcome.report.entries() {
        assert!(
            key == "0010100000010100" || key == "0100000110000010",
            "unexpected solution {key}"
        );
        assert_eq!(draw_board(&entry.assignment, 4).unwrap().matches('Q').count(), 4);
    }
}

#[tokio::test]
async fn test_coin_histogram_covers_every_read() {
    let mut input = ScriptedSource::new(["5000"]);
    let answer = read_count(&mut input, "", 50, 1, 2000);
    assert_eq!(answer.value, 2000);

    let coins = 8;
    let sampler = SimulatedAnnealingSampler::new().with_seed(2).with_sweeps(5);
    let samples = Pipeline::new(500)
        .sample(&sampler, &coin_model(coins))
        .await
        .unwrap();
    let counts = heads_histogram(&samples, coins);
    assert_eq!(counts.len(), 9);
    assert_eq!(counts.iter().sum::<u64>(), 500);
    assert!(samples.timing().unwrap().access_time_us.is_none());

    let lines = histogram_lines(&counts);
    let widest = lines.iter().map(|l| l.matches('x').count()).max().unwrap();
    assert_eq!(widest, 60);
}

#[tokio::test]
async fn test_schedules_on_simulator_and_exact() {
    let model = biased_not_qubo().unwrap();
    let constraints = not_constraints().unwrap();
    let sampler = SimulatedAnnealingSampler::new().with_seed(4).with_sweeps(50);

    for (_, schedule) in tutorial_schedules().unwrap() {
        let outcome = Pipeline::new(100)
            .with_schedule(schedule.clone())
            .run(&sampler, &model, &constraints)
            .await
            .unwrap();
        assert_eq!(outcome.report.total_occurrences(), 100);
        let timing = outcome.timing.unwrap();
        assert_eq!(timing.anneal_time_per_sample_us, Some(schedule.duration_us()));

        let exact = Pipeline::new(1)
            .with_schedule(schedule)
            .run(&ExactSampler::new(), &model, &constraints)
            .await;
        assert!(matches!(exact, Err(HalError::Unsupported(_))));
    }
}

#[tokio::test]
async fn test_tutorials_run_headless() {
    let args = DemoArgs {
        backend: SamplerChoice::Exact,
        json: true,
        ..DemoArgs::default()
    };
    tutorials::not_gate(&args).await.unwrap();
    tutorials::and_gate(&args).await.unwrap();
    tutorials::full_adder(&args).await.unwrap();
    tutorials::multiplier(&args, 6).await.unwrap();
    assert!(tutorials::multiplier(&args, 20).await.is_err());

    let qpu = DemoArgs {
        backend: SamplerChoice::Qpu,
        ..args
    };
    let err = tutorials::not_gate(&qpu).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<HalError>(),
        Some(HalError::BackendUnavailable(_))
    ));
}
