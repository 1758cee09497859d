//! Reduce, sample and validate in one call.

use std::time::{Duration, Instant};

use serde_json::json;
use tracing::{debug, info};

use quench_hal::{AnnealSchedule, HalError, HalResult, SampleSet, Sampler, Timing};
use quench_ir::{AggregateReport, ConstraintSet, EnergyModel, validate_and_aggregate};

/// Everything a tutorial prints after a run.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Valid solutions and valid/invalid totals.
    pub report: AggregateReport,
    /// Samples with identical assignments merged.
    pub samples: SampleSet,
    /// Lowest energy seen, `None` for zero reads.
    pub lowest_energy: Option<f64>,
    /// Timing reported by the sampler.
    pub timing: Option<Timing>,
    /// Wall-clock time of the sampling call.
    pub elapsed: Duration,
}

impl PipelineOutcome {
    /// Machine-readable summary for `--json`.
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "report": self.report,
            "lowest_energy": self.lowest_energy,
            "timing": self.timing,
            "elapsed_us": self.elapsed.as_secs_f64() * 1e6,
        })
    }
}

/// A sampling request: how many reads, and optionally a schedule.
#[derive(Debug, Clone)]
pub struct Pipeline {
    num_reads: u32,
    schedule: Option<AnnealSchedule>,
}

impl Pipeline {
    /// Create a pipeline drawing `num_reads` samples per run.
    pub fn new(num_reads: u32) -> Self {
        Self {
            num_reads,
            schedule: None,
        }
    }

    /// Anneal with a custom schedule.
    pub fn with_schedule(mut self, schedule: AnnealSchedule) -> Self {
        self.schedule = Some(schedule);
        self
    }

    /// Reads per run.
    pub fn num_reads(&self) -> u32 {
        self.num_reads
    }

    /// Check availability, then sample once.
    ///
    /// An unavailable sampler fails with [`HalError::BackendUnavailable`]
    /// before any work is submitted. The call is never retried.
    pub async fn sample(&self, sampler: &dyn Sampler, model: &EnergyModel) -> HalResult<SampleSet> {
        let availability = sampler.availability().await?;
        if !availability.is_available {
            return Err(HalError::BackendUnavailable(
                availability
                    .status_message
                    .unwrap_or_else(|| format!("{} is not accepting work", sampler.name())),
            ));
        }
        info!(
            sampler = sampler.name(),
            reads = self.num_reads,
            variables = model.num_variables(),
            "Sampling"
        );
        sampler
            .sample(model, self.num_reads, self.schedule.as_ref())
            .await
    }

    /// Sample `model` and check every sample against `constraints`.
    ///
    /// The model is expected to be the reduction of `constraints` (or a
    /// hand-written QUBO over the same variables). Nothing is aggregated
    /// if sampling fails.
    pub async fn run(
        &self,
        sampler: &dyn Sampler,
        model: &EnergyModel,
        constraints: &ConstraintSet,
    ) -> HalResult<PipelineOutcome> {
        let start = Instant::now();
        let samples = self.sample(sampler, model).await?;
        let elapsed = start.elapsed();

        let timing = samples.timing().cloned();
        let lowest_energy = samples.lowest().map(|r| r.energy);
        let samples = samples.aggregate();
        let report = validate_and_aggregate(samples.iter().cloned(), constraints)?;
        debug!(
            valid = report.valid_occurrences(),
            invalid = report.invalid_occurrences(),
            ?elapsed,
            "Pipeline finished"
        );

        Ok(PipelineOutcome {
            report,
            samples,
            lowest_energy,
            timing,
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quench_adapter_sim::ExactSampler;
    use quench_ir::ReductionConfig;

    #[tokio::test]
    async fn test_run_with_exact_sampler() {
        let mut set = ConstraintSet::new();
        set.exactly_one(&["a", "b", "c"]).unwrap();
        let model = set.to_energy_model(&ReductionConfig::default()).unwrap();

        let outcome = Pipeline::new(3)
            .run(&ExactSampler::new(), &model, &set)
            .await
            .unwrap();
        assert_eq!(outcome.report.num_solutions(), 3);
        assert_eq!(outcome.report.invalid_occurrences(), 0);
        assert_eq!(outcome.lowest_energy, Some(0.0));
        assert!(outcome.to_json()["report"].is_object());
    }

    #[tokio::test]
    async fn test_zero_reads_give_empty_report() {
        let mut set = ConstraintSet::new();
        set.not_both("a", "b").unwrap();
        let model = set.to_energy_model(&ReductionConfig::default()).unwrap();

        let outcome = Pipeline::new(0)
            .run(&ExactSampler::new(), &model, &set)
            .await
            .unwrap();
        assert!(outcome.report.is_empty());
        assert_eq!(outcome.lowest_energy, None);
    }
}
