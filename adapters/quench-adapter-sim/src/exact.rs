//! Exhaustive sampler for small models.

use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, instrument};

use quench_hal::{
    AnnealSchedule, Capabilities, HalResult, SampleSet, Sampler, SamplerAvailability,
    SamplerConfig, SamplerFactory, Timing,
};
use quench_ir::{Assignment, EnergyModel, SampleResult};

/// Largest model that is enumerated (2^20 states).
pub const MAX_EXACT_VARIABLES: usize = 20;

/// Enumerates every state and returns the lowest-energy ones.
///
/// Deterministic: `sample(model, k, None)` returns the `k` lowest distinct
/// states, ties broken by state index, one occurrence each. Useful as a
/// reference sampler in tests and for checking what an annealer should find.
pub struct ExactSampler {
    config: SamplerConfig,
    capabilities: Capabilities,
}

impl ExactSampler {
    /// Create an exact sampler.
    pub fn new() -> Self {
        Self {
            config: SamplerConfig::new("exact"),
            capabilities: Capabilities::simulator("exact", MAX_EXACT_VARIABLES),
        }
    }
}

impl Default for ExactSampler {
    fn default() -> Self {
        Self::new()
    }
}

fn state_bits(state: u32, n: usize) -> Vec<bool> {
    (0..n).map(|i| (state >> i) & 1 == 1).collect()
}

#[async_trait]
impl Sampler for ExactSampler {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<SamplerAvailability> {
        Ok(SamplerAvailability::always_available())
    }

    #[instrument(skip(self, model, schedule), fields(variables = model.num_variables()))]
    async fn sample(
        &self,
        model: &EnergyModel,
        num_reads: u32,
        schedule: Option<&AnnealSchedule>,
    ) -> HalResult<SampleSet> {
        self.capabilities
            .check(model.num_variables(), num_reads, schedule)?;
        let start = Instant::now();

        let compiled = model.compile();
        let n = compiled.num_variables();
        let mut states: Vec<(f64, u32)> = if num_reads == 0 {
            Vec::new()
        } else {
            (0..1_u32 << n)
                .map(|state| (compiled.energy(&state_bits(state, n)), state))
                .collect()
        };
        states.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        states.truncate(num_reads as usize);

        let names = model.variables().names();
        let records = states
            .into_iter()
            .map(|(energy, state)| {
                SampleResult::new(Assignment::from_bits(names, &state_bits(state, n)), energy, 1)
            })
            .collect();

        let elapsed = start.elapsed();
        debug!("Enumerated {} states in {:?}", 1_u64 << n, elapsed);
        Ok(SampleSet::new(model.variables().clone(), records)
            .with_timing(Timing::new().with_total_real_time(elapsed.as_secs_f64() * 1e6)))
    }
}

impl SamplerFactory for ExactSampler {
    fn from_config(config: SamplerConfig) -> HalResult<Self> {
        let mut sampler = Self::new();
        sampler.capabilities.name = config.name.clone();
        sampler.config = config;
        Ok(sampler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quench_hal::HalError;

    fn and_gate() -> EnergyModel {
        EnergyModel::from_qubo([
            (("x1", "x2"), 1.0),
            (("x1", "z"), -2.0),
            (("x2", "z"), -2.0),
            (("z", "z"), 3.0),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn test_lowest_states_first() {
        let set = ExactSampler::new().sample(&and_gate(), 5, None).await.unwrap();
        let energies: Vec<f64> = set.iter().map(|r| r.energy).collect();
        assert_eq!(energies, vec![0.0, 0.0, 0.0, 0.0, 1.0]);
        // Ties follow state index: x1 is the lowest bit.
        let first = &set.records()[0].assignment;
        assert_eq!(first.to_string(), "{x1: 0, x2: 0, z: 0}");
    }

    #[tokio::test]
    async fn test_more_reads_than_states() {
        let set = ExactSampler::new().sample(&and_gate(), 100, None).await.unwrap();
        assert_eq!(set.len(), 8);
        assert_eq!(set.total_occurrences(), 8);
    }

    #[tokio::test]
    async fn test_rejects_schedule() {
        let schedule = AnnealSchedule::linear(20.0).unwrap();
        let result = ExactSampler::new().sample(&and_gate(), 1, Some(&schedule)).await;
        assert!(matches!(result, Err(HalError::Unsupported(_))));
    }

    #[tokio::test]
    async fn test_rejects_large_model() {
        let mut model = EnergyModel::new();
        for i in 0..=MAX_EXACT_VARIABLES {
            model.add_variable(&format!("v{i}"));
        }
        let result = ExactSampler::new().sample(&model, 1, None).await;
        assert!(matches!(result, Err(HalError::ResourceExhausted(_))));
    }

    #[tokio::test]
    async fn test_zero_reads() {
        let set = ExactSampler::new().sample(&and_gate(), 0, None).await.unwrap();
        assert!(set.is_empty());
    }
}
