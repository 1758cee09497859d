//! Simulated annealing sampler.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use quench_hal::{
    AnnealSchedule, Capabilities, HalError, HalResult, SampleSet, Sampler, SamplerAvailability,
    SamplerConfig, SamplerFactory, Timing,
};
use quench_ir::{Assignment, CompiledModel, EnergyModel, SampleResult};

/// Default number of Metropolis sweeps per read.
pub const DEFAULT_NUM_SWEEPS: u32 = 1000;

/// Largest model the annealer accepts.
const MAX_VARIABLES: usize = 5000;

/// Classical stand-in for an annealer.
///
/// Each read starts from a uniformly random state and runs `num_sweeps`
/// Metropolis sweeps while the inverse temperature rises geometrically from
/// `beta_min` to `beta_max`. Without an explicit range, the range is derived
/// from the model so the hottest sweep accepts the largest uphill flip half
/// the time and the coldest accepts the smallest one 1% of the time.
///
/// With an [`AnnealSchedule`], the schedule's fraction replaces linear
/// progress through the sweeps; the last schedule point maps onto the last
/// sweep. A pause in the schedule therefore holds the temperature constant.
pub struct SimulatedAnnealingSampler {
    config: SamplerConfig,
    capabilities: Capabilities,
    num_sweeps: u32,
    seed: Option<u64>,
    beta_range: Option<(f64, f64)>,
    time_limit: Option<Duration>,
}

impl SimulatedAnnealingSampler {
    /// Create a sampler with default settings and an entropy-seeded RNG.
    pub fn new() -> Self {
        Self {
            config: SamplerConfig::new("sim"),
            capabilities: Capabilities::simulator("sim", MAX_VARIABLES).with_schedule_support(None),
            num_sweeps: DEFAULT_NUM_SWEEPS,
            seed: None,
            beta_range: None,
            time_limit: None,
        }
    }

    /// Fix the RNG seed so that repeated calls return identical samples.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of sweeps per read (at least 1).
    pub fn with_sweeps(mut self, num_sweeps: u32) -> Self {
        self.num_sweeps = num_sweeps.max(1);
        self
    }

    /// Override the inverse temperature range.
    pub fn with_beta_range(mut self, beta_min: f64, beta_max: f64) -> Self {
        self.beta_range = Some((beta_min, beta_max));
        self
    }

    /// Fail the whole call with [`HalError::Timeout`] once this much wall
    /// time has passed.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Sweeps per read.
    pub fn num_sweeps(&self) -> u32 {
        self.num_sweeps
    }

    fn beta_bounds(&self, compiled: &CompiledModel) -> (f64, f64) {
        if let Some(range) = self.beta_range {
            return range;
        }
        match compiled.delta_range() {
            Some((max_delta, min_delta)) => {
                let hot = std::f64::consts::LN_2 / max_delta;
                let cold = 100_f64.ln() / min_delta;
                (hot, cold.max(hot))
            }
            None => (1.0, 1.0),
        }
    }

    fn anneal(
        &self,
        model: &EnergyModel,
        num_reads: u32,
        schedule: Option<&AnnealSchedule>,
        start: Instant,
    ) -> HalResult<Vec<SampleResult>> {
        let compiled = model.compile();
        let n = compiled.num_variables();
        let names = model.variables().names();
        let (beta_min, beta_max) = self.beta_bounds(&compiled);
        debug!(beta_min, beta_max, sweeps = self.num_sweeps, "Annealing");

        let betas: Vec<f64> = (0..self.num_sweeps)
            .map(|k| {
                let progress = if self.num_sweeps > 1 {
                    f64::from(k) / f64::from(self.num_sweeps - 1)
                } else {
                    1.0
                };
                let s = schedule.map_or(progress, |sch| sch.fraction_at_progress(progress));
                beta_min * (beta_max / beta_min).powf(s)
            })
            .collect();

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut records = Vec::with_capacity(num_reads as usize);
        for read in 0..num_reads {
            let mut bits: Vec<bool> = (0..n).map(|_| rng.gen_bool(0.5)).collect();
            for &beta in &betas {
                self.check_deadline(start, read)?;
                for i in 0..n {
                    let delta = compiled.flip_delta(&bits, i);
                    if delta <= 0.0 || rng.gen_range(0.0..1.0) < (-beta * delta).exp() {
                        bits[i] = !bits[i];
                    }
                }
            }
            let energy = compiled.energy(&bits);
            records.push(SampleResult::new(Assignment::from_bits(names, &bits), energy, 1));
        }
        Ok(records)
    }

    fn check_deadline(&self, start: Instant, read: u32) -> HalResult<()> {
        match self.time_limit {
            Some(limit) if start.elapsed() >= limit => Err(HalError::Timeout(format!(
                "simulated annealing exceeded {limit:?} after {read} reads"
            ))),
            _ => Ok(()),
        }
    }
}

impl Default for SimulatedAnnealingSampler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Sampler for SimulatedAnnealingSampler {
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

        let records = if num_reads == 0 {
            Vec::new()
        } else {
            self.anneal(model, num_reads, schedule, start)?
        };

        let elapsed = start.elapsed();
        debug!("Simulated annealing completed in {:?}", elapsed);

        let mut timing = Timing::new().with_total_real_time(elapsed.as_secs_f64() * 1e6);
        if let Some(schedule) = schedule {
            timing = timing.with_anneal_time_per_sample(schedule.duration_us());
        }
        Ok(SampleSet::new(model.variables().clone(), records).with_timing(timing))
    }
}

impl SamplerFactory for SimulatedAnnealingSampler {
    /// Reads `seed`, `num_sweeps` and `time_limit_ms` from the extra settings.
    fn from_config(config: SamplerConfig) -> HalResult<Self> {
        let mut sampler = Self::new();
        if let Some(seed) = config.extra_u64("seed")? {
            sampler = sampler.with_seed(seed);
        }
        if let Some(sweeps) = config.extra_u64("num_sweeps")? {
            let sweeps = u32::try_from(sweeps).map_err(|_| {
                HalError::Configuration(format!("num_sweeps {sweeps} does not fit in u32"))
            })?;
            sampler = sampler.with_sweeps(sweeps);
        }
        if let Some(ms) = config.extra_u64("time_limit_ms")? {
            sampler = sampler.with_time_limit(Duration::from_millis(ms));
        }
        sampler.capabilities.name = config.name.clone();
        sampler.config = config;
        Ok(sampler)
    }
}
