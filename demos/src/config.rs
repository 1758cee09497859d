//! Command-line options shared by every tutorial binary.

use std::fmt;

use clap::{ArgAction, Args, ValueEnum};
use tracing_subscriber::EnvFilter;

use quench_adapter_sim::register_samplers;
use quench_hal::{HalResult, Sampler, SamplerConfig, SamplerRegistry};

/// Which sampler a tutorial runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SamplerChoice {
    /// In-process simulated annealing.
    Sim,
    /// Exhaustive enumeration (small models only).
    Exact,
    /// Annealing hardware.
    Qpu,
}

impl SamplerChoice {
    /// Name the sampler is registered under.
    pub fn registry_name(self) -> &'static str {
        match self {
            SamplerChoice::Sim => "sim",
            SamplerChoice::Exact => "exact",
            SamplerChoice::Qpu => "qpu",
        }
    }

    /// Whether this is one of the in-process samplers.
    pub fn is_simulator(self) -> bool {
        !matches!(self, SamplerChoice::Qpu)
    }
}

impl fmt::Display for SamplerChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.registry_name())
    }
}

/// Options flattened into every tutorial's argument parser.
#[derive(Args, Debug, Clone)]
pub struct DemoArgs {
    /// Sampler to run on
    #[arg(long, value_enum, env = "QUENCH_BACKEND", default_value_t = SamplerChoice::Sim)]
    pub backend: SamplerChoice,

    /// Number of reads (defaults depend on the tutorial and sampler)
    #[arg(long)]
    pub reads: Option<u32>,

    /// RNG seed for the simulated annealer
    #[arg(long, env = "QUENCH_SEED")]
    pub seed: Option<u64>,

    /// Metropolis sweeps per read for the simulated annealer
    #[arg(long)]
    pub sweeps: Option<u32>,

    /// Print the aggregated report as JSON
    #[arg(long)]
    pub json: bool,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            backend: SamplerChoice::Sim,
            reads: None,
            seed: None,
            sweeps: None,
            json: false,
            verbose: 0,
        }
    }
}

impl DemoArgs {
    /// Number of reads: `--reads` if given, else the tutorial's default for
    /// the chosen kind of sampler.
    pub fn reads_or(&self, simulator_default: u32, hardware_default: u32) -> u32 {
        self.reads.unwrap_or(if self.backend.is_simulator() {
            simulator_default
        } else {
            hardware_default
        })
    }

    /// Sampler configuration carrying `--seed` and `--sweeps`.
    pub fn sampler_config(&self) -> SamplerConfig {
        let mut config = SamplerConfig::new(self.backend.registry_name());
        if let Some(seed) = self.seed {
            config = config.with_extra("seed", seed.into());
        }
        if let Some(sweeps) = self.sweeps {
            config = config.with_extra("num_sweeps", sweeps.into());
        }
        config
    }

    /// Build the chosen sampler.
    ///
    /// Only the in-process samplers are registered, so `qpu` fails with
    /// [`quench_hal::HalError::BackendUnavailable`].
    pub fn build_sampler(&self) -> HalResult<Box<dyn Sampler>> {
        let mut registry = SamplerRegistry::new();
        register_samplers(&mut registry);
        registry.create(self.sampler_config())
    }
}

/// Log level selected by the number of `-v` flags.
pub fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global tracing subscriber.
pub fn init_logging(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_filter(verbose)))
        .with_target(false)
        .init();
}
