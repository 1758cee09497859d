//! Quench In-Process Samplers
//!
//! This crate provides two samplers that run inside the calling process,
//! so the whole reduce, sample and validate pipeline works without access
//! to annealing hardware.
//!
//! | Sampler | Registry name | Schedules | Deterministic | Model size |
//! |---------|---------------|-----------|---------------|------------|
//! | [`SimulatedAnnealingSampler`] | `sim` | yes | with a seed | up to 5000 variables |
//! | [`ExactSampler`] | `exact` | no | yes | up to 20 variables |
//!
//! # Example
//!
//! ```ignore
//! use quench_adapter_sim::SimulatedAnnealingSampler;
//! use quench_hal::Sampler;
//! use quench_ir::{ConstraintSet, Gate, ReductionConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut constraints = ConstraintSet::new();
//!     constraints.add_gate(Gate::And, &["x1", "x2", "z"])?;
//!     let model = constraints.to_energy_model(&ReductionConfig::default())?;
//!
//!     let sampler = SimulatedAnnealingSampler::new().with_seed(1);
//!     let samples = sampler.sample(&model, 100, None).await?;
//!     for record in &samples {
//!         println!("{record}");
//!     }
//!     Ok(())
//! }
//! ```

mod annealer;
mod exact;

pub use annealer::{DEFAULT_NUM_SWEEPS, SimulatedAnnealingSampler};
pub use exact::{ExactSampler, MAX_EXACT_VARIABLES};

use quench_hal::SamplerRegistry;

/// Register both in-process samplers under `sim` and `exact`.
pub fn register_samplers(registry: &mut SamplerRegistry) {
    registry.register::<SimulatedAnnealingSampler>("sim");
    registry.register::<ExactSampler>("exact");
}
