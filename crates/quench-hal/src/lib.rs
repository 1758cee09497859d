//! Quench Sampler Abstraction Layer
//!
//! This crate defines how energy models reach a sampler and what comes back,
//! so that the reduction and validation code never depends on a particular
//! annealer, cloud service or classical simulation.
//!
//! # Overview
//!
//! - A common [`Sampler`] trait for drawing samples from an [`EnergyModel`]
//! - [`Capabilities`] describing variable, read and schedule limits
//! - [`AnnealSchedule`] for piecewise-linear anneal control
//! - [`SampleSet`] and [`Timing`] for results and their metadata
//! - [`SamplerRegistry`] for picking a sampler by name
//!
//! # Supported Samplers
//!
//! | Sampler | Crate | Schedules |
//! |---------|-------|-----------|
//! | Simulated annealing | `quench-adapter-sim` | yes |
//! | Exact enumeration | `quench-adapter-sim` | no |
//!
//! # Implementing a Custom Sampler
//!
//! ```ignore
//! use quench_hal::{
//!     AnnealSchedule, Capabilities, HalResult, SampleSet, Sampler, SamplerAvailability,
//! };
//! use quench_ir::EnergyModel;
//! use async_trait::async_trait;
//!
//! struct MySampler {
//!     capabilities: Capabilities,
//! }
//!
//! #[async_trait]
//! impl Sampler for MySampler {
//!     fn name(&self) -> &str { "my_sampler" }
//!
//!     fn capabilities(&self) -> &Capabilities {
//!         &self.capabilities
//!     }
//!
//!     async fn availability(&self) -> HalResult<SamplerAvailability> {
//!         Ok(SamplerAvailability::always_available())
//!     }
//!
//!     async fn sample(
//!         &self,
//!         model: &EnergyModel,
//!         num_reads: u32,
//!         schedule: Option<&AnnealSchedule>,
//!     ) -> HalResult<SampleSet> {
//!         self.capabilities.check(model.num_variables(), num_reads, schedule)?;
//!         // Submit the model and collect records
//!         # todo!()
//!     }
//! }
//! ```
//!
//! [`EnergyModel`]: quench_ir::EnergyModel

pub mod capability;
pub mod error;
pub mod registry;
pub mod sample;
pub mod sampler;
pub mod schedule;

pub use capability::Capabilities;
pub use error::{HalError, HalResult};
pub use registry::SamplerRegistry;
pub use sample::{SampleSet, Timing};
pub use sampler::{
    Sampler, SamplerAvailability, SamplerConfig, SamplerFactory, ValidationResult,
};
pub use schedule::{AnnealSchedule, MAX_SCHEDULE_POINTS, SchedulePoint};
