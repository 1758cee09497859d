//! Tutorial runners.

pub mod pipeline;

pub use pipeline::{Pipeline, PipelineOutcome};
