//! Tutorial bodies shared by the single binaries and `demo-all`.
//!
//! Each tutorial takes the shared [`DemoArgs`] and, where it asks questions,
//! an [`InputSource`](crate::prompt::InputSource).

pub mod fun;
pub mod logic;
pub mod schedule;

pub use fun::{coin_flips, four_queens};
pub use logic::{and_gate, full_adder, multiplier, not_gate};
pub use schedule::anneal_schedules;

use crate::config::DemoArgs;
use crate::create_spinner;
use crate::runners::{Pipeline, PipelineOutcome};
use quench_hal::Sampler;
use quench_ir::{ConstraintSet, EnergyModel};

/// Run the pipeline behind a spinner.
pub(crate) async fn run_with_spinner(
    pipeline: &Pipeline,
    sampler: &dyn Sampler,
    model: &EnergyModel,
    constraints: &ConstraintSet,
) -> anyhow::Result<PipelineOutcome> {
    let spinner = create_spinner(&format!(
        "Sampling {} reads on {}...",
        pipeline.num_reads(),
        sampler.name()
    ));
    let outcome = pipeline.run(sampler, model, constraints).await;
    spinner.finish_and_clear();
    Ok(outcome?)
}

/// Print `outcome` as JSON when `--json` was given. Returns whether it did.
pub(crate) fn emit_json(args: &DemoArgs, outcome: &PipelineOutcome) -> anyhow::Result<bool> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.to_json())?);
    }
    Ok(args.json)
}
