//! The same biased NOT gate under three anneal schedules.

use super::{emit_json, run_with_spinner};
use crate::config::DemoArgs;
use crate::problems::{biased_not_qubo, not_constraints, tutorial_schedules};
use crate::runners::Pipeline;
use crate::{print_header, print_info, print_records, print_section, print_success, print_totals};

/// Reads per schedule.
const SCHEDULE_READS: u32 = 1000;

/// Sample a NOT gate with a small extra bias on `q0` under each schedule.
pub async fn anneal_schedules(args: &DemoArgs) -> anyhow::Result<()> {
    let model = biased_not_qubo()?;
    let constraints = not_constraints()?;
    let sampler = args.build_sampler()?;
    let reads = args.reads_or(SCHEDULE_READS, SCHEDULE_READS);

    if !args.json {
        print_header("Custom anneal schedules");
        println!("  A NOT gate where q0 carries an extra -0.1 bias, sampled under three");
        println!("  schedules to see whether the schedule shifts the distribution.");
        if args.backend.is_simulator() {
            print_info("The simulated annealer maps each schedule onto its temperature ramp.");
        }
    }

    for (i, (description, schedule)) in tutorial_schedules()?.into_iter().enumerate() {
        if !args.json {
            print_section(&format!("Anneal schedule {}: {description}", i + 1));
        }
        let pipeline = Pipeline::new(reads).with_schedule(schedule);
        let outcome = run_with_spinner(&pipeline, sampler.as_ref(), &model, &constraints).await?;
        if emit_json(args, &outcome)? {
            continue;
        }
        print_records(&outcome.samples);
        print_totals(&outcome.report);
    }

    if !args.json {
        print_success("Anneal schedules complete");
    }
    Ok(())
}
