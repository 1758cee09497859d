//! Four queens and coin flipping.

use std::time::Instant;

use quench_ir::ReductionConfig;

use super::{emit_json, run_with_spinner};
use crate::config::DemoArgs;
use crate::problems::coin::{DEFAULT_COINS, MAX_COINS, TRIALS};
use crate::problems::{
    Verdict, coin_model, draw_board, four_queens as four_queens_board, heads_histogram,
    histogram_lines, single_row,
};
use crate::prompt::{InputSource, pause, read_count};
use crate::runners::Pipeline;
use crate::{
    create_spinner, print_header, print_info, print_result, print_section, print_success,
    print_timing, print_totals, print_warning,
};

/// Samples per step of the four-queens tutorial.
const QUEENS_READS: u32 = 1000;

/// One row of four cells, then the full 4 by 4 board.
pub async fn four_queens(args: &DemoArgs, input: &mut dyn InputSource) -> anyhow::Result<()> {
    let sampler = args.build_sampler()?;
    let pipeline = Pipeline::new(args.reads_or(QUEENS_READS, QUEENS_READS));
    let config = ReductionConfig::default();

    if !args.json {
        print_header("Four queens");
        println!("  Place four queens on a 4 by 4 board so that none can take another.");
        pause(input, "Press enter to get started!\n> ");
        print_section("Step 1: one row");
        println!("  A row of four cells, x1 x2 x3 x4, holds exactly one queen:");
        println!("  at least one cell is set, and no two cells are both set.");
    }
    let row = single_row()?;
    let model = row.to_energy_model(&config)?;
    let outcome = run_with_spinner(&pipeline, sampler.as_ref(), &model, &row).await?;
    if !emit_json(args, &outcome)? {
        for (key, entry) in outcome.report.entries() {
            println!("  {key}  ({} times)", entry.occurrences);
        }
        print_totals(&outcome.report);
    }

    if !args.json {
        print_section("Step 2: the full board");
        println!("  Every row needs a queen. No row, column or diagonal may hold two.");
        pause(input, "Press enter to try the four-queens problem.\n> ");
    }
    let board = four_queens_board()?;
    let model = board.to_energy_model(&config)?;
    let outcome = run_with_spinner(&pipeline, sampler.as_ref(), &model, &board).await?;
    if emit_json(args, &outcome)? {
        return Ok(());
    }
    print_result("Model variables", model.num_variables());
    for (_, entry) in outcome.report.entries() {
        print!("{}", draw_board(&entry.assignment, 4)?);
        println!("({} times)\n", entry.occurrences);
    }
    print_totals(&outcome.report);
    let verdict = Verdict::from_counts(
        outcome.report.valid_occurrences(),
        outcome.report.invalid_occurrences(),
    );
    match verdict {
        Verdict::StruckOut => print_warning(verdict.message()),
        _ => print_success(verdict.message()),
    }
    Ok(())
}

/// Flip a number of unbiased coins many times and histogram the heads.
pub async fn coin_flips(args: &DemoArgs, input: &mut dyn InputSource) -> anyhow::Result<()> {
    if !args.json {
        print_header("Coin flipperama");
        println!("  Flip a bunch of coins and show the distribution.");
    }
    let answer = read_count(
        input,
        "How many coins do you want to flip at the same time? ",
        DEFAULT_COINS,
        1,
        MAX_COINS,
    );
    if let Some(note) = answer.note(DEFAULT_COINS, 1, MAX_COINS) {
        print_info(&note);
    }
    let coins = answer.value;
    let trials = args.reads_or(TRIALS, TRIALS);
    let model = coin_model(coins);
    let sampler = args.build_sampler()?;

    if !args.json {
        print_result("Coins per trial", coins);
        print_result("Trials", trials);
        print_section("Flipping");
    }
    let flips = u64::from(coins) * u64::from(trials);
    let spinner = create_spinner(&format!("Flipping {flips} coins..."));
    let start = Instant::now();
    let samples = Pipeline::new(trials).sample(sampler.as_ref(), &model).await;
    let elapsed = start.elapsed();
    spinner.finish_and_clear();
    let samples = samples?;

    let counts = heads_histogram(&samples, coins);
    if args.json {
        let value = serde_json::json!({
            "coins": coins,
            "trials": trials,
            "histogram": counts,
            "timing": samples.timing(),
            "elapsed_us": elapsed.as_secs_f64() * 1e6,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if samples.timing().and_then(|t| t.access_time_us).is_none() {
        print_info("QPU access time is not available.");
    }
    println!(
        "  It took {:.4} seconds to flip {flips} coins.",
        elapsed.as_secs_f64()
    );
    print_timing(samples.timing());

    print_section("Heads per trial");
    for line in histogram_lines(&counts) {
        println!("  {line}");
    }
    print_success("Coin flips complete");
    Ok(())
}
