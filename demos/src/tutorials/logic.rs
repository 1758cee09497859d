//! Logic gate tutorials: NOT, AND, full adder and the 2 by 2 multiplier.

use anyhow::{Context, ensure};
use console::style;

use quench_ir::ReductionConfig;

use super::{emit_json, run_with_spinner};
use crate::config::DemoArgs;
use crate::problems::{
    and_constraints, and_qubo, format_product, format_sum, full_adder as full_adder_circuit,
    multiplier as multiplier_circuit, not_constraints, not_qubo, sanity_assignment,
};
use crate::runners::Pipeline;
use crate::{
    print_header, print_records, print_result, print_section, print_success, print_totals,
};

/// NOT gate from a raw QUBO, 20 reads.
pub async fn not_gate(args: &DemoArgs) -> anyhow::Result<()> {
    let model = not_qubo()?;
    let constraints = not_constraints()?;
    let sampler = args.build_sampler()?;

    if !args.json {
        print_header("Logic gate: NOT");
        println!("  Given variables q0 (input) and q4 (output), find states where q4 = NOT q0.");
        println!("  The two correct states share the lowest energy, -1.");
        print_section("Sampling");
    }
    let pipeline = Pipeline::new(args.reads_or(20, 20));
    let outcome = run_with_spinner(&pipeline, sampler.as_ref(), &model, &constraints).await?;
    if emit_json(args, &outcome)? {
        return Ok(());
    }

    print_records(&outcome.samples);
    print_totals(&outcome.report);
    print_success("NOT gate complete");
    Ok(())
}

/// AND gate from a raw QUBO, 40 reads. Rows that break the gate are flagged.
pub async fn and_gate(args: &DemoArgs) -> anyhow::Result<()> {
    let model = and_qubo()?;
    let constraints = and_constraints()?;
    let sampler = args.build_sampler()?;

    if !args.json {
        print_header("Logic gate: AND");
        println!("  Given variables x1, x2 and z, find states where z = x1 AND x2.");
        println!("  The four correct states have energy 0; every other state is higher.");
        print_section("Sampling");
    }
    let pipeline = Pipeline::new(args.reads_or(40, 40));
    let outcome = run_with_spinner(&pipeline, sampler.as_ref(), &model, &constraints).await?;
    if emit_json(args, &outcome)? {
        return Ok(());
    }

    for record in &outcome.samples {
        let flag = if constraints.check(&record.assignment)? {
            style("ok").green()
        } else {
            style("violates AND").red()
        };
        println!("  {record}  {flag}");
    }
    print_totals(&outcome.report);
    print_success("AND gate complete");
    Ok(())
}

/// Full adder from XOR, AND and OR gates.
pub async fn full_adder(args: &DemoArgs) -> anyhow::Result<()> {
    let constraints = full_adder_circuit()?;
    ensure!(
        constraints.check(&sanity_assignment())?,
        "full adder circuit rejects 1 + 1 + 0 = 10"
    );
    let model = constraints.to_energy_model(&ReductionConfig::default())?;
    let sampler = args.build_sampler()?;

    if !args.json {
        print_header("Logic gate: full adder");
        println!("  Given a, b, cIn, s and cOut, find states where s = a + b + cIn");
        println!("  with the carry bit in cOut.");
        print_section("Reduction");
        print_result("Constraints", constraints.len());
        print_result("Declared variables", constraints.variable_names().len());
        print_result("Model variables", model.num_variables());
        print_result("Interactions", model.num_interactions());
        print_section("Sampling");
    }
    let pipeline = Pipeline::new(args.reads_or(30, 5000));
    let outcome = run_with_spinner(&pipeline, sampler.as_ref(), &model, &constraints).await?;
    if emit_json(args, &outcome)? {
        return Ok(());
    }

    for (_, entry) in outcome.report.entries() {
        println!(
            "  {}  ({} times)",
            format_sum(&entry.assignment)?,
            entry.occurrences
        );
    }
    print_totals(&outcome.report);
    print_success("Full adder complete");
    Ok(())
}

/// Factor `product` with a 2 by 2 multiplier circuit.
pub async fn multiplier(args: &DemoArgs, product: u32) -> anyhow::Result<()> {
    let constraints = multiplier_circuit(product).context("cannot build the multiplier")?;
    let model = constraints.to_energy_model(&ReductionConfig::default())?;
    let sampler = args.build_sampler()?;

    if !args.json {
        print_header("Logic gate: 2 by 2 multiplier");
        println!("  Given a0, a1, b0, b1 and c0..c3, find states where C = A * B");
        println!("  and C = {product}.");
        print_section("Sampling");
    }
    let pipeline = Pipeline::new(args.reads_or(30, 3000));
    let outcome = run_with_spinner(&pipeline, sampler.as_ref(), &model, &constraints).await?;
    if emit_json(args, &outcome)? {
        return Ok(());
    }

    for (_, entry) in outcome.report.entries() {
        println!(
            "  {}  ({} times, energy {})",
            format_product(&entry.assignment)?,
            entry.occurrences,
            entry.min_energy
        );
    }
    print_totals(&outcome.report);
    if outcome.report.num_solutions() == 0 {
        println!("  No factorization of {product} into two-bit factors was found.");
    }
    print_success("Multiplier complete");
    Ok(())
}
