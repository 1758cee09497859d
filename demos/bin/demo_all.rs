//! Complete Tutorial Suite
//!
//! Runs every tutorial in sequence without asking questions.

use std::time::Instant;

use clap::Parser;
use console::style;

use quench_demos::config::{DemoArgs, init_logging};
use quench_demos::prompt::NonInteractive;
use quench_demos::{print_header, print_result, print_section, print_success, tutorials};

#[derive(Parser, Debug)]
#[command(name = "demo-all")]
#[command(about = "Run every tutorial in sequence")]
struct Args {
    /// Product for the multiplier tutorial
    #[arg(long, default_value = "9")]
    product: u32,

    /// Skip the coin flip tutorial (the slowest one)
    #[arg(long)]
    skip_coin: bool,

    #[command(flatten)]
    demo: DemoArgs,
}

async fn run(args: &Args) -> anyhow::Result<()> {
    let demo = &args.demo;
    let mut input = NonInteractive;

    tutorials::not_gate(demo).await?;
    tutorials::and_gate(demo).await?;
    tutorials::full_adder(demo).await?;
    tutorials::multiplier(demo, args.product).await?;
    tutorials::four_queens(demo, &mut input).await?;
    if !args.skip_coin {
        tutorials::coin_flips(demo, &mut input).await?;
    }
    tutorials::anneal_schedules(demo).await?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    init_logging(args.demo.verbose);
    let start = Instant::now();

    if !args.demo.json {
        print_header("Quench Tutorial Suite");
        print_result("Sampler", args.demo.backend);
    }

    if let Err(e) = run(&args).await {
        eprintln!("{} {e:#}", style("Error:").red().bold());
        std::process::exit(1);
    }

    if !args.demo.json {
        print_section("Summary");
        print_result("Total time", format!("{:.2?}", start.elapsed()));
        print_success("All tutorials complete");
    }
}
