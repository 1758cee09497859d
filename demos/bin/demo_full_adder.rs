//! Full Adder Tutorial
//!
//! Stitches XOR, AND and OR gate constraints into one circuit, reduces it to
//! an energy model and keeps only the samples that satisfy every gate.

use clap::Parser;
use console::style;

use quench_demos::config::{DemoArgs, init_logging};
use quench_demos::tutorials;

#[derive(Parser, Debug)]
#[command(name = "demo-full-adder")]
#[command(about = "Build a full adder from gate constraints and sample it")]
struct Args {
    #[command(flatten)]
    demo: DemoArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    init_logging(args.demo.verbose);

    if let Err(e) = tutorials::full_adder(&args.demo).await {
        eprintln!("{} {e:#}", style("Error:").red().bold());
        std::process::exit(1);
    }
}
