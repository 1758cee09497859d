//! NOT Gate Tutorial
//!
//! The smallest possible model: two variables whose correct states share the
//! lowest energy.

use clap::Parser;
use console::style;

use quench_demos::config::{DemoArgs, init_logging};
use quench_demos::tutorials;

#[derive(Parser, Debug)]
#[command(name = "demo-not")]
#[command(about = "Sample a NOT gate written as a raw QUBO")]
struct Args {
    #[command(flatten)]
    demo: DemoArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    init_logging(args.demo.verbose);

    if let Err(e) = tutorials::not_gate(&args.demo).await {
        eprintln!("{} {e:#}", style("Error:").red().bold());
        std::process::exit(1);
    }
}
