//! Four Queens Tutorial
//!
//! Solves one row of the puzzle first, then the whole 4 by 4 board.

use clap::Parser;
use console::style;

use quench_demos::config::{DemoArgs, init_logging};
use quench_demos::prompt::{InputSource, NonInteractive, StdinSource};
use quench_demos::tutorials;

#[derive(Parser, Debug)]
#[command(name = "demo-four-queens")]
#[command(about = "Solve the four-queens puzzle with AnyOf and NotBoth constraints")]
struct Args {
    /// Do not wait for enter between steps
    #[arg(long)]
    no_input: bool,

    #[command(flatten)]
    demo: DemoArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    init_logging(args.demo.verbose);

    let mut input: Box<dyn InputSource> = if args.no_input || args.demo.json {
        Box::new(NonInteractive)
    } else {
        Box::new(StdinSource)
    };
    if let Err(e) = tutorials::four_queens(&args.demo, input.as_mut()).await {
        eprintln!("{} {e:#}", style("Error:").red().bold());
        std::process::exit(1);
    }
}
