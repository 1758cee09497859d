//! Anneal Schedule Tutorial

use clap::Parser;
use console::style;

use quench_demos::config::{DemoArgs, init_logging};
use quench_demos::tutorials;

#[derive(Parser, Debug)]
#[command(name = "demo-anneal-schedule")]
#[command(about = "Compare three custom anneal schedules on a biased NOT gate")]
struct Args {
    #[command(flatten)]
    demo: DemoArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    init_logging(args.demo.verbose);

    if let Err(e) = tutorials::anneal_schedules(&args.demo).await {
        eprintln!("{} {e:#}", style("Error:").red().bold());
        std::process::exit(1);
    }
}
