//! 2 by 2 Multiplier Tutorial
//!
//! Factors a number up to 15 by pinning the product bits of a multiplier
//! circuit and sampling for the inputs.

use clap::Parser;
use console::style;

use quench_demos::config::{DemoArgs, init_logging};
use quench_demos::tutorials;

#[derive(Parser, Debug)]
#[command(name = "demo-multiplier")]
#[command(about = "Factor a small number with a 2 by 2 multiplier circuit")]
struct Args {
    /// Product to factor (0 to 15)
    #[arg(short, long, default_value = "9")]
    product: u32,

    #[command(flatten)]
    demo: DemoArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    init_logging(args.demo.verbose);

    if let Err(e) = tutorials::multiplier(&args.demo, args.product).await {
        eprintln!("{} {e:#}", style("Error:").red().bold());
        std::process::exit(1);
    }
}
