//! Coin Flip Tutorial
//!
//! Unbiased variables make a random number generator. Shows the heads
//! distribution and the timing the sampler reports.

use clap::Parser;
use console::style;

use quench_demos::config::{DemoArgs, init_logging};
use quench_demos::prompt::{InputSource, NonInteractive, ScriptedSource, StdinSource};
use quench_demos::tutorials;

#[derive(Parser, Debug)]
#[command(name = "demo-coin")]
#[command(about = "Flip coins with unbiased variables and plot the heads distribution")]
struct Args {
    /// Coins per trial (skips the question; clamped to 1..=2000)
    #[arg(short, long)]
    coins: Option<i64>,

    /// Do not ask; use the default number of coins
    #[arg(long)]
    no_input: bool,

    #[command(flatten)]
    demo: DemoArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    init_logging(args.demo.verbose);

    let mut input: Box<dyn InputSource> = match args.coins {
        Some(coins) => Box::new(ScriptedSource::new([coins.to_string()])),
        None if args.no_input || args.demo.json => Box::new(NonInteractive),
        None => Box::new(StdinSource),
    };
    if let Err(e) = tutorials::coin_flips(&args.demo, input.as_mut()).await {
        eprintln!("{} {e:#}", style("Error:").red().bold());
        std::process::exit(1);
    }
}
