use anyhow::Result;
use clap::Parser;
use expense_tracker::cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("expense_tracker={level}")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    cli.run()
}
