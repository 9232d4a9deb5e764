//! Orderflow command-line runner

use clap::Parser;

mod cli;
mod config;
mod observability;

fn main() -> anyhow::Result<()> {
    // Load .env file if present (ignore if missing)
    _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    observability::init(cli.logging())?;

    cli.run()
}
