use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use storysite::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    storysite::cli::build::run(&cli.build)?;

    Ok(())
}
