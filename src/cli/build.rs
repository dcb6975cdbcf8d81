use std::path::PathBuf;

use clap::Args;

use crate::build;
use crate::config::SitePaths;
use crate::output::human;
use crate::output::CommandOutput;

#[derive(Args)]
pub struct BuildArgs {
    /// Source content location
    #[arg(short, long)]
    pub content: PathBuf,

    /// Destination to write web site files to
    #[arg(short, long)]
    pub destination: PathBuf,
}

pub fn run(args: &BuildArgs) -> anyhow::Result<()> {
    let paths = SitePaths::new(&args.content, &args.destination);

    human::info(&format!(
        "Building {} into {}",
        paths.content.display(),
        paths.destination.display()
    ));

    let stats = build::build_site(&paths)?;
    human::success(&stats.human_display());

    Ok(())
}
