pub mod build;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "storysite",
    about = "Renders a content tree of story templates into a static web site",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub build: build::BuildArgs,
}
