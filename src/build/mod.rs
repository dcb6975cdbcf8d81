pub mod copy;
pub mod story;
pub mod topic;

use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::config::SitePaths;
use crate::error::Result;
use crate::naming;
use crate::output::CommandOutput;
use crate::properties::{self, PropertySet};
use crate::templates;

#[derive(Debug)]
pub struct BuildStats {
    pub files_copied: usize,
    pub topics_built: usize,
    pub stories_rendered: usize,
    pub duration_ms: u64,
}

impl CommandOutput for BuildStats {
    fn human_display(&self) -> String {
        format!(
            "Built {} stor{} in {} topic{} in {:.1}s ({} files copied)",
            self.stories_rendered,
            if self.stories_rendered == 1 { "y" } else { "ies" },
            self.topics_built,
            if self.topics_built == 1 { "" } else { "s" },
            self.duration_ms as f64 / 1000.0,
            self.files_copied
        )
    }
}

pub fn build_site(paths: &SitePaths) -> Result<BuildStats> {
    let start = Instant::now();
    paths.validate()?;

    // Step 1: Copy content into a fresh destination
    let files_copied = copy::copy_tree(&paths.content, &paths.destination)?;
    tracing::info!(
        "Copied {files_copied} files from {} to {}",
        paths.content.display(),
        paths.destination.display()
    );
    let root_dir = paths.destination.as_path();

    // Step 2: Root defaults
    let mut root = properties::load_defaults(root_dir)?;

    // Step 3: Render topics, exposing each index as `topic_<name>`
    let topics = topic::list_topics(root_dir)?;
    let mut stories_rendered = 0;
    for name in &topics {
        let index = topic::render_topic(&root_dir.join(name), name)?;
        stories_rendered += index.stories;
        root = root.with(naming::topic_key(name), index.fragment);
    }

    // Step 4: Render root stories against the root model
    stories_rendered += render_root_stories(root_dir, &root)?;

    // Step 5: Drop root scaffolding
    let scaffolding = naming::templates_dir(root_dir);
    if scaffolding.is_dir() {
        fs::remove_dir_all(&scaffolding)?;
    }

    Ok(BuildStats {
        files_copied,
        topics_built: topics.len(),
        stories_rendered,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

fn render_root_stories(root_dir: &Path, root: &PropertySet) -> Result<usize> {
    let stories = templates::list_stories(root_dir)?;
    if stories.is_empty() {
        return Ok(0);
    }

    let tera = templates::load_templates(root_dir)?;
    for name in &stories {
        story::render_root_story(&tera, root_dir, name, root)?;
    }
    tracing::info!("Root: {} stories", stories.len());
    Ok(stories.len())
}
