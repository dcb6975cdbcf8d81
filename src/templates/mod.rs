use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, SiteError};
use crate::naming;

/// Load the templates of one directory into a fresh Tera instance.
///
/// Stories directly inside `dir` are registered as `<story>.ftl`; partials
/// anywhere under `dir/templates/` as `templates/<relative path>`, so a story
/// can `{% include "templates/nav.ftl" %}` and the pipeline can render
/// `templates/header.ftl` by name. Nested topic directories are not loaded.
pub fn load_templates(dir: &Path) -> Result<tera::Tera> {
    let mut files: Vec<(PathBuf, Option<String>)> = list_stories(dir)?
        .into_iter()
        .map(|story| {
            (
                naming::story_template_file(dir, &story),
                Some(naming::story_template_name(&story)),
            )
        })
        .collect();

    let partials_dir = naming::templates_dir(dir);
    if partials_dir.is_dir() {
        for entry in WalkDir::new(&partials_dir).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            let path = entry.path();
            if !entry.file_type().is_file() || !naming::has_template_ext(path) {
                continue;
            }
            let rel = path.strip_prefix(dir).unwrap_or(path);
            files.push((path.to_path_buf(), Some(template_name(rel))));
        }
    }

    let mut tera = tera::Tera::default();
    // Output is HTML assembled from trusted templates; escaping would mangle
    // fragments injected through `topic_*` keys.
    tera.autoescape_on(vec![]);
    tera.add_template_files(files)?;
    tracing::debug!(
        "Loaded {} templates from {}",
        tera.get_template_names().count(),
        dir.display()
    );
    Ok(tera)
}

/// Base names of the `.ftl` stories directly inside `dir`, sorted by file name.
///
/// A `.ftl` file whose name is not UTF-8 can be neither rendered nor
/// cleaned up, so it fails the listing.
pub fn list_stories(dir: &Path) -> Result<Vec<String>> {
    let mut stories = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !naming::has_template_ext(path) {
            continue;
        }
        let story = naming::story_name(path).ok_or_else(|| SiteError::InvalidStoryName {
            path: path.to_path_buf(),
        })?;
        stories.push(story.to_string());
    }
    Ok(stories)
}

pub fn has_template(tera: &tera::Tera, name: &str) -> bool {
    tera.get_template(name).is_ok()
}

/// Engine name for a path relative to the loaded directory, always `/`-separated.
fn template_name(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
