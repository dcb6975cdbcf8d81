use std::fs;
use std::path::Path;

use crate::error::{Result, SiteError};
use crate::naming;
use crate::properties::{self, PropertySet};
use crate::templates;

/// Whether a page must have `templates/header.ftl` and `templates/footer.ftl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partials {
    /// Topic pages: a missing header or footer is a template error.
    Required,
    /// Root pages: a missing header or footer is skipped.
    Optional,
}

/// What a rendered topic story leaves behind for its topic index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryFragment {
    pub order: String,
    pub fragment: String,
}

/// Render one story of `topic` found in `dir`.
///
/// Writes `<story>.html` (header + story + footer), removes the story's
/// `.ftl` and `.properties`, then renders `templates/index.ftl` with the same
/// model and returns it together with the story's ordering key.
pub fn render_story(tera: &tera::Tera, dir: &Path, story: &str, topic: &str) -> Result<StoryFragment> {
    let model = properties::resolve(dir, story)?.with(
        naming::PATH_TO_STORY_KEY,
        naming::path_to_story(Some(topic), story),
    );
    let ctx = model.to_context();

    write_page(tera, dir, story, &ctx, Partials::Required)?;
    remove_scaffolding(dir, story)?;

    let fragment = tera
        .render(naming::INDEX_TEMPLATE, &ctx)
        .map_err(|source| SiteError::IndexFragment {
            topic: topic.to_string(),
            story: story.to_string(),
            source,
        })?;

    tracing::debug!("Rendered story '{topic}/{story}' (order {})", model.order());
    Ok(StoryFragment {
        order: model.order().to_string(),
        fragment,
    })
}

/// Render one root-level story of `dir` on top of the root model.
///
/// The story's own `.properties` overlays `root`, then `pathToStory` is set
/// to the bare story name. Header and footer are optional here.
pub fn render_root_story(tera: &tera::Tera, dir: &Path, story: &str, root: &PropertySet) -> Result<()> {
    let model = root
        .overlay(&properties::load_story(dir, story)?)
        .with(naming::PATH_TO_STORY_KEY, naming::path_to_story(None, story));

    write_page(tera, dir, story, &model.to_context(), Partials::Optional)?;
    remove_scaffolding(dir, story)?;

    tracing::debug!("Rendered root story '{story}'");
    Ok(())
}

/// Concatenate header, story and footer output in that order.
pub fn render_page(
    tera: &tera::Tera,
    story: &str,
    ctx: &tera::Context,
    partials: Partials,
) -> tera::Result<String> {
    let story_template = naming::story_template_name(story);
    let mut html = String::new();

    for name in [
        naming::HEADER_TEMPLATE,
        story_template.as_str(),
        naming::FOOTER_TEMPLATE,
    ] {
        let is_partial = name != story_template;
        if is_partial && partials == Partials::Optional && !templates::has_template(tera, name) {
            continue;
        }
        html.push_str(&tera.render(name, ctx)?);
    }

    Ok(html)
}

fn write_page(
    tera: &tera::Tera,
    dir: &Path,
    story: &str,
    ctx: &tera::Context,
    partials: Partials,
) -> Result<()> {
    let path = naming::story_html_file(dir, story);
    let html = render_page(tera, story, ctx, partials).map_err(|source| SiteError::Render {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, html)?;
    Ok(())
}

/// Delete a rendered story's template and property overlay.
fn remove_scaffolding(dir: &Path, story: &str) -> Result<()> {
    fs::remove_file(naming::story_template_file(dir, story))?;
    let props = naming::story_properties_file(dir, story);
    if props.is_file() {
        fs::remove_file(props)?;
    }
    Ok(())
}
