//! Centralized file naming for the story/topic layout.
//!
//! The content tree communicates intent through file names alone:
//!
//! ```text
//! content/
//! ├── templates/                 # Root scaffolding (removed from output)
//! │   ├── templates.properties   # Root defaults
//! │   ├── header.ftl
//! │   └── footer.ftl
//! ├── index.ftl                  # Root story → index.html
//! ├── index.properties           # Overlay for the root story
//! ├── style.css                  # Copied through untouched
//! └── blog/                      # Topic → property `topic_blog`
//!     ├── templates/
//!     │   ├── templates.properties
//!     │   ├── header.ftl
//!     │   ├── footer.ftl
//!     │   └── index.ftl          # Per-story fragment for the topic index
//!     ├── first.ftl              # Story → blog/first.html
//!     └── first.properties
//! ```
//!
//! Every path the pipeline touches is built by one of the functions below.

use std::path::{Path, PathBuf};

/// Name of the scaffolding directory holding shared templates and defaults.
pub const TEMPLATES_DIR: &str = "templates";

/// Extension of story and partial templates.
pub const TEMPLATE_EXT: &str = "ftl";

pub const PROPERTIES_EXT: &str = "properties";

pub const HTML_EXT: &str = "html";

/// Shared defaults file inside a `templates/` directory.
pub const DEFAULTS_FILE: &str = "templates.properties";

pub const HEADER_TEMPLATE: &str = "templates/header.ftl";
pub const FOOTER_TEMPLATE: &str = "templates/footer.ftl";
pub const INDEX_TEMPLATE: &str = "templates/index.ftl";

/// Model key holding the story's site-relative path without extension.
pub const PATH_TO_STORY_KEY: &str = "pathToStory";

/// Model key ordering stories inside a topic.
pub const ORDER_KEY: &str = "order";

pub const DEFAULT_ORDER: &str = "0";

const TOPIC_KEY_PREFIX: &str = "topic_";

/// `<dir>/templates`
pub fn templates_dir(dir: &Path) -> PathBuf {
    dir.join(TEMPLATES_DIR)
}

/// `<dir>/templates/templates.properties`
pub fn defaults_file(dir: &Path) -> PathBuf {
    templates_dir(dir).join(DEFAULTS_FILE)
}

/// Template name of a story as registered with the engine: `<story>.ftl`.
pub fn story_template_name(story: &str) -> String {
    format!("{story}.{TEMPLATE_EXT}")
}

/// `<dir>/<story>.ftl`
pub fn story_template_file(dir: &Path, story: &str) -> PathBuf {
    dir.join(story_template_name(story))
}

/// `<dir>/<story>.properties`
pub fn story_properties_file(dir: &Path, story: &str) -> PathBuf {
    dir.join(format!("{story}.{PROPERTIES_EXT}"))
}

/// `<dir>/<story>.html`
pub fn story_html_file(dir: &Path, story: &str) -> PathBuf {
    dir.join(format!("{story}.{HTML_EXT}"))
}

/// Root property key under which a topic's aggregated fragment is stored.
pub fn topic_key(topic: &str) -> String {
    format!("{TOPIC_KEY_PREFIX}{topic}")
}

/// Value of `pathToStory`: `<topic>/<story>` inside a topic, `<story>` at the root.
pub fn path_to_story(topic: Option<&str>, story: &str) -> String {
    match topic {
        Some(topic) => format!("{topic}/{story}"),
        None => story.to_string(),
    }
}

pub fn has_template_ext(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == TEMPLATE_EXT)
}

/// Story base name of a template file, or `None` if the path is not a `.ftl`
/// file or its name is not UTF-8.
pub fn story_name(path: &Path) -> Option<&str> {
    if !has_template_ext(path) {
        return None;
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
}

/// Whether a directory name marks scaffolding rather than a topic.
pub fn is_templates_dir(name: &str) -> bool {
    name == TEMPLATES_DIR
}
