pub mod parser;

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Result, SiteError};
use crate::naming;

/// A flat string-to-string template model.
///
/// Sets are layered rather than mutated: [`PropertySet::overlay`] and
/// [`PropertySet::with`] return a new set, so each pipeline stage hands the
/// next one a model built on top of its input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertySet {
    entries: BTreeMap<String, String>,
}

impl PropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a property file. Later duplicate keys win.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SiteError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let entries = parser::parse(&text).map_err(|e| SiteError::Properties {
            path: path.to_path_buf(),
            line: e.line,
            message: e.message,
        })?;
        Ok(entries.into_iter().collect())
    }

    /// Like [`PropertySet::load`], but an absent file yields `None`.
    pub fn load_if_exists(path: &Path) -> Result<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Return a copy of this set with `key` set to `value`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Return a new set where keys from `top` win over keys in `self`.
    pub fn overlay(&self, top: &PropertySet) -> PropertySet {
        let mut entries = self.entries.clone();
        entries.extend(top.entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        PropertySet { entries }
    }

    /// The story ordering key, `"0"` when unset.
    pub fn order(&self) -> &str {
        self.get(naming::ORDER_KEY).unwrap_or(naming::DEFAULT_ORDER)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Expose every key as a top-level template variable.
    pub fn to_context(&self) -> tera::Context {
        let mut ctx = tera::Context::new();
        for (key, value) in &self.entries {
            ctx.insert(key.as_str(), value);
        }
        ctx
    }
}

impl FromIterator<(String, String)> for PropertySet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Shared defaults of a directory (`templates/templates.properties`), empty if absent.
pub fn load_defaults(dir: &Path) -> Result<PropertySet> {
    Ok(PropertySet::load_if_exists(&naming::defaults_file(dir))?.unwrap_or_default())
}

/// A story's own overlay (`<story>.properties`), empty if absent.
pub fn load_story(dir: &Path, story: &str) -> Result<PropertySet> {
    Ok(PropertySet::load_if_exists(&naming::story_properties_file(dir, story))?.unwrap_or_default())
}

/// Directory defaults with the story's overlay on top.
pub fn resolve(dir: &Path, story: &str) -> Result<PropertySet> {
    let defaults = load_defaults(dir)?;
    Ok(defaults.overlay(&load_story(dir, story)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn set(pairs: &[(&str, &str)]) -> PropertySet {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_overlay_wins_over_defaults() {
        let defaults = set(&[("title", "Default"), ("author", "Borys")]);
        let story = set(&[("title", "Story")]);
        let merged = defaults.overlay(&story);
        assert_eq!(merged.get("title"), Some("Story"));
        assert_eq!(merged.get("author"), Some("Borys"));
        // Layering leaves the inputs untouched
        assert_eq!(defaults.get("title"), Some("Default"));
    }

    #[test]
    fn test_with_adds_key() {
        let base = set(&[("a", "1")]);
        let next = base.clone().with("pathToStory", "blog/first");
        assert_eq!(next.get("pathToStory"), Some("blog/first"));
        assert_eq!(base.get("pathToStory"), None);
        assert_eq!(next.len(), 2);
    }

    #[test]
    fn test_order_defaults_to_zero() {
        assert_eq!(PropertySet::new().order(), "0");
        assert_eq!(set(&[("order", "12")]).order(), "12");
    }

    #[test]
    fn test_to_context_exposes_keys() {
        let ctx = set(&[("title", "Hello")]).to_context();
        let out = tera::Tera::one_off("<h1>{{ title }}</h1>", &ctx, false).unwrap();
        assert_eq!(out, "<h1>Hello</h1>");
    }

    #[test]
    fn test_load_if_exists_missing_is_none() {
        let tmp = TempDir::new().unwrap();
        let loaded = PropertySet::load_if_exists(&tmp.path().join("nope.properties")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_reports_malformed_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.properties");
        fs::write(&path, "title=ok\nbroken=\\uZZZZ\n").unwrap();
        match PropertySet::load(&path) {
            Err(SiteError::Properties { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected properties error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_non_utf8_file_names_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("story.properties");
        fs::write(&path, b"t=\xff\xfe\n").unwrap();
        let err = PropertySet::load(&path).unwrap_err();
        assert!(matches!(err, SiteError::Read { .. }));
        assert!(err.to_string().contains("story.properties"));
    }

    #[test]
    fn test_resolve_layers_story_over_directory_defaults() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        fs::create_dir_all(dir.join("templates")).unwrap();
        fs::write(
            dir.join("templates/templates.properties"),
            "title=Default\nsite=Mine\n",
        )
        .unwrap();
        fs::write(dir.join("first.properties"), "title=First\norder=3\n").unwrap();

        let props = resolve(dir, "first").unwrap();
        assert_eq!(props.get("title"), Some("First"));
        assert_eq!(props.get("site"), Some("Mine"));
        assert_eq!(props.order(), "3");
    }

    #[test]
    fn test_resolve_without_any_files_is_empty() {
        let tmp = TempDir::new().unwrap();
        let props = resolve(tmp.path(), "lonely").unwrap();
        assert!(props.is_empty());
    }

    #[test]
    fn test_resolve_without_story_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        fs::create_dir_all(dir.join("templates")).unwrap();
        fs::write(dir.join("templates/templates.properties"), "title=Default\n").unwrap();

        let props = resolve(dir, "plain").unwrap();
        assert_eq!(props.get("title"), Some("Default"));
        assert_eq!(props.iter().count(), 1);
    }
}
