use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use super::story::{self, StoryFragment};
use crate::error::Result;
use crate::naming;
use crate::templates;

/// Aggregated index of one topic directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicIndex {
    pub fragment: String,
    pub stories: usize,
}

/// Names of the topic directories directly under `root`, sorted.
/// The `templates` scaffolding directory is not a topic.
pub fn list_topics(root: &Path) -> Result<Vec<String>> {
    let mut topics = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !naming::is_templates_dir(&name) {
            topics.push(name.into_owned());
        }
    }
    Ok(topics)
}

/// Render every story in `topic_dir` and build the topic's index fragment.
///
/// The topic's `templates/` directory is removed once its stories are done.
pub fn render_topic(topic_dir: &Path, topic: &str) -> Result<TopicIndex> {
    let tera = templates::load_templates(topic_dir)?;
    let stories = templates::list_stories(topic_dir)?;

    let mut fragments = Vec::with_capacity(stories.len());
    for name in &stories {
        fragments.push(story::render_story(&tera, topic_dir, name, topic)?);
    }

    let scaffolding = naming::templates_dir(topic_dir);
    if scaffolding.is_dir() {
        fs::remove_dir_all(&scaffolding)?;
    }

    tracing::info!("Topic '{topic}': {} stories", stories.len());
    Ok(TopicIndex {
        fragment: aggregate(fragments),
        stories: stories.len(),
    })
}

/// Join fragments with `\n`, ordered by their `order` key as plain strings.
///
/// Keys compare as strings, not numbers: `"10"` sorts before `"2"`.
/// The sort is stable, so equal keys keep story file-name order.
pub fn aggregate(mut fragments: Vec<StoryFragment>) -> String {
    fragments.sort_by(|a, b| a.order.cmp(&b.order));
    fragments
        .into_iter()
        .map(|f| f.fragment)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn frag(order: &str, fragment: &str) -> StoryFragment {
        StoryFragment {
            order: order.into(),
            fragment: fragment.into(),
        }
    }

    #[test]
    fn test_aggregate_sorts_by_order() {
        let joined = aggregate(vec![frag("2", "<li>A</li>"), frag("1", "<li>B</li>")]);
        assert_eq!(joined, "<li>B</li>\n<li>A</li>");
    }

    #[test]
    fn test_aggregate_compares_orders_as_strings() {
        let joined = aggregate(vec![frag("2", "two"), frag("10", "ten"), frag("1", "one")]);
        assert_eq!(joined, "one\nten\ntwo");
    }

    #[test]
    fn test_aggregate_is_stable_for_equal_orders() {
        let joined = aggregate(vec![frag("0", "a"), frag("0", "b"), frag("0", "c")]);
        assert_eq!(joined, "a\nb\nc");
    }

    #[test]
    fn test_aggregate_empty() {
        assert_eq!(aggregate(Vec::new()), "");
    }

    #[test]
    fn test_list_topics_skips_templates_and_files() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("templates")).unwrap();
        fs::create_dir_all(root.join("news")).unwrap();
        fs::create_dir_all(root.join("blog")).unwrap();
        fs::write(root.join("index.ftl"), "").unwrap();

        assert_eq!(list_topics(root).unwrap(), vec!["blog", "news"]);
    }

    #[test]
    fn test_render_topic_blog_scenario() {
        let tmp = TempDir::new().unwrap();
        let blog = tmp.path().join("blog");
        fs::create_dir_all(blog.join("templates")).unwrap();
        fs::write(blog.join("templates/header.ftl"), "<html>").unwrap();
        fs::write(blog.join("templates/footer.ftl"), "</html>").unwrap();
        fs::write(blog.join("templates/index.ftl"), "<li>{{title}}</li>").unwrap();
        fs::write(blog.join("a.ftl"), "{{ title }}").unwrap();
        fs::write(blog.join("a.properties"), "title=A\norder=2\n").unwrap();
        fs::write(blog.join("b.ftl"), "{{ title }}").unwrap();
        fs::write(blog.join("b.properties"), "title=B\norder=1\n").unwrap();
        fs::write(blog.join("cover.jpg"), [1u8, 2, 3]).unwrap();

        let index = render_topic(&blog, "blog").unwrap();

        assert_eq!(index.fragment, "<li>B</li>\n<li>A</li>");
        assert_eq!(index.stories, 2);
        assert_eq!(fs::read_to_string(blog.join("a.html")).unwrap(), "<html>A</html>");
        assert!(!blog.join("templates").exists());
        assert!(!blog.join("a.ftl").exists());
        assert!(!blog.join("b.properties").exists());
        assert_eq!(fs::read(blog.join("cover.jpg")).unwrap(), vec![1u8, 2, 3]);
    }

    #[test]
    fn test_render_topic_without_stories() {
        let tmp = TempDir::new().unwrap();
        let empty = tmp.path().join("gallery");
        fs::create_dir_all(empty.join("templates")).unwrap();
        fs::write(empty.join("photo.png"), "png").unwrap();

        let index = render_topic(&empty, "gallery").unwrap();
        assert_eq!(index.fragment, "");
        assert_eq!(index.stories, 0);
        assert!(!empty.join("templates").exists());
    }
}
