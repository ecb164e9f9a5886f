//! Notes (blog posts).

use std::path::PathBuf;

use folio_core::{ContentKind, collect_tags, format_date, frontmatter::de};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::info;

use crate::{
    error::Result,
    loader::{ContentDir, ContentLoader, Document, display_name, sort_by_date_desc},
};

/// A full note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub content: String,
}

/// Note listing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMeta {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub excerpt: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PostFrontmatter {
    #[serde(default, deserialize_with = "de::opt_string")]
    title: Option<String>,
    #[serde(default)]
    date: Option<Value>,
    #[serde(default, deserialize_with = "de::opt_string")]
    excerpt: Option<String>,
    #[serde(default, deserialize_with = "de::string_list")]
    tags: Vec<String>,
}

impl Post {
    fn from_document(doc: Document) -> Self {
        let fm: PostFrontmatter = doc.front_matter();

        Self {
            title: display_name(&[fm.title.as_ref()], &doc.slug),
            date: format_date(fm.date.as_ref()),
            excerpt: fm.excerpt.unwrap_or_default(),
            tags: fm.tags,
            content: doc.body,
            slug: doc.slug,
        }
    }

    /// Listing view of this note.
    pub fn summary(self) -> PostMeta {
        PostMeta {
            slug: self.slug,
            title: self.title,
            date: self.date,
            excerpt: self.excerpt,
            tags: self.tags,
        }
    }
}

/// Loads notes from a directory of Markdown files.
#[derive(Debug, Clone)]
pub struct PostLoader {
    dir: ContentDir,
}

impl PostLoader {
    /// Create a loader over `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: ContentDir::for_kind(dir, ContentKind::Notes),
        }
    }

    /// Every tag used by any note, sorted and deduplicated.
    pub fn all_tags(&self) -> Result<Vec<String>> {
        let posts = self.list_all()?;
        Ok(collect_tags(posts.iter().flat_map(|post| &post.tags)))
    }
}

impl ContentLoader for PostLoader {
    type Summary = PostMeta;
    type Record = Post;

    fn kind(&self) -> ContentKind {
        ContentKind::Notes
    }

    fn dir(&self) -> &ContentDir {
        &self.dir
    }

    fn list_all(&self) -> Result<Vec<PostMeta>> {
        let mut posts = Vec::new();
        for entry in self.dir.entries()? {
            let doc = self.dir.load_document(&entry)?;
            posts.push(Post::from_document(doc).summary());
        }

        sort_by_date_desc(&mut posts, |post| post.date.as_str());
        info!(dir = %self.dir.path().display(), count = posts.len(), "loaded notes");
        Ok(posts)
    }

    fn get(&self, slug: &str) -> Result<Option<Post>> {
        let Some(entry) = self.dir.find(slug)? else {
            return Ok(None);
        };
        let doc = self.dir.load_document(&entry)?;
        Ok(Some(Post::from_document(doc)))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_defaults_for_missing_fields() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(tmp.path().join("bare.md"), "No front-matter here.").expect("write");

        let loader = PostLoader::new(tmp.path());
        let post = loader.get("bare").expect("get").expect("post");

        assert_eq!(post.title, "bare");
        assert_eq!(post.date, "");
        assert_eq!(post.excerpt, "");
        assert!(post.tags.is_empty());
        assert_eq!(post.content, "No front-matter here.");
    }

    #[test]
    fn test_get_maps_front_matter() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(
            tmp.path().join("hello.md"),
            "---\ntitle: 你好\ndate: 2024-03-05\nexcerpt: Short\ntags: [rust, web]\n---\n# Heading\n",
        )
        .expect("write");

        let loader = PostLoader::new(tmp.path());
        let post = loader.get("hello").expect("get").expect("post");

        assert_eq!(post.title, "你好");
        assert_eq!(post.date, "2024-03-05");
        assert_eq!(post.excerpt, "Short");
        assert_eq!(post.tags, vec!["rust", "web"]);
        assert_eq!(post.content, "# Heading\n");
    }

    #[test]
    fn test_get_missing_is_none() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let loader = PostLoader::new(tmp.path());
        assert!(loader.get("nope").expect("get").is_none());
    }

    #[test]
    fn test_all_tags() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(tmp.path().join("a.md"), "---\ntags: [web, rust]\n---\n").expect("write");
        fs::write(tmp.path().join("b.md"), "---\ntags: [rust, cli]\n---\n").expect("write");

        let loader = PostLoader::new(tmp.path());
        assert_eq!(loader.all_tags().expect("tags"), vec!["cli", "rust", "web"]);
    }

    #[test]
    fn test_serializes_flat_record() {
        let post = Post {
            slug: "a".to_string(),
            title: "A".to_string(),
            date: "2024-01-01".to_string(),
            excerpt: String::new(),
            tags: vec!["x".to_string()],
            content: "body".to_string(),
        };
        let json = serde_json::to_value(post.summary()).expect("json");
        assert_eq!(json["slug"], "a");
        assert!(json.get("content").is_none());
    }
}
