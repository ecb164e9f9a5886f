//! Project showcases.

use std::path::PathBuf;

use folio_core::{
    ContentKind, collect_tags, format_date,
    frontmatter::de::{self, scalar_to_string},
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use tracing::info;

use crate::{
    error::Result,
    loader::{ContentDir, ContentLoader, Document, display_name, sort_by_date_desc},
};

/// One entry of a project's tech stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl TechItem {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Mapping(map) => {
                let field = |key: &str| map.get(key).and_then(scalar_to_string);
                Some(Self {
                    name: field("name").unwrap_or_default(),
                    icon: field("icon"),
                    color: field("color"),
                })
            }
            Value::Null => None,
            other => scalar_to_string(other).map(|name| Self {
                name,
                icon: None,
                color: None,
            }),
        }
    }
}

/// A full project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub github: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    pub date: String,
    pub tags: Vec<String>,
    pub tech_stack: Vec<TechItem>,
    pub content: String,
}

/// Project listing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMeta {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub github: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    pub date: String,
    pub tags: Vec<String>,
    pub tech_stack: Vec<TechItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectFrontmatter {
    #[serde(default, deserialize_with = "de::opt_string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    title: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    description: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    github: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    demo: Option<String>,
    #[serde(default)]
    date: Option<Value>,
    #[serde(default, deserialize_with = "de::string_list")]
    tags: Vec<String>,
    #[serde(default, deserialize_with = "tech_stack")]
    tech_stack: Vec<TechItem>,
}

/// Bare strings become `{name}`; anything but a list is an empty stack.
fn tech_stack<'de, D>(deserializer: D) -> std::result::Result<Vec<TechItem>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Sequence(items) => items.iter().filter_map(TechItem::from_value).collect(),
        _ => Vec::new(),
    })
}

impl Project {
    fn from_document(doc: Document) -> Self {
        let fm: ProjectFrontmatter = doc.front_matter();

        Self {
            name: display_name(&[fm.name.as_ref(), fm.title.as_ref()], &doc.slug),
            description: fm.description.unwrap_or_default(),
            github: fm.github.unwrap_or_default(),
            demo: fm.demo.filter(|demo| !demo.is_empty()),
            date: format_date(fm.date.as_ref()),
            tags: fm.tags,
            tech_stack: fm.tech_stack,
            content: doc.body,
            slug: doc.slug,
        }
    }

    /// Listing view of this project.
    pub fn summary(self) -> ProjectMeta {
        ProjectMeta {
            slug: self.slug,
            name: self.name,
            description: self.description,
            github: self.github,
            demo: self.demo,
            date: self.date,
            tags: self.tags,
            tech_stack: self.tech_stack,
        }
    }
}

/// Loads projects from a directory of Markdown files.
#[derive(Debug, Clone)]
pub struct ProjectLoader {
    dir: ContentDir,
}

impl ProjectLoader {
    /// Create a loader over `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: ContentDir::for_kind(dir, ContentKind::Projects),
        }
    }

    /// Every tag used by any project, sorted and deduplicated.
    pub fn all_tags(&self) -> Result<Vec<String>> {
        let projects = self.list_all()?;
        Ok(collect_tags(projects.iter().flat_map(|p| &p.tags)))
    }
}

impl ContentLoader for ProjectLoader {
    type Summary = ProjectMeta;
    type Record = Project;

    fn kind(&self) -> ContentKind {
        ContentKind::Projects
    }

    fn dir(&self) -> &ContentDir {
        &self.dir
    }

    fn list_all(&self) -> Result<Vec<ProjectMeta>> {
        let mut projects = Vec::new();
        for entry in self.dir.entries()? {
            let doc = self.dir.load_document(&entry)?;
            projects.push(Project::from_document(doc).summary());
        }

        sort_by_date_desc(&mut projects, |p| p.date.as_str());
        info!(dir = %self.dir.path().display(), count = projects.len(), "loaded projects");
        Ok(projects)
    }

    fn get(&self, slug: &str) -> Result<Option<Project>> {
        let Some(entry) = self.dir.find(slug)? else {
            return Ok(None);
        };
        let doc = self.dir.load_document(&entry)?;
        Ok(Some(Project::from_document(doc)))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const PROJECT: &str = r##"---
title: Folio
description: Personal site
github: https://github.com/someone/folio
date: 2025-01-02
tags: [rust]
techStack:
  - Rust
  - name: Tokio
    icon: tokio
    color: "#AA0000"
---
Project body.
"##;

    #[test]
    fn test_project_fields() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(tmp.path().join("folio.md"), PROJECT).expect("write");

        let loader = ProjectLoader::new(tmp.path());
        let project = loader.get("folio").expect("get").expect("project");

        assert_eq!(project.name, "Folio");
        assert_eq!(project.description, "Personal site");
        assert_eq!(project.github, "https://github.com/someone/folio");
        assert!(project.demo.is_none());
        assert_eq!(project.date, "2025-01-02");
        assert_eq!(project.content, "Project body.\n");
        assert_eq!(
            project.tech_stack,
            vec![
                TechItem {
                    name: "Rust".to_string(),
                    icon: None,
                    color: None,
                },
                TechItem {
                    name: "Tokio".to_string(),
                    icon: Some("tokio".to_string()),
                    color: Some("#AA0000".to_string()),
                },
            ]
        );
    }

    #[test]
    fn test_name_preferred_over_title() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(
            tmp.path().join("p.md"),
            "---\nname: Named\ntitle: Titled\n---\n",
        )
        .expect("write");

        let project = ProjectLoader::new(tmp.path())
            .get("p")
            .expect("get")
            .expect("project");
        assert_eq!(project.name, "Named");
        assert_eq!(project.github, "");
        assert!(project.tech_stack.is_empty());
    }

    #[test]
    fn test_tech_stack_not_a_list() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(tmp.path().join("p.md"), "---\ntechStack: Rust\n---\n").expect("write");

        let project = ProjectLoader::new(tmp.path())
            .get("p")
            .expect("get")
            .expect("project");
        assert!(project.tech_stack.is_empty());
    }

    #[test]
    fn test_serialized_keys_are_camel_case() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(tmp.path().join("folio.md"), PROJECT).expect("write");

        let projects = ProjectLoader::new(tmp.path()).list_all().expect("list");
        let json = serde_json::to_value(&projects[0]).expect("json");
        assert!(json.get("techStack").is_some());
        assert!(json.get("demo").is_none());
        assert_eq!(json["techStack"][0], serde_json::json!({ "name": "Rust" }));
    }
}
