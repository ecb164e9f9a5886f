//! Roadmaps: checklists with progress.
//!
//! Tasks normally live in the Markdown body and are extracted by
//! [`parse_items`]. Older roadmaps list them in an `items` array in the
//! front-matter instead; when that key is present the body is left untouched.

mod parser;

use std::{fmt, path::PathBuf, str::FromStr};

use folio_core::{
    ContentKind, format_date,
    frontmatter::de::{self, scalar_to_string},
};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::{info, warn};

pub use self::parser::{ParsedRoadmap, parse_items};
use crate::{
    error::Result,
    loader::{ContentDir, ContentLoader, Document, display_name, sort_by_date_desc},
};

/// Task state, from the checkbox mark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            other => Err(format!("unknown task status '{other}'")),
        }
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(format!("unknown priority '{other}'")),
        }
    }
}

/// State of a roadmap as a whole.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadmapStatus {
    #[default]
    Active,
    Completed,
    Paused,
}

impl RoadmapStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Paused => "paused",
        }
    }
}

impl fmt::Display for RoadmapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoadmapStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "paused" => Ok(Self::Paused),
            other => Err(format!("unknown roadmap status '{other}'")),
        }
    }
}

/// A single task.
///
/// Ids are assigned by position on every parse; they change when tasks are
/// added, removed or reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapItem {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: ItemStatus,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl RoadmapItem {
    /// A task with medium priority and no details.
    pub fn new(id: impl Into<String>, title: impl Into<String>, status: ItemStatus) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            status,
            priority: Priority::default(),
            deadline: None,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// Task counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub total: usize,
    pub done: usize,
    pub in_progress: usize,
    pub todo: usize,
}

/// Count tasks by status.
pub fn calculate_progress(items: &[RoadmapItem]) -> Progress {
    items.iter().fold(
        Progress {
            total: items.len(),
            ..Progress::default()
        },
        |mut progress, item| {
            match item.status {
                ItemStatus::Done => progress.done += 1,
                ItemStatus::InProgress => progress.in_progress += 1,
                ItemStatus::Todo => progress.todo += 1,
            }
            progress
        },
    )
}

/// A full roadmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub date: String,
    pub status: RoadmapStatus,
    pub items: Vec<RoadmapItem>,
    /// Body text without task lines.
    pub content: String,
}

/// Roadmap listing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapMeta {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub date: String,
    pub status: RoadmapStatus,
    pub progress: Progress,
}

#[derive(Debug, Default, Deserialize)]
struct RoadmapFrontmatter {
    #[serde(default, deserialize_with = "de::opt_string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    title: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    description: Option<String>,
    #[serde(default)]
    date: Option<Value>,
    #[serde(default, deserialize_with = "de::opt_string")]
    status: Option<String>,
    #[serde(default)]
    items: Option<Value>,
}

impl Roadmap {
    fn from_document(doc: Document) -> Self {
        let fm: RoadmapFrontmatter = doc.front_matter();

        let status: RoadmapStatus = match fm.status.as_deref() {
            None | Some("") => RoadmapStatus::default(),
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!(slug = %doc.slug, error = %e, "falling back to active status");
                RoadmapStatus::default()
            }),
        };

        let (items, content) = match fm.items {
            Some(Value::Sequence(inline)) => {
                (inline_items(&inline, &doc.slug), doc.body.trim().to_string())
            }
            _ => {
                let parsed = parse_items(&doc.body);
                (parsed.items, parsed.remaining_content)
            }
        };

        Self {
            name: display_name(&[fm.name.as_ref(), fm.title.as_ref()], &doc.slug),
            description: fm.description.unwrap_or_default(),
            date: format_date(fm.date.as_ref()),
            status,
            items,
            content,
            slug: doc.slug,
        }
    }

    /// Task counts for this roadmap.
    pub fn progress(&self) -> Progress {
        calculate_progress(&self.items)
    }

    /// Listing view of this roadmap.
    pub fn summary(self) -> RoadmapMeta {
        RoadmapMeta {
            progress: self.progress(),
            slug: self.slug,
            name: self.name,
            description: self.description,
            date: self.date,
            status: self.status,
        }
    }
}

/// Tasks written as an `items` array in the front-matter.
fn inline_items(values: &[Value], slug: &str) -> Vec<RoadmapItem> {
    values
        .iter()
        .filter_map(|value| match value {
            Value::Mapping(map) => Some(map),
            _ => {
                warn!(%slug, "skipping inline roadmap item that is not a mapping");
                None
            }
        })
        .enumerate()
        .map(|(index, map)| {
            let field = |key: &str| map.get(key).and_then(scalar_to_string);
            let date_field = |key: &str| {
                Some(format_date(map.get(key))).filter(|date| !date.is_empty())
            };

            let status: ItemStatus = field("status")
                .and_then(|s| s.parse().ok())
                .unwrap_or_default();
            let priority: Priority = field("priority")
                .and_then(|p| p.parse().ok())
                .unwrap_or_default();

            RoadmapItem {
                id: field("id").unwrap_or_else(|| (index + 1).to_string()),
                title: field("title").unwrap_or_default(),
                description: field("description").filter(|d| !d.is_empty()),
                status,
                priority,
                deadline: date_field("deadline"),
                completed_at: date_field("completedAt"),
            }
        })
        .collect()
}

/// Loads roadmaps from a directory of Markdown files.
#[derive(Debug, Clone)]
pub struct RoadmapLoader {
    dir: ContentDir,
}

impl RoadmapLoader {
    /// Create a loader over `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: ContentDir::for_kind(dir, ContentKind::Roadmaps),
        }
    }
}

impl ContentLoader for RoadmapLoader {
    type Summary = RoadmapMeta;
    type Record = Roadmap;

    fn kind(&self) -> ContentKind {
        ContentKind::Roadmaps
    }

    fn dir(&self) -> &ContentDir {
        &self.dir
    }

    fn list_all(&self) -> Result<Vec<RoadmapMeta>> {
        let mut roadmaps = Vec::new();
        for entry in self.dir.entries()? {
            let doc = self.dir.load_document(&entry)?;
            roadmaps.push(Roadmap::from_document(doc).summary());
        }

        sort_by_date_desc(&mut roadmaps, |r| r.date.as_str());
        info!(dir = %self.dir.path().display(), count = roadmaps.len(), "loaded roadmaps");
        Ok(roadmaps)
    }

    fn get(&self, slug: &str) -> Result<Option<Roadmap>> {
        let Some(entry) = self.dir.find(slug)? else {
            return Ok(None);
        };
        let doc = self.dir.load_document(&entry)?;
        Ok(Some(Roadmap::from_document(doc)))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn item(status: ItemStatus) -> RoadmapItem {
        RoadmapItem::new("0", "t", status)
    }

    #[test]
    fn test_calculate_progress() {
        let items = [
            item(ItemStatus::Done),
            item(ItemStatus::Done),
            item(ItemStatus::InProgress),
            item(ItemStatus::Todo),
        ];
        assert_eq!(
            calculate_progress(&items),
            Progress {
                total: 4,
                done: 2,
                in_progress: 1,
                todo: 1,
            }
        );
        assert_eq!(calculate_progress(&[]), Progress::default());
    }

    #[test]
    fn test_progress_serializes_camel_case() {
        let json = serde_json::to_value(calculate_progress(&[item(ItemStatus::InProgress)]))
            .expect("json");
        assert_eq!(json["inProgress"], 1);
        assert_eq!(json["total"], 1);
    }

    #[test]
    fn test_item_serialization() {
        let mut done = RoadmapItem::new("1", "Ship", ItemStatus::Done);
        done.completed_at = Some("2024-05-01".to_string());

        let json = serde_json::to_value(&done).expect("json");
        assert_eq!(json["status"], "done");
        assert_eq!(json["priority"], "medium");
        assert_eq!(json["completedAt"], "2024-05-01");
        assert!(json.get("deadline").is_none());

        let json = serde_json::to_value(item(ItemStatus::InProgress)).expect("json");
        assert_eq!(json["status"], "in_progress");
    }

    #[test]
    fn test_loader_parses_body_tasks() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(
            tmp.path().join("2025.md"),
            "---\ntitle: 2025 Plan\nstatus: paused\ndate: 2025-01-01\n---\nIntro\n\n- [x] a\n- [ ] b `high`\n",
        )
        .expect("write");

        let loader = RoadmapLoader::new(tmp.path());
        let roadmap = loader.get("2025").expect("get").expect("roadmap");

        assert_eq!(roadmap.name, "2025 Plan");
        assert_eq!(roadmap.status, RoadmapStatus::Paused);
        assert_eq!(roadmap.items.len(), 2);
        assert_eq!(roadmap.items[1].priority, Priority::High);
        assert_eq!(roadmap.content, "Intro");

        let listed = loader.list_all().expect("list");
        assert_eq!(
            listed[0].progress,
            Progress {
                total: 2,
                done: 1,
                in_progress: 0,
                todo: 1,
            }
        );
    }

    #[test]
    fn test_unknown_status_defaults_to_active() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(tmp.path().join("r.md"), "---\nstatus: someday\n---\n").expect("write");

        let roadmap = RoadmapLoader::new(tmp.path())
            .get("r")
            .expect("get")
            .expect("roadmap");
        assert_eq!(roadmap.status, RoadmapStatus::Active);
        assert_eq!(roadmap.name, "r");
    }

    #[test]
    fn test_inline_front_matter_items() {
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(
            tmp.path().join("inline.md"),
            r#"---
name: Inline
items:
  - title: First
    status: done
    completedAt: 2024-05-01
  - id: custom
    title: Second
    status: in_progress
    priority: high
    deadline: 2024-06-01
  - title: Third
    status: bogus
---
- [ ] not parsed
"#,
        )
        .expect("write");

        let roadmap = RoadmapLoader::new(tmp.path())
            .get("inline")
            .expect("get")
            .expect("roadmap");

        let ids: Vec<_> = roadmap.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "custom", "3"]);
        assert_eq!(roadmap.items[0].completed_at.as_deref(), Some("2024-05-01"));
        assert_eq!(roadmap.items[1].status, ItemStatus::InProgress);
        assert_eq!(roadmap.items[1].priority, Priority::High);
        assert_eq!(roadmap.items[1].deadline.as_deref(), Some("2024-06-01"));
        assert_eq!(roadmap.items[2].status, ItemStatus::Todo);
        assert_eq!(roadmap.content, "- [ ] not parsed");
    }
}
