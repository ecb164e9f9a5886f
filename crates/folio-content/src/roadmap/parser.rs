//! Checkbox task-list parser.
//!
//! A roadmap body mixes a checklist with free prose:
//!
//! ```text
//! - [x] Write the design doc
//!   完成: 2024-05-01
//! - [-] Build the parser `high`
//!   First paragraph.
//!
//!   Second paragraph.
//!   截止: 2024-06-01
//! Ordinary prose.
//! ```
//!
//! Lines are consumed one at a time with at most one task open. A task stays
//! open across indented lines and blank lines and is closed by the next task
//! line, by any other line, or by the end of input. Everything that is not
//! part of a task is returned, in order, as the remaining content.

use std::sync::LazyLock;

use regex::Regex;

use super::{ItemStatus, RoadmapItem};

static TASK_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-\s*\[([ x-])\]\s+(.+?)(?:\s+`(high|medium|low)`)?\s*$")
        .expect("task line pattern is valid")
});

const DEADLINE_LABEL: &str = "截止";
const COMPLETED_LABEL: &str = "完成";

/// Tasks and leftover prose of a roadmap body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedRoadmap {
    /// Tasks in the order their lines appear.
    pub items: Vec<RoadmapItem>,

    /// Non-task lines joined with newlines, trimmed.
    pub remaining_content: String,
}

/// Parse the task list out of a roadmap body.
pub fn parse_items(content: &str) -> ParsedRoadmap {
    let mut parser = TaskListParser::default();
    for line in content.lines() {
        parser.feed(line);
    }
    parser.finish()
}

/// The task being built and its description lines.
#[derive(Debug)]
struct OpenItem {
    item: RoadmapItem,
    description: Vec<String>,
}

impl OpenItem {
    fn finalize(self) -> RoadmapItem {
        let mut item = self.item;
        let description = self.description.join("\n");
        let description = description.trim();
        if !description.is_empty() {
            item.description = Some(description.to_string());
        }
        item
    }
}

#[derive(Debug, Default)]
struct TaskListParser<'a> {
    items: Vec<RoadmapItem>,
    residual: Vec<&'a str>,
    open: Option<OpenItem>,
    next_id: usize,
}

impl<'a> TaskListParser<'a> {
    fn feed(&mut self, line: &'a str) {
        if let Some(captures) = TASK_LINE.captures(line) {
            self.close();

            let status = match &captures[1] {
                "x" => ItemStatus::Done,
                "-" => ItemStatus::InProgress,
                _ => ItemStatus::Todo,
            };
            let priority = captures
                .get(3)
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or_default();

            self.next_id += 1;
            self.open = Some(OpenItem {
                item: RoadmapItem::new(self.next_id.to_string(), captures[2].trim(), status)
                    .with_priority(priority),
                description: Vec::new(),
            });
            return;
        }

        let Some(open) = self.open.as_mut() else {
            self.residual.push(line);
            return;
        };

        if line.trim().is_empty() {
            // Keeps paragraph breaks inside a description.
            open.description.push(String::new());
        } else if let Some(text) = indented_text(line) {
            if let Some(deadline) = labelled_value(text, DEADLINE_LABEL) {
                open.item.deadline = Some(deadline.to_string());
            } else if let Some(completed_at) = labelled_value(text, COMPLETED_LABEL) {
                open.item.completed_at = Some(completed_at.to_string());
            } else {
                open.description.push(text.to_string());
            }
        } else {
            self.close();
            self.residual.push(line);
        }
    }

    fn close(&mut self) {
        if let Some(open) = self.open.take() {
            self.items.push(open.finalize());
        }
    }

    fn finish(mut self) -> ParsedRoadmap {
        self.close();
        ParsedRoadmap {
            items: self.items,
            remaining_content: self.residual.join("\n").trim().to_string(),
        }
    }
}

/// Text of a line indented by at least two whitespace characters.
fn indented_text(line: &str) -> Option<&str> {
    let indent = line.chars().take_while(|c| c.is_whitespace()).count();
    (indent >= 2).then(|| line.trim_start())
}

/// Value after `label:` or `label：`, if present and non-empty.
fn labelled_value<'t>(text: &'t str, label: &str) -> Option<&'t str> {
    let rest = text.strip_prefix(label)?;
    let value = rest.strip_prefix([':', '：'])?.trim();
    (!value.is_empty()).then_some(value)
}
