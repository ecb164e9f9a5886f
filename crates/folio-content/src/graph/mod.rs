//! Knowledge graphs.
//!
//! Two storage conventions feed the same [`GraphData`]:
//!
//! - `<slug>.md`: front-matter plus a fenced ```graph block holding the JSON
//!   payload; the rest of the body becomes `content`.
//! - `<slug>.json`: a bare `{name?, description?, date?, nodes, edges}` object.
//!
//! When both exist for one slug the Markdown document is served.

mod extract;
mod types;

use std::path::PathBuf;

use folio_core::{ContentKind, format_date, frontmatter::de};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use serde_yaml::Value;
use tracing::{info, warn};

pub use self::{
    extract::{GraphError, decode_graph_data, extract_graph_block, is_valid_graph_data, parse_json},
    types::{
        EDGE_COLORS, EdgeData, GraphData, GraphEdge, GraphNode, NODE_COLORS, NodeData, NodePalette,
        Position, edge_stroke, node_palette,
    },
};
use crate::{
    error::Result,
    loader::{ContentDir, ContentLoader, Document, Entry, display_name, sort_by_date_desc},
};

/// A full graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Graph {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub date: String,
    /// Body text without the graph block.
    pub content: String,
    pub graph_data: GraphData,
}

/// Graph listing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphMeta {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub date: String,
    pub node_count: usize,
    pub edge_count: usize,
}

#[derive(Debug, Default, Deserialize)]
struct GraphFrontmatter {
    #[serde(default, deserialize_with = "de::opt_string")]
    name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    title: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    description: Option<String>,
    #[serde(default)]
    date: Option<Value>,
}

impl Graph {
    fn from_markdown(doc: Document) -> std::result::Result<Self, GraphError> {
        let (graph_data, content) = extract_graph_block(&doc.slug, &doc.body)?;
        let fm: GraphFrontmatter = doc.front_matter();

        Ok(Self {
            name: display_name(&[fm.name.as_ref(), fm.title.as_ref()], &doc.slug),
            description: fm.description.unwrap_or_default(),
            date: format_date(fm.date.as_ref()),
            content,
            graph_data,
            slug: doc.slug,
        })
    }

    fn from_json(slug: &str, text: &str) -> std::result::Result<Self, GraphError> {
        let value = parse_json(slug, text)?;
        let graph_data = decode_graph_data(slug, &value)?;

        let field = |key: &str| {
            value
                .get(key)
                .and_then(JsonValue::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let name = field("name")
            .or_else(|| {
                graph_data
                    .nodes
                    .first()
                    .map(|node| node.data.label.clone())
                    .filter(|label| !label.is_empty())
            })
            .unwrap_or_else(|| slug.to_string());
        let description = field("description")
            .unwrap_or_else(|| format!("包含 {} 个知识节点", graph_data.node_count()));
        let date = value
            .get("date")
            .and_then(|date| serde_yaml::to_value(date).ok());

        Ok(Self {
            slug: slug.to_string(),
            name,
            description,
            date: format_date(date.as_ref()),
            content: String::new(),
            graph_data,
        })
    }

    /// Listing view of this graph.
    pub fn summary(self) -> GraphMeta {
        GraphMeta {
            node_count: self.graph_data.node_count(),
            edge_count: self.graph_data.edge_count(),
            slug: self.slug,
            name: self.name,
            description: self.description,
            date: self.date,
        }
    }
}

/// Loads graphs from a directory of `.md` and `.json` files.
#[derive(Debug, Clone)]
pub struct GraphLoader {
    dir: ContentDir,
}

impl GraphLoader {
    /// Create a loader over `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: ContentDir::for_kind(dir, ContentKind::Graphs),
        }
    }

    fn load(&self, entry: &Entry) -> Result<Graph> {
        let graph = match entry.extension {
            "json" => {
                let text = self.dir.read(&entry.path)?;
                Graph::from_json(&entry.slug, &text)?
            }
            _ => Graph::from_markdown(self.dir.load_document(entry)?)?,
        };
        Ok(graph)
    }
}

impl ContentLoader for GraphLoader {
    type Summary = GraphMeta;
    type Record = Graph;

    fn kind(&self) -> ContentKind {
        ContentKind::Graphs
    }

    fn dir(&self) -> &ContentDir {
        &self.dir
    }

    /// Graphs whose payload is missing or malformed are left out with a
    /// warning.
    fn list_all(&self) -> Result<Vec<GraphMeta>> {
        let mut graphs = Vec::new();
        for entry in self.dir.entries()? {
            match self.load(&entry) {
                Ok(graph) => graphs.push(graph.summary()),
                Err(e) if e.is_malformed_content() => {
                    warn!(slug = %entry.slug, error = %e, "skipping graph");
                }
                Err(e) => return Err(e),
            }
        }

        sort_by_date_desc(&mut graphs, |g| g.date.as_str());
        info!(dir = %self.dir.path().display(), count = graphs.len(), "loaded graphs");
        Ok(graphs)
    }

    fn get(&self, slug: &str) -> Result<Option<Graph>> {
        let Some(entry) = self.dir.find(slug)? else {
            return Ok(None);
        };
        self.load(&entry).map(Some)
    }
}
