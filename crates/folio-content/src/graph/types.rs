//! Knowledge graph payload types.
//!
//! Colors, relations and lock modes stay plain strings so that values written
//! by newer editors survive a load. Unknown keys in node and edge `data` are
//! kept in `extra`.
//!
//! Decoding is as forgiving as [`is_valid_graph_data`](super::is_valid_graph_data):
//! scalar ids and labels become strings, a lone tag becomes a one-element list,
//! and values of the wrong type fall back to their defaults.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use self::lenient::{or_default, opt_bool, opt_number, opt_string, opt_string_list, seq, string};

/// Nodes and edges of one graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(deserialize_with = "seq")]
    pub nodes: Vec<GraphNode>,
    #[serde(deserialize_with = "seq")]
    pub edges: Vec<GraphEdge>,
}

impl GraphData {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges whose source or target is not a node of this graph.
    pub fn dangling_edges(&self) -> Vec<&GraphEdge> {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        self.edges
            .iter()
            .filter(|e| !ids.contains(e.source.as_str()) || !ids.contains(e.target.as_str()))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    #[serde(deserialize_with = "string")]
    pub id: String,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(deserialize_with = "or_default")]
    pub position: Position,
    #[serde(deserialize_with = "or_default")]
    pub data: NodeData,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    #[serde(default, deserialize_with = "or_default")]
    pub x: f64,
    #[serde(default, deserialize_with = "or_default")]
    pub y: f64,
}

/// Display data of a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    #[serde(default, deserialize_with = "string")]
    pub label: String,
    /// Rich-text HTML body.
    #[serde(default, deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "opt_string_list", skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub edge_color: Option<String>,
    #[serde(default, deserialize_with = "opt_bool", skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(default, deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub lock_mode: Option<String>,
    /// Milliseconds since the epoch.
    #[serde(default, deserialize_with = "opt_number", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Number>,
    #[serde(default, deserialize_with = "opt_number", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Number>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An edge. Endpoints are not checked against the node list here; see
/// [`GraphData::dangling_edges`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    #[serde(default, deserialize_with = "string")]
    pub id: String,
    #[serde(default, deserialize_with = "string")]
    pub source: String,
    #[serde(default, deserialize_with = "string")]
    pub target: String,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "or_default", skip_serializing_if = "Option::is_none")]
    pub data: Option<EdgeData>,
    #[serde(default, deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    /// One of `related`, `prerequisite`, `extends`, `custom`.
    #[serde(default, deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    #[serde(default, deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "opt_string", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fill, border and text colors of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NodePalette {
    pub bg: &'static str,
    pub border: &'static str,
    pub text: &'static str,
}

const fn palette(bg: &'static str, border: &'static str, text: &'static str) -> NodePalette {
    NodePalette { bg, border, text }
}

/// Named node colors and their palettes. The first entry is the fallback.
pub const NODE_COLORS: [(&str, NodePalette); 8] = [
    ("default", palette("#FDFBF8", "#DDD5CB", "#3D3329")),
    ("red", palette("#FEF2F2", "#FCA5A5", "#991B1B")),
    ("orange", palette("#FFF7ED", "#FDBA74", "#9A3412")),
    ("yellow", palette("#FEFCE8", "#FDE047", "#854D0E")),
    ("green", palette("#F0FDF4", "#86EFAC", "#166534")),
    ("blue", palette("#EFF6FF", "#93C5FD", "#1E40AF")),
    ("purple", palette("#FAF5FF", "#C4B5FD", "#6B21A8")),
    ("pink", palette("#FDF2F8", "#F9A8D4", "#9D174D")),
];

/// Edge importance ranks, `p0` most important, with their stroke colors.
/// The first entry is the fallback.
pub const EDGE_COLORS: [(&str, &str); 11] = [
    ("default", "#64748B"),
    ("p0", "#DC2626"),
    ("p1", "#F97316"),
    ("p2", "#F59E0B"),
    ("p3", "#EAB308"),
    ("p4", "#84CC16"),
    ("p5", "#22C55E"),
    ("p6", "#10B981"),
    ("p7", "#06B6D4"),
    ("p8", "#3B82F6"),
    ("p9", "#8B5CF6"),
];

/// Palette for a node color name; unknown or missing names get the default.
pub fn node_palette(color: Option<&str>) -> NodePalette {
    let (_, fallback) = NODE_COLORS[0];
    color
        .and_then(|name| NODE_COLORS.iter().find(|(n, _)| *n == name))
        .map_or(fallback, |(_, p)| *p)
}

/// Stroke color for an edge color name; unknown or missing names get the default.
pub fn edge_stroke(color: Option<&str>) -> &'static str {
    let (_, fallback) = EDGE_COLORS[0];
    color
        .and_then(|name| EDGE_COLORS.iter().find(|(n, _)| *n == name))
        .map_or(fallback, |(_, stroke)| *stroke)
}

mod lenient {
    use serde::{Deserialize, Deserializer, de::DeserializeOwned};
    use serde_json::{Number, Value};

    fn scalar(value: &Value) -> Option<String> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// `T` decoded from any value, or `T::default()` when it does not fit.
    pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(T::deserialize(value).unwrap_or_default())
    }

    /// Each element decoded like [`or_default`], so one bad entry keeps its slot.
    pub fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        let items = Vec::<Value>::deserialize(deserializer)?;
        Ok(items
            .into_iter()
            .map(|item| T::deserialize(item).unwrap_or_default())
            .collect())
    }

    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(opt_string(deserializer)?.unwrap_or_default())
    }

    pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(scalar(&value))
    }

    pub fn opt_string_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => None,
            Value::Array(items) => Some(items.iter().filter_map(scalar).collect()),
            other => Some(scalar(&other).into_iter().collect()),
        })
    }

    pub fn opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Value::deserialize(deserializer)?.as_bool())
    }

    pub fn opt_number<'de, D>(deserializer: D) -> Result<Option<Number>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => Some(n),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_node_keeps_unknown_data_keys() {
        let node: GraphNode = serde_json::from_value(json!({
            "id": "a",
            "type": "knowledge",
            "position": { "x": 1.5 },
            "data": {
                "label": "A",
                "edgeColor": "p2",
                "lockMode": "transitive",
                "createdAt": 1714521600000u64,
                "width": 240
            }
        }))
        .expect("node");

        assert_eq!(node.kind.as_deref(), Some("knowledge"));
        assert_eq!(node.position, Position { x: 1.5, y: 0.0 });
        assert_eq!(node.data.edge_color.as_deref(), Some("p2"));
        assert_eq!(node.data.lock_mode.as_deref(), Some("transitive"));
        assert_eq!(node.data.extra.get("width"), Some(&json!(240)));

        let back = serde_json::to_value(&node).expect("json");
        assert_eq!(back["data"]["width"], 240);
        assert_eq!(back["data"]["createdAt"], 1714521600000u64);
        assert_eq!(back["type"], "knowledge");
        assert!(back["data"].get("tags").is_none());
    }

    #[test]
    fn test_dangling_edges() {
        let data: GraphData = serde_json::from_value(json!({
            "nodes": [
                { "id": "a", "position": { "x": 0, "y": 0 }, "data": { "label": "A" } },
                { "id": "b", "position": { "x": 0, "y": 0 }, "data": { "label": "B" } }
            ],
            "edges": [
                { "id": "e1", "source": "a", "target": "b" },
                { "id": "e2", "source": "a", "target": "ghost", "data": { "relation": "extends" } }
            ]
        }))
        .expect("graph");

        assert_eq!(data.node_count(), 2);
        assert_eq!(data.edge_count(), 2);
        let dangling: Vec<_> = data.dangling_edges().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(dangling, vec!["e2"]);
    }

    #[test]
    fn test_loose_values_decode() {
        let data: GraphData = serde_json::from_value(json!({
            "nodes": [
                { "id": 1, "position": "top", "data": { "label": 42, "tags": "core", "locked": "yes" } },
                { "id": "b", "position": { "x": "left", "y": 3 }, "data": null }
            ],
            "edges": [
                { "source": 1, "target": "b", "data": "strong" },
                "not an edge"
            ]
        }))
        .expect("graph");

        let a = &data.nodes[0];
        assert_eq!(a.id, "1");
        assert_eq!(a.position, Position::default());
        assert_eq!(a.data.label, "42");
        assert_eq!(a.data.tags, Some(vec!["core".to_string()]));
        assert_eq!(a.data.locked, None);

        let b = &data.nodes[1];
        assert_eq!(b.position, Position { x: 0.0, y: 3.0 });
        assert_eq!(b.data, NodeData::default());

        assert_eq!(data.edge_count(), 2);
        assert_eq!(data.edges[0].id, "");
        assert_eq!(data.edges[0].source, "1");
        assert!(data.edges[0].data.is_none());
        assert_eq!(data.edges[1], GraphEdge::default());
        assert_eq!(data.dangling_edges().len(), 1);
    }

    #[test]
    fn test_palettes_fall_back_to_default() {
        assert_eq!(node_palette(Some("blue")).border, "#93C5FD");
        assert_eq!(node_palette(Some("teal")), node_palette(None));
        assert_eq!(node_palette(None).bg, "#FDFBF8");

        assert_eq!(edge_stroke(Some("p0")), "#DC2626");
        assert_eq!(edge_stroke(Some("p9")), "#8B5CF6");
        assert_eq!(edge_stroke(Some("p10")), "#64748B");
        assert_eq!(edge_stroke(None), "#64748B");
    }
}
