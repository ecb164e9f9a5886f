//! Locating, parsing and validating graph payloads.

use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::GraphData;

/// Info-string tag of the fenced block carrying a graph.
const GRAPH_FENCE: &str = "graph";

const SHAPE_HINT: &str =
    "expected `nodes` and `edges` arrays, with `id`, `position` and `data` on every node";

/// A graph document without usable graph data.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("graph '{slug}' has no ```graph code block")]
    MissingBlock { slug: String },

    #[error("graph '{slug}' payload is not valid JSON: {source}")]
    InvalidJson {
        slug: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("graph '{slug}' has invalid graph data: {message}")]
    InvalidShape { slug: String, message: String },
}

impl GraphError {
    /// Slug of the offending graph.
    pub fn slug(&self) -> &str {
        match self {
            Self::MissingBlock { slug }
            | Self::InvalidJson { slug, .. }
            | Self::InvalidShape { slug, .. } => slug,
        }
    }
}

/// Structural check run before a payload is trusted.
///
/// Requires array-typed `nodes` and `edges` and the `id`, `position` and
/// `data` keys on every node. Edge endpoints are not checked.
pub fn is_valid_graph_data(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    let (Some(Value::Array(nodes)), Some(Value::Array(_))) = (obj.get("nodes"), obj.get("edges"))
    else {
        return false;
    };

    nodes.iter().all(|node| {
        node.as_object()
            .is_some_and(|node| ["id", "position", "data"].iter().all(|key| node.contains_key(*key)))
    })
}

/// Parse JSON text without validating its shape.
pub fn parse_json(slug: &str, text: &str) -> Result<Value, GraphError> {
    serde_json::from_str(text).map_err(|source| GraphError::InvalidJson {
        slug: slug.to_string(),
        source,
    })
}

/// Validate a parsed payload and decode it into [`GraphData`].
///
/// Any payload [`is_valid_graph_data`] accepts decodes; loose field values
/// are coerced or defaulted. Keys other than `nodes` and `edges` at the top
/// level are ignored.
pub fn decode_graph_data(slug: &str, value: &Value) -> Result<GraphData, GraphError> {
    if !is_valid_graph_data(value) {
        return Err(GraphError::InvalidShape {
            slug: slug.to_string(),
            message: SHAPE_HINT.to_string(),
        });
    }

    GraphData::deserialize(value).map_err(|e| GraphError::InvalidShape {
        slug: slug.to_string(),
        message: e.to_string(),
    })
}

/// Take the first ```graph block out of a Markdown body.
///
/// Returns the decoded graph and the body without the block, trimmed. Later
/// graph blocks are left in the body.
pub fn extract_graph_block(slug: &str, body: &str) -> Result<(GraphData, String), GraphError> {
    let Some((range, payload)) = find_graph_block(body) else {
        return Err(GraphError::MissingBlock {
            slug: slug.to_string(),
        });
    };

    let value = parse_json(slug, &payload)?;
    let data = decode_graph_data(slug, &value)?;

    let rest = format!("{}{}", &body[..range.start], &body[range.end..]);
    Ok((data, rest.trim().to_string()))
}

/// Byte range and literal text of the first graph fence.
fn find_graph_block(body: &str) -> Option<(Range<usize>, String)> {
    let mut open: Option<(Range<usize>, String)> = None;

    for (event, range) in Parser::new_ext(body, Options::empty()).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info)))
                if open.is_none() && is_graph_fence(&info) =>
            {
                open = Some((range, String::new()));
            }
            Event::Text(text) => {
                if let Some((_, payload)) = open.as_mut() {
                    payload.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) if open.is_some() => return open,
            _ => {}
        }
    }

    open
}

fn is_graph_fence(info: &str) -> bool {
    info.split_whitespace().next() == Some(GRAPH_FENCE)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const VALID: &str = r#"{"nodes":[{"id":"a","position":{"x":0,"y":0},"data":{"label":"A"}}],"edges":[]}"#;

    #[test]
    fn test_validator_requires_node_keys() {
        assert!(!is_valid_graph_data(&json!({ "nodes": [{ "id": "a" }], "edges": [] })));
        assert!(is_valid_graph_data(&json!({
            "nodes": [{ "id": "a", "position": { "x": 0, "y": 0 }, "data": { "label": "A" } }],
            "edges": []
        })));
    }

    #[test]
    fn test_validator_rejects_other_shapes() {
        assert!(!is_valid_graph_data(&json!(null)));
        assert!(!is_valid_graph_data(&json!([])));
        assert!(!is_valid_graph_data(&json!({ "nodes": [] })));
        assert!(!is_valid_graph_data(&json!({ "nodes": {}, "edges": [] })));
        assert!(!is_valid_graph_data(&json!({ "nodes": ["a"], "edges": [] })));
        assert!(is_valid_graph_data(&json!({ "nodes": [], "edges": [] })));
    }

    #[test]
    fn test_extract_removes_block() {
        let body = format!("Intro paragraph.\n\n```graph\n{VALID}\n```\n\nOutro.\n");
        let (data, rest) = extract_graph_block("kg", &body).expect("graph");

        assert_eq!(data.node_count(), 1);
        assert_eq!(data.nodes[0].data.label, "A");
        assert!(rest.starts_with("Intro paragraph."));
        assert!(rest.ends_with("Outro."));
        assert!(!rest.contains("```"));
    }

    #[test]
    fn test_only_first_block_is_used() {
        let second = r#"{"nodes":[],"edges":[]}"#;
        let body = format!("```graph\n{VALID}\n```\n\n```graph\n{second}\n```\n");
        let (data, rest) = extract_graph_block("kg", &body).expect("graph");

        assert_eq!(data.node_count(), 1);
        assert!(rest.starts_with("```graph"));
        assert!(rest.contains(second));
    }

    #[test]
    fn test_info_string_first_word() {
        let body = format!("```json\n{{}}\n```\n\n```graph title=\"kg\"\n{VALID}\n```\n");
        let (data, rest) = extract_graph_block("kg", &body).expect("graph");
        assert_eq!(data.node_count(), 1);
        assert!(rest.starts_with("```json"));

        let err = extract_graph_block("kg", "```graphs\n{}\n```\n").expect_err("no block");
        assert!(matches!(err, GraphError::MissingBlock { .. }));
    }

    #[test]
    fn test_errors_carry_slug() {
        let missing = extract_graph_block("empty", "just text").expect_err("missing");
        assert!(matches!(missing, GraphError::MissingBlock { .. }));
        assert_eq!(missing.slug(), "empty");

        let bad_json = extract_graph_block("broken", "```graph\n{nodes:\n```\n").expect_err("json");
        assert!(matches!(bad_json, GraphError::InvalidJson { .. }));
        assert!(bad_json.to_string().contains("broken"));

        let bad_shape =
            extract_graph_block("shape", "```graph\n{\"nodes\":[{\"id\":\"a\"}],\"edges\":[]}\n```")
                .expect_err("shape");
        assert!(matches!(bad_shape, GraphError::InvalidShape { .. }));
    }

    #[test]
    fn test_accepted_payloads_decode() {
        let payloads = [
            json!({
                "nodes": [{ "id": "a", "position": { "x": 0, "y": 0 }, "data": { "label": "A" } }],
                "edges": [{ "source": "a", "target": "a" }]
            }),
            json!({
                "nodes": [{ "id": 7, "position": { "x": 0, "y": 0 }, "data": {} }],
                "edges": []
            }),
            json!({
                "nodes": [{ "id": "a", "position": null, "data": { "label": 42, "tags": "core" } }],
                "edges": [7, { "id": ["x"], "data": { "relation": 1 } }]
            }),
        ];

        for value in payloads {
            assert!(is_valid_graph_data(&value));
            let data = decode_graph_data("loose", &value).expect("accepted payload decodes");
            assert_eq!(data.node_count(), value["nodes"].as_array().map_or(0, Vec::len));
            assert_eq!(data.edge_count(), value["edges"].as_array().map_or(0, Vec::len));
        }
    }
}
