use anyhow::Context;
use edgeconn_core::{deserialize_id, EdgeDescriptor, NodeSpec};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A graph document: nodes, an edge batch (endpoints may name edges) and
/// follow-up operations applied once the batch is in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,

    #[serde(default)]
    pub edges: Vec<EdgeDescriptor>,

    #[serde(default)]
    pub ops: Vec<Operation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Move {
        #[serde(deserialize_with = "deserialize_id")]
        node: String,
        x: f64,
        y: f64,
    },
    Remove {
        #[serde(deserialize_with = "deserialize_id")]
        id: String,
    },
    Color {
        #[serde(deserialize_with = "deserialize_id")]
        edge: String,
        color: String,
    },
}

impl GraphDocument {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document() {
        let doc: GraphDocument = serde_json::from_str(
            r#"{
                "nodes": [
                    {"id": "a", "position": {"x": 0, "y": 0}},
                    {"id": "b", "position": {"x": 10, "y": 0}}
                ],
                "edges": [
                    {"source": "a", "target": "e1"},
                    {"id": "e1", "source": "a", "target": "b", "data": {"w": 2}}
                ],
                "ops": [
                    {"op": "move", "node": "b", "x": 10, "y": 10},
                    {"op": "color", "edge": "e1", "color": "red"},
                    {"op": "remove", "id": "e1"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(doc.nodes.len(), 2);
        assert_eq!(doc.edges[1].id.as_deref(), Some("e1"));
        assert_eq!(
            doc.ops[0],
            Operation::Move {
                node: "b".into(),
                x: 10.0,
                y: 10.0
            }
        );
        assert_eq!(doc.ops[2], Operation::Remove { id: "e1".into() });
    }

    #[test]
    fn test_numeric_ids() {
        let doc: GraphDocument = serde_json::from_str(
            r#"{
                "nodes": [{"id": 1}, {"id": 2.0, "position": {"x": 4, "y": 0}}],
                "edges": [{"id": 7, "source": 1, "target": 2}],
                "ops": [
                    {"op": "move", "node": 2, "x": 4, "y": 4},
                    {"op": "remove", "id": 7}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(doc.nodes[0].id.as_deref(), Some("1"));
        assert_eq!(doc.nodes[1].id.as_deref(), Some("2"));
        assert_eq!(doc.edges[0].id.as_deref(), Some("7"));
        assert_eq!(doc.edges[0].target.canonical(), "2");
        assert_eq!(
            doc.ops[0],
            Operation::Move {
                node: "2".into(),
                x: 4.0,
                y: 4.0
            }
        );
        assert_eq!(doc.ops[1], Operation::Remove { id: "7".into() });
    }

    #[test]
    fn test_everything_is_optional() {
        let doc: GraphDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(doc, GraphDocument::default());
    }
}
