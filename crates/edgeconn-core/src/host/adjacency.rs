use crate::types::{Edge, EdgeId, NodeId};
use std::collections::HashMap;

/// Incident-edge index: node id → edges touching it, in insertion order.
///
/// Kept in sync on every edge insert/remove, so unlike a lazily rebuilt
/// cache it is always valid.
#[derive(Debug, Default, Clone)]
pub struct AdjacencyIndex {
    incident: HashMap<NodeId, Vec<EdgeId>>,
}

impl AdjacencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, edge: &Edge) {
        self.incident
            .entry(edge.source.clone())
            .or_default()
            .push(edge.id.clone());
        if !edge.is_loop() {
            self.incident
                .entry(edge.target.clone())
                .or_default()
                .push(edge.id.clone());
        }
    }

    pub fn remove(&mut self, edge: &Edge) {
        for node in [&edge.source, &edge.target] {
            if let Some(list) = self.incident.get_mut(node) {
                list.retain(|id| id != &edge.id);
                if list.is_empty() {
                    self.incident.remove(node);
                }
            }
        }
    }

    /// Edges touching the node; empty for unknown nodes.
    pub fn incident(&self, node: &str) -> &[EdgeId] {
        self.incident.get(node).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn edge(id: &str, s: &str, t: &str) -> Edge {
        Edge {
            id: id.into(),
            source: s.into(),
            target: t.into(),
            classes: vec![],
            data: Map::new(),
            line_color: String::new(),
        }
    }

    #[test]
    fn test_insert_and_remove() {
        let mut index = AdjacencyIndex::new();
        let ab = edge("ab", "a", "b");
        let bc = edge("bc", "b", "c");
        index.insert(&ab);
        index.insert(&bc);

        assert_eq!(index.incident("b"), ["ab".to_string(), "bc".to_string()]);
        assert_eq!(index.incident("a").len(), 1);

        index.remove(&ab);
        assert_eq!(index.incident("b"), ["bc".to_string()]);
        assert!(index.incident("a").is_empty());
    }

    #[test]
    fn test_loop_is_indexed_once() {
        let mut index = AdjacencyIndex::new();
        let aa = edge("aa", "a", "a");
        index.insert(&aa);
        assert_eq!(index.incident("a").len(), 1);
        index.remove(&aa);
        assert_eq!(index.incident("a").len(), 0);
    }
}
