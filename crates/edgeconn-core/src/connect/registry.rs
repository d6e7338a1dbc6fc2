use crate::types::{EdgeId, NodeId};
use std::collections::BTreeMap;

/// Bidirectional edge ↔ aux node mapping.
///
/// Lives outside the host's element data so aux-node back-references never
/// show up in user-visible attributes. Entries are written once when the
/// aux node is created and dropped when the edge leaves the graph.
#[derive(Debug, Default, Clone)]
pub struct AuxRegistry {
    by_edge: BTreeMap<EdgeId, NodeId>,
    by_aux: BTreeMap<NodeId, EdgeId>,
}

impl AuxRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new pair. Returns false, leaving the registry untouched,
    /// if either side is already mapped.
    pub fn insert(&mut self, edge: EdgeId, aux_node: NodeId) -> bool {
        if self.by_edge.contains_key(&edge) || self.by_aux.contains_key(&aux_node) {
            return false;
        }
        self.by_aux.insert(aux_node.clone(), edge.clone());
        self.by_edge.insert(edge, aux_node);
        true
    }

    pub fn aux_of(&self, edge: &str) -> Option<&NodeId> {
        self.by_edge.get(edge)
    }

    pub fn edge_of(&self, aux_node: &str) -> Option<&EdgeId> {
        self.by_aux.get(aux_node)
    }

    /// Forget the edge's pair; returns the aux node id it mapped to.
    pub fn remove_edge(&mut self, edge: &str) -> Option<NodeId> {
        let aux_node = self.by_edge.remove(edge)?;
        self.by_aux.remove(&aux_node);
        Some(aux_node)
    }

    /// Pairs as (edge, aux node), ordered by edge id.
    pub fn iter(&self) -> impl Iterator<Item = (&EdgeId, &NodeId)> {
        self.by_edge.iter()
    }

    pub fn len(&self) -> usize {
        self.by_edge.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_are_written_once() {
        let mut registry = AuxRegistry::new();
        assert!(registry.insert("e1".into(), "n1".into()));
        assert!(!registry.insert("e1".into(), "n2".into()));
        assert!(!registry.insert("e2".into(), "n1".into()));

        assert_eq!(registry.aux_of("e1").map(String::as_str), Some("n1"));
        assert_eq!(registry.edge_of("n1").map(String::as_str), Some("e1"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_clears_both_directions() {
        let mut registry = AuxRegistry::new();
        registry.insert("e1".into(), "n1".into());
        assert_eq!(registry.remove_edge("e1"), Some("n1".to_string()));
        assert!(registry.edge_of("n1").is_none());
        assert_eq!(registry.len(), 0);
        assert_eq!(registry.remove_edge("e1"), None);
    }
}
