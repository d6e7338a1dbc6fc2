use crate::error::{EdgeConnError, Result};
use crate::host::adjacency::AdjacencyIndex;
use crate::host::geometry::{edge_midpoint, loop_midpoint, BundleSlot, GeometryConfig};
use crate::host::traits::{EventKind, GraphEvent, GraphHost};
use crate::types::{
    Color, Edge, EdgeId, EdgeSpec, Element, ElementKind, Node, NodeId, NodeSpec, OwnedElement,
    Position, DEFAULT_ELEMENT_COLOR,
};
use std::collections::{BTreeMap, HashSet, VecDeque};
use uuid::Uuid;

/// In-memory host graph.
///
/// Elements are kept in id order. Positions are set by the caller; edge
/// midpoints are derived from endpoint positions and parallel-bundle
/// fan-out (see [`geometry`](super::geometry)).
#[derive(Debug, Default)]
pub struct MemoryGraph {
    nodes: BTreeMap<NodeId, Node>,
    edges: BTreeMap<EdgeId, Edge>,
    adjacency: AdjacencyIndex,
    geometry: GeometryConfig,
    subscriptions: HashSet<EventKind>,
    events: VecDeque<GraphEvent>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_geometry(geometry: GeometryConfig) -> Self {
        Self {
            geometry,
            ..Default::default()
        }
    }

    pub fn geometry(&self) -> &GeometryConfig {
        &self.geometry
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    fn emit(&mut self, event: GraphEvent) {
        if self.subscriptions.contains(&event.kind()) {
            self.events.push_back(event);
        }
    }

    fn fresh_id(&self, requested: Option<String>) -> Result<String> {
        match requested {
            Some(id) if self.contains(&id) => Err(EdgeConnError::DuplicateElement(id)),
            Some(id) => Ok(id),
            None => Ok(Uuid::now_v7().to_string()),
        }
    }

    fn node_mut(&mut self, id: &str) -> Result<&mut Node> {
        if let Some(edge) = self.edges.get(id) {
            return Err(EdgeConnError::NotANode {
                id: edge.id.clone(),
                kind: ElementKind::Edge,
            });
        }
        self.nodes
            .get_mut(id)
            .ok_or_else(|| EdgeConnError::ElementNotFound(id.to_string()))
    }

    fn require_node(&self, id: &str) -> Result<&Node> {
        match self.element(id) {
            Some(Element::Node(node)) => Ok(node),
            Some(Element::Edge(edge)) => Err(EdgeConnError::NotANode {
                id: edge.id.clone(),
                kind: ElementKind::Edge,
            }),
            None => Err(EdgeConnError::ElementNotFound(id.to_string())),
        }
    }

    /// Edges between the same two nodes, in insertion order.
    fn bundle(&self, edge: &Edge) -> Vec<&Edge> {
        self.adjacency
            .incident(&edge.source)
            .iter()
            .filter_map(|id| self.edges.get(id))
            .filter(|other| other.endpoint_pair() == edge.endpoint_pair())
            .collect()
    }

    fn remove_edge(&mut self, id: &str) -> Option<Edge> {
        let edge = self.edges.remove(id)?;
        self.adjacency.remove(&edge);
        Some(edge)
    }
}

impl GraphHost for MemoryGraph {
    fn add_node(&mut self, spec: NodeSpec) -> Result<NodeId> {
        if !spec.position.is_valid() {
            return Err(EdgeConnError::InvalidPosition {
                id: spec.id.unwrap_or_default(),
                x: spec.position.x,
                y: spec.position.y,
            });
        }
        let id = self.fresh_id(spec.id)?;
        self.nodes.insert(
            id.clone(),
            Node {
                id: id.clone(),
                position: spec.position,
                locked: false,
                classes: spec.classes,
                data: spec.data,
                background_color: DEFAULT_ELEMENT_COLOR.to_string(),
            },
        );
        Ok(id)
    }

    fn add_edge(&mut self, spec: EdgeSpec) -> Result<EdgeId> {
        self.require_node(&spec.source)?;
        self.require_node(&spec.target)?;
        let id = self.fresh_id(spec.id)?;
        let edge = Edge {
            id: id.clone(),
            source: spec.source,
            target: spec.target,
            classes: spec.classes,
            data: spec.data,
            line_color: DEFAULT_ELEMENT_COLOR.to_string(),
        };
        self.adjacency.insert(&edge);
        self.edges.insert(id.clone(), edge);
        Ok(id)
    }

    fn remove(&mut self, id: &str) -> Result<Vec<OwnedElement>> {
        let mut removed = Vec::new();

        if let Some(edge) = self.remove_edge(id) {
            removed.push(OwnedElement::Edge(edge));
        } else if self.nodes.contains_key(id) {
            let incident: Vec<EdgeId> = self.adjacency.incident(id).to_vec();
            for edge_id in incident {
                if let Some(edge) = self.remove_edge(&edge_id) {
                    removed.push(OwnedElement::Edge(edge));
                }
            }
            if let Some(node) = self.nodes.remove(id) {
                removed.push(OwnedElement::Node(node));
            }
        } else {
            return Err(EdgeConnError::ElementNotFound(id.to_string()));
        }

        for element in &removed {
            self.emit(GraphEvent::Remove {
                element: element.clone(),
            });
        }
        Ok(removed)
    }

    fn element(&self, id: &str) -> Option<Element<'_>> {
        if let Some(node) = self.nodes.get(id) {
            return Some(Element::Node(node));
        }
        self.edges.get(id).map(Element::Edge)
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().cloned().collect()
    }

    fn edge_ids(&self) -> Vec<EdgeId> {
        self.edges.keys().cloned().collect()
    }

    fn set_position(&mut self, id: &str, position: Position) -> Result<()> {
        if !position.is_valid() {
            return Err(EdgeConnError::InvalidPosition {
                id: id.to_string(),
                x: position.x,
                y: position.y,
            });
        }
        let node = self.node_mut(id)?;
        if node.locked {
            return Err(EdgeConnError::NodeLocked(node.id.clone()));
        }
        if node.position == position {
            return Ok(());
        }
        node.position = position;
        let node = node.id.clone();
        self.emit(GraphEvent::Position { node });
        Ok(())
    }

    fn lock(&mut self, id: &str) -> Result<()> {
        self.node_mut(id)?.locked = true;
        Ok(())
    }

    fn unlock(&mut self, id: &str) -> Result<()> {
        self.node_mut(id)?.locked = false;
        Ok(())
    }

    fn midpoint(&self, edge: &str) -> Option<Position> {
        let edge = self.edges.get(edge)?;
        let bundle = self.bundle(edge);
        let slot = BundleSlot {
            index: bundle.iter().position(|e| e.id == edge.id)?,
            len: bundle.len(),
        };

        if edge.is_loop() {
            let at = self.nodes.get(&edge.source)?.position;
            return Some(loop_midpoint(at, slot, &self.geometry));
        }

        let (a, b) = edge.endpoint_pair();
        let a = self.nodes.get(a)?.position;
        let b = self.nodes.get(b)?.position;
        Some(edge_midpoint(a, b, slot, &self.geometry))
    }

    fn connected_edges(&self, node: &str) -> Vec<EdgeId> {
        self.adjacency.incident(node).to_vec()
    }

    fn parallel_edges(&self, edge: &str) -> Vec<EdgeId> {
        match self.edges.get(edge) {
            Some(edge) => self.bundle(edge).into_iter().map(|e| e.id.clone()).collect(),
            None => Vec::new(),
        }
    }

    fn set_line_color(&mut self, edge: &str, color: Color) -> Result<()> {
        let Some(target) = self.edges.get_mut(edge) else {
            return match self.nodes.get(edge) {
                Some(node) => Err(EdgeConnError::NotAnEdge {
                    id: node.id.clone(),
                    kind: ElementKind::Node,
                }),
                None => Err(EdgeConnError::ElementNotFound(edge.to_string())),
            };
        };
        if target.line_color == color {
            return Ok(());
        }
        target.line_color = color;
        let edge = target.id.clone();
        self.emit(GraphEvent::Style { edge });
        Ok(())
    }

    fn subscribe(&mut self, kind: EventKind) {
        self.subscriptions.insert(kind);
    }

    fn poll_event(&mut self) -> Option<GraphEvent> {
        self.events.pop_front()
    }
}
