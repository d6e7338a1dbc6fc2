use crate::error::Result;
use crate::types::{Color, Edge, EdgeId, EdgeSpec, Element, Node, NodeId, NodeSpec, OwnedElement, Position};

/// Kinds of change notification a host can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A node's position changed.
    Position,
    /// An element left the graph.
    Remove,
    /// An edge's style changed.
    Style,
}

/// A change notification. Only kinds that were subscribed are queued.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphEvent {
    Position { node: NodeId },
    Remove { element: OwnedElement },
    Style { edge: EdgeId },
}

impl GraphEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GraphEvent::Position { .. } => EventKind::Position,
            GraphEvent::Remove { .. } => EventKind::Remove,
            GraphEvent::Style { .. } => EventKind::Style,
        }
    }
}

/// The host graph engine the edge-connection layer runs on top of.
///
/// A host stores elements, answers geometry queries and queues change
/// events for the kinds it was subscribed to. It never calls back into
/// the layer; the layer drains events with [`GraphHost::poll_event`].
pub trait GraphHost {
    // === Element Operations ===

    /// Add a node. The id is generated when the spec has none.
    fn add_node(&mut self, spec: NodeSpec) -> Result<NodeId>;

    /// Add an edge between two existing nodes.
    fn add_edge(&mut self, spec: EdgeSpec) -> Result<EdgeId>;

    /// Remove an element. Removing a node also removes its connected
    /// edges. Returns everything that left the graph, edges first.
    fn remove(&mut self, id: &str) -> Result<Vec<OwnedElement>>;

    /// Look up any element by canonical id.
    fn element(&self, id: &str) -> Option<Element<'_>>;

    fn node(&self, id: &str) -> Option<&Node> {
        self.element(id).and_then(|e| e.as_node())
    }

    fn edge(&self, id: &str) -> Option<&Edge> {
        self.element(id).and_then(|e| e.as_edge())
    }

    fn contains(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    fn node_ids(&self) -> Vec<NodeId>;

    fn edge_ids(&self) -> Vec<EdgeId>;

    fn len(&self) -> usize {
        self.node_count() + self.edge_count()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // === Geometry ===

    /// Move a node. Fails for locked nodes and non-finite positions.
    fn set_position(&mut self, id: &str, position: Position) -> Result<()>;

    fn lock(&mut self, id: &str) -> Result<()>;

    fn unlock(&mut self, id: &str) -> Result<()>;

    /// Current midpoint of the rendered edge. May be non-finite when the
    /// host cannot draw the edge.
    fn midpoint(&self, edge: &str) -> Option<Position>;

    /// Edges with the node as source or target.
    fn connected_edges(&self, node: &str) -> Vec<EdgeId>;

    /// Edges sharing the edge's endpoint pair, in either direction. The
    /// edge itself is included.
    fn parallel_edges(&self, edge: &str) -> Vec<EdgeId>;

    // === Style ===

    fn set_line_color(&mut self, edge: &str, color: Color) -> Result<()>;

    // === Events ===

    /// Start queueing events of the given kind.
    fn subscribe(&mut self, kind: EventKind);

    /// Next queued event, oldest first.
    fn poll_event(&mut self) -> Option<GraphEvent>;
}
