use crate::connect::config::ConnectConfig;
use crate::connect::registry::AuxRegistry;
use crate::error::Result;
use crate::host::{EventKind, GraphEvent, GraphHost, MemoryGraph};
use crate::types::{Color, Edge, EdgeId, Node, NodeId, NodeSpec, OwnedElement, Position};
use serde::{Deserialize, Serialize};

/// Edge-to-edge connections on top of a host graph.
///
/// One instance per graph. Owns the host, the aux-node registry and the
/// configuration; every mutating call drains the host's event queue before
/// returning, so aux nodes are always in step with their edges when control
/// comes back to the caller.
///
/// # Example
/// ```rust
/// use edgeconn_core::{EdgeConnections, EdgeDescriptor, MemoryGraph, NodeSpec, Position};
///
/// let mut conn = EdgeConnections::new(MemoryGraph::new()).unwrap();
/// conn.add_node(NodeSpec::new(Position::new(0.0, 0.0)).with_id("a")).unwrap();
/// conn.add_node(NodeSpec::new(Position::new(10.0, 0.0)).with_id("b")).unwrap();
/// conn.add_edge(EdgeDescriptor::new("a", "b").with_id("e1")).unwrap();
/// conn.add_edge(EdgeDescriptor::new("e1", "a").with_id("e2")).unwrap();
///
/// let aux = conn.aux_node("e1").unwrap().unwrap();
/// assert_eq!(aux.position, Position::new(5.0, 0.0));
/// ```
pub struct EdgeConnections<G: GraphHost = MemoryGraph> {
    pub(crate) graph: G,
    pub(crate) registry: AuxRegistry,
    pub(crate) config: ConnectConfig,
}

impl<G: GraphHost> EdgeConnections<G> {
    /// Attach to a graph with the default configuration.
    pub fn new(graph: G) -> Result<Self> {
        Self::with_config(graph, ConnectConfig::default())
    }

    /// Attach to a graph. Subscribes to position, removal and style events.
    pub fn with_config(mut graph: G, config: ConnectConfig) -> Result<Self> {
        config.validate()?;
        graph.subscribe(EventKind::Position);
        graph.subscribe(EventKind::Remove);
        graph.subscribe(EventKind::Style);
        Ok(Self {
            graph,
            registry: AuxRegistry::new(),
            config,
        })
    }

    pub fn config(&self) -> &ConnectConfig {
        &self.config
    }

    /// Read access to the host graph.
    pub fn graph(&self) -> &G {
        &self.graph
    }

    /// Detach, handing the host graph back.
    pub fn into_graph(self) -> G {
        self.graph
    }

    // --- Host drivers ---

    pub fn add_node(&mut self, spec: NodeSpec) -> Result<NodeId> {
        let id = self.graph.add_node(spec)?;
        self.dispatch()?;
        Ok(id)
    }

    /// Move a node and cascade to every aux node that depends on it.
    /// Aux nodes are locked, so moving one directly fails.
    pub fn move_node(&mut self, id: &str, position: Position) -> Result<()> {
        self.graph.set_position(id, position)?;
        self.dispatch()
    }

    /// Remove an element. Aux nodes of removed edges go with them.
    pub fn remove(&mut self, id: &str) -> Result<Vec<OwnedElement>> {
        let removed = self.graph.remove(id)?;
        self.dispatch()?;
        Ok(removed)
    }

    pub fn set_line_color(&mut self, edge: &str, color: impl Into<Color>) -> Result<()> {
        self.graph.set_line_color(edge, color.into())?;
        self.dispatch()
    }

    /// Pairs as (edge id, aux node id), ordered by edge id.
    pub fn aux_nodes(&self) -> impl Iterator<Item = (&EdgeId, &NodeId)> {
        self.registry.iter()
    }

    // --- Event loop ---

    /// Drain the host's event queue. Handlers may enqueue further events
    /// (aux-node moves, cascading removals); those are handled in the same
    /// call. A failing handler does not stop the drain; the first error is
    /// returned once the queue is empty.
    pub(crate) fn dispatch(&mut self) -> Result<()> {
        let mut first_error = None;
        while let Some(event) = self.graph.poll_event() {
            let handled = match event {
                GraphEvent::Position { node } => self.reposition_connected(&node).map(|_| ()),
                GraphEvent::Remove {
                    element: OwnedElement::Edge(edge),
                } => self.remove_aux_node(&edge),
                GraphEvent::Remove {
                    element: OwnedElement::Node(node),
                } => {
                    self.forget_removed_node(&node);
                    Ok(())
                }
                GraphEvent::Style { edge } => self.recolor_aux_node(&edge).map(|_| ()),
            };
            if let Err(e) = handled {
                log::warn!("Edge-connection handler failed: {}", e);
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// An aux node that disappears while its edge is still present breaks
    /// the 1:1 invariant. The registry entry is kept so lookups on the
    /// edge report the inconsistency instead of silently losing the proxy.
    fn forget_removed_node(&mut self, node: &Node) {
        if let Some(edge) = self.registry.edge_of(&node.id) {
            if self.graph.contains(edge) {
                log::warn!(
                    "Aux node {} removed while its edge {} is still in the graph",
                    node.id,
                    edge
                );
            }
        }
    }

    /// Serializable view of the graph and its aux-node pairs.
    pub fn snapshot(&self) -> Result<GraphSnapshot> {
        let nodes = self
            .graph
            .node_ids()
            .iter()
            .filter_map(|id| self.graph.node(id).cloned())
            .collect();
        let edges = self
            .graph
            .edge_ids()
            .iter()
            .filter_map(|id| self.graph.edge(id).cloned())
            .collect();

        let mut aux_nodes = Vec::with_capacity(self.registry.len());
        for (edge, aux_node) in self.registry.iter() {
            let Some(node) = self.aux_node(edge)? else {
                continue;
            };
            aux_nodes.push(AuxPair {
                edge: edge.clone(),
                aux_node: aux_node.clone(),
                position: node.position,
                color: self.node_color(aux_node)?,
            });
        }

        Ok(GraphSnapshot {
            nodes,
            edges,
            aux_nodes,
        })
    }
}

/// An edge and its aux node, as reported by [`EdgeConnections::snapshot`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuxPair {
    pub edge: EdgeId,
    pub aux_node: NodeId,
    pub position: Position,
    pub color: Color,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub aux_nodes: Vec<AuxPair>,
}

impl GraphSnapshot {
    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }
}
