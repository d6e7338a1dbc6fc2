//! Aux-node lifecycle and lookups.
//!
//! Every edge inserted through the resolver gets an aux node: a locked node
//! with class `aux-node` sitting on the edge's midpoint. Other edges attach
//! to it when they name the edge as an endpoint. Positions follow the edge
//! through node moves and parallel-bundle changes; the color is read from
//! the edge on demand.

use crate::connect::engine::EdgeConnections;
use crate::error::{EdgeConnError, Result};
use crate::host::GraphHost;
use crate::types::{
    Color, Edge, EdgeId, Element, ElementKind, Node, NodeId, NodeSpec, Position,
    AUX_NODE_CLASS, AUX_NODE_FALLBACK_COLOR,
};
use serde_json::Map;

impl<G: GraphHost> EdgeConnections<G> {
    // --- Lifecycle ---

    /// Create the aux node of a freshly inserted edge.
    pub(crate) fn create_aux_node(&mut self, edge: &str) -> Result<NodeId> {
        let position = match self.graph.midpoint(edge) {
            Some(midpoint) if midpoint.is_valid() => midpoint,
            _ => self.endpoint_mean(edge)?,
        };

        let aux_node = self.graph.add_node(NodeSpec {
            id: None,
            position,
            classes: vec![AUX_NODE_CLASS.to_string()],
            data: Map::new(),
        })?;
        if let Err(e) = self.graph.lock(&aux_node) {
            self.graph.remove(&aux_node)?;
            return Err(e);
        }

        if !self.registry.insert(edge.to_string(), aux_node.clone()) {
            self.graph.remove(&aux_node)?;
            return Err(EdgeConnError::Validation(format!(
                "edge {} already has an aux node",
                edge
            )));
        }
        log::debug!("Created aux node {} for edge {} at {}", aux_node, edge, position);

        // a new bundle member shifts the fan-out of all its siblings
        self.reposition_aux_nodes_of_parallel_edges(edge)?;
        Ok(aux_node)
    }

    /// Fallback position for hosts that cannot report a midpoint right
    /// after insertion.
    fn endpoint_mean(&self, edge: &str) -> Result<Position> {
        let edge = self
            .graph
            .edge(edge)
            .ok_or_else(|| EdgeConnError::ElementNotFound(edge.to_string()))?;
        let source = self.node_position(&edge.source)?;
        let target = self.node_position(&edge.target)?;
        let mean = Position::mean(source, target);
        if mean.is_valid() {
            Ok(mean)
        } else {
            Err(EdgeConnError::InvalidPosition {
                id: edge.id.clone(),
                x: mean.x,
                y: mean.y,
            })
        }
    }

    fn node_position(&self, id: &str) -> Result<Position> {
        self.graph
            .node(id)
            .map(|n| n.position)
            .ok_or_else(|| EdgeConnError::ElementNotFound(id.to_string()))
    }

    /// Move every aux node whose edge touches `node` to that edge's current
    /// midpoint. Returns the number of aux nodes that moved.
    pub fn reposition_aux_nodes(&mut self, node: &str) -> Result<usize> {
        let moved = self.reposition_connected(node)?;
        self.dispatch()?;
        Ok(moved)
    }

    pub(crate) fn reposition_connected(&mut self, node: &str) -> Result<usize> {
        let edges = self.graph.connected_edges(node);
        self.reposition_all(edges)
    }

    /// Reposition the aux nodes of every edge in `edge`'s parallel bundle,
    /// `edge` included.
    pub(crate) fn reposition_aux_nodes_of_parallel_edges(&mut self, edge: &str) -> Result<usize> {
        let bundle = self.graph.parallel_edges(edge);
        self.reposition_all(bundle)
    }

    /// Same as above for an edge that already left the graph, addressed by
    /// its former endpoints.
    fn reposition_bundle(&mut self, source: &str, target: &str) -> Result<usize> {
        let bundle: Vec<EdgeId> = self
            .graph
            .connected_edges(source)
            .into_iter()
            .filter(|id| {
                self.graph
                    .edge(id)
                    .is_some_and(|e| e.touches(source) && e.touches(target))
            })
            .collect();
        self.reposition_all(bundle)
    }

    /// Reposition the aux node of every listed edge. One failing edge does
    /// not leave the others stale; the first error is returned at the end.
    fn reposition_all(&mut self, edges: Vec<EdgeId>) -> Result<usize> {
        let mut moved = 0;
        let mut first_error = None;
        for edge in edges {
            match self.reposition_aux_node(&edge) {
                Ok(true) => moved += 1,
                Ok(false) => {}
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(moved),
        }
    }

    /// Move one aux node to its edge's midpoint. Non-finite midpoints are
    /// skipped; the node keeps its last valid position.
    fn reposition_aux_node(&mut self, edge: &str) -> Result<bool> {
        let Some(aux_node) = self.aux_node(edge)? else {
            return Ok(false);
        };
        let (aux_node, current) = (aux_node.id.clone(), aux_node.position);

        let Some(midpoint) = self.graph.midpoint(edge) else {
            return Ok(false);
        };
        if !midpoint.is_valid() {
            log::debug!(
                "Edge {} has no drawable midpoint; aux node {} stays at {}",
                edge,
                aux_node,
                current
            );
            return Ok(false);
        }
        if midpoint == current {
            return Ok(false);
        }

        self.graph.unlock(&aux_node)?;
        let moved = self.graph.set_position(&aux_node, midpoint);
        self.graph.lock(&aux_node)?;
        moved?;
        log::trace!("Aux node {} of edge {} moved to {}", aux_node, edge, midpoint);
        Ok(true)
    }

    /// Handle an edge leaving the graph: drop its aux node (which takes the
    /// edges attached to it along) and re-fan what is left of its bundle.
    pub(crate) fn remove_aux_node(&mut self, edge: &Edge) -> Result<()> {
        if let Some(aux_node) = self.registry.remove_edge(&edge.id) {
            if self.graph.contains(&aux_node) {
                self.graph.remove(&aux_node)?;
                log::debug!("Removed aux node {} of edge {}", aux_node, edge.id);
            }
        }
        self.reposition_bundle(&edge.source, &edge.target)?;
        Ok(())
    }

    /// React to an edge restyle. Aux-node color is derived on read, so this
    /// only resolves the current value; `None` when the edge has no aux
    /// node or is already gone.
    pub fn recolor_aux_node(&self, edge: &str) -> Result<Option<Color>> {
        if !self.graph.contains(edge) {
            return Ok(None);
        }
        let Some(aux_node) = self.aux_node(edge)? else {
            return Ok(None);
        };
        let color = self.aux_node_color(&aux_node.id);
        log::trace!("Aux node {} of edge {} now renders {}", aux_node.id, edge, color);
        Ok(Some(color))
    }

    /// Background color of an aux node: its edge's line color, or white
    /// once the edge is unreachable.
    fn aux_node_color(&self, aux_node: &str) -> Color {
        self.registry
            .edge_of(aux_node)
            .and_then(|edge| self.graph.edge(edge))
            .map(|edge| edge.line_color.clone())
            .unwrap_or_else(|| AUX_NODE_FALLBACK_COLOR.to_string())
    }

    /// Rendered background color of a node. Derived for aux nodes, taken
    /// from the host otherwise.
    pub fn node_color(&self, node: &str) -> Result<Color> {
        let node = self.require_node(node)?;
        if self.registry.edge_of(&node.id).is_some() {
            Ok(self.aux_node_color(&node.id))
        } else {
            Ok(node.background_color.clone())
        }
    }

    // --- Lookups ---

    /// The edge's aux node; `None` for an edge without one.
    ///
    /// Fails if `edge` is not in the graph or is not an edge, and with
    /// [`EdgeConnError::DataInconsistency`] if the edge's aux node has
    /// vanished from the graph.
    pub fn aux_node(&self, edge: &str) -> Result<Option<&Node>> {
        let edge = self.require_edge(edge)?;
        let Some(aux_node) = self.registry.aux_of(&edge.id) else {
            return Ok(None);
        };
        match self.graph.node(aux_node) {
            Some(node) => Ok(Some(node)),
            None => {
                log::warn!(
                    "Data inconsistency: aux node {} of edge {} not in graph",
                    aux_node,
                    edge.id
                );
                Err(EdgeConnError::DataInconsistency {
                    edge: edge.id.clone(),
                    aux_node: aux_node.clone(),
                })
            }
        }
    }

    /// Id of the edge's aux node. Unlike [`aux_node`](Self::aux_node) a
    /// missing aux node is an error.
    pub(crate) fn require_aux_node_id(&self, edge: &str) -> Result<NodeId> {
        match self.aux_node(edge)? {
            Some(node) => Ok(node.id.clone()),
            None => {
                log::warn!("Edge {} has no aux node", edge);
                Err(EdgeConnError::MissingAuxNode(edge.to_string()))
            }
        }
    }

    pub fn is_aux_node(&self, node: &str) -> Result<bool> {
        Ok(self.edge_id(node)?.is_some())
    }

    /// Id of the edge an aux node represents; `None` for ordinary nodes.
    pub fn edge_id(&self, node: &str) -> Result<Option<&str>> {
        let node = self.require_node(node)?;
        Ok(self.registry.edge_of(&node.id).map(String::as_str))
    }

    /// The edge an aux node represents; `None` once that edge has left the
    /// graph. Fails for anything that is not an aux node.
    pub fn edge(&self, aux_node: &str) -> Result<Option<&Edge>> {
        match self.edge_id(aux_node)? {
            Some(edge) => Ok(self.graph.edge(edge)),
            None => Err(EdgeConnError::NotAnAuxNode(aux_node.to_string())),
        }
    }

    fn require_edge(&self, id: &str) -> Result<&Edge> {
        match self.graph.element(id) {
            Some(Element::Edge(edge)) => Ok(edge),
            Some(Element::Node(node)) => Err(EdgeConnError::NotAnEdge {
                id: node.id.clone(),
                kind: ElementKind::Node,
            }),
            None => Err(EdgeConnError::ElementNotFound(id.to_string())),
        }
    }

    fn require_node(&self, id: &str) -> Result<&Node> {
        match self.graph.element(id) {
            Some(Element::Node(node)) => Ok(node),
            Some(Element::Edge(edge)) => Err(EdgeConnError::NotANode {
                id: edge.id.clone(),
                kind: ElementKind::Edge,
            }),
            None => Err(EdgeConnError::ElementNotFound(id.to_string())),
        }
    }
}
