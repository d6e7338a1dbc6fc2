use crate::types::{EdgeId, ElementKind, NodeId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EdgeConnError>;

#[derive(Debug, Error, PartialEq)]
pub enum EdgeConnError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Duplicate element: {0}")]
    DuplicateElement(String),

    #[error("Expected an edge, got {kind} {id}")]
    NotAnEdge { id: String, kind: ElementKind },

    #[error("Expected a node, got {kind} {id}")]
    NotANode { id: String, kind: ElementKind },

    #[error("Node {0} is not an aux node")]
    NotAnAuxNode(NodeId),

    #[error("Edge {0} has no aux node")]
    MissingAuxNode(EdgeId),

    #[error("Data inconsistency: aux node {aux_node} of edge {edge} not in graph")]
    DataInconsistency { edge: EdgeId, aux_node: NodeId },

    #[error("Node {0} is locked")]
    NodeLocked(NodeId),

    #[error("Invalid position for node {id}: ({x}, {y})")]
    InvalidPosition { id: NodeId, x: f64, y: f64 },

    #[error("Validation error: {0}")]
    Validation(String),
}
