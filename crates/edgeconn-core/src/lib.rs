//! Edge-to-edge connections for event-driven graphs.
//!
//! Graph engines connect edges to nodes only. This crate lets an edge name
//! another edge as its source or target by giving every inserted edge an
//! aux node on its midpoint and rewriting edge endpoints to those nodes.
//! Aux nodes follow their edges through node moves, parallel-bundle
//! changes, restyles and removals.

pub mod types;
pub mod error;
pub mod host;
pub mod connect;

pub use error::{EdgeConnError, Result};
pub use types::*;
pub use host::{EventKind, GeometryConfig, GraphEvent, GraphHost, MemoryGraph};
pub use connect::{
    AuxPair, BatchOutcome, ConnectConfig, EdgeConnections, GraphSnapshot, DEFAULT_MAX_PASSES,
};
