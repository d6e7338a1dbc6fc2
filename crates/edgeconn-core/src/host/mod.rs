mod adjacency;
pub mod geometry;
mod memory;
mod traits;

pub use adjacency::AdjacencyIndex;
pub use geometry::GeometryConfig;
pub use memory::MemoryGraph;
pub use traits::{EventKind, GraphEvent, GraphHost};
