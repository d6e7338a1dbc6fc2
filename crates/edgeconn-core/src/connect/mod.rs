mod aux;
mod config;
mod engine;
mod registry;
mod resolver;

pub use config::{ConnectConfig, DEFAULT_MAX_PASSES};
pub use engine::{AuxPair, EdgeConnections, GraphSnapshot};
pub use resolver::BatchOutcome;
