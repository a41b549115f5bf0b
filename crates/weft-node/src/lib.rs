//! # weft-node
//! Node composition: configuration, message dispatch, and the event loop.

pub mod config;
pub mod node;

pub use config::{MiningConfig, NodeConfig};
pub use node::Node;
