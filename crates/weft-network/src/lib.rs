//! # weft-network
//! Wire messages and UDP plumbing for the weft gossip protocol.

pub mod message;
pub mod peer;
pub mod transport;

pub use message::{Message, Received};
pub use peer::Peer;
pub use transport::UdpTransport;
