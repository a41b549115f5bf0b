//! Node configuration.
//!
//! Defaults match the hardcoded localhost mesh: a node binds its own
//! port and gossips with the seed ports, minus itself. Everything can be
//! overridden programmatically or from the CLI.

use std::time::Duration;

use weft_core::constants::{DEFAULT_MINE_BITS, SEED_PORTS, TICK_INTERVAL_MS};
use weft_core::types::{Body, Word};
use weft_network::Peer;

/// Settings for the optional mining mode.
#[derive(Clone, Debug)]
pub struct MiningConfig {
    /// Minimum local score a mined post must reach.
    pub target: Word,
    /// Payload placed in every mined post.
    pub body: Body,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            target: Word::one() << DEFAULT_MINE_BITS,
            body: Body::zero(),
        }
    }
}

/// Configuration for a node instance.
#[derive(Clone, Debug)]
pub struct NodeConfig {
    /// UDP port to bind. Port 0 asks for an ephemeral port (tests).
    pub port: u16,
    /// Peers to gossip with.
    pub peers: Vec<Peer>,
    /// Sleep between event-loop ticks.
    pub tick_interval: Duration,
    /// Answer `GetTip` with `SharePost` of the current tip. Off by
    /// default: the baseline protocol leaves `GetTip` unhandled, and
    /// peers that do not expect the reply simply ingest a post they
    /// most likely already have.
    pub share_tip: bool,
    /// Mine posts extending the local tip, when set.
    pub mining: Option<MiningConfig>,
    /// Log level filter string (e.g. "info", "weft_node=debug").
    pub log_level: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self::for_port(SEED_PORTS[0])
    }
}

impl NodeConfig {
    /// Defaults for a node on the given port, peered with the seed mesh.
    pub fn for_port(port: u16) -> Self {
        Self {
            port,
            peers: seed_peers(port),
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            share_tip: false,
            mining: None,
            log_level: "info".to_string(),
        }
    }
}

/// The hardcoded localhost seed peers, excluding the node's own port.
pub fn seed_peers(own_port: u16) -> Vec<Peer> {
    SEED_PORTS
        .iter()
        .filter(|&&port| port != own_port)
        .map(|&port| Peer::local(port))
        .collect()
}
