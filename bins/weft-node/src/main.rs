//! Weft node binary.
//!
//! Binds a UDP port, joins the localhost seed mesh (or an explicit peer
//! list), and runs the gossip loop. Optionally mines posts extending the
//! local tip.

use std::process;

use clap::Parser;
use tracing::{error, info};

use weft_core::constants::DEFAULT_MINE_BITS;
use weft_core::types::{Body, Word};
use weft_network::Peer;
use weft_node_lib::{MiningConfig, Node, NodeConfig};

/// Weft gossip node.
#[derive(Parser, Debug)]
#[command(
    name = "weft-node",
    version,
    about = "Proof-of-work gossip node for fixed-size posts"
)]
struct Args {
    /// Local UDP port to bind
    port: u16,

    /// Gossip peers as ip:port (comma-separated); defaults to the
    /// localhost seed mesh on ports 42000-42003
    #[arg(long, value_delimiter = ',')]
    peer: Vec<Peer>,

    /// Answer GetTip requests with the current tip post
    #[arg(long)]
    share_tip: bool,

    /// Mine posts extending the local tip
    #[arg(long)]
    mine: bool,

    /// Mining difficulty as a score exponent (target = 2^bits)
    #[arg(long, default_value_t = DEFAULT_MINE_BITS)]
    mine_bits: usize,

    /// UTF-8 payload for mined posts, zero-padded to the body size
    #[arg(long)]
    text: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    /// Convert CLI args into a NodeConfig.
    fn into_config(self) -> NodeConfig {
        let mut config = NodeConfig::for_port(self.port);

        if !self.peer.is_empty() {
            config.peers = self.peer;
        }
        config.share_tip = self.share_tip;
        config.log_level = self.log_level;

        if self.mine {
            config.mining = Some(MiningConfig {
                target: Word::one() << self.mine_bits,
                body: self.text.as_deref().map(Body::from_text).unwrap_or_default(),
            });
        }

        config
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    let config = args.into_config();

    init_logging(&config.log_level);

    info!("weft node v{}", env!("CARGO_PKG_VERSION"));
    info!("port: {}", config.port);
    let peers: Vec<String> = config.peers.iter().map(Peer::to_string).collect();
    info!("peers: {}", peers.join(", "));
    info!("share_tip: {}", config.share_tip);
    info!("mining: {}", config.mining.is_some());

    let node = match Node::bind(config).await {
        Ok(node) => node,
        Err(err) => {
            error!("failed to start node: {err}");
            process::exit(1);
        }
    };

    info!("✓ node initialized");

    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
        info!("received Ctrl+C, shutting down...");
    };

    tokio::select! {
        _ = node.run() => {
            info!("node event loop exited");
        }
        _ = shutdown_signal => {}
    }

    info!("✓ weft node shutdown complete");
}

/// Initialize tracing subscriber with the given log level.
fn init_logging(level_str: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_str));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_level(true))
        .init();
}
