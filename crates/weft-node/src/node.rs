//! The node: store plus transport, driven by a single cooperative loop.
//!
//! One tick drains the inbox, applies each message in arrival order,
//! runs the optional bounded mining step, and gossips a `Ping` to every
//! peer. The loop is the only locus of state mutation; there is no
//! shared mutable state and no locking. Suspension points are the sends
//! and the inter-tick sleep.

use tracing::{debug, info, trace, warn};

use weft_core::constants::MINE_ATTEMPTS_PER_TICK;
use weft_core::error::WeftError;
use weft_core::mine::mine;
use weft_core::store::{AddOutcome, PostStore};
use weft_core::types::{Post, PostHash, Word};
use weft_network::{Message, Peer, Received, UdpTransport};

use crate::config::NodeConfig;

/// Resumable mining state: the candidate keeps its work word across
/// ticks so exhausted budgets pick up where they left off.
struct Miner {
    candidate: Post,
    target: Word,
}

/// A running node: configuration, socket, chain store, and peer list.
pub struct Node {
    config: NodeConfig,
    transport: UdpTransport,
    store: PostStore,
    peers: Vec<Peer>,
    miner: Option<Miner>,
}

impl Node {
    /// Bind the UDP socket and start from a genesis-only store.
    pub async fn bind(config: NodeConfig) -> Result<Self, WeftError> {
        let transport = UdpTransport::bind(config.port).await?;
        let port = transport.local_port()?;
        let store = PostStore::new();
        let miner = config.mining.as_ref().map(|mining| Miner {
            candidate: Post {
                body: mining.body,
                work: Word::zero(),
                prev: store.tip(),
            },
            target: mining.target,
        });
        info!(port, peers = config.peers.len(), mining = miner.is_some(), "node listening");
        let peers = config.peers.clone();
        Ok(Self { config, transport, store, peers, miner })
    }

    /// The chain store.
    pub fn store(&self) -> &PostStore {
        &self.store
    }

    /// Mutable store access, for seeding chains in tests and tools.
    pub fn store_mut(&mut self) -> &mut PostStore {
        &mut self.store
    }

    /// The current peer list.
    pub fn peers(&self) -> &[Peer] {
        &self.peers
    }

    /// Add a gossip peer.
    pub fn add_peer(&mut self, peer: Peer) {
        if !self.peers.contains(&peer) {
            self.peers.push(peer);
        }
    }

    /// The bound UDP port (resolves port 0 to the kernel's choice).
    pub fn local_port(&self) -> u16 {
        self.transport.local_port().unwrap_or(self.config.port)
    }

    /// Apply one decoded datagram to the node state.
    pub async fn on_message(&mut self, received: Received) {
        let Received { sender, message } = received;
        debug!("{sender} {}", message.name());
        match message {
            Message::Ping => self.transport.send(sender, &Message::Pong).await,
            Message::Pong => {}
            Message::GetTip => {
                if self.config.share_tip {
                    self.share_post(sender, self.store.tip()).await;
                }
            }
            Message::RequestPost(hash) => self.share_post(sender, hash).await,
            Message::SharePost(post) => self.ingest(sender, post),
        }
    }

    /// Reply with the named post, if it is known and not the synthetic
    /// genesis (every node already holds genesis; sharing it would just
    /// re-enter the mesh as a derived post).
    async fn share_post(&self, peer: Peer, hash: PostHash) {
        if hash.is_zero() {
            return;
        }
        if let Some(post) = self.store.get(&hash) {
            let reply = Message::SharePost(post.clone());
            self.transport.send(peer, &reply).await;
        }
    }

    /// Feed a gossiped post to the store and log what became of it. The
    /// sender is advisory: provenance only, never trusted for anything.
    fn ingest(&mut self, sender: Peer, post: Post) {
        match self.store.add_post(post) {
            Ok(AddOutcome::Linked(report)) => {
                debug!(%sender, hash = %report.hash, descendants = report.descendants, "post linked");
                if report.skipped > 0 {
                    warn!(%sender, skipped = report.skipped, "dropped orphans on invariant break");
                }
                if report.tip_moved {
                    info!(tip = %self.store.tip(), "tip advanced");
                }
            }
            Ok(AddOutcome::Duplicate(hash)) => trace!(%sender, %hash, "duplicate post"),
            Ok(AddOutcome::Parked { hash, missing }) => {
                debug!(%sender, %hash, %missing, "post parked awaiting parent");
            }
            Err(err) => warn!(%sender, %err, "post rejected"),
        }
    }

    /// Spend this tick's mining budget, sharing anything found.
    async fn mine_step(&mut self) {
        let Some(miner) = &mut self.miner else { return };

        // Rebase onto the tip if gossip moved it since the last tick.
        let tip = self.store.tip();
        if miner.candidate.prev != tip {
            miner.candidate.prev = tip;
        }

        let Some(found) = mine(miner.candidate.clone(), miner.target, MINE_ATTEMPTS_PER_TICK)
        else {
            miner.candidate.work = miner
                .candidate
                .work
                .overflowing_add(Word::from(MINE_ATTEMPTS_PER_TICK))
                .0;
            return;
        };

        miner.candidate.work = found.work.overflowing_add(Word::one()).0;
        let hash = found.hash();
        match self.store.add_post(found.clone()) {
            Ok(_) => info!(%hash, score = ?self.store.score_of(&hash), "mined post"),
            Err(err) => warn!(%hash, %err, "mined post rejected"),
        }
        self.transport
            .broadcast(&self.peers, &Message::SharePost(found))
            .await;
    }

    /// One event-loop iteration: drain, dispatch, mine, gossip.
    pub async fn tick(&mut self) {
        for received in self.transport.drain() {
            self.on_message(received).await;
        }
        self.mine_step().await;
        self.transport.broadcast(&self.peers, &Message::Ping).await;
    }

    /// Run the event loop until the process is killed.
    pub async fn run(mut self) {
        info!(port = self.local_port(), "node running");
        loop {
            self.tick().await;
            tokio::time::sleep(self.config.tick_interval).await;
        }
    }
}
