//! UDP transport: bind, send, broadcast, and the non-blocking inbox drain.
//!
//! UDP is lossy by design and the gossip protocol assumes redelivery, so
//! send failures are logged and swallowed. Inbound datagrams that fail
//! address parsing or decoding are dropped with a trace log; nothing is
//! retried.

use std::io;

use tokio::net::UdpSocket;
use tracing::{trace, warn};

use weft_core::constants::RECV_BUFFER_BYTES;

use crate::message::{Message, Received};
use crate::peer::Peer;

/// A UDP socket speaking the weft wire protocol.
pub struct UdpTransport {
    socket: UdpSocket,
}

impl UdpTransport {
    /// Bind to `0.0.0.0:port`. Port 0 asks the kernel for an ephemeral
    /// port (used by tests); read it back with [`local_port`](Self::local_port).
    pub async fn bind(port: u16) -> io::Result<Self> {
        let socket = UdpSocket::bind(("0.0.0.0", port)).await?;
        Ok(Self { socket })
    }

    /// The port this transport is bound to.
    pub fn local_port(&self) -> io::Result<u16> {
        Ok(self.socket.local_addr()?.port())
    }

    /// Encode and send one message. Failures are logged and dropped.
    pub async fn send(&self, peer: Peer, message: &Message) {
        let wire = message.encode();
        match self.socket.send_to(wire.as_bytes(), peer.socket_addr()).await {
            Ok(_) => trace!(%peer, kind = message.name(), "sent"),
            Err(err) => warn!(%peer, kind = message.name(), %err, "send failed"),
        }
    }

    /// Send one message to every peer.
    pub async fn broadcast(&self, peers: &[Peer], message: &Message) {
        for peer in peers {
            self.send(*peer, message).await;
        }
    }

    /// Empty the kernel receive buffer without blocking.
    ///
    /// Returns the decodable datagrams in arrival order. Datagrams from
    /// non-IPv4 senders, non-UTF-8 payloads, and undecodable payloads
    /// are dropped here so the dispatcher only ever sees well-formed
    /// input.
    pub fn drain(&self) -> Vec<Received> {
        let mut inbox = Vec::new();
        let mut buf = [0u8; RECV_BUFFER_BYTES];
        loop {
            match self.socket.try_recv_from(&mut buf) {
                Ok((len, source)) => {
                    let sender = match Peer::try_from(source) {
                        Ok(sender) => sender,
                        Err(err) => {
                            trace!(%source, %err, "dropping datagram");
                            continue;
                        }
                    };
                    let Ok(text) = std::str::from_utf8(&buf[..len]) else {
                        trace!(%sender, "dropping non-UTF-8 datagram");
                        continue;
                    };
                    match Message::decode(text) {
                        Ok(message) => inbox.push(Received { sender, message }),
                        Err(err) => trace!(%sender, %err, "dropping datagram"),
                    }
                }
                Err(err) if err.kind() == io::ErrorKind::WouldBlock => break,
                Err(err) => {
                    warn!(%err, "recv failed");
                    break;
                }
            }
        }
        inbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    async fn pair() -> (UdpTransport, UdpTransport, Peer, Peer) {
        let a = UdpTransport::bind(0).await.unwrap();
        let b = UdpTransport::bind(0).await.unwrap();
        let to_a = Peer::local(a.local_port().unwrap());
        let to_b = Peer::local(b.local_port().unwrap());
        (a, b, to_a, to_b)
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn drain_on_idle_socket_is_empty() {
        let transport = UdpTransport::bind(0).await.unwrap();
        assert!(transport.drain().is_empty());
    }

    #[tokio::test]
    async fn send_and_drain_round_trip() {
        let (a, b, to_a, _) = pair().await;
        b.send(to_a, &Message::Ping).await;
        settle().await;

        let inbox = a.drain();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].message, Message::Ping);
        assert_eq!(inbox[0].sender.port(), b.local_port().unwrap());
    }

    #[tokio::test]
    async fn drain_preserves_arrival_order() {
        let (a, b, to_a, _) = pair().await;
        b.send(to_a, &Message::Ping).await;
        b.send(to_a, &Message::Pong).await;
        b.send(to_a, &Message::GetTip).await;
        settle().await;

        let kinds: Vec<_> = a.drain().into_iter().map(|r| r.message).collect();
        assert_eq!(kinds, vec![Message::Ping, Message::Pong, Message::GetTip]);
    }

    #[tokio::test]
    async fn undecodable_datagrams_are_dropped() {
        let (a, b, to_a, _) = pair().await;
        let raw = UdpSocket::bind("0.0.0.0:0").await.unwrap();
        raw.send_to(b"not hex at all", to_a.socket_addr()).await.unwrap();
        raw.send_to(&[0xff, 0xfe], to_a.socket_addr()).await.unwrap();
        b.send(to_a, &Message::Pong).await;
        settle().await;

        let inbox = a.drain();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].message, Message::Pong);
    }

    #[tokio::test]
    async fn broadcast_reaches_every_peer() {
        let (a, b, to_a, to_b) = pair().await;
        let c = UdpTransport::bind(0).await.unwrap();
        c.broadcast(&[to_a, to_b], &Message::GetTip).await;
        settle().await;

        assert_eq!(a.drain().len(), 1);
        assert_eq!(b.drain().len(), 1);
    }

    #[tokio::test]
    async fn send_to_unreachable_peer_does_not_error() {
        // Port 9 is almost certainly closed; the send must be swallowed.
        let transport = UdpTransport::bind(0).await.unwrap();
        transport.send(Peer::local(9), &Message::Ping).await;
    }
}
