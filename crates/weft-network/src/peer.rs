//! Peer identity: an IPv4 endpoint.
//!
//! Peers carry no state beyond their address. The gossip wire carries
//! addresses out-of-band (the kernel reports the datagram source), but
//! the serializer framework defines a 6-byte form — four IPv4 octets
//! followed by the port in network byte order — for messages that embed
//! peers.

use std::fmt;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::str::FromStr;

use weft_core::error::AddressError;

/// Binary size of a peer on the wire: 4 octets + 16-bit port.
pub const PEER_WIRE_BYTES: usize = 6;

/// An IPv4 gossip peer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Peer {
    addr: SocketAddrV4,
}

impl Peer {
    /// Create a peer from IPv4 address parts.
    pub fn new(ip: Ipv4Addr, port: u16) -> Self {
        Self { addr: SocketAddrV4::new(ip, port) }
    }

    /// A localhost peer on the given port.
    pub fn local(port: u16) -> Self {
        Self::new(Ipv4Addr::LOCALHOST, port)
    }

    /// The endpoint as a socket address, for sending.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(self.addr)
    }

    /// The peer's port.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// The 6-byte wire form: octets, then the port big-endian.
    pub fn to_wire(&self) -> [u8; PEER_WIRE_BYTES] {
        let mut bytes = [0u8; PEER_WIRE_BYTES];
        bytes[..4].copy_from_slice(&self.addr.ip().octets());
        bytes[4..].copy_from_slice(&self.addr.port().to_be_bytes());
        bytes
    }

    /// Rebuild a peer from its 6-byte wire form.
    pub fn from_wire(bytes: &[u8; PEER_WIRE_BYTES]) -> Self {
        let ip = Ipv4Addr::new(bytes[0], bytes[1], bytes[2], bytes[3]);
        let port = u16::from_be_bytes([bytes[4], bytes[5]]);
        Self::new(ip, port)
    }
}

impl TryFrom<SocketAddr> for Peer {
    type Error = AddressError;

    /// Accept IPv4 senders only; the protocol has no IPv6 wire form.
    fn try_from(addr: SocketAddr) -> Result<Self, Self::Error> {
        match addr {
            SocketAddr::V4(v4) => Ok(Self { addr: v4 }),
            SocketAddr::V6(v6) => Err(AddressError::NotIpv4(v6.to_string())),
        }
    }
}

impl FromStr for Peer {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let addr = SocketAddrV4::from_str(s)
            .map_err(|_| AddressError::Malformed(s.to_string()))?;
        Ok(Self { addr })
    }
}

impl fmt::Display for Peer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.addr)
    }
}
