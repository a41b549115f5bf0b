//! Wire message types and the hex codec.
//!
//! A datagram payload is the hex encoding of a tag byte followed by the
//! variant's fixed-width fields, every word big-endian. The layout is
//! whole bytes, so encoded hex always has even length; the decoder still
//! tolerates an odd-length input by appending a trailing `0` nibble, the
//! convention for encoders that emit nibble streams. Tags must be stable
//! across every node on a network.

use weft_core::constants::{BODY_BYTES, MAX_DATAGRAM_HEX, POST_WIRE_BYTES, WORD_BYTES};
use weft_core::error::DecodeError;
use weft_core::types::{Body, Post, PostHash, Word};

use crate::peer::Peer;

/// Wire tag for [`Message::Ping`].
pub const TAG_PING: u8 = 0;
/// Wire tag for [`Message::Pong`].
pub const TAG_PONG: u8 = 1;
/// Wire tag for [`Message::GetTip`].
pub const TAG_GET_TIP: u8 = 2;
/// Wire tag for [`Message::RequestPost`].
pub const TAG_REQUEST_POST: u8 = 3;
/// Wire tag for [`Message::SharePost`].
pub const TAG_SHARE_POST: u8 = 4;

/// A gossip message exchanged between peers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message {
    /// Liveness probe; answered with `Pong`.
    Ping,
    /// Liveness answer; carries nothing.
    Pong,
    /// Ask a peer for its current tip.
    GetTip,
    /// Ask a peer for the post with this hash.
    RequestPost(PostHash),
    /// Hand a peer a post.
    SharePost(Post),
}

impl Message {
    /// Short name for provenance logging.
    pub fn name(&self) -> &'static str {
        match self {
            Message::Ping => "ping",
            Message::Pong => "pong",
            Message::GetTip => "get-tip",
            Message::RequestPost(_) => "request-post",
            Message::SharePost(_) => "share-post",
        }
    }

    /// The variant's wire tag.
    pub fn tag(&self) -> u8 {
        match self {
            Message::Ping => TAG_PING,
            Message::Pong => TAG_PONG,
            Message::GetTip => TAG_GET_TIP,
            Message::RequestPost(_) => TAG_REQUEST_POST,
            Message::SharePost(_) => TAG_SHARE_POST,
        }
    }

    /// Encode to the hex datagram payload.
    pub fn encode(&self) -> String {
        let mut bytes = Vec::with_capacity(1 + POST_WIRE_BYTES);
        bytes.push(self.tag());
        match self {
            Message::Ping | Message::Pong | Message::GetTip => {}
            Message::RequestPost(hash) => bytes.extend_from_slice(&hash.to_bytes()),
            Message::SharePost(post) => {
                bytes.extend_from_slice(&post.body.to_bytes());
                let mut word = [0u8; WORD_BYTES];
                post.work.to_big_endian(&mut word);
                bytes.extend_from_slice(&word);
                bytes.extend_from_slice(&post.prev.to_bytes());
            }
        }
        hex::encode(bytes)
    }

    /// Decode a hex datagram payload.
    ///
    /// # Errors
    ///
    /// [`DecodeError`] on malformed hex, an unknown tag, or a payload
    /// whose length does not match the tagged variant. Callers drop the
    /// datagram on any of these.
    pub fn decode(text: &str) -> Result<Self, DecodeError> {
        if text.len() > MAX_DATAGRAM_HEX {
            return Err(DecodeError::Oversized(text.len()));
        }

        // Nibble-stream encoders pad to whole bytes with a trailing zero.
        let padded;
        let text = if text.len() % 2 == 1 {
            padded = format!("{text}0");
            &padded
        } else {
            text
        };
        let bytes = hex::decode(text).map_err(|_| DecodeError::BadHex)?;

        let (&tag, payload) = bytes.split_first().ok_or(DecodeError::Empty)?;
        match tag {
            TAG_PING => expect_len(payload, 0).map(|_| Message::Ping),
            TAG_PONG => expect_len(payload, 0).map(|_| Message::Pong),
            TAG_GET_TIP => expect_len(payload, 0).map(|_| Message::GetTip),
            TAG_REQUEST_POST => {
                expect_len(payload, WORD_BYTES)?;
                let mut hash = [0u8; WORD_BYTES];
                hash.copy_from_slice(payload);
                Ok(Message::RequestPost(PostHash::from_bytes(&hash)))
            }
            TAG_SHARE_POST => {
                expect_len(payload, POST_WIRE_BYTES)?;
                let mut body = [0u8; BODY_BYTES];
                body.copy_from_slice(&payload[..BODY_BYTES]);
                let work = Word::from_big_endian(&payload[BODY_BYTES..BODY_BYTES + WORD_BYTES]);
                let mut prev = [0u8; WORD_BYTES];
                prev.copy_from_slice(&payload[BODY_BYTES + WORD_BYTES..]);
                Ok(Message::SharePost(Post {
                    body: Body::from_bytes(&body),
                    work,
                    prev: PostHash::from_bytes(&prev),
                }))
            }
            unknown => Err(DecodeError::UnknownTag(unknown)),
        }
    }
}

fn expect_len(payload: &[u8], expected: usize) -> Result<(), DecodeError> {
    if payload.len() == expected {
        Ok(())
    } else {
        Err(DecodeError::WrongLength { expected, got: payload.len() })
    }
}

/// A decoded datagram attributed to its sender — the dispatcher's input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Received {
    /// Where the datagram came from (advisory; used for replies and
    /// provenance logging).
    pub sender: Peer,
    /// The decoded message.
    pub message: Message,
}
