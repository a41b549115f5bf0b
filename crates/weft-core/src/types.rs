//! Core protocol types: words, post bodies, post hashes, posts.
//!
//! Everything on the wire is built from 256-bit words encoded big-endian.
//! A post is 1088 bytes: a 1024-byte opaque body, a mined work word, and
//! the hash of its predecessor.

use std::fmt;

use primitive_types::U256;

use crate::constants::{BODY_BYTES, BODY_WORDS, WORD_BYTES};

/// A 256-bit protocol word.
pub type Word = U256;

/// A 256-bit Keccak digest identifying a post.
///
/// The hash doubles as the post's content address and as the input to the
/// local-score estimator, which interprets it as an unsigned integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PostHash(pub U256);

impl PostHash {
    /// The zero hash: the synthetic address of the genesis post.
    pub fn zero() -> Self {
        Self(U256::zero())
    }

    /// Check if this is the zero (genesis) hash.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Big-endian 32-byte form, as hashed and sent on the wire.
    pub fn to_bytes(self) -> [u8; WORD_BYTES] {
        let mut bytes = [0u8; WORD_BYTES];
        self.0.to_big_endian(&mut bytes);
        bytes
    }

    /// Rebuild a hash from its big-endian 32-byte form.
    pub fn from_bytes(bytes: &[u8; WORD_BYTES]) -> Self {
        Self(U256::from_big_endian(bytes))
    }
}

impl fmt::Display for PostHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.to_bytes() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl From<U256> for PostHash {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

/// The fixed-size opaque payload of a post: 32 words, 1024 bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Body(pub [Word; BODY_WORDS]);

impl Body {
    /// The all-zero body (genesis, and the default mining payload).
    pub fn zero() -> Self {
        Self([Word::zero(); BODY_WORDS])
    }

    /// The body's words in index order.
    pub fn words(&self) -> &[Word; BODY_WORDS] {
        &self.0
    }

    /// Big-endian byte form: each word as 32 bytes, concatenated.
    pub fn to_bytes(&self) -> [u8; BODY_BYTES] {
        let mut bytes = [0u8; BODY_BYTES];
        for (i, word) in self.0.iter().enumerate() {
            word.to_big_endian(&mut bytes[i * WORD_BYTES..(i + 1) * WORD_BYTES]);
        }
        bytes
    }

    /// Rebuild a body from its 1024-byte big-endian form.
    pub fn from_bytes(bytes: &[u8; BODY_BYTES]) -> Self {
        let mut words = [Word::zero(); BODY_WORDS];
        for (i, word) in words.iter_mut().enumerate() {
            *word = U256::from_big_endian(&bytes[i * WORD_BYTES..(i + 1) * WORD_BYTES]);
        }
        Self(words)
    }

    /// Pack UTF-8 text into a body, truncating at the body size and
    /// zero-padding the rest. The payload stays opaque to the protocol.
    pub fn from_text(text: &str) -> Self {
        let mut bytes = [0u8; BODY_BYTES];
        let raw = text.as_bytes();
        let len = raw.len().min(BODY_BYTES);
        bytes[..len].copy_from_slice(&raw[..len]);
        Self::from_bytes(&bytes)
    }
}

/// The unit of gossip and chain linkage.
///
/// Immutable once inserted into a store. `work` is whatever nonce word the
/// miner settled on; the store accepts any value and prices it through the
/// post's hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Post {
    /// Opaque 1024-byte payload.
    pub body: Body,
    /// Mined nonce word.
    pub work: Word,
    /// Hash of the predecessor post; zero links to genesis.
    pub prev: PostHash,
}

impl Post {
    /// Compute the post's content address (Keccak-256 over its words).
    pub fn hash(&self) -> PostHash {
        crate::hash::hash_of_post(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- PostHash ---

    #[test]
    fn zero_hash_is_zero() {
        let h = PostHash::zero();
        assert!(h.is_zero());
        assert_eq!(h, PostHash::default());
    }

    #[test]
    fn nonzero_hash_is_not_zero() {
        assert!(!PostHash(U256::one()).is_zero());
    }

    #[test]
    fn hash_display_is_64_hex_chars() {
        let h = PostHash(U256::from(0xabcdu64));
        let s = format!("{h}");
        assert_eq!(s.len(), 64);
        assert!(s.ends_with("abcd"));
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn hash_byte_round_trip() {
        let h = PostHash(U256::from(123_456_789u64));
        assert_eq!(PostHash::from_bytes(&h.to_bytes()), h);
    }

    #[test]
    fn hash_bytes_are_big_endian() {
        let h = PostHash(U256::one());
        let bytes = h.to_bytes();
        assert_eq!(bytes[31], 1);
        assert!(bytes[..31].iter().all(|&b| b == 0));
    }

    #[test]
    fn hash_orders_as_integer() {
        assert!(PostHash(U256::one()) < PostHash(U256::from(2u64)));
    }

    // --- Body ---

    #[test]
    fn zero_body_is_default() {
        assert_eq!(Body::zero(), Body::default());
        assert!(Body::zero().to_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn body_byte_round_trip() {
        let mut bytes = [0u8; BODY_BYTES];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = (i % 251) as u8;
        }
        let body = Body::from_bytes(&bytes);
        assert_eq!(body.to_bytes(), bytes);
    }

    #[test]
    fn body_from_text_prefixes_payload() {
        let body = Body::from_text("hello weft");
        let bytes = body.to_bytes();
        assert_eq!(&bytes[..10], b"hello weft");
        assert!(bytes[10..].iter().all(|&b| b == 0));
    }

    #[test]
    fn body_from_text_truncates_long_input() {
        let long = "x".repeat(BODY_BYTES + 100);
        let body = Body::from_text(&long);
        assert_eq!(body.to_bytes(), [b'x'; BODY_BYTES]);
    }

    #[test]
    fn body_word_layout_matches_byte_layout() {
        let mut bytes = [0u8; BODY_BYTES];
        bytes[31] = 7; // lowest byte of word 0
        let body = Body::from_bytes(&bytes);
        assert_eq!(body.words()[0], U256::from(7u64));
        assert!(body.words()[1..].iter().all(|w| w.is_zero()));
    }

    // --- Post ---

    #[test]
    fn post_hash_deterministic() {
        let post = Post { body: Body::zero(), work: U256::from(42u64), prev: PostHash::zero() };
        assert_eq!(post.hash(), post.hash());
    }

    #[test]
    fn post_hash_changes_with_work() {
        let a = Post { body: Body::zero(), work: U256::zero(), prev: PostHash::zero() };
        let mut b = a.clone();
        b.work = U256::one();
        assert_ne!(a.hash(), b.hash());
    }

    #[test]
    fn post_hash_changes_with_prev() {
        let a = Post { body: Body::zero(), work: U256::zero(), prev: PostHash::zero() };
        let mut b = a.clone();
        b.prev = PostHash(U256::one());
        assert_ne!(a.hash(), b.hash());
    }
}
