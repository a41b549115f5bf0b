//! Keccak-256 hashing over word sequences.
//!
//! Every hash in the protocol is Keccak-256 of concatenated big-endian
//! 256-bit words. Nodes on different platforms must agree byte-for-byte,
//! so the encoding is fixed here and nowhere else.

use primitive_types::U256;
use sha3::{Digest, Keccak256};

use crate::constants::{BODY_WORDS, WORD_BYTES};
use crate::types::{Post, PostHash, Word};

/// Keccak-256 of the concatenated big-endian encoding of each word.
pub fn hash_words(words: &[Word]) -> PostHash {
    let mut hasher = Keccak256::new();
    let mut buf = [0u8; WORD_BYTES];
    for word in words {
        word.to_big_endian(&mut buf);
        hasher.update(buf);
    }
    let digest: [u8; WORD_BYTES] = hasher.finalize().into();
    PostHash(U256::from_big_endian(&digest))
}

/// A post's content address: the body words in index order, then the
/// work word, then the predecessor hash.
pub fn hash_of_post(post: &Post) -> PostHash {
    let mut words = Vec::with_capacity(BODY_WORDS + 2);
    words.extend_from_slice(post.body.words());
    words.push(post.work);
    words.push(post.prev.0);
    hash_words(&words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Body;

    /// Keccak-256 of the empty input, the standard test vector.
    const KECCAK_EMPTY: &str =
        "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470";

    #[test]
    fn empty_word_sequence_matches_keccak_vector() {
        let expected = hex::decode(KECCAK_EMPTY).unwrap();
        let h = hash_words(&[]);
        assert_eq!(h.to_bytes().to_vec(), expected);
    }

    #[test]
    fn hash_words_deterministic() {
        let words = [U256::from(1u64), U256::from(2u64), U256::from(3u64)];
        assert_eq!(hash_words(&words), hash_words(&words));
    }

    #[test]
    fn hash_words_sensitive_to_order() {
        let a = [U256::from(1u64), U256::from(2u64)];
        let b = [U256::from(2u64), U256::from(1u64)];
        assert_ne!(hash_words(&a), hash_words(&b));
    }

    #[test]
    fn hash_words_sensitive_to_length() {
        let a = [U256::zero()];
        let b = [U256::zero(), U256::zero()];
        assert_ne!(hash_words(&a), hash_words(&b));
    }

    #[test]
    fn post_hash_covers_all_fields() {
        let base = Post { body: Body::zero(), work: U256::zero(), prev: PostHash::zero() };

        let mut bumped_body = base.clone();
        bumped_body.body.0[BODY_WORDS - 1] = U256::one();
        let mut bumped_work = base.clone();
        bumped_work.work = U256::one();
        let mut bumped_prev = base.clone();
        bumped_prev.prev = PostHash(U256::one());

        let hashes = [base.hash(), bumped_body.hash(), bumped_work.hash(), bumped_prev.hash()];
        for (i, a) in hashes.iter().enumerate() {
            for b in &hashes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn post_hash_equals_explicit_word_sequence() {
        let post = Post {
            body: Body::from_text("weave"),
            work: U256::from(99u64),
            prev: PostHash(U256::from(7u64)),
        };
        let mut words = post.body.words().to_vec();
        words.push(post.work);
        words.push(post.prev.0);
        assert_eq!(post.hash(), hash_words(&words));
    }
}
