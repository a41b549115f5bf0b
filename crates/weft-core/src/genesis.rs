//! The genesis post.
//!
//! Every store starts from the same synthetic post: zero body, zero work,
//! zero predecessor. Its address is *defined* as the zero hash rather
//! than derived, and its cumulative score is zero, so all chains share a
//! common root without anyone having mined it.

use primitive_types::U256;

use crate::types::{Body, Post, PostHash, Word};

/// The synthetic root post shared by every node.
pub fn genesis_post() -> Post {
    Post {
        body: Body::zero(),
        work: Word::zero(),
        prev: PostHash::zero(),
    }
}

/// The fixed address of the genesis post.
pub fn genesis_hash() -> PostHash {
    PostHash::zero()
}

/// The cumulative score assigned to genesis.
pub fn genesis_score() -> Word {
    U256::zero()
}

/// Whether a hash addresses the genesis post.
pub fn is_genesis(hash: PostHash) -> bool {
    hash.is_zero()
}
