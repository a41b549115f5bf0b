//! Work pricing: the local-score estimator.
//!
//! A post's local score is `floor(2^256 / hash)` — the expected number of
//! hash attempts needed to land at or below that hash, so a smaller hash
//! is worth more. Cumulative score (summed from genesis) drives tip
//! selection; the chain with the greatest accumulated score wins.

use primitive_types::U256;

use crate::types::{PostHash, Word};

/// Expected attempts to produce `hash`: `floor(2^256 / hash)`.
///
/// `2^256` itself does not fit a word, so the quotient is computed from
/// `U256::MAX = 2^256 - 1` with a remainder correction, which is exact
/// for every divisor. Values that would reach `2^256` saturate at the
/// maximum representable score; the zero hash (genesis only) is defined
/// as that maximum.
pub fn local_score(hash: PostHash) -> Word {
    if hash.0.is_zero() {
        return U256::max_value();
    }
    // floor((MAX + 1) / h) = floor(MAX / h), plus one when h divides 2^256.
    let q = U256::max_value() / hash.0;
    let r = U256::max_value() % hash.0;
    if r == hash.0 - U256::one() {
        q.checked_add(U256::one()).unwrap_or_else(U256::max_value)
    } else {
        q
    }
}
