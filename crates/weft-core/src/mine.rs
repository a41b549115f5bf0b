//! The mining routine.
//!
//! A plain CPU loop that walks the work word until the candidate's local
//! score reaches the target. It runs outside the store — the store prices
//! whatever work arrives — and callers bound it with an attempt budget so
//! it can be interleaved with the node's gossip cadence.

use primitive_types::U256;

use crate::score::local_score;
use crate::types::{Post, Word};

/// Search for a work word that puts the candidate's local score at or
/// above `target`, starting from the candidate's current work and trying
/// at most `attempts` values (wrapping at the word boundary).
///
/// Returns the qualifying post, or `None` when the budget runs out. The
/// caller resumes by advancing the work word past the exhausted range.
pub fn mine(mut candidate: Post, target: Word, attempts: u64) -> Option<Post> {
    for _ in 0..attempts {
        if local_score(candidate.hash()) >= target {
            return Some(candidate);
        }
        candidate.work = candidate.work.overflowing_add(U256::one()).0;
    }
    None
}
