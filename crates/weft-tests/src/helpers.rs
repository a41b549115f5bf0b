//! Shared test helpers for the integration suites.

use primitive_types::U256;

use weft_core::genesis::genesis_hash;
use weft_core::score::local_score;
use weft_core::store::PostStore;
use weft_core::types::{Body, Post, PostHash, Word};

/// A post extending `prev` with the given work word and a zero body.
pub fn post(prev: PostHash, work: u64) -> Post {
    Post { body: Body::zero(), work: U256::from(work), prev }
}

/// A linear chain of `n` posts rooted at genesis, oldest first.
pub fn chain(n: u64) -> Vec<Post> {
    let mut posts = Vec::with_capacity(n as usize);
    let mut prev = genesis_hash();
    for work in 1..=n {
        let p = post(prev, work);
        prev = p.hash();
        posts.push(p);
    }
    posts
}

/// Find `n` distinct works (starting at `from`) whose posts under `prev`
/// score exactly one, i.e. hash into the top half of the range. Used to
/// construct score ties deterministically.
pub fn works_scoring_one(prev: PostHash, from: u64, n: usize) -> Vec<u64> {
    let mut found = Vec::new();
    let mut work = from;
    while found.len() < n {
        if local_score(post(prev, work).hash()) == U256::one() {
            found.push(work);
        }
        work += 1;
    }
    found
}

/// Snapshot of everything delivery order must not change: every linked
/// post's hash, score, and (sorted) children, plus the tip. Pending
/// buckets are intentionally absent — terminal states must have none.
pub fn snapshot(store: &PostStore) -> (Vec<(PostHash, Word, Vec<PostHash>)>, PostHash) {
    let mut rows: Vec<_> = store
        .post_hashes()
        .into_iter()
        .map(|h| {
            let mut kids = store.children_of(&h).to_vec();
            kids.sort();
            (h, store.score_of(&h).unwrap(), kids)
        })
        .collect();
    rows.sort();
    (rows, store.tip())
}

/// Fold a delivery order into a fresh store.
pub fn replay(posts: &[Post], order: &[usize]) -> PostStore {
    let mut store = PostStore::new();
    for &i in order {
        store.add_post(posts[i].clone()).unwrap();
    }
    store
}
