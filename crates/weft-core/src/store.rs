//! The in-memory chain database.
//!
//! [`PostStore`] holds every known post, the reverse (parent → children)
//! edges, cumulative scores, the orphan buffer, and the current tip. The
//! sole mutator is [`PostStore::add_post`]; posts are immutable once
//! inserted and the store lives for the process lifetime.
//!
//! Posts may arrive in any order. A post whose predecessor is unknown is
//! parked in the pending buffer under the missing parent's hash; when
//! that parent later links, the bucket is consumed and drained through an
//! explicit work queue (not recursion, so a long orphan chain cannot
//! exhaust the call stack). Two nodes fed the same set of posts in any
//! order converge on the same posts, scores, and tip.

use std::collections::{HashMap, VecDeque};

use crate::error::StoreError;
use crate::genesis::{genesis_post, genesis_score};
use crate::score::local_score;
use crate::types::{Post, PostHash, Word};

/// What happened to a post handed to [`PostStore::add_post`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    /// The post linked into the chain, possibly pulling parked
    /// descendants in after it.
    Linked(LinkReport),
    /// Already present; the store is unchanged.
    Duplicate(PostHash),
    /// Predecessor unknown; the post is parked until it arrives.
    Parked {
        /// Hash of the parked post.
        hash: PostHash,
        /// The predecessor the post is waiting for.
        missing: PostHash,
    },
}

/// Details of a successful link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkReport {
    /// Hash of the directly added post.
    pub hash: PostHash,
    /// Parked posts linked transitively behind it.
    pub descendants: usize,
    /// Whether the tip moved during this ingest.
    pub tip_moved: bool,
    /// Parked posts dropped because linking them broke an invariant.
    pub skipped: usize,
}

/// The chain store: post table, child index, orphan buffer, score table,
/// and current tip. Created from genesis at node start.
#[derive(Clone, Debug)]
pub struct PostStore {
    /// Every known post, including genesis, keyed by content address.
    posts: HashMap<PostHash, Post>,
    /// Reverse edges: parent hash → hashes of its successors, most
    /// recently linked first.
    children: HashMap<PostHash, Vec<PostHash>>,
    /// Orphans keyed by the hash of the parent they are waiting for.
    pending: HashMap<PostHash, Vec<Post>>,
    /// Cumulative score from genesis, for every linked post.
    score: HashMap<PostHash, Word>,
    /// The post with the greatest cumulative score seen so far.
    tip: PostHash,
}

impl PostStore {
    /// Create a store holding only the genesis post.
    pub fn new() -> Self {
        let root = crate::genesis::genesis_hash();
        let mut posts = HashMap::new();
        posts.insert(root, genesis_post());
        let mut score = HashMap::new();
        score.insert(root, genesis_score());
        let mut children = HashMap::new();
        children.insert(root, Vec::new());
        Self { posts, children, pending: HashMap::new(), score, tip: root }
    }

    /// Ingest one post, parking it if its predecessor is unknown and
    /// draining any orphans that were waiting on it.
    ///
    /// Idempotent: a post already present leaves the store untouched.
    ///
    /// # Errors
    ///
    /// [`StoreError`] if linking the post itself would break an
    /// invariant (parent present but unscored, or cumulative-score
    /// overflow). The store is left unchanged in that case. Invariant
    /// breaks on *drained orphans* do not abort the drain; the orphan is
    /// dropped and counted in [`LinkReport::skipped`].
    pub fn add_post(&mut self, post: Post) -> Result<AddOutcome, StoreError> {
        let hash = post.hash();

        if self.posts.contains_key(&hash) {
            return Ok(AddOutcome::Duplicate(hash));
        }

        if !self.posts.contains_key(&post.prev) {
            let missing = post.prev;
            let bucket = self.pending.entry(missing).or_default();
            // A peer may deliver the same orphan repeatedly; park it once.
            if !bucket.iter().any(|parked| parked.hash() == hash) {
                bucket.push(post);
            }
            return Ok(AddOutcome::Parked { hash, missing });
        }

        let mut report = LinkReport {
            hash,
            descendants: 0,
            tip_moved: self.link(hash, post)?,
            skipped: 0,
        };

        // Drain orphans transitively. Each linked post may release a
        // bucket of its own waiters, so this is a queue, not a loop over
        // one bucket.
        let mut queue: VecDeque<Post> = self.pending.remove(&hash).unwrap_or_default().into();
        while let Some(orphan) = queue.pop_front() {
            let orphan_hash = orphan.hash();
            if self.posts.contains_key(&orphan_hash) {
                continue;
            }
            match self.link(orphan_hash, orphan) {
                Ok(moved) => {
                    report.descendants += 1;
                    report.tip_moved |= moved;
                    if let Some(waiters) = self.pending.remove(&orphan_hash) {
                        queue.extend(waiters);
                    }
                }
                Err(_) => report.skipped += 1,
            }
        }

        Ok(AddOutcome::Linked(report))
    }

    /// Link a post whose parent is already present. Returns whether the
    /// tip moved. Leaves the store unchanged on error.
    fn link(&mut self, hash: PostHash, post: Post) -> Result<bool, StoreError> {
        let prev = post.prev;
        let prev_score = self
            .score
            .get(&prev)
            .copied()
            .ok_or(StoreError::MissingParentScore(prev))?;
        let new_score = prev_score
            .checked_add(local_score(hash))
            .ok_or(StoreError::ScoreOverflow(hash))?;

        self.posts.insert(hash, post);
        self.score.insert(hash, new_score);
        self.children.entry(prev).or_default().insert(0, hash);
        self.children.entry(hash).or_default();

        // Strictly greater moves the tip; a tie keeps the incumbent, so
        // every node breaks ties the same way (first seen wins).
        if new_score > self.tip_score() {
            self.tip = hash;
            return Ok(true);
        }
        Ok(false)
    }

    /// The chain from genesis to the tip, inclusive, oldest first.
    pub fn canonical(&self) -> Vec<Post> {
        let mut chain = Vec::new();
        let mut cursor = self.tip;
        loop {
            let Some(post) = self.posts.get(&cursor) else {
                return Vec::new();
            };
            chain.push(post.clone());
            if cursor.is_zero() {
                break;
            }
            cursor = post.prev;
        }
        chain.reverse();
        chain
    }

    /// Look up a post by hash.
    pub fn get(&self, hash: &PostHash) -> Option<&Post> {
        self.posts.get(hash)
    }

    /// Whether the post with this hash is linked.
    pub fn contains(&self, hash: &PostHash) -> bool {
        self.posts.contains_key(hash)
    }

    /// The current tip hash.
    pub fn tip(&self) -> PostHash {
        self.tip
    }

    /// Cumulative score of the current tip.
    pub fn tip_score(&self) -> Word {
        // The tip is always a linked, scored post.
        self.score.get(&self.tip).copied().unwrap_or_default()
    }

    /// Cumulative score of a linked post.
    pub fn score_of(&self, hash: &PostHash) -> Option<Word> {
        self.score.get(hash).copied()
    }

    /// Hashes of a post's successors, most recently linked first.
    pub fn children_of(&self, hash: &PostHash) -> &[PostHash] {
        self.children.get(hash).map(Vec::as_slice).unwrap_or_default()
    }

    /// Orphans currently waiting for this parent.
    pub fn pending_for(&self, missing: &PostHash) -> &[Post] {
        self.pending.get(missing).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether no orphans are parked.
    pub fn pending_is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Total parked orphans across all buckets.
    pub fn pending_count(&self) -> usize {
        self.pending.values().map(Vec::len).sum()
    }

    /// Number of linked posts, genesis included.
    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    /// Hashes of every linked post, in no particular order.
    pub fn post_hashes(&self) -> Vec<PostHash> {
        self.posts.keys().copied().collect()
    }
}

impl Default for PostStore {
    fn default() -> Self {
        Self::new()
    }
}
