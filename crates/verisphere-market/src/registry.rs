//! Post registry: identifier assignment and post kinds
//!
//! Claim and link text lives outside this system; the registry records
//! only what the engines need - that a post exists, what kind it is, and
//! who authored it.

use std::collections::HashMap;
use verisphere_domain::traits::PostDirectory;
use verisphere_domain::{AccountId, Link, PostId, PostKind};

#[derive(Debug, Clone)]
struct PostRecord {
    kind: PostKind,
    author: AccountId,
}

/// In-memory post registry with monotonic identifier assignment
#[derive(Debug, Clone, Default)]
pub struct PostRegistry {
    posts: HashMap<PostId, PostRecord>,
    next_id: u64,
}

impl PostRegistry {
    /// Reserve the next monotonic identifier
    ///
    /// The id is consumed whether or not the post is later recorded; a
    /// rejected link leaves a gap, never a reused id.
    pub(crate) fn allocate(&mut self) -> PostId {
        let id = PostId::from_value(self.next_id);
        self.next_id += 1;
        id
    }

    /// Record a claim under a previously allocated id
    pub(crate) fn record_claim(&mut self, id: PostId, author: AccountId) {
        self.posts.insert(
            id,
            PostRecord {
                kind: PostKind::Claim,
                author,
            },
        );
    }

    /// Record a link under a previously allocated id
    pub(crate) fn record_link(&mut self, id: PostId, author: AccountId, link: Link) {
        self.posts.insert(
            id,
            PostRecord {
                kind: PostKind::Link(link),
                author,
            },
        );
    }

    /// The author of a post
    pub fn author(&self, post: PostId) -> Option<AccountId> {
        self.posts.get(&post).map(|record| record.author)
    }

    /// Every registered post id, in arbitrary order
    pub fn posts(&self) -> impl Iterator<Item = PostId> + '_ {
        self.posts.keys().copied()
    }

    /// Number of registered posts
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Whether no posts are registered
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

impl PostDirectory for PostRegistry {
    fn kind(&self, post: PostId) -> Option<PostKind> {
        self.posts.get(&post).map(|record| record.kind)
    }
}
