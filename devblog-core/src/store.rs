use chrono::{DateTime, Utc};

use crate::models::{Post, PostId};

/// In-memory post list for the current page session.
///
/// Filled once by the loader, then only ever grows at the front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostStore {
    posts: Vec<Post>,
    // Number of posts at the front that were added in this session.
    local: usize,
}

impl PostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_posts(posts: Vec<Post>) -> Self {
        Self { posts, local: 0 }
    }

    /// Replaces the loaded dataset. Posts added in this session stay in front.
    pub fn populate(&mut self, posts: Vec<Post>) {
        log::debug!(
            "Store populated with {} posts ({} local)",
            posts.len(),
            self.local
        );
        self.posts.truncate(self.local);
        self.posts.extend(posts);
    }

    pub fn prepend(&mut self, post: Post) {
        self.posts.insert(0, post);
        self.local += 1;
    }

    pub fn find(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == Some(id))
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn max_id(&self) -> Option<PostId> {
        self.posts.iter().filter_map(|p| p.id).max()
    }
}

/// Hands out post ids based on the wall clock, strictly increasing even when
/// two submissions land in the same millisecond.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: Option<i64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts above every id already present in the store.
    pub fn seeded_from(store: &PostStore) -> Self {
        Self {
            last: store.max_id().map(PostId::get),
        }
    }

    /// Moves past every id in `store` without going backwards.
    pub fn observe(&mut self, store: &PostStore) {
        if let Some(max) = store.max_id().map(PostId::get) {
            self.last = Some(self.last.map_or(max, |last| last.max(max)));
        }
    }

    pub fn next_id(&mut self, now: DateTime<Utc>) -> PostId {
        let millis = now.timestamp_millis();
        let next = match self.last {
            Some(last) if last >= millis => last.saturating_add(1),
            _ => millis,
        };
        self.last = Some(next);
        PostId::new(next)
    }
}
