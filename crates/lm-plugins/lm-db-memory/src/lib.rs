//! # lm-db-memory
//!
//! Process-local `PostStore` backed by a concurrent map. Nothing survives a
//! restart; used by the test suites and the `db-memory` build.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use lm_core::models::{NewPost, Post, PostId};
use lm_core::token::Fingerprint;
use lm_core::traits::PostStore;

struct Row {
    /// Insertion sequence, breaks `created_at` ties
    seq: u64,
    post: Post,
    fingerprint: Fingerprint,
}

#[derive(Default)]
pub struct MemoryPostStore {
    rows: DashMap<PostId, Row>,
    next_seq: AtomicU64,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn insert(&self, post: NewPost) -> anyhow::Result<Post> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        let id = PostId::new_v7();
        let (post, fingerprint) = post.into_post(id, Utc::now());
        self.rows.insert(id, Row { seq, post: post.clone(), fingerprint });
        tracing::debug!(post_id = %id, "memory store insert");
        Ok(post)
    }

    async fn list_recent(&self) -> anyhow::Result<Vec<Post>> {
        let mut rows: Vec<(u64, Post)> = self
            .rows
            .iter()
            .map(|entry| (entry.seq, entry.post.clone()))
            .collect();
        rows.sort_by(|(a_seq, a), (b_seq, b)| {
            b.created_at.cmp(&a.created_at).then(b_seq.cmp(a_seq))
        });
        Ok(rows.into_iter().map(|(_, post)| post).collect())
    }

    async fn get(&self, id: PostId) -> anyhow::Result<Option<Post>> {
        Ok(self.rows.get(&id).map(|row| row.post.clone()))
    }

    async fn get_fingerprint(&self, id: PostId) -> anyhow::Result<Option<Fingerprint>> {
        Ok(self.rows.get(&id).map(|row| row.fingerprint.clone()))
    }

    /// `DashMap::remove` is atomic per key, so concurrent deletes of the same
    /// id see exactly one `true`.
    async fn delete_by_id(&self, id: PostId) -> anyhow::Result<bool> {
        Ok(self.rows.remove(&id).is_some())
    }
}
