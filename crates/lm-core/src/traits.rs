//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.

use async_trait::async_trait;

use crate::models::{NewPost, Post, PostId};
use crate::token::{Fingerprint, IssuedToken};

/// Data persistence contract for posts.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Assigns id and creation time, persisting the fingerprint in the same write.
    async fn insert(&self, post: NewPost) -> anyhow::Result<Post>;

    /// All posts, newest first.
    async fn list_recent(&self) -> anyhow::Result<Vec<Post>>;

    async fn get(&self, id: PostId) -> anyhow::Result<Option<Post>>;

    async fn get_fingerprint(&self, id: PostId) -> anyhow::Result<Option<Fingerprint>>;

    /// Returns `false` when no row with that id existed.
    async fn delete_by_id(&self, id: PostId) -> anyhow::Result<bool>;
}

/// Issues delete secrets and derives their fingerprints.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait TokenService: Send + Sync {
    fn issue(&self) -> anyhow::Result<IssuedToken>;

    /// Pure: the same secret always yields the same fingerprint.
    fn fingerprint(&self, secret: &str) -> Fingerprint;
}
