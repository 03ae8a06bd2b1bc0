//! # Domain Models
//!
//! These structs represent the core entities of LiveMate.
//! We use UUID v7 for time-ordered, globally unique identification.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::token::{DeleteSecret, Fingerprint};

/// Store-assigned identifier of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub Uuid);

impl PostId {
    pub fn new_v7() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PostId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// A companion-wanted listing as seen by readers.
///
/// Carries no fingerprint. Every read path returns this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    /// Name of the concert or event
    pub title: String,
    /// Event date as entered by the author (e.g. "2026-11-03")
    pub date: String,
    /// Venue
    pub area: String,
    pub comment: Option<String>,
    /// How to reach the author, always prefixed with `@`
    pub contact_handle: String,
    /// Sole ordering key for the listing (newest first)
    pub created_at: DateTime<Utc>,
}

/// A validated post ready for insertion. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub date: String,
    pub area: String,
    pub comment: Option<String>,
    pub contact_handle: String,
    pub fingerprint: Fingerprint,
}

impl NewPost {
    /// Builds the public record once the store has assigned identity.
    pub fn into_post(self, id: PostId, created_at: DateTime<Utc>) -> (Post, Fingerprint) {
        let post = Post {
            id,
            title: self.title,
            date: self.date,
            area: self.area,
            comment: self.comment,
            contact_handle: self.contact_handle,
            created_at,
        };
        (post, self.fingerprint)
    }
}

/// Raw author input, before trimming and validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default, alias = "xUsername", alias = "contact_handle")]
    pub contact_handle: String,
}

/// Result of a successful creation: the public record plus the one-time secret.
#[derive(Debug)]
pub struct CreatedPost {
    pub post: Post,
    pub delete_secret: DeleteSecret,
}
