//! # BoardService
//!
//! Orchestrates the create, list and delete flows on top of the ports.

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::gate::{Decision, OwnershipGate};
use crate::models::{CreatePost, CreatedPost, NewPost, Post, PostId};
use crate::traits::{PostStore, TokenService};

pub struct BoardService {
    store: Arc<dyn PostStore>,
    tokens: Arc<dyn TokenService>,
    gate: OwnershipGate,
}

impl BoardService {
    pub fn new(store: Arc<dyn PostStore>, tokens: Arc<dyn TokenService>) -> Self {
        let gate = OwnershipGate::new(store.clone(), tokens.clone());
        Self { store, tokens, gate }
    }

    /// Validates input, issues a delete secret and persists the post.
    ///
    /// The returned secret is the only copy that will ever exist.
    pub async fn create_post(&self, input: CreatePost) -> Result<CreatedPost> {
        let title = input.title.trim();
        let date = input.date.trim();
        let area = input.area.trim();
        let handle = input.contact_handle.trim();

        if title.is_empty() || date.is_empty() || area.is_empty() || handle.is_empty() {
            return Err(AppError::RequiredFieldsMissing);
        }

        let comment = input
            .comment
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        let issued = self.tokens.issue().map_err(AppError::internal)?;

        let post = self
            .store
            .insert(NewPost {
                title: title.to_string(),
                date: date.to_string(),
                area: area.to_string(),
                comment,
                contact_handle: normalize_handle(handle),
                fingerprint: issued.fingerprint,
            })
            .await
            .map_err(AppError::internal)?;

        info!(post_id = %post.id, "post created");
        Ok(CreatedPost { post, delete_secret: issued.secret })
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        self.store.list_recent().await.map_err(AppError::internal)
    }

    pub async fn get_post(&self, id: PostId) -> Result<Post> {
        self.store
            .get(id)
            .await
            .map_err(AppError::internal)?
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    /// Deletes `raw_id` if `secret` proves ownership.
    pub async fn delete_post(&self, raw_id: &str, secret: &str) -> Result<()> {
        let id = match raw_id.parse::<PostId>() {
            Ok(id) => id,
            // A malformed id names no post; a blank secret still takes precedence.
            Err(_) if secret.trim().is_empty() => return Err(AppError::MissingCredential),
            Err(_) => return Err(AppError::NotFound(raw_id.to_string())),
        };

        let decision = self.gate.authorize(id, secret).await?;
        if decision != Decision::Authorized {
            return decision.into_result(id);
        }

        if self.store.delete_by_id(id).await.map_err(AppError::internal)? {
            info!(post_id = %id, "post deleted");
            Ok(())
        } else {
            // Someone else deleted it between the check and here; first one wins.
            warn!(post_id = %id, "post vanished before delete");
            Err(AppError::NotFound(id.to_string()))
        }
    }
}

/// Ensures the contact handle carries a single leading `@`.
pub fn normalize_handle(handle: &str) -> String {
    if handle.starts_with('@') {
        handle.to_string()
    } else {
        format!("@{handle}")
    }
}
