//! # Ownership Gate
//!
//! Decides whether the holder of a delete secret may remove a post.
//! The gate only renders a decision; the caller performs the delete.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{AppError, Result};
use crate::models::PostId;
use crate::traits::{PostStore, TokenService};

/// Outcome of an ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Authorized,
    MissingCredential,
    NotFound,
    InvalidCredential,
}

impl Decision {
    /// Converts a refusal into the matching caller-visible error.
    pub fn into_result(self, id: PostId) -> Result<()> {
        match self {
            Decision::Authorized => Ok(()),
            Decision::MissingCredential => Err(AppError::MissingCredential),
            Decision::NotFound => Err(AppError::NotFound(id.to_string())),
            Decision::InvalidCredential => Err(AppError::InvalidCredential),
        }
    }

    pub fn as_label(&self) -> &'static str {
        match self {
            Decision::Authorized => "authorized",
            Decision::MissingCredential => "missing_credential",
            Decision::NotFound => "not_found",
            Decision::InvalidCredential => "invalid_credential",
        }
    }
}

pub struct OwnershipGate {
    store: Arc<dyn PostStore>,
    tokens: Arc<dyn TokenService>,
}

impl OwnershipGate {
    pub fn new(store: Arc<dyn PostStore>, tokens: Arc<dyn TokenService>) -> Self {
        Self { store, tokens }
    }

    /// Checks `candidate` against the fingerprint stored for `id`.
    ///
    /// Absence of the post is reported before any comparison happens, so
    /// `NotFound` never depends on the secret. `Err` is reserved for store
    /// failures.
    pub async fn authorize(&self, id: PostId, candidate: &str) -> Result<Decision> {
        let candidate = candidate.trim();
        if candidate.is_empty() {
            debug!(post_id = %id, "delete refused: no credential presented");
            return Ok(Decision::MissingCredential);
        }

        let stored = match self.store.get_fingerprint(id).await.map_err(AppError::internal)? {
            Some(fp) => fp,
            None => {
                debug!(post_id = %id, "delete refused: no such post");
                return Ok(Decision::NotFound);
            }
        };

        let presented = self.tokens.fingerprint(candidate);
        if presented.matches(&stored) {
            info!(post_id = %id, "delete authorized");
            Ok(Decision::Authorized)
        } else {
            info!(post_id = %id, "delete refused: credential mismatch");
            debug!(post_id = %id, stored = stored.short(), "mismatched fingerprint prefix");
            Ok(Decision::InvalidCredential)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Fingerprint;
    use crate::traits::{MockPostStore, MockTokenService};
    use mockall::predicate::eq;

    fn reversing_tokens() -> MockTokenService {
        let mut tokens = MockTokenService::new();
        tokens
            .expect_fingerprint()
            .returning(|s| Fingerprint::from_hex(s.chars().rev().collect::<String>()));
        tokens
    }

    fn gate(store: MockPostStore, tokens: MockTokenService) -> OwnershipGate {
        OwnershipGate::new(Arc::new(store), Arc::new(tokens))
    }

    #[tokio::test]
    async fn blank_candidate_never_reaches_the_store() {
        let mut store = MockPostStore::new();
        store.expect_get_fingerprint().never();
        let gate = gate(store, reversing_tokens());

        let id = PostId::new_v7();
        assert_eq!(gate.authorize(id, "").await.unwrap(), Decision::MissingCredential);
        assert_eq!(gate.authorize(id, "   ").await.unwrap(), Decision::MissingCredential);
        assert_eq!(gate.authorize(id, "\t\n").await.unwrap(), Decision::MissingCredential);
    }

    #[tokio::test]
    async fn unknown_post_is_not_found_before_hashing() {
        let id = PostId::new_v7();
        let mut store = MockPostStore::new();
        store
            .expect_get_fingerprint()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(None));
        let mut tokens = MockTokenService::new();
        tokens.expect_fingerprint().never();

        let decision = gate(store, tokens).authorize(id, "anything").await.unwrap();
        assert_eq!(decision, Decision::NotFound);
    }

    #[tokio::test]
    async fn matching_and_mismatching_secrets() {
        let id = PostId::new_v7();
        let mut store = MockPostStore::new();
        store
            .expect_get_fingerprint()
            .returning(|_| Ok(Some(Fingerprint::from_hex("cba"))));
        let gate = gate(store, reversing_tokens());

        assert_eq!(gate.authorize(id, "abc").await.unwrap(), Decision::Authorized);
        assert_eq!(gate.authorize(id, "  abc  ").await.unwrap(), Decision::Authorized);
        assert_eq!(gate.authorize(id, "abcx").await.unwrap(), Decision::InvalidCredential);
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn mismatch_keeps_fingerprint_out_of_info_logs() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut store = MockPostStore::new();
        store
            .expect_get_fingerprint()
            .returning(|_| Ok(Some(Fingerprint::from_hex("feedface0123"))));
        let decision = gate(store, reversing_tokens())
            .authorize(PostId::new_v7(), "wrong")
            .await
            .unwrap();
        assert_eq!(decision, Decision::InvalidCredential);

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("credential mismatch"));
        assert!(!logs.contains("feedface"));
    }

    #[tokio::test]
    async fn store_failure_is_internal() {
        let mut store = MockPostStore::new();
        store
            .expect_get_fingerprint()
            .returning(|_| Err(anyhow::anyhow!("disk on fire")));
        let err = gate(store, reversing_tokens())
            .authorize(PostId::new_v7(), "abc")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(msg) if msg.contains("disk on fire")));
    }

    #[test]
    fn decisions_map_to_errors() {
        let id = PostId::new_v7();
        assert!(Decision::Authorized.into_result(id).is_ok());
        assert!(matches!(Decision::MissingCredential.into_result(id), Err(AppError::MissingCredential)));
        assert!(matches!(Decision::NotFound.into_result(id), Err(AppError::NotFound(_))));
        assert!(matches!(Decision::InvalidCredential.into_result(id), Err(AppError::InvalidCredential)));
    }
}
