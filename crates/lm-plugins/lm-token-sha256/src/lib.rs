//! # lm-token-sha256
//!
//! SHA-256 implementation of `TokenService`.
//! Secrets come straight from the OS entropy source and are rendered as hex
//! so they can be copied by hand.

use lm_core::token::{DeleteSecret, Fingerprint, IssuedToken, SECRET_BYTES};
use lm_core::traits::TokenService;
use sha2::{Digest, Sha256};

#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256TokenService;

impl Sha256TokenService {
    pub fn new() -> Self {
        Self
    }
}

impl TokenService for Sha256TokenService {
    /// Generates a 32-character hex secret (16 random bytes).
    fn issue(&self) -> anyhow::Result<IssuedToken> {
        let mut raw = [0u8; SECRET_BYTES];
        getrandom::getrandom(&mut raw)
            .map_err(|e| anyhow::anyhow!("entropy source unavailable: {e}"))?;

        let secret = hex::encode(raw);
        let fingerprint = self.fingerprint(&secret);
        Ok(IssuedToken { secret: DeleteSecret::new(secret), fingerprint })
    }

    /// Hex SHA-256 over the exact UTF-8 bytes of `secret`.
    fn fingerprint(&self, secret: &str) -> Fingerprint {
        let mut hasher = Sha256::new();
        hasher.update(secret.as_bytes());
        Fingerprint::from_hex(hex::encode(hasher.finalize()))
    }
}
