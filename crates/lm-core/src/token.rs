//! # Delete credentials
//!
//! A post is owned by whoever holds its delete secret. Only the
//! fingerprint is ever persisted.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

/// Random bytes behind every issued secret (rendered as 32 hex characters).
pub const SECRET_BYTES: usize = 16;

/// The plaintext delete secret. Redacted in `Debug`, never serialized.
pub struct DeleteSecret(SecretString);

impl DeleteSecret {
    pub fn new(secret: String) -> Self {
        Self(SecretString::from(secret))
    }

    /// Reveals the plaintext. Only the creation response should call this.
    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for DeleteSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DeleteSecret([REDACTED])")
    }
}

/// One-way digest of a delete secret, stored as lowercase hex.
#[derive(Clone, PartialEq, Eq)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constant-time equality over the fingerprint bytes.
    pub fn matches(&self, other: &Fingerprint) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }

    /// First characters only, for log correlation.
    pub fn short(&self) -> &str {
        let end = self.0.char_indices().nth(8).map_or(self.0.len(), |(i, _)| i);
        &self.0[..end]
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({}…)", self.short())
    }
}

/// A freshly issued credential pair.
#[derive(Debug)]
pub struct IssuedToken {
    pub secret: DeleteSecret,
    pub fingerprint: Fingerprint,
}
