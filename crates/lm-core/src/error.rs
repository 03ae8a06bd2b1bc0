//! # AppError
//!
//! Centralized error handling for LiveMate.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all lm-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Title, date, venue or contact handle was blank
    #[error("required fields missing")]
    RequiredFieldsMissing,

    /// No delete secret was presented
    #[error("delete token required")]
    MissingCredential,

    /// Resource not found
    #[error("post not found: {0}")]
    NotFound(String),

    /// Delete secret did not match the stored fingerprint
    #[error("invalid delete token")]
    InvalidCredential,

    /// Infrastructure failure (e.g., DB down, entropy source unavailable)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A specialized Result type for LiveMate logic.
pub type Result<T> = std::result::Result<T, AppError>;
