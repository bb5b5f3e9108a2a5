//! Error types for dupindex-core
//!
//! Provides unified error handling across the crate.
//!
//! The index performs no I/O, so the only runtime error class is a
//! configuration mismatch between an index instance and a call argument.
//! Lookups that find nothing return empty sequences, never errors.

use thiserror::Error;

/// Main error type for dupindex-core operations
#[derive(Debug, Error)]
pub enum DupIndexError {
    /// Hash width of a block or query does not match the width the index
    /// was constructed with
    #[error("hash width mismatch: index configured for {expected} bytes, got {actual} bytes")]
    HashWidthMismatch { expected: usize, actual: usize },

    /// Malformed hexadecimal hash literal
    #[error("invalid hash literal: {0}")]
    InvalidHashLiteral(String),

    /// Clone group construction violated a structural invariant
    #[error("invalid clone group: {0}")]
    InvalidCloneGroup(String),
}

impl DupIndexError {
    /// Create a hash width mismatch error
    pub fn width_mismatch(expected: usize, actual: usize) -> Self {
        DupIndexError::HashWidthMismatch { expected, actual }
    }

    /// Create an invalid hash literal error
    pub fn invalid_hash_literal(msg: impl Into<String>) -> Self {
        DupIndexError::InvalidHashLiteral(msg.into())
    }

    /// Create an invalid clone group error
    pub fn invalid_clone_group(msg: impl Into<String>) -> Self {
        DupIndexError::InvalidCloneGroup(msg.into())
    }
}

/// Result type alias for dupindex operations
pub type Result<T> = std::result::Result<T, DupIndexError>;
