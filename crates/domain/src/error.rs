//! Unified error types for the domain layer
//!
//! The domain has no I/O, so the only failures it can report are values that
//! do not map onto one of its closed vocabularies.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A category identifier that is empty or not part of the category set.
    ///
    /// Callers are expected to validate input before it reaches the prompt
    /// builder, so seeing this at runtime indicates a programming error.
    #[error("Invalid category: {0:?}")]
    InvalidCategory(String),

    /// A player label other than `A` or `B`.
    #[error("Invalid player: {0:?}")]
    InvalidPlayer(String),
}

impl DomainError {
    /// Create an invalid category error
    pub fn invalid_category(input: impl Into<String>) -> Self {
        Self::InvalidCategory(input.into())
    }

    /// Create an invalid player error
    pub fn invalid_player(input: impl Into<String>) -> Self {
        Self::InvalidPlayer(input.into())
    }
}
