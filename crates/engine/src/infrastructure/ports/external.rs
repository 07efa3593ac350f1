//! External service port traits (question generation, credentials, storage).

use async_trait::async_trait;

use super::error::{GenerationError, StorageError};

// =============================================================================
// Generation
// =============================================================================

/// Turns an instruction into question text via an external provider.
#[async_trait]
pub trait GenerationPort: Send + Sync {
    /// Issue exactly one request and return the trimmed text of the first choice.
    async fn generate(&self, instruction: &str) -> Result<String, GenerationError>;

    /// Cheap probe of the provider. Never fails, only classifies.
    async fn check_availability(&self) -> bool;
}

// =============================================================================
// Configuration
// =============================================================================

/// Source of the provider credential, consulted on every call.
pub trait CredentialPort: Send + Sync {
    /// The bearer token, or `None` when absent or blank.
    fn api_token(&self) -> Option<String>;
}

// =============================================================================
// Storage
// =============================================================================

/// Key/value blob storage for session snapshots.
pub trait StoragePort: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
