//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Question generation (could swap the chat-completion provider)
//! - Credentials (environment vs. fixed values in tests)
//! - Session storage (file vs. memory)
//! - Clock (for testing)

mod error;
mod external;
mod testing;

pub use error::{GenerationError, StorageError};
pub use external::{CredentialPort, GenerationPort, StoragePort};
pub use testing::ClockPort;

#[cfg(test)]
pub use testing::MockClockPort;
