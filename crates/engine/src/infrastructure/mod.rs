//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod chat_completion;
pub mod clock;
pub mod config;
pub mod credentials;
pub mod ports;
pub mod storage;
