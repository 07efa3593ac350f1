//! Use cases - User story orchestration.
//!
//! - `prompt` builds generation instructions from category and history
//! - `session` owns and persists the session state
//! - `turn` drives the select / request / acknowledge cycle

pub mod prompt;
pub mod session;
pub mod turn;

pub use session::SessionStore;
pub use turn::{
    FailureKind, IgnoreReason, RequestOutcome, TurnError, TurnFailure, TurnOrchestrator,
    TurnPhase, TurnView,
};
