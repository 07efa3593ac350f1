//! Closer domain types.
//!
//! Pure vocabulary and invariants for the two-player question game: who is
//! playing, which theme is active, what has already been asked. Nothing in
//! this crate performs I/O.

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{Question, SessionState, HISTORY_CAPACITY, PROMPT_HISTORY_WINDOW};
pub use error::DomainError;
pub use ids::QuestionId;
pub use value_objects::{Category, Player, Theme, ThemeColors};
