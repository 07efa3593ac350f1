//! Closer Engine library.
//!
//! Turn orchestration and question generation for the Closer conversation game.
//!
//! ## Structure
//!
//! - `use_cases/` - Prompt building, session store, turn state machine
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// Test fixtures module for unit testing.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
