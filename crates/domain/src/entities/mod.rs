//! Entities - Objects with identity or lifecycle

mod question;
mod session_state;

pub use question::Question;
pub use session_state::{SessionState, HISTORY_CAPACITY, PROMPT_HISTORY_WINDOW};
