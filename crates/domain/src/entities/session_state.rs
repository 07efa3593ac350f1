//! Session state - the authoritative game state for one play session
//!
//! All mutations go through the named methods below so that the turn and
//! history invariants hold regardless of who drives them:
//!
//! - `active_player` only changes through [`SessionState::advance_turn`] or a reset
//! - `history` is most-recent-first and never longer than [`HISTORY_CAPACITY`]
//! - selecting a category always starts a fresh round

use serde::{Deserialize, Serialize};

use crate::value_objects::{Category, Player};

/// Maximum number of question texts retained in history
pub const HISTORY_CAPACITY: usize = 20;

/// Number of recent questions handed to the prompt builder
pub const PROMPT_HISTORY_WINDOW: usize = 5;

/// Snapshot of one session, also the persisted wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub active_player: Player,
    /// `None` until the first category selection
    pub category: Option<Category>,
    /// Previously shown question texts, most recent first
    pub history: Vec<String>,
    /// Gates onboarding in the presentation layer
    pub is_first_session: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            active_player: Player::A,
            category: None,
            history: Vec::new(),
            is_first_session: true,
        }
    }
}

impl SessionState {
    /// Start a themed round: player A first, empty history.
    ///
    /// History clears even when the category is unchanged.
    pub fn select_category(&mut self, category: Category) {
        self.category = Some(category);
        self.active_player = Player::A;
        self.history.clear();
        self.is_first_session = false;
    }

    pub fn advance_turn(&mut self) {
        self.active_player = self.active_player.other();
    }

    /// Prepend a shown question, evicting the oldest beyond capacity.
    pub fn record_question(&mut self, text: impl Into<String>) {
        self.history.insert(0, text.into());
        self.history.truncate(HISTORY_CAPACITY);
    }

    pub fn reset_keeping_category(&mut self) {
        self.active_player = Player::A;
        self.history.clear();
    }

    /// The most recent questions, newest first, capped at `limit`.
    pub fn recent_history(&self, limit: usize) -> &[String] {
        &self.history[..self.history.len().min(limit)]
    }

    /// Whether this exact question text has already been shown.
    pub fn has_seen(&self, text: &str) -> bool {
        self.history.iter().any(|q| q == text)
    }

    /// Clamp a rehydrated snapshot back inside the history bound.
    pub fn normalized(mut self) -> Self {
        self.history.truncate(HISTORY_CAPACITY);
        self
    }
}
