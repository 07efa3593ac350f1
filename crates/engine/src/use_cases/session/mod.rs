//! Session state store.
//!
//! Owns the single in-memory [`SessionState`] and writes a snapshot to storage
//! after every mutation. Storage is best-effort: a failed write is logged and
//! the in-memory change stands for the rest of the process.

use std::sync::Arc;

use closer_domain::{Category, SessionState};

use crate::infrastructure::ports::StoragePort;

/// Storage key for the session snapshot.
pub const SESSION_STORAGE_KEY: &str = "closer-session-state";

pub struct SessionStore {
    storage: Arc<dyn StoragePort>,
    state: SessionState,
}

impl SessionStore {
    /// Rehydrate from storage, falling back to defaults.
    ///
    /// A missing blob and a malformed one are treated the same way; the
    /// malformed blob is discarded so it is not read again.
    pub fn load(storage: Arc<dyn StoragePort>) -> Self {
        let state = match storage.load(SESSION_STORAGE_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<SessionState>(&blob) {
                Ok(state) => {
                    tracing::debug!(
                        category = ?state.category,
                        history_len = state.history.len(),
                        "Restored saved session"
                    );
                    state.normalized()
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding malformed saved session");
                    if let Err(e) = storage.remove(SESSION_STORAGE_KEY) {
                        tracing::error!(error = %e, "Failed to discard malformed session");
                    }
                    SessionState::default()
                }
            },
            Ok(None) => SessionState::default(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read saved session, using defaults");
                SessionState::default()
            }
        };

        Self { storage, state }
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn select_category(&mut self, category: Category) {
        self.state.select_category(category);
        self.persist();
    }

    pub fn advance_turn(&mut self) {
        self.state.advance_turn();
        self.persist();
    }

    pub fn record_question(&mut self, text: impl Into<String>) {
        self.state.record_question(text);
        self.persist();
    }

    pub fn reset_keeping_category(&mut self) {
        self.state.reset_keeping_category();
        self.persist();
    }

    /// Drop the saved snapshot entirely and return to defaults.
    pub fn full_reset(&mut self) {
        if let Err(e) = self.storage.remove(SESSION_STORAGE_KEY) {
            tracing::error!(error = %e, "Failed to remove saved session");
        }
        self.state = SessionState::default();
    }

    fn persist(&self) {
        let blob = match serde_json::to_string(&self.state) {
            Ok(blob) => blob,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize session");
                return;
            }
        };

        if let Err(e) = self.storage.save(SESSION_STORAGE_KEY, &blob) {
            tracing::error!(error = %e, "Failed to persist session");
        }
    }
}
