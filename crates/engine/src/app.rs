//! Application state and composition.

use std::path::PathBuf;
use std::sync::Arc;

use crate::infrastructure::{
    chat_completion::ChatCompletionClient,
    clock::SystemClock,
    config::{state_path_from_env, GenerationConfig},
    credentials::EnvCredentials,
    ports::{ClockPort, CredentialPort, GenerationPort, StoragePort},
    storage::JsonFileStorage,
};
use crate::use_cases::{SessionStore, TurnOrchestrator};

/// Main application state.
///
/// Holds the orchestrator for the single local session.
pub struct App {
    pub turns: TurnOrchestrator,
    pub state_path: Option<PathBuf>,
}

impl App {
    /// Wire the given ports together.
    pub fn new(
        storage: Arc<dyn StoragePort>,
        generator: Arc<dyn GenerationPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let store = SessionStore::load(storage);
        Self {
            turns: TurnOrchestrator::new(store, generator, clock),
            state_path: None,
        }
    }

    /// Production wiring: environment config, file storage, HTTP provider.
    pub fn from_env() -> Self {
        let config = GenerationConfig::from_env();
        let storage = Arc::new(JsonFileStorage::open(state_path_from_env()));
        let state_path = storage.path().to_path_buf();
        tracing::info!(
            base_url = %config.base_url,
            model = %config.model,
            timeout_secs = config.timeout.as_secs(),
            state_path = %state_path.display(),
            "Configuring Closer"
        );

        let credentials: Arc<dyn CredentialPort> = Arc::new(EnvCredentials::new());
        let generator = Arc::new(ChatCompletionClient::new(&config, credentials));

        let mut app = Self::new(storage, generator, Arc::new(SystemClock::new()));
        app.state_path = Some(state_path);
        app
    }
}
