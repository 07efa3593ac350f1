//! Runtime configuration read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;

/// Default chat-completion provider base URL.
pub const DEFAULT_BASE_URL: &str = "https://aiproxy.bja.sealos.run";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for the generation client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GenerationConfig {
    /// Create config from environment variables.
    ///
    /// Uses `CLOSER_API_BASE_URL`, `CLOSER_MODEL` and `CLOSER_TIMEOUT_SECS`,
    /// falling back to defaults if not set. The credential is not part of this
    /// config; it is looked up per call through a `CredentialPort`.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("CLOSER_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("CLOSER_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let timeout_secs = std::env::var("CLOSER_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            base_url,
            model,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

/// Where the session file lives.
///
/// `CLOSER_STATE_PATH` wins; otherwise the platform config directory:
/// - Linux: ~/.config/closer/state.json
/// - macOS: ~/Library/Application Support/io.closer.closer/state.json
/// - Windows: C:\Users\<User>\AppData\Roaming\closer\closer\config\state.json
pub fn state_path_from_env() -> PathBuf {
    if let Some(path) = std::env::var("CLOSER_STATE_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
    {
        return PathBuf::from(path);
    }

    match ProjectDirs::from("io", "closer", "closer") {
        Some(dirs) => dirs.config_dir().join("state.json"),
        None => PathBuf::from("closer_state.json"),
    }
}
