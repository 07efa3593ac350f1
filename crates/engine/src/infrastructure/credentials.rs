//! Credential providers for the generation client.

use crate::infrastructure::ports::CredentialPort;

/// Environment variable holding the provider bearer token.
pub const API_TOKEN_ENV: &str = "CLOSER_API_TOKEN";

/// Reads the token from the process environment on every call, so a token
/// exported after startup is picked up without restarting.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    pub fn new() -> Self {
        Self::with_var(API_TOKEN_ENV)
    }

    /// Read from a different variable (for embedding).
    pub fn with_var(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialPort for EnvCredentials {
    fn api_token(&self) -> Option<String> {
        std::env::var(&self.var).ok().and_then(non_blank)
    }
}

/// A fixed token, or none at all.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    token: Option<String>,
}

impl StaticCredentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn missing() -> Self {
        Self { token: None }
    }
}

impl CredentialPort for StaticCredentials {
    fn api_token(&self) -> Option<String> {
        self.token.clone().and_then(non_blank)
    }
}

fn non_blank(token: String) -> Option<String> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_static_token_counts_as_missing() {
        assert_eq!(StaticCredentials::new("   ").api_token(), None);
        assert_eq!(StaticCredentials::missing().api_token(), None);
        assert_eq!(
            StaticCredentials::new(" sk-test ").api_token(),
            Some("sk-test".to_string())
        );
    }

    #[test]
    fn env_credentials_read_at_call_time() {
        // Unique variable name so parallel tests do not interfere.
        let var = "CLOSER_TEST_TOKEN_CALL_TIME";
        let credentials = EnvCredentials::with_var(var);

        std::env::remove_var(var);
        assert_eq!(credentials.api_token(), None);

        std::env::set_var(var, "sk-late");
        assert_eq!(credentials.api_token(), Some("sk-late".to_string()));

        std::env::set_var(var, "");
        assert_eq!(credentials.api_token(), None);

        std::env::remove_var(var);
    }
}
