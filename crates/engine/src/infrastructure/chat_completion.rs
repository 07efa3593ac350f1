//! Chat-completion client for question generation (OpenAI-compatible API)

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::infrastructure::config::GenerationConfig;
use crate::infrastructure::ports::{CredentialPort, GenerationError, GenerationPort};

/// Output cap for a generated question.
pub const QUESTION_MAX_TOKENS: u32 = 512;
/// Sampling temperature for a generated question.
pub const QUESTION_TEMPERATURE: f32 = 0.7;

const PROBE_CONTENT: &str = "connection test";
const PROBE_MAX_TOKENS: u32 = 10;
const PROBE_TEMPERATURE: f32 = 0.1;

/// Client for a single chat-completion endpoint, one request per call.
#[derive(Clone)]
pub struct ChatCompletionClient {
    client: Client,
    base_url: String,
    model: String,
    credentials: Arc<dyn CredentialPort>,
}

impl ChatCompletionClient {
    pub fn new(config: &GenerationConfig, credentials: Arc<dyn CredentialPort>) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            credentials,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    async fn post(
        &self,
        content: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<reqwest::Response, GenerationError> {
        let token = self
            .credentials
            .api_token()
            .ok_or(GenerationError::MissingCredential)?;

        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content,
            }],
            stream: false,
            max_tokens,
            temperature,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(token)
            .json(&request)
            .send()
            .await
            .map_err(GenerationError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::http_status(status.as_u16(), body));
        }

        Ok(response)
    }
}

#[async_trait]
impl GenerationPort for ChatCompletionClient {
    async fn generate(&self, instruction: &str) -> Result<String, GenerationError> {
        let response = self
            .post(instruction, QUESTION_MAX_TOKENS, QUESTION_TEMPERATURE)
            .await?;

        let body = response.text().await.map_err(GenerationError::transport)?;
        extract_first_choice(&body)
    }

    async fn check_availability(&self) -> bool {
        match self
            .post(PROBE_CONTENT, PROBE_MAX_TOKENS, PROBE_TEMPERATURE)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error_kind = e.kind(), error = %e, "Generation provider unavailable");
                false
            }
        }
    }
}

fn extract_first_choice(body: &str) -> Result<String, GenerationError> {
    let parsed: ChatResponse = serde_json::from_str(body).map_err(GenerationError::malformed)?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GenerationError::malformed("No choices in response"))?;

    let content = choice
        .message
        .content
        .map(|c| c.trim().to_string())
        .unwrap_or_default();

    if content.is_empty() {
        return Err(GenerationError::malformed("First choice has no content"));
    }

    Ok(content)
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::credentials::StaticCredentials;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, credentials: StaticCredentials) -> ChatCompletionClient {
        let config = GenerationConfig {
            base_url: server.uri(),
            model: "deepseek-chat".to_string(),
            timeout: Duration::from_secs(5),
        };
        ChatCompletionClient::new(&config, Arc::new(credentials))
    }

    fn completion(content: &str) -> serde_json::Value {
        json!({
            "choices": [
                { "message": { "role": "assistant", "content": content } }
            ]
        })
    }

    #[tokio::test]
    async fn test_generate_returns_trimmed_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "deepseek-chat",
                "messages": [{ "role": "user", "content": "Ask something" }],
                "stream": false,
                "max_tokens": 512,
                "temperature": 0.7
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [
                    { "message": { "content": "  What is your favorite memory?\n" } },
                    { "message": { "content": "ignored" } }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, StaticCredentials::new("sk-test"));
        let text = client.generate("Ask something").await.unwrap();

        assert_eq!(text, "What is your favorite memory?");
    }

    #[tokio::test]
    async fn test_missing_credential_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("unused")))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server, StaticCredentials::missing());
        let result = client.generate("Ask something").await;

        assert_eq!(result, Err(GenerationError::MissingCredential));
    }

    #[tokio::test]
    async fn test_non_success_status_is_http_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, StaticCredentials::new("sk-test"));
        let result = client.generate("Ask something").await;

        match result {
            Err(GenerationError::HttpStatusFailure { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "upstream exploded");
            }
            other => panic!("Expected HttpStatusFailure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let client = client_for(&server, StaticCredentials::new("sk-test"));
        let result = client.generate("Ask something").await;

        assert!(matches!(result, Err(GenerationError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_unparsable_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy page</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server, StaticCredentials::new("sk-test"));
        let result = client.generate("Ask something").await;

        assert!(matches!(result, Err(GenerationError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_null_or_blank_first_choice_is_malformed() {
        for body in [
            json!({ "choices": [{ "message": { "role": "assistant", "content": null } }] }),
            completion("  \n\t "),
            json!({}),
        ] {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .and(path("/v1/chat/completions"))
                .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
                .expect(1)
                .mount(&server)
                .await;

            let client = client_for(&server, StaticCredentials::new("sk-test"));
            let result = client.generate("Ask something").await;

            assert!(
                matches!(result, Err(GenerationError::MalformedResponse(_))),
                "body {body} gave {result:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_failure() {
        let config = GenerationConfig {
            // Port 9 (discard) on localhost is not expected to accept HTTP.
            base_url: "http://127.0.0.1:9".to_string(),
            model: "deepseek-chat".to_string(),
            timeout: Duration::from_secs(2),
        };
        let client = ChatCompletionClient::new(&config, Arc::new(StaticCredentials::new("sk")));

        let result = client.generate("Ask something").await;

        assert!(matches!(result, Err(GenerationError::TransportFailure(_))));
    }

    #[tokio::test]
    async fn test_availability_probe_uses_cheap_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "messages": [{ "role": "user", "content": "connection test" }],
                "max_tokens": 10,
                "temperature": 0.1
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, StaticCredentials::new("sk-test"));
        assert!(client.check_availability().await);
    }

    #[tokio::test]
    async fn test_availability_probe_classifies_failures_as_false() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let unauthorized = client_for(&server, StaticCredentials::new("sk-bad"));
        assert!(!unauthorized.check_availability().await);

        let unconfigured = client_for(&server, StaticCredentials::missing());
        assert!(!unconfigured.check_availability().await);
    }

    #[tokio::test]
    async fn test_availability_probe_is_false_when_host_unreachable() {
        let config = GenerationConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            model: "deepseek-chat".to_string(),
            timeout: Duration::from_secs(2),
        };
        let client = ChatCompletionClient::new(&config, Arc::new(StaticCredentials::new("sk")));

        assert!(!client.check_availability().await);
    }
}
