//! LLM client: the single point of entry for all Claude API calls.
//!
//! ARCHITECTURAL RULE: no other module may call the Anthropic API directly.
//! All generation traffic goes through [`LlmClient::generate`].
//!
//! One request, one answer: the endpoint promises an immediate error on any
//! upstream failure, so there is no retry loop here. The only time bound is
//! the HTTP client's request timeout.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com";
const MESSAGES_PATH: &str = "/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// The model used for program generation.
/// Intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "claude-3-sonnet-20240229";

/// Output-length budget for one generated program.
const MAX_TOKENS: u32 = 4000;

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Clé API manquante")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx from the API. `body` is the upstream response body, verbatim;
    /// the endpoint surfaces it untouched in its `details` field.
    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("LLM returned no text content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text of the first `text` content block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

/// Client for the Anthropic Messages API.
///
/// The credential is injected at construction and checked at call time, so a
/// missing key is a per-request error rather than a startup panic.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url: ANTHROPIC_API_URL.to_string(),
        }
    }

    /// Points the client at a different host. Used by tests to stand in a
    /// loopback server for the real API.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sends one user-role message and returns the generated text.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(format!("{}{}", self.base_url, MESSAGES_PATH))
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        llm_response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_blocks(blocks: Vec<ContentBlock>) -> LlmResponse {
        LlmResponse {
            content: blocks,
            usage: Usage {
                input_tokens: 10,
                output_tokens: 20,
            },
        }
    }

    #[test]
    fn test_text_extracts_first_text_block() {
        let response = response_with_blocks(vec![
            ContentBlock {
                block_type: "thinking".to_string(),
                text: None,
            },
            ContentBlock {
                block_type: "text".to_string(),
                text: Some("# Programme".to_string()),
            },
            ContentBlock {
                block_type: "text".to_string(),
                text: Some("ignored".to_string()),
            },
        ]);
        assert_eq!(response.text(), Some("# Programme"));
    }

    #[test]
    fn test_text_none_when_no_text_blocks() {
        let response = response_with_blocks(vec![]);
        assert_eq!(response.text(), None);
    }

    #[tokio::test]
    async fn test_generate_without_key_fails_before_any_request() {
        // Unroutable base URL: reaching the network would error differently.
        let client = LlmClient::new(None).with_base_url("http://127.0.0.1:1");
        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, LlmError::MissingApiKey));
        assert_eq!(err.to_string(), "Clé API manquante");
    }

    #[test]
    fn test_response_deserializes_from_api_shape() {
        let raw = r#"{
            "content": [{"type": "text", "text": "Bonjour"}],
            "usage": {"input_tokens": 5, "output_tokens": 7}
        }"#;
        let response: LlmResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.text(), Some("Bonjour"));
        assert_eq!(response.usage.output_tokens, 7);
    }
}
