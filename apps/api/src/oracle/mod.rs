//! Suggestion oracle — the single point of entry for text-completion calls.
//!
//! No other module may talk to the completion API directly. The aggregator
//! depends on the `SuggestionOracle` trait, so tests inject stub oracles
//! and the HTTP client below is swappable without touching call sites.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all suggestion calls. Hardcoded to prevent drift.
pub const MODEL: &str = "claude-sonnet-4-5";

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("oracle returned empty content")]
    EmptyContent,
}

/// A text-completion oracle: system prompt + user prompt in, free text out.
/// One attempt per call — the aggregator owns the retry policy.
#[async_trait]
pub trait SuggestionOracle: Send + Sync {
    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String, OracleError>;
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Oracle backed by the Anthropic Messages API.
#[derive(Clone)]
pub struct AnthropicOracle {
    client: Client,
    api_key: String,
}

impl AnthropicOracle {
    /// `timeout` bounds each attempt end to end, connection included.
    pub fn new(api_key: String, timeout: std::time::Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl SuggestionOracle for AnthropicOracle {
    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String, OracleError> {
        let request_body = MessagesRequest {
            model: MODEL,
            max_tokens,
            system,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(OracleError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: MessagesResponse = response.json().await?;

        debug!(
            "oracle call succeeded: input_tokens={}, output_tokens={}",
            completion.usage.input_tokens, completion.usage.output_tokens
        );

        completion
            .content
            .iter()
            .find(|block| block.block_type == "text")
            .and_then(|block| block.text.clone())
            .ok_or(OracleError::EmptyContent)
    }
}

/// Strips ```json ... ``` or ``` ... ``` fences that models sometimes wrap
/// around JSON output despite instructions.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_fences_with_json_tag() {
        let input = "```json\n{\"improved_summary\": \"text\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"improved_summary\": \"text\"}");
    }

    #[test]
    fn test_strip_fences_plain() {
        let input = "```\n{\"overall_tips\": []}\n```";
        assert_eq!(strip_json_fences(input), "{\"overall_tips\": []}");
    }

    #[test]
    fn test_strip_fences_passthrough() {
        let input = "{\"skills_to_add\": [\"aws\"]}";
        assert_eq!(strip_json_fences(input), input);
    }

    #[test]
    fn test_strip_fences_unterminated() {
        let input = "```json\n{\"a\": 1}";
        assert_eq!(strip_json_fences(input), "{\"a\": 1}");
    }
}
