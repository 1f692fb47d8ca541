//! Claude — messages API with the system prompt as a separate field.
//!
//! The system entry is lifted out of the message array, remaining roles map
//! 1:1 (anything not assistant becomes user), and the output-token ceiling
//! is fixed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use selfreview_core::types::{Message, Role};

use crate::error::ProviderError;
use crate::http::decode;
use crate::registry::ProviderKind;

const VENDOR: &str = "Claude";

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Reply used when the response carries no text block.
pub const NO_TEXT_REPLY: &str = "No text response from Claude.";

// ─────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────

#[derive(Debug, Serialize, PartialEq)]
pub struct MessagesRequest {
    pub model: &'static str,
    pub max_tokens: u32,
    pub temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<ClaudeMessage>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ClaudeMessage {
    pub role: &'static str,
    pub content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

// ─────────────────────────────────────────────
// Translation
// ─────────────────────────────────────────────

/// Build the request body from a provider-agnostic message list.
pub fn build_request(temperature: f64, messages: &[Message]) -> MessagesRequest {
    let spec = ProviderKind::Claude.spec();

    let system = messages
        .iter()
        .find(|m| m.is_system())
        .map(|m| m.content.clone())
        .filter(|s| !s.is_empty());

    let messages = messages
        .iter()
        .filter(|m| !m.is_system())
        .map(|m| ClaudeMessage {
            role: if m.role == Role::Assistant { "assistant" } else { "user" },
            content: m.content.clone(),
        })
        .collect();

    MessagesRequest {
        model: spec.model,
        max_tokens: spec.max_tokens.unwrap_or(4096),
        temperature,
        system,
        messages,
    }
}

fn extract_text(response: MessagesResponse) -> String {
    response
        .content
        .into_iter()
        .find(|block| block.kind == "text")
        .and_then(|block| block.text)
        .unwrap_or_else(|| NO_TEXT_REPLY.to_string())
}

// ─────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct ClaudeClient {
    client: reqwest::Client,
    api_base: String,
}

impl ClaudeClient {
    pub fn new(client: reqwest::Client, api_base: Option<&str>) -> Self {
        let api_base = api_base
            .unwrap_or(ProviderKind::Claude.spec().default_api_base)
            .trim_end_matches('/')
            .to_string();
        Self { client, api_base }
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.api_base)
    }

    pub async fn chat(
        &self,
        api_key: &str,
        temperature: f64,
        messages: &[Message],
    ) -> Result<String, ProviderError> {
        let request = build_request(temperature, messages);

        debug!(
            provider = VENDOR,
            model = request.model,
            messages = request.messages.len(),
            has_system = request.system.is_some(),
            temperature,
            "Calling LLM"
        );

        let result = self
            .client
            .post(self.messages_url())
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await;

        let response: MessagesResponse = decode(VENDOR, result).await?;
        Ok(extract_text(response))
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_system_lifted_into_field() {
        let messages = vec![Message::system("Use SBI."), Message::user("Hello")];
        let request = build_request(0.3, &messages);

        assert_eq!(request.system.as_deref(), Some("Use SBI."));
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, "user");
        assert_eq!(request.messages[0].content, "Hello");
        assert_eq!(request.max_tokens, 4096);
    }

    #[test]
    fn test_no_system_field_when_absent() {
        let request = build_request(0.3, &[Message::user("Hi"), Message::assistant("Yo")]);
        let value = serde_json::to_value(&request).unwrap();

        assert!(value.get("system").is_none());
        assert_eq!(value["messages"][1]["role"], "assistant");
    }

    #[test]
    fn test_extract_first_text_block() {
        let response: MessagesResponse = serde_json::from_value(json!({
            "content": [
                {"type": "thinking", "thinking": "..."},
                {"type": "text", "text": "First"},
                {"type": "text", "text": "Second"}
            ]
        }))
        .unwrap();
        assert_eq!(extract_text(response), "First");
    }

    #[test]
    fn test_extract_without_text_block() {
        let response: MessagesResponse =
            serde_json::from_value(json!({"content": [{"type": "tool_use", "id": "t1"}]})).unwrap();
        assert_eq!(extract_text(response), NO_TEXT_REPLY);
    }

    #[tokio::test]
    async fn test_chat_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "sk-ant-test"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(body_json(json!({
                "model": "claude-3-opus-20240229",
                "max_tokens": 4096,
                "temperature": 0.7,
                "system": "Sys",
                "messages": [{"role": "user", "content": "Hi"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg_1",
                "type": "message",
                "role": "assistant",
                "content": [{"type": "text", "text": "Hello from Claude"}],
                "stop_reason": "end_turn"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ClaudeClient::new(reqwest::Client::new(), Some(&mock_server.uri()));
        let reply = client
            .chat("sk-ant-test", 0.7, &[Message::system("Sys"), Message::user("Hi")])
            .await
            .unwrap();

        assert_eq!(reply, "Hello from Claude");
    }

    #[tokio::test]
    async fn test_chat_auth_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "type": "error",
                "error": {"type": "authentication_error", "message": "invalid x-api-key"}
            })))
            .mount(&mock_server)
            .await;

        let client = ClaudeClient::new(reqwest::Client::new(), Some(&mock_server.uri()));
        let err = client.chat("bad", 0.3, &[Message::user("Hi")]).await.unwrap_err();

        assert!(err.to_string().contains("invalid x-api-key"));
    }
}
