//! OpenAI — stateless message-array API.
//!
//! The role/content list is passed through unchanged; the reply is the
//! first choice's message content.

use serde::{Deserialize, Serialize};
use tracing::debug;

use selfreview_core::types::Message;

use crate::error::ProviderError;
use crate::http::decode;
use crate::registry::ProviderKind;

const VENDOR: &str = "OpenAI";

// ─────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'static str,
    pub messages: &'a [Message],
    pub temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
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

// ─────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct OpenAiClient {
    client: reqwest::Client,
    api_base: String,
}

impl OpenAiClient {
    pub fn new(client: reqwest::Client, api_base: Option<&str>) -> Self {
        let api_base = api_base
            .unwrap_or(ProviderKind::OpenAi.spec().default_api_base)
            .trim_end_matches('/')
            .to_string();
        Self { client, api_base }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }

    /// Send the full conversation; a null content comes back as an empty string.
    pub async fn chat(
        &self,
        api_key: &str,
        temperature: f64,
        messages: &[Message],
    ) -> Result<String, ProviderError> {
        let request = ChatCompletionRequest {
            model: ProviderKind::OpenAi.spec().model,
            messages,
            temperature,
        };

        debug!(
            provider = VENDOR,
            model = request.model,
            messages = messages.len(),
            temperature,
            "Calling LLM"
        );

        let result = self
            .client
            .post(self.completions_url())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await;

        let response: ChatCompletionResponse = decode(VENDOR, result).await?;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::malformed(VENDOR, "no choices in response"))?;

        Ok(choice.message.content.unwrap_or_default())
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
    fn test_request_passes_roles_through() {
        let messages = vec![Message::system("Use SBI."), Message::user("Hello")];
        let request = ChatCompletionRequest {
            model: "gpt-4o",
            messages: &messages,
            temperature: 0.3,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "gpt-4o",
                "messages": [
                    {"role": "system", "content": "Use SBI."},
                    {"role": "user", "content": "Hello"}
                ],
                "temperature": 0.3
            })
        );
    }

    #[tokio::test]
    async fn test_chat_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer sk-test"))
            .and(body_json(json!({
                "model": "gpt-4o",
                "messages": [
                    {"role": "system", "content": "Sys"},
                    {"role": "user", "content": "Hi"},
                    {"role": "assistant", "content": "Hello"},
                    {"role": "user", "content": "More"}
                ],
                "temperature": 0.5
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-1",
                "choices": [{
                    "message": {"role": "assistant", "content": "Sure."},
                    "finish_reason": "stop"
                }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = OpenAiClient::new(reqwest::Client::new(), Some(&mock_server.uri()));
        let messages = vec![
            Message::system("Sys"),
            Message::user("Hi"),
            Message::assistant("Hello"),
            Message::user("More"),
        ];
        let reply = client.chat("sk-test", 0.5, &messages).await.unwrap();

        assert_eq!(reply, "Sure.");
    }

    #[tokio::test]
    async fn test_chat_null_content() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": null}, "finish_reason": "stop"}]
            })))
            .mount(&mock_server)
            .await;

        let client = OpenAiClient::new(reqwest::Client::new(), Some(&mock_server.uri()));
        let reply = client.chat("k", 0.3, &[Message::user("Hi")]).await.unwrap();
        assert_eq!(reply, "");
    }

    #[tokio::test]
    async fn test_chat_no_choices() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&mock_server)
            .await;

        let client = OpenAiClient::new(reqwest::Client::new(), Some(&mock_server.uri()));
        let err = client.chat("k", 0.3, &[Message::user("Hi")]).await.unwrap_err();
        assert!(matches!(err, ProviderError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_chat_rate_limited() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {"message": "Rate limit exceeded", "type": "rate_limit_error"}
            })))
            .mount(&mock_server)
            .await;

        let client = OpenAiClient::new(reqwest::Client::new(), Some(&mock_server.uri()));
        let err = client.chat("k", 0.3, &[Message::user("Hi")]).await.unwrap_err();

        let text = err.to_string();
        assert!(text.contains("429"));
        assert!(text.contains("Rate limit exceeded"));
    }

    #[test]
    fn test_completions_url_trailing_slash() {
        let client = OpenAiClient::new(reqwest::Client::new(), Some("https://api.openai.com/v1/"));
        assert_eq!(
            client.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }
}
