//! Gemini — turn-based chat API.
//!
//! The call pattern has no system slot: the system text is prepended to the
//! first user turn, every message but the last becomes history (assistant →
//! `"model"`), and the last message is sent as the new user turn.

use serde::{Deserialize, Serialize};
use tracing::debug;

use selfreview_core::types::{Message, Role};

use crate::error::ProviderError;
use crate::http::decode;
use crate::registry::ProviderKind;

const VENDOR: &str = "Gemini";

// ─────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────

#[derive(Debug, Serialize, PartialEq)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    fn text(role: &str, text: impl Into<String>) -> Self {
        Content {
            role: role.to_string(),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

// ─────────────────────────────────────────────
// Translation
// ─────────────────────────────────────────────

/// Build the request body from a provider-agnostic message list.
pub fn build_request(messages: &[Message]) -> Result<GenerateContentRequest, ProviderError> {
    let system = messages.iter().find(|m| m.is_system()).map(|m| m.content.as_str());
    let mut turns: Vec<Message> = messages.iter().filter(|m| !m.is_system()).cloned().collect();

    if let (Some(system), Some(first)) = (system, turns.first_mut()) {
        if !system.is_empty() && first.role == Role::User {
            first.content = format!("{}\n\n{}", system, first.content);
        }
    }

    let last = turns.pop().ok_or(ProviderError::EmptyConversation)?;

    let mut contents: Vec<Content> = turns
        .iter()
        .map(|m| {
            let role = if m.role == Role::Assistant { "model" } else { "user" };
            Content::text(role, m.content.as_str())
        })
        .collect();
    contents.push(Content::text("user", last.content));

    Ok(GenerateContentRequest { contents })
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Result<String, ProviderError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .map(|r| format!("prompt blocked ({r})"))
            .unwrap_or_else(|| "no candidates in response".to_string());
        return Err(ProviderError::malformed(VENDOR, reason));
    };

    Ok(candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect::<String>())
        .unwrap_or_default())
}

// ─────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_base: String,
}

impl GeminiClient {
    pub fn new(client: reqwest::Client, api_base: Option<&str>) -> Self {
        let api_base = api_base
            .unwrap_or(ProviderKind::Gemini.spec().default_api_base)
            .trim_end_matches('/')
            .to_string();
        Self { client, api_base }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base,
            ProviderKind::Gemini.spec().model
        )
    }

    /// Send one chat turn. Temperature is not part of this call pattern.
    pub async fn chat(&self, api_key: &str, messages: &[Message]) -> Result<String, ProviderError> {
        let request = build_request(messages)?;

        debug!(
            provider = VENDOR,
            model = ProviderKind::Gemini.spec().model,
            history = request.contents.len() - 1,
            "Calling LLM"
        );

        let result = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await;

        let response: GenerateContentResponse = decode(VENDOR, result).await?;
        extract_text(response)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
