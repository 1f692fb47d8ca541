//! Provider adapter — one entry point for all three vendors.
//!
//! The id is parsed before anything else, so an unknown provider never
//! reaches the network. Every failure is logged and rendered as
//! `"Error: <message>"`.

use async_trait::async_trait;
use tracing::{debug, error};

use selfreview_core::config::schema::ProvidersConfig;
use selfreview_core::types::Message;

use crate::claude::ClaudeClient;
use crate::error::ProviderError;
use crate::gemini::GeminiClient;
use crate::openai::OpenAiClient;
use crate::registry::ProviderKind;
use crate::traits::ChatBackend;

/// Holds one client per vendor over a shared connection pool.
#[derive(Clone, Debug)]
pub struct ProviderAdapter {
    gemini: GeminiClient,
    openai: OpenAiClient,
    claude: ClaudeClient,
}

impl Default for ProviderAdapter {
    fn default() -> Self {
        Self::from_config(&ProvidersConfig::default())
    }
}

impl ProviderAdapter {
    /// Build the adapter, honoring any `apiBase` overrides in the config.
    ///
    /// No timeout is set beyond the HTTP client's default.
    pub fn from_config(providers: &ProvidersConfig) -> Self {
        let client = reqwest::Client::new();
        Self {
            gemini: GeminiClient::new(client.clone(), providers.gemini.api_base.as_deref()),
            openai: OpenAiClient::new(client.clone(), providers.openai.api_base.as_deref()),
            claude: ClaudeClient::new(client, providers.claude.api_base.as_deref()),
        }
    }

    /// Dispatch to the selected vendor, keeping the typed error.
    pub async fn try_response(
        &self,
        ai: &str,
        api_key: &str,
        temperature: f64,
        messages: &[Message],
    ) -> Result<String, ProviderError> {
        let kind: ProviderKind = ai.parse()?;
        debug!(provider = %kind, messages = messages.len(), "Dispatching chat request");

        match kind {
            ProviderKind::Gemini => self.gemini.chat(api_key, messages).await,
            ProviderKind::OpenAi => self.openai.chat(api_key, temperature, messages).await,
            ProviderKind::Claude => self.claude.chat(api_key, temperature, messages).await,
        }
    }
}

#[async_trait]
impl ChatBackend for ProviderAdapter {
    async fn get_ai_response(
        &self,
        ai: &str,
        api_key: &str,
        temperature: f64,
        messages: &[Message],
    ) -> String {
        match self.try_response(ai, api_key, temperature, messages).await {
            Ok(reply) => {
                debug!(provider = ai, chars = reply.len(), "LLM response received");
                reply
            }
            Err(e) => {
                match e.rejected_id() {
                    Some(id) => error!(rejected = id, "Unknown provider id"),
                    None => error!(provider = ai, error = %e, "Error generating response"),
                }
                format!("Error: {e}")
            }
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
