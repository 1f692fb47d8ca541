//! The backend seam the conversation controller talks to.

use async_trait::async_trait;
use selfreview_core::types::Message;

/// Something that turns a conversation into an assistant reply.
///
/// Implementations never fail: errors are returned as a reply string that
/// starts with `"Error: "`, and the caller records it like any other reply.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// # Arguments
    /// * `ai`          — Provider id as entered in the form.
    /// * `api_key`     — Caller-supplied credential for that provider.
    /// * `temperature` — Sampling temperature in [0, 1].
    /// * `messages`    — Ordered conversation, optionally led by one system entry.
    async fn get_ai_response(
        &self,
        ai: &str,
        api_key: &str,
        temperature: f64,
        messages: &[Message],
    ) -> String;
}
