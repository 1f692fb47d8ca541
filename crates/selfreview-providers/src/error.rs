//! Errors raised inside the provider layer.
//!
//! None of these escape [`crate::ProviderAdapter::get_ai_response`]; they are
//! rendered into the `"Error: ..."` reply convention there.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider id is not one of the supported vendors.
    #[error("Invalid AI selected.")]
    InvalidSelection(String),

    /// Nothing but system entries were supplied.
    #[error("No message to send.")]
    EmptyConversation,

    /// Transport-level failure (DNS, connect, TLS, body read).
    #[error("{vendor} request failed: {source}")]
    Http {
        vendor: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The vendor answered with a non-success status.
    #[error("{vendor} API error {status}: {message}")]
    Api {
        vendor: &'static str,
        status: StatusCode,
        message: String,
    },

    /// The vendor answered 2xx but the body was not what we expected.
    #[error("{vendor} returned an unexpected response: {detail}")]
    Malformed { vendor: &'static str, detail: String },
}

impl ProviderError {
    /// The provider id that failed to parse, for logging.
    pub fn rejected_id(&self) -> Option<&str> {
        match self {
            ProviderError::InvalidSelection(id) => Some(id),
            _ => None,
        }
    }

    pub(crate) fn http(vendor: &'static str, source: reqwest::Error) -> Self {
        ProviderError::Http { vendor, source }
    }

    pub(crate) fn malformed(vendor: &'static str, detail: impl Into<String>) -> Self {
        ProviderError::Malformed {
            vendor,
            detail: detail.into(),
        }
    }

    /// Build an API error from a failed response body.
    ///
    /// All three vendors wrap failures as `{"error": {"message": "..."}}`;
    /// the message is used when present, otherwise the raw body.
    pub(crate) fn api(vendor: &'static str, status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                    .map(String::from)
            })
            .unwrap_or_else(|| body.trim().to_string());

        ProviderError::Api {
            vendor,
            status,
            message,
        }
    }
}
