//! Shared response handling for the vendor clients.

use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::error::ProviderError;

/// Turn the outcome of a `send()` into a typed body or a [`ProviderError`].
pub(crate) async fn decode<T: DeserializeOwned>(
    vendor: &'static str,
    result: Result<reqwest::Response, reqwest::Error>,
) -> Result<T, ProviderError> {
    let response = result.map_err(|e| {
        error!(provider = vendor, error = %e, "HTTP request failed");
        ProviderError::http(vendor, e)
    })?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ProviderError::http(vendor, e))?;

    if !status.is_success() {
        error!(provider = vendor, status = %status, body = %body, "API error");
        return Err(ProviderError::api(vendor, status, &body));
    }

    debug!(provider = vendor, status = %status, bytes = body.len(), "Response received");

    serde_json::from_str(&body).map_err(|e| {
        error!(provider = vendor, error = %e, "Failed to parse response");
        ProviderError::malformed(vendor, e.to_string())
    })
}
