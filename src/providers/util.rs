use crate::core::quote::QuoteError;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error};

/// Timeout applied to every outbound request unless configured otherwise.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub fn build_client(timeout: Duration) -> Result<reqwest::Client, QuoteError> {
    reqwest::Client::builder()
        .user_agent("cambio/0.1")
        .timeout(timeout)
        .build()
        .map_err(|e| QuoteError::Network(format!("Failed to build HTTP client: {e}")))
}

/// Issues a single GET and decodes the JSON body.
///
/// Transport errors, timeouts and non-2xx statuses map to `QuoteError::Network`;
/// a body that does not decode as `T` maps to `QuoteError::Data`.
pub async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, QuoteError> {
    debug!("Requesting {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| QuoteError::Network(format!("Request error: {e} for URL: {url}")))?;

    if !response.status().is_success() {
        return Err(QuoteError::Network(format!(
            "HTTP error: {} for URL: {}",
            response.status(),
            url
        )));
    }

    let text = response
        .text()
        .await
        .map_err(|e| QuoteError::Network(format!("Failed to read response body: {e}")))?;

    serde_json::from_str(&text).map_err(|e| {
        error!(error = ?e, response = %text, "Failed to parse response");
        QuoteError::Data(format!("Failed to parse JSON response from {url}: {e}"))
    })
}

/// Reads a JSON number, or a string holding one, as `f64`.
pub fn lenient_f64(value: &serde_json::Value, field: &str) -> Result<f64, QuoteError> {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| QuoteError::Data(format!("Field '{field}' is not numeric: {value}")))
}
