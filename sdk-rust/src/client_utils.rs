use crate::ProviderError;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Default upper bound on a single provider call, connection included.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Create a JSON request and decode the response body as a generic JSON tree.
/// Returns an error on non-2xx status codes, carrying the body verbatim.
/// `timeout` bounds the whole call, connection included.
pub async fn send_json<T: Serialize>(
    client: &Client,
    url: &str,
    data: &T,
    headers: reqwest::header::HeaderMap,
    timeout: Duration,
    provider: &'static str,
) -> Result<Value, ProviderError> {
    let response = client
        .post(url)
        .headers(headers)
        .timeout(timeout)
        .json(data)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ProviderError::Http { status, body });
    }

    serde_json::from_str(&body).map_err(|error| {
        ProviderError::Invariant(provider, format!("Response body is not valid JSON: {error}"))
    })
}
