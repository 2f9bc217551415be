use std::time::Duration;

use reqwest::Client;

/// Builds the shared HTTP client for a backend. A builder failure falls back to
/// reqwest defaults, which carry no request timeout, so it is logged loudly.
pub(super) fn build_http_client(backend: &'static str, timeout: Duration) -> Client {
    match Client::builder().timeout(timeout).build() {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(
                backend,
                timeout_secs = timeout.as_secs(),
                error = %e,
                "Failed to build HTTP client with configured timeout, using defaults"
            );
            Client::new()
        }
    }
}
