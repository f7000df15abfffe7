//! Shared outbound HTTP client.
//!
//! One `reqwest::Client` (connection pool, timeout, user agent) is built at
//! startup and cloned into every adapter. [`HttpClient::fetch_json`] is the
//! "GET JSON, treat non-2xx as failure" primitive all adapters use.

use emoteport_config::HttpConfig;
use emoteport_core::UpstreamError;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

/// Cheaply cloneable handle to the shared connection pool.
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
}

impl HttpClient {
    /// Build the client from the `[http]` config section.
    pub fn new(config: &HttpConfig) -> Result<Self, UpstreamError> {
        let inner = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| UpstreamError::NotConfigured(format!("HTTP client: {e}")))?;
        Ok(Self { inner })
    }

    /// Start a GET request.
    pub fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.inner.get(url)
    }

    /// Start a POST request.
    pub fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.inner.post(url)
    }

    /// Send a prepared request and decode a JSON body.
    ///
    /// Transport errors, non-2xx statuses and undecodable bodies all come back
    /// as `UpstreamError`, tagged with `provider`.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        provider: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, UpstreamError> {
        let response = request
            .send()
            .await
            .map_err(|e| transport_error(provider, &e))?;

        let status = response.status();
        debug!(provider = %provider, status = status.as_u16(), url = %response.url(), "Upstream responded");

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(UpstreamError::Unauthorized(provider.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                provider: provider.to_string(),
                status_code: status.as_u16(),
                message: truncate(&body, 200),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport_error(provider, &e))?;

        trace!(provider = %provider, len = bytes.len(), "Decoding upstream payload");

        serde_json::from_slice(&bytes)
            .map_err(|e| UpstreamError::Malformed(format!("{provider}: {e}")))
    }
}

fn transport_error(provider: &str, e: &reqwest::Error) -> UpstreamError {
    if e.is_timeout() {
        UpstreamError::Timeout(format!("{provider}: {e}"))
    } else {
        UpstreamError::Network(format!("{provider}: {e}"))
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}

/// Join a base URL and a path without doubling or dropping the slash.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
