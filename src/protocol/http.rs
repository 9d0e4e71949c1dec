// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the Solidmation cloud.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ProtocolError;
use crate::protocol::{CommandResponse, Protocol};

/// HTTP client for the cloud service.
///
/// Wraps one `reqwest` connection pool; cloning is cheap and shares the pool.
///
/// # Examples
///
/// ```no_run
/// use solidmation_lib::protocol::{HttpClient, Protocol, paths};
///
/// # async fn example() -> Result<(), solidmation_lib::ProtocolError> {
/// let client = HttpClient::new("https://bgh-services.solidmation.com")?;
/// let body = serde_json::json!({"user": "me@example.com", "password": "secret"});
/// let response = client.post(paths::LOGIN, &body).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    /// Creates a client for the given base URL with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the URL has no HTTP scheme or the client cannot be created.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProtocolError> {
        Self::with_timeout(base_url, ClientConfig::DEFAULT_TIMEOUT)
    }

    /// Creates a client for the given base URL and per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns error if the URL has no HTTP scheme or the client cannot be created.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProtocolError> {
        let base_url = base_url.into();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ProtocolError::InvalidAddress(base_url));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout,
        })
    }

    /// Creates a client from an account configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the client cannot be created.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ProtocolError> {
        Self::with_timeout(config.base_url(), config.timeout())
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn map_transport_error(&self, err: reqwest::Error) -> ProtocolError {
        if err.is_timeout() {
            ProtocolError::Timeout(self.timeout)
        } else if err.is_connect() {
            ProtocolError::ConnectionFailed(err.to_string())
        } else {
            ProtocolError::Http(err)
        }
    }
}

/// Maps a non-success status and its body to the matching error.
fn status_error(status: StatusCode, body: String) -> ProtocolError {
    match status {
        StatusCode::BAD_REQUEST => ProtocolError::BadRequest(body),
        StatusCode::UNAUTHORIZED => ProtocolError::Unauthorized,
        StatusCode::NOT_FOUND => ProtocolError::UnsupportedHost(body),
        other => ProtocolError::UnknownServer {
            status: other.as_u16(),
            body,
        },
    }
}

impl Protocol for HttpClient {
    async fn post(&self, path: &str, body: &Value) -> Result<CommandResponse, ProtocolError> {
        let url = self.build_url(path);

        tracing::debug!(url = %url, "Sending HTTP request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), body = %text, "HTTP request rejected");
            return Err(status_error(status, text));
        }

        tracing::trace!(body = %text, "Received HTTP response");

        Ok(CommandResponse::new(text))
    }
}
