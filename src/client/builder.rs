// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Client builder.

use std::time::Duration;

use tracing::Span;

use crate::client::SolidmationClient;
use crate::config::{Backend, ClientConfig};
use crate::error::Error;
use crate::protocol::{HttpClient, Protocol};

/// Builder for [`SolidmationClient`].
///
/// Created with [`SolidmationClient::builder`], or from a loaded
/// [`ClientConfig`] with [`ClientBuilder::new`].
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use solidmation_lib::{Backend, SolidmationClient};
///
/// # fn example() -> solidmation_lib::Result<()> {
/// let client = SolidmationClient::builder("me@example.com", "secret")
///     .with_backend(Backend::MyHabeetat)
///     .with_timeout(Duration::from_secs(5))
///     .with_span(tracing::info_span!("hvac", account = "home"))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ClientBuilder {
    config: ClientConfig,
    span: Option<Span>,
}

impl ClientBuilder {
    /// Creates a builder from an account configuration.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self { config, span: None }
    }

    /// Selects the backend deployment.
    #[must_use]
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.config = self.config.with_backend(backend);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Overrides the base URL, keeping the backend's flag encoding.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config = self.config.with_base_url(base_url);
        self
    }

    /// Records the client's operations in `span` instead of a new one.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Returns the configuration built so far.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds an HTTP client.
    ///
    /// No request is made; the first operation logs in.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or the HTTP client cannot be
    /// created.
    pub fn build(self) -> Result<SolidmationClient<HttpClient>, Error> {
        let protocol = HttpClient::from_config(&self.config)?;
        Ok(self.build_with_protocol(protocol))
    }

    /// Builds a client over a custom transport.
    pub fn build_with_protocol<P: Protocol>(self, protocol: P) -> SolidmationClient<P> {
        let client = SolidmationClient::with_protocol(protocol, &self.config);
        match self.span {
            Some(span) => client.with_span(span),
            None => client,
        }
    }
}
