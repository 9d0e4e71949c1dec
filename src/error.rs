// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the Solidmation client.
//!
//! The hierarchy mirrors the layers of the client: value encoding, transport
//! and HTTP status handling, session management, and payload decoding.

use std::time::Duration;

use thiserror::Error;

use crate::types::DeviceId;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A value could not be mapped to or from the vendor encoding.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The HTTP exchange with the cloud service failed.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Authentication or session handling failed.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The service answered with a payload that could not be decoded.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The requested device is not part of the home.
    #[error("device {device_id} not found in home {home_id}")]
    DeviceNotFound {
        /// The home that was searched.
        home_id: u64,
        /// The device that was requested.
        device_id: DeviceId,
    },
}

impl Error {
    /// Returns `true` if the error means the stored credentials are unusable
    /// and the user has to re-authenticate.
    #[must_use]
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            Self::Auth(AuthError::Authentication | AuthError::InvalidSession)
        )
    }

    /// Returns `true` for transport-level failures (connection or timeout).
    ///
    /// After such a failure on a write, the device state is unknown: the
    /// command may or may not have been applied.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Protocol(ProtocolError::ConnectionFailed(_) | ProtocolError::Timeout(_))
                | Self::Auth(AuthError::LoginTimeout(_))
        )
    }
}

/// Errors raised when a name or code has no vendor encoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// Unknown HVAC mode name.
    #[error("invalid HVAC mode: {0}")]
    InvalidMode(String),

    /// Unknown fan speed name.
    #[error("invalid fan mode: {0}")]
    InvalidFanMode(String),

    /// Unknown swing mode name.
    #[error("invalid swing mode: {0}")]
    InvalidSwingMode(String),

    /// Unknown preset name.
    #[error("invalid preset mode: {0}")]
    InvalidPresetMode(String),

    /// Unknown backend variant name.
    #[error("unknown backend: {0}")]
    InvalidBackend(String),
}

/// Errors related to the HTTP exchange with the cloud service.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP client error not covered by a more specific variant.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service could not be reached.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {} ms", .0.as_millis())]
    Timeout(Duration),

    /// HTTP 400, with the body returned by the service.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// HTTP 401. The session token was rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// HTTP 404. The selected backend does not serve this API.
    #[error("unsupported host: {0}")]
    UnsupportedHost(String),

    /// Any other non-success status.
    #[error("unexpected server response (HTTP {status}): {body}")]
    UnknownServer {
        /// The HTTP status code.
        status: u16,
        /// The response body.
        body: String,
    },

    /// Invalid base URL.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

/// Errors related to authentication and the session token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The service returned an empty token for the given credentials.
    #[error("invalid credentials")]
    Authentication,

    /// The token was rejected again after a fresh login.
    #[error("session token rejected by the service")]
    InvalidSession,

    /// The login request timed out.
    #[error("login timed out after {} ms", .0.as_millis())]
    LoginTimeout(Duration),
}

/// Errors related to decoding service responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// The positionally correlated arrays of a data packet differ in length.
    #[error(
        "misaligned data packet: {endpoints} endpoints, {devices} devices, {values} value sets"
    )]
    MisalignedArrays {
        /// Length of `Endpoints`.
        endpoints: usize,
        /// Length of `Devices` (0 when null).
        devices: usize,
        /// Length of `EndpointValues` (0 when null).
        values: usize,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
