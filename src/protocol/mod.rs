// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport to the Solidmation cloud.
//!
//! Every call to the service is a JSON `POST` to a fixed path below the
//! backend's base URL. [`Protocol`] is the seam the client is generic over;
//! [`HttpClient`] is the production implementation on top of `reqwest`.

mod http;
#[cfg(test)]
pub(crate) mod scripted;

pub use http::HttpClient;

use serde_json::Value;

use crate::error::{ParseError, ProtocolError};

/// Service paths, relative to the backend base URL.
pub mod paths {
    /// Credential login, answers `{"d": "<token>"}`.
    pub const LOGIN: &str = "control/LoginPage.aspx/DoStandardLogin";
    /// Lists the homes of the account.
    pub const ENUM_HOMES: &str = "1.0/HomeCloudService.svc/EnumHomes";
    /// Full topology and state of one home.
    pub const GET_DATA_PACKET: &str = "1.0/HomeCloudService.svc/GetDataPacket";
    /// Sets mode, fan speed and target temperature of an endpoint.
    pub const HVAC_SET_MODES: &str = "1.0/HomeCloudCommandService.svc/HVACSetModes";
    /// Sends a packed swing/preset command byte to an endpoint.
    pub const HVAC_SEND_COMMAND: &str = "1.0/HomeCloudCommandService.svc/HVACSendCommand";
}

/// Successful response from the service.
#[derive(Debug, Clone)]
pub struct CommandResponse {
    /// The raw response body.
    body: String,
}

impl CommandResponse {
    /// Creates a new response with the given body.
    #[must_use]
    pub fn new(body: String) -> Self {
        Self { body }
    }

    /// Returns the raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parses the response as a specific type.
    ///
    /// # Errors
    ///
    /// Returns error if the JSON cannot be parsed into the target type.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> Result<T, ParseError> {
        serde_json::from_str(&self.body).map_err(Into::into)
    }
}

/// Trait for transports that can deliver requests to the cloud service.
#[allow(async_fn_in_trait)]
pub trait Protocol {
    /// Posts a JSON body to a service path and returns the response.
    ///
    /// # Arguments
    ///
    /// * `path` - Path relative to the base URL, see [`paths`]
    /// * `body` - The JSON request body
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` on transport failure or a non-success status.
    async fn post(&self, path: &str, body: &Value) -> Result<CommandResponse, ProtocolError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_typed_body() {
        #[derive(serde::Deserialize)]
        struct Login {
            d: String,
        }

        let response = CommandResponse::new(r#"{"d":"abc"}"#.to_string());
        let login: Login = response.parse().unwrap();
        assert_eq!(login.d, "abc");
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let response = CommandResponse::new("<html>".to_string());
        assert!(matches!(response.parse::<Value>(), Err(ParseError::Json(_))));
    }
}
