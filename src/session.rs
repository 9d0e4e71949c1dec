// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session management.
//!
//! The cloud hands out an opaque token in exchange for the account
//! credentials and expects it in the body of every other request. A
//! [`Session`] owns the transport, logs in lazily on first use, and attaches
//! the token to outgoing requests.
//!
//! # Re-authentication
//!
//! When an authenticated request is answered with HTTP 401, the token is
//! dropped, the session logs in again and repeats the request once. A second
//! rejection surfaces [`AuthError::InvalidSession`]; nothing else is retried.

use std::fmt;

use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::config::account_label;
use crate::error::{AuthError, Error, ProtocolError};
use crate::protocol::{CommandResponse, Protocol, paths};

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    d: Option<String>,
}

/// An authenticated channel to the cloud service for one account.
pub struct Session<P: Protocol> {
    protocol: P,
    username: String,
    password: String,
    token: Mutex<Option<String>>,
}

impl<P: Protocol> Session<P> {
    /// Creates an unauthenticated session over the given transport.
    pub fn new(protocol: P, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            protocol,
            username: username.into(),
            password: password.into(),
            token: Mutex::new(None),
        }
    }

    /// Returns the underlying transport.
    pub fn protocol(&self) -> &P {
        &self.protocol
    }

    /// Returns the account user name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the current token, if logged in.
    pub fn token(&self) -> Option<String> {
        self.token.lock().clone()
    }

    /// Returns `true` if a token is held.
    pub fn is_authenticated(&self) -> bool {
        self.token.lock().is_some()
    }

    /// Drops the current token so the next request logs in again.
    pub fn invalidate(&self) {
        self.token.lock().take();
    }

    /// Logs in with the account credentials and stores the returned token.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Authentication`] if the service returns an empty token
    ///   or rejects the credentials with 401
    /// - [`AuthError::LoginTimeout`] if the request times out
    /// - other protocol or parse errors unchanged
    pub async fn login(&self) -> Result<String, Error> {
        let body = json!({
            "user": self.username,
            "password": self.password,
        });

        let response = match self.protocol.post(paths::LOGIN, &body).await {
            Ok(response) => response,
            Err(ProtocolError::Timeout(after)) => {
                return Err(AuthError::LoginTimeout(after).into());
            }
            Err(ProtocolError::Unauthorized) => {
                self.invalidate();
                return Err(AuthError::Authentication.into());
            }
            Err(e) => return Err(e.into()),
        };

        let token = response
            .parse::<LoginResponse>()?
            .d
            .filter(|token| !token.is_empty());

        let Some(token) = token else {
            self.invalidate();
            tracing::warn!(
                account = %account_label(&self.username),
                "Login rejected: empty token"
            );
            return Err(AuthError::Authentication.into());
        };

        *self.token.lock() = Some(token.clone());
        tracing::info!(account = %account_label(&self.username), "Logged in");
        Ok(token)
    }

    /// Returns the current token, logging in first if none is held.
    ///
    /// # Errors
    ///
    /// Returns error if a login is needed and fails.
    pub async fn ensure_session(&self) -> Result<String, Error> {
        if let Some(token) = self.token() {
            return Ok(token);
        }
        self.login().await
    }

    /// Sends an authenticated request.
    ///
    /// The token is added to `payload` under `token`. On a 401 the session
    /// logs in again and retries once.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidSession`] if the retried request is rejected too
    /// - login, protocol and parse errors unchanged
    pub async fn request(
        &self,
        path: &str,
        payload: &Map<String, Value>,
    ) -> Result<CommandResponse, Error> {
        let token = self.ensure_session().await?;

        match self.post_with_token(path, payload, &token).await {
            Err(ProtocolError::Unauthorized) => {
                tracing::warn!(path, "Session token rejected, logging in again");
                self.invalidate();
                let token = self.login().await?;

                match self.post_with_token(path, payload, &token).await {
                    Err(ProtocolError::Unauthorized) => {
                        self.invalidate();
                        Err(AuthError::InvalidSession.into())
                    }
                    other => other.map_err(Error::Protocol),
                }
            }
            other => other.map_err(Error::Protocol),
        }
    }

    async fn post_with_token(
        &self,
        path: &str,
        payload: &Map<String, Value>,
        token: &str,
    ) -> Result<CommandResponse, ProtocolError> {
        let mut body = payload.clone();
        body.insert("token".to_string(), json!({ "Token": token }));
        self.protocol.post(path, &Value::Object(body)).await
    }
}

impl<P: Protocol + fmt::Debug> fmt::Debug for Session<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("protocol", &self.protocol)
            .field("username", &self.username)
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::protocol::scripted::ScriptedProtocol;

    fn session(protocol: ScriptedProtocol) -> Session<ScriptedProtocol> {
        Session::new(protocol, "user@example.com", "secret")
    }

    #[tokio::test]
    async fn login_stores_token() {
        let session = session(ScriptedProtocol::default().reply(Ok(r#"{"d":"tok-1"}"#)));

        let token = session.login().await.unwrap();

        assert_eq!(token, "tok-1");
        assert_eq!(session.token().as_deref(), Some("tok-1"));
        let requests = session.protocol().requests();
        assert_eq!(requests[0].0, paths::LOGIN);
        assert_eq!(
            requests[0].1,
            json!({"user": "user@example.com", "password": "secret"})
        );
    }

    #[tokio::test]
    async fn empty_token_is_authentication_error() {
        let session = session(ScriptedProtocol::default().reply(Ok(r#"{"d":""}"#)));

        let err = session.login().await.unwrap_err();

        assert!(matches!(err, Error::Auth(AuthError::Authentication)));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn login_timeout_is_reported_as_such() {
        let session = session(
            ScriptedProtocol::default().reply(Err(ProtocolError::Timeout(Duration::from_secs(10)))),
        );

        let err = session.login().await.unwrap_err();

        assert!(matches!(err, Error::Auth(AuthError::LoginTimeout(_))));
    }

    #[tokio::test]
    async fn request_logs_in_lazily_and_attaches_token() {
        let session = session(
            ScriptedProtocol::default()
                .reply(Ok(r#"{"d":"tok-1"}"#))
                .reply(Ok("{}")),
        );

        let mut payload = Map::new();
        payload.insert("homeID".to_string(), json!(42));
        session.request(paths::GET_DATA_PACKET, &payload).await.unwrap();

        let requests = session.protocol().requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[1].1,
            json!({"homeID": 42, "token": {"Token": "tok-1"}})
        );
    }

    #[tokio::test]
    async fn unauthorized_triggers_single_relogin() {
        let session = session(
            ScriptedProtocol::default()
                .reply(Ok(r#"{"d":"old"}"#))
                .reply(Err(ProtocolError::Unauthorized))
                .reply(Ok(r#"{"d":"new"}"#))
                .reply(Ok("{}")),
        );

        session
            .request(paths::ENUM_HOMES, &Map::new())
            .await
            .unwrap();

        assert_eq!(
            session.protocol().paths(),
            vec![
                paths::LOGIN,
                paths::ENUM_HOMES,
                paths::LOGIN,
                paths::ENUM_HOMES
            ]
        );
        assert_eq!(session.token().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn second_unauthorized_is_invalid_session() {
        let session = session(
            ScriptedProtocol::default()
                .reply(Ok(r#"{"d":"old"}"#))
                .reply(Err(ProtocolError::Unauthorized))
                .reply(Ok(r#"{"d":"new"}"#))
                .reply(Err(ProtocolError::Unauthorized)),
        );

        let err = session
            .request(paths::ENUM_HOMES, &Map::new())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Auth(AuthError::InvalidSession)));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn other_errors_are_not_retried() {
        let session = session(
            ScriptedProtocol::default()
                .reply(Ok(r#"{"d":"tok"}"#))
                .reply(Err(ProtocolError::BadRequest("nope".to_string()))),
        );

        let err = session
            .request(paths::ENUM_HOMES, &Map::new())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Protocol(ProtocolError::BadRequest(_))));
        assert_eq!(session.protocol().paths().len(), 2);
        assert!(session.is_authenticated());
    }
}
