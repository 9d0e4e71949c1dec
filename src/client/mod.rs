// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level client for one cloud account.
//!
//! [`SolidmationClient`] ties the layers together: the [`Session`] keeps the
//! account logged in, reads go through the topology and telemetry decoders,
//! and writes are encoded by the [`command`](crate::command) module.
//!
//! ```no_run
//! use solidmation_lib::SolidmationClient;
//! use solidmation_lib::types::{FanMode, HvacMode, PresetMode, SwingMode};
//!
//! # async fn example() -> solidmation_lib::Result<()> {
//! let client = SolidmationClient::builder("me@example.com", "secret").build()?;
//!
//! for home in client.list_homes().await? {
//!     for device in &client.list_devices(home.home_id).await? {
//!         println!("{}: {:?}", device.name(), device.state());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod builder;

pub use builder::ClientBuilder;

use std::fmt;

use chrono::Utc;
use parking_lot::RwLock;
use tracing::{Instrument, Span};

use crate::command::{Command, HvacModesCommand, SendCommand, SetModeAck};
use crate::config::{Backend, ClientConfig, account_label};
use crate::error::{Error, ParseError};
use crate::protocol::{CommandResponse, HttpClient, Protocol, paths};
use crate::session::Session;
use crate::state::{Device, DeviceSet, DeviceSnapshot};
use crate::telemetry::decode_devices;
use crate::topology::{
    DataPacketResponse, EnumHomesResponse, Home, RawPacket, data_packet_payload,
};
use crate::types::{DeviceId, FanMode, HvacMode, PresetMode, SwingMode};

/// Client for the HVAC units of one Solidmation cloud account.
///
/// # Type Parameter
///
/// `P` is the transport, [`HttpClient`] unless a different [`Protocol`] is
/// plugged in with [`with_protocol`](Self::with_protocol).
///
/// # Logging
///
/// Every operation runs inside the client's [`Span`], which by default
/// carries the backend and account. Hosts that manage several accounts can
/// pass their own span with [`ClientBuilder::with_span`].
///
/// # Concurrency
///
/// Calls may be issued concurrently from one task, but writes to the same
/// unit should be serialized by the caller: the service applies them in
/// arrival order and there is no read-back.
pub struct SolidmationClient<P: Protocol = HttpClient> {
    session: Session<P>,
    backend: Backend,
    span: Span,
    snapshot: RwLock<Option<DeviceSnapshot>>,
}

impl SolidmationClient<HttpClient> {
    /// Returns a builder for the given account on the default backend.
    #[must_use]
    pub fn builder(username: impl Into<String>, password: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(ClientConfig::new(username, password))
    }

    /// Creates an HTTP client from an account configuration.
    ///
    /// No request is made; the first operation logs in.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or the HTTP client cannot be
    /// created.
    pub fn from_config(config: &ClientConfig) -> Result<Self, Error> {
        let protocol = HttpClient::from_config(config)?;
        Ok(Self::with_protocol(protocol, config))
    }
}

impl<P: Protocol> SolidmationClient<P> {
    /// Creates a client over a custom transport.
    ///
    /// Only the credentials and backend of `config` are used; address and
    /// timeout belong to the transport.
    pub fn with_protocol(protocol: P, config: &ClientConfig) -> Self {
        let span = tracing::info_span!(
            "solidmation",
            backend = %config.backend(),
            account = %account_label(config.username()),
        );
        Self {
            session: Session::new(protocol, config.username(), config.password()),
            backend: config.backend(),
            span,
            snapshot: RwLock::new(None),
        }
    }

    /// Replaces the span operations are recorded in.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Returns the backend deployment.
    #[must_use]
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Returns the session.
    #[must_use]
    pub fn session(&self) -> &Session<P> {
        &self.session
    }

    /// Returns the span operations are recorded in.
    #[must_use]
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Returns the devices decoded by the last successful
    /// [`list_devices`](Self::list_devices), with the time they were fetched.
    #[must_use]
    pub fn snapshot(&self) -> Option<DeviceSnapshot> {
        self.snapshot.read().clone()
    }

    // ========== Session ==========

    /// Logs in and returns the new token.
    ///
    /// Other operations log in on demand; calling this is only needed to
    /// validate credentials up front.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Authentication`](crate::error::AuthError::Authentication)
    /// if the credentials are rejected.
    pub async fn login(&self) -> Result<String, Error> {
        self.session.login().instrument(self.span.clone()).await
    }

    // ========== Topology ==========

    /// Lists the homes of the account.
    ///
    /// An account without homes yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response has no
    /// `EnumHomesResult`.
    pub async fn list_homes(&self) -> Result<Vec<Home>, Error> {
        async {
            let response = self
                .session
                .request(paths::ENUM_HOMES, &serde_json::Map::new())
                .await?;
            let result = response
                .parse::<EnumHomesResponse>()?
                .result
                .ok_or_else(|| ParseError::MissingField("EnumHomesResult".to_string()))?;

            let homes = result.homes.unwrap_or_default();
            if homes.is_empty() {
                tracing::warn!("Account has no homes");
            } else {
                tracing::debug!(homes = homes.len(), "Listed homes");
            }
            Ok::<_, Error>(homes)
        }
        .instrument(self.span.clone())
        .await
    }

    /// Fetches the undecoded data packet of a home.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response has no
    /// `GetDataPacketResult`.
    pub async fn fetch_raw_packet(&self, home_id: u64) -> Result<RawPacket, Error> {
        self.raw_packet(home_id)
            .instrument(self.span.clone())
            .await
    }

    /// Fetches and decodes the devices of a home.
    ///
    /// The result also replaces the [`snapshot`](Self::snapshot).
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the packet is malformed, see
    /// [`decode_devices`].
    pub async fn list_devices(&self, home_id: u64) -> Result<DeviceSet, Error> {
        async {
            let packet = self.raw_packet(home_id).await?;
            let devices = decode_devices(&packet, home_id, self.backend.flag_codec())?;

            *self.snapshot.write() = Some(DeviceSnapshot {
                home_id,
                fetched_at: Utc::now(),
                devices: devices.clone(),
            });

            Ok::<_, Error>(devices)
        }
        .instrument(self.span.clone())
        .await
    }

    /// Fetches a home and returns one of its devices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if the home has no such device, or any
    /// error of [`list_devices`](Self::list_devices).
    pub async fn get_device_status(
        &self,
        home_id: u64,
        device_id: DeviceId,
    ) -> Result<Device, Error> {
        let mut devices = self.list_devices(home_id).await?;
        devices
            .take(device_id)
            .ok_or(Error::DeviceNotFound { home_id, device_id })
    }

    async fn raw_packet(&self, home_id: u64) -> Result<RawPacket, Error> {
        let response = self
            .session
            .request(paths::GET_DATA_PACKET, &data_packet_payload(home_id))
            .await?;
        let packet = response
            .parse::<DataPacketResponse>()?
            .result
            .ok_or_else(|| ParseError::MissingField("GetDataPacketResult".to_string()))?;
        Ok(packet)
    }

    // ========== Control ==========

    /// Sends a single command.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn send<C: Command>(&self, command: &C) -> Result<CommandResponse, Error> {
        self.dispatch(command).instrument(self.span.clone()).await
    }

    /// Sets mode, setpoint, fan speed, swing and preset of a unit.
    ///
    /// Mode, setpoint and fan go out in one write. Swing and preset are folded
    /// into a command byte by the backend's [`FlagCodec`](crate::command::FlagCodec)
    /// and sent as a second write, unless both are at their defaults.
    ///
    /// Nothing is read back; fetch the device to see the applied state. A
    /// write that times out is not retried and leaves the unit in an unknown
    /// state.
    ///
    /// # Errors
    ///
    /// Returns error if either write fails. When the second write fails the
    /// first one has already been applied.
    pub async fn set_mode(
        &self,
        device_id: DeviceId,
        mode: HvacMode,
        target_temperature: f64,
        fan: FanMode,
        swing: SwingMode,
        preset: PresetMode,
    ) -> Result<SetModeAck, Error> {
        async {
            let modes = HvacModesCommand::new(device_id, target_temperature)
                .with_mode(mode)
                .with_fan(fan);
            let modes_response = self.dispatch(&modes).await?;

            let sub_command = match self.backend.flag_codec().encode(swing, preset) {
                Some(byte) => {
                    let response = self.dispatch(&SendCommand::new(device_id, byte)).await?;
                    Some((byte, response))
                }
                None => None,
            };

            tracing::info!(
                %device_id,
                %mode,
                target_temperature,
                %fan,
                %swing,
                %preset,
                sub_command = ?sub_command.as_ref().map(|(byte, _)| *byte),
                "Mode set"
            );

            Ok::<_, Error>(SetModeAck::new(modes_response, sub_command))
        }
        .instrument(self.span.clone())
        .await
    }

    async fn dispatch<C: Command>(&self, command: &C) -> Result<CommandResponse, Error> {
        self.session
            .request(command.path(), &command.payload())
            .await
    }
}

impl<P: Protocol + fmt::Debug> fmt::Debug for SolidmationClient<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolidmationClient")
            .field("session", &self.session)
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}
