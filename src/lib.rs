// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Solidmation Lib - A Rust client for BGH Smart and MyHabeetat air
//! conditioners.
//!
//! Units built on the Solidmation platform are not reachable locally; they
//! are read and controlled through the vendor's cloud service. This library
//! provides an async API over that service.
//!
//! # Supported Features
//!
//! - **Session handling**: credential login with lazy re-authentication
//! - **Topology**: homes of an account and the units of each home
//! - **State**: room temperature, setpoint, mode, fan speed, swing and preset
//! - **Control**: mode, setpoint and fan in one write, swing/preset in a second
//!
//! # Supported Backends
//!
//! - [`Backend::Bgh`]: BGH Smart (`bgh-services.solidmation.com`)
//! - [`Backend::MyHabeetat`]: MyHabeetat (`myhabeetatcloud-services.solidmation.com`)
//!
//! # Quick Start
//!
//! ```no_run
//! use solidmation_lib::SolidmationClient;
//! use solidmation_lib::types::{FanMode, HvacMode, PresetMode, SwingMode};
//!
//! #[tokio::main]
//! async fn main() -> solidmation_lib::Result<()> {
//!     let client = SolidmationClient::builder("me@example.com", "secret").build()?;
//!
//!     let homes = client.list_homes().await?;
//!     let Some(home) = homes.first() else {
//!         return Ok(());
//!     };
//!
//!     for device in &client.list_devices(home.home_id).await? {
//!         if let Some(state) = device.state() {
//!             println!("{}: {:?} at {:?}°C", device.name(), state.mode(), state.temperature());
//!         }
//!
//!         client
//!             .set_mode(
//!                 device.device_id(),
//!                 HvacMode::Cool,
//!                 24.0,
//!                 FanMode::Auto,
//!                 SwingMode::Off,
//!                 PresetMode::None,
//!             )
//!             .await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Loading Configuration
//!
//! [`ClientConfig`] deserializes from the host's configuration file:
//!
//! ```no_run
//! use solidmation_lib::{ClientConfig, SolidmationClient};
//!
//! # fn example(json: &str) -> solidmation_lib::Result<()> {
//! let config: ClientConfig = serde_json::from_str(json)
//!     .map_err(solidmation_lib::ParseError::from)?;
//! let client = SolidmationClient::from_config(&config)?;
//! # Ok(())
//! # }
//! ```

mod client;
pub mod command;
mod config;
pub mod error;
pub mod protocol;
pub mod session;
pub mod state;
pub mod telemetry;
pub mod topology;
pub mod types;

pub use client::{ClientBuilder, SolidmationClient};
pub use command::{Command, FlagCodec, HvacModesCommand, SendCommand, SetModeAck};
pub use config::{Backend, ClientConfig};
pub use error::{AuthError, Error, ParseError, ProtocolError, Result, ValueError};
pub use protocol::HttpClient;
pub use state::{ClimateState, Device, DeviceMetadata, DeviceSet, DeviceSnapshot};
pub use topology::Home;
pub use types::{DeviceId, FanMode, HvacMode, PresetMode, SwingMode};
