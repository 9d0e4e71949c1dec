// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Control command definitions.
//!
//! Writes to a unit go through two service calls:
//!
//! | Command | Purpose |
//! |---------|---------|
//! | [`HvacModesCommand`] | Mode, fan speed and setpoint |
//! | [`SendCommand`] | Packed swing/preset byte |
//!
//! The packed byte is produced by the backend's [`FlagCodec`].
//!
//! # Examples
//!
//! ```
//! use solidmation_lib::command::{Command, FlagCodec, PackedFlags, SendCommand};
//! use solidmation_lib::types::{DeviceId, PresetMode, SwingMode};
//!
//! let byte = PackedFlags
//!     .encode(SwingMode::Vertical, PresetMode::None)
//!     .unwrap();
//! let cmd = SendCommand::new(DeviceId::new(42), byte);
//!
//! assert_eq!(cmd.payload()["subCommand"], 0x61);
//! ```

mod flags;
mod hvac;

pub use flags::{FlagCodec, PackedFlags, SwingOnlyFlags};
pub use hvac::{HvacModesCommand, SendCommand};

use serde_json::{Map, Value};

use crate::protocol::CommandResponse;

/// A write that can be sent to the cloud service.
///
/// The session adds the token to the payload before sending.
pub trait Command {
    /// Returns the service path, relative to the base URL.
    fn path(&self) -> &'static str;

    /// Returns the JSON body, without the token.
    fn payload(&self) -> Map<String, Value>;
}

/// Acknowledgement of a [`set_mode`](crate::SolidmationClient::set_mode) call.
///
/// Writes are fire-and-forget: the acknowledgement says the service accepted
/// the request, not that the unit applied it. Fetch the device again to
/// observe the new state.
#[derive(Debug, Clone)]
pub struct SetModeAck {
    modes: CommandResponse,
    sub_command: Option<(u8, CommandResponse)>,
}

impl SetModeAck {
    pub(crate) fn new(modes: CommandResponse, sub_command: Option<(u8, CommandResponse)>) -> Self {
        Self { modes, sub_command }
    }

    /// Returns the response to the set-modes write.
    #[must_use]
    pub fn modes_response(&self) -> &CommandResponse {
        &self.modes
    }

    /// Returns the packed byte if a swing/preset command was sent.
    #[must_use]
    pub fn sub_command(&self) -> Option<u8> {
        self.sub_command.as_ref().map(|(byte, _)| *byte)
    }

    /// Returns the response to the swing/preset write, if one was sent.
    #[must_use]
    pub fn sub_command_response(&self) -> Option<&CommandResponse> {
        self.sub_command.as_ref().map(|(_, response)| response)
    }

    /// Returns the number of writes issued.
    #[must_use]
    pub fn writes(&self) -> usize {
        1 + usize::from(self.sub_command.is_some())
    }
}
