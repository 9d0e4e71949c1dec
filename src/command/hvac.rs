// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HVAC control commands.

use serde_json::{Map, Value, json};

use crate::protocol::paths;
use crate::types::{DeviceId, FanMode, HvacMode};

use super::Command;

/// Value of the `flags` field of a set-modes write; the cloud expects it fixed.
const SET_MODES_FLAGS: u8 = 255;

/// Sets mode, fan speed and setpoint of a unit in one write.
///
/// `None` for mode or fan sends the "no change" code.
///
/// # Examples
///
/// ```
/// use solidmation_lib::command::{Command, HvacModesCommand};
/// use solidmation_lib::types::{DeviceId, FanMode, HvacMode};
///
/// let cmd = HvacModesCommand::new(DeviceId::new(7), 24.0)
///     .with_mode(HvacMode::Cool)
///     .with_fan(FanMode::Auto);
///
/// let payload = cmd.payload();
/// assert_eq!(payload["desiredTempC"], "24.0");
/// assert_eq!(payload["mode"], 1);
/// assert_eq!(payload["fanMode"], 254);
/// assert_eq!(payload["flags"], 255);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HvacModesCommand {
    endpoint: DeviceId,
    target_temperature: f64,
    mode: Option<HvacMode>,
    fan: Option<FanMode>,
}

impl HvacModesCommand {
    /// Creates a command that only changes the setpoint.
    #[must_use]
    pub fn new(endpoint: DeviceId, target_temperature: f64) -> Self {
        Self {
            endpoint,
            target_temperature,
            mode: None,
            fan: None,
        }
    }

    /// Sets the operating mode.
    #[must_use]
    pub fn with_mode(mut self, mode: HvacMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Sets the fan speed.
    #[must_use]
    pub fn with_fan(mut self, fan: FanMode) -> Self {
        self.fan = Some(fan);
        self
    }

    /// Returns the target endpoint.
    #[must_use]
    pub fn endpoint(&self) -> DeviceId {
        self.endpoint
    }

    /// Returns the requested mode, `None` for "no change".
    #[must_use]
    pub fn mode(&self) -> Option<HvacMode> {
        self.mode
    }

    /// Returns the requested fan speed, `None` for "no change".
    #[must_use]
    pub fn fan(&self) -> Option<FanMode> {
        self.fan
    }
}

impl Command for HvacModesCommand {
    fn path(&self) -> &'static str {
        paths::HVAC_SET_MODES
    }

    fn payload(&self) -> Map<String, Value> {
        let mode = self.mode.map_or(HvacMode::NO_CHANGE_CODE, |m| m.code());
        let fan = self.fan.map_or(FanMode::NO_CHANGE_CODE, |f| f.code());

        let mut payload = Map::new();
        payload.insert("endpointID".to_string(), json!(self.endpoint));
        payload.insert(
            "desiredTempC".to_string(),
            json!(format_temperature(self.target_temperature)),
        );
        payload.insert("fanMode".to_string(), json!(fan));
        payload.insert("flags".to_string(), json!(SET_MODES_FLAGS));
        payload.insert("mode".to_string(), json!(mode));
        payload
    }
}

/// Sends a packed swing/preset byte to a unit.
///
/// The byte comes from the backend's [`FlagCodec`](super::FlagCodec).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendCommand {
    endpoint: DeviceId,
    sub_command: u8,
}

impl SendCommand {
    /// Creates the command.
    #[must_use]
    pub fn new(endpoint: DeviceId, sub_command: u8) -> Self {
        Self {
            endpoint,
            sub_command,
        }
    }

    /// Returns the command byte.
    #[must_use]
    pub fn sub_command(&self) -> u8 {
        self.sub_command
    }
}

impl Command for SendCommand {
    fn path(&self) -> &'static str {
        paths::HVAC_SEND_COMMAND
    }

    fn payload(&self) -> Map<String, Value> {
        let mut payload = Map::new();
        payload.insert("endpointID".to_string(), json!(self.endpoint));
        payload.insert("subCommand".to_string(), json!(self.sub_command));
        payload
    }
}

/// Formats a setpoint the way the service expects it: always with a
/// fractional part (`24.0`, `22.5`).
fn format_temperature(celsius: f64) -> String {
    if celsius.fract().abs() < f64::EPSILON {
        format!("{celsius:.1}")
    } else {
        celsius.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_modes_payload() {
        let cmd = HvacModesCommand::new(DeviceId::new(1234), 22.5)
            .with_mode(HvacMode::Heat)
            .with_fan(FanMode::Low);

        assert_eq!(cmd.path(), "1.0/HomeCloudCommandService.svc/HVACSetModes");
        assert_eq!(
            Value::Object(cmd.payload()),
            json!({
                "endpointID": 1234,
                "desiredTempC": "22.5",
                "fanMode": 1,
                "flags": 255,
                "mode": 2
            })
        );
    }

    #[test]
    fn no_change_codes() {
        let payload = HvacModesCommand::new(DeviceId::new(1), 20.0).payload();
        assert_eq!(payload["mode"], 255);
        assert_eq!(payload["fanMode"], 255);
    }

    #[test]
    fn send_command_payload() {
        let cmd = SendCommand::new(DeviceId::new(99), 0x71);
        assert_eq!(
            cmd.path(),
            "1.0/HomeCloudCommandService.svc/HVACSendCommand"
        );
        assert_eq!(
            Value::Object(cmd.payload()),
            json!({"endpointID": 99, "subCommand": 113})
        );
    }

    #[test]
    fn temperature_formatting() {
        assert_eq!(format_temperature(24.0), "24.0");
        assert_eq!(format_temperature(18.5), "18.5");
        assert_eq!(format_temperature(-1.0), "-1.0");
    }
}
