// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Normalized climate state of one unit.

use crate::types::{FanMode, HvacMode, PresetMode, SwingMode};

/// Live climate state decoded from a unit's telemetry.
///
/// Every field is optional: `None` means the unit did not report the value or
/// reported something that has no normalized meaning. It is never a stand-in
/// for zero or for a particular mode; choosing a display default is up to the
/// caller.
///
/// # Examples
///
/// ```
/// use solidmation_lib::state::ClimateState;
/// use solidmation_lib::types::HvacMode;
///
/// let mut state = ClimateState::new();
/// assert_eq!(state.mode(), None);
///
/// state.set_mode(HvacMode::Cool);
/// state.set_target_temperature(24.0);
/// assert_eq!(state.mode(), Some(HvacMode::Cool));
/// assert!(state.is_active());
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClimateState {
    /// Room temperature in °C.
    temperature: Option<f64>,
    /// Setpoint in °C.
    target_temperature: Option<f64>,
    /// Operating mode.
    mode: Option<HvacMode>,
    /// Fan speed.
    fan_speed: Option<FanMode>,
    /// Swing position.
    swing_mode: Option<SwingMode>,
    /// Preset, when the backend reports it.
    preset_mode: Option<PresetMode>,
}

impl ClimateState {
    /// Creates a state with every value unknown.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Temperatures ==========

    /// Gets the room temperature in °C.
    #[must_use]
    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    /// Sets the room temperature.
    pub fn set_temperature(&mut self, celsius: f64) {
        self.temperature = Some(celsius);
    }

    /// Gets the setpoint in °C.
    #[must_use]
    pub fn target_temperature(&self) -> Option<f64> {
        self.target_temperature
    }

    /// Sets the setpoint.
    pub fn set_target_temperature(&mut self, celsius: f64) {
        self.target_temperature = Some(celsius);
    }

    // ========== Modes ==========

    /// Gets the operating mode.
    #[must_use]
    pub fn mode(&self) -> Option<HvacMode> {
        self.mode
    }

    /// Sets the operating mode.
    pub fn set_mode(&mut self, mode: HvacMode) {
        self.mode = Some(mode);
    }

    /// Gets the fan speed.
    #[must_use]
    pub fn fan_speed(&self) -> Option<FanMode> {
        self.fan_speed
    }

    /// Sets the fan speed.
    pub fn set_fan_speed(&mut self, fan: FanMode) {
        self.fan_speed = Some(fan);
    }

    /// Gets the swing position.
    #[must_use]
    pub fn swing_mode(&self) -> Option<SwingMode> {
        self.swing_mode
    }

    /// Sets the swing position.
    pub fn set_swing_mode(&mut self, swing: SwingMode) {
        self.swing_mode = Some(swing);
    }

    /// Gets the preset.
    #[must_use]
    pub fn preset_mode(&self) -> Option<PresetMode> {
        self.preset_mode
    }

    /// Sets the preset.
    pub fn set_preset_mode(&mut self, preset: PresetMode) {
        self.preset_mode = Some(preset);
    }

    /// Returns `true` if the unit is known to be running.
    ///
    /// Unknown mode counts as not active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.mode, Some(mode) if mode != HvacMode::Off)
    }
}
