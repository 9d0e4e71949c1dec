// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoding of a unit's telemetry readings into [`ClimateState`].

use crate::command::FlagCodec;
use crate::state::ClimateState;
use crate::topology::RawValue;
use crate::types::{FanMode, HvacMode};

use super::values::{ValueType, find_value, parse_code, parse_float};

/// Room temperatures at or below this are a sensor fault marker.
const SENSOR_FAULT_CELSIUS: f64 = -50.0;

/// Setpoint reported while the unit has none.
const UNSET_SETPOINT: f64 = 255.0;

/// Setpoint substituted for [`UNSET_SETPOINT`].
const FALLBACK_SETPOINT: f64 = 20.0;

/// Decodes one unit's readings.
///
/// Only the first reading of each type is considered. Absent, unparseable or
/// unknown readings leave the matching field unknown; decoding never fails.
///
/// # Examples
///
/// ```
/// use solidmation_lib::command::PackedFlags;
/// use solidmation_lib::telemetry::decode_state;
/// use solidmation_lib::topology::RawValue;
/// use solidmation_lib::types::HvacMode;
///
/// let values = [RawValue::new(14, "1"), RawValue::new(20, "24")];
/// let state = decode_state(&values, &PackedFlags);
///
/// assert_eq!(state.mode(), Some(HvacMode::Cool));
/// assert_eq!(state.target_temperature(), Some(24.0));
/// assert_eq!(state.temperature(), None);
/// ```
pub fn decode_state(values: &[RawValue], flags: &dyn FlagCodec) -> ClimateState {
    let mut state = ClimateState::new();

    let ignored = values
        .iter()
        .filter(|v| ValueType::from_code(v.value_type).is_none())
        .count();
    if ignored > 0 {
        tracing::trace!(ignored, "Skipping readings of unhandled types");
    }

    if let Some(celsius) = read_float(values, ValueType::Temperature) {
        if celsius > SENSOR_FAULT_CELSIUS {
            state.set_temperature(celsius);
        } else {
            tracing::debug!(celsius, "Room temperature below sensor range");
        }
    }

    if let Some(celsius) = read_float(values, ValueType::TargetTemperature) {
        if (celsius - UNSET_SETPOINT).abs() < f64::EPSILON {
            state.set_target_temperature(FALLBACK_SETPOINT);
        } else {
            state.set_target_temperature(celsius);
        }
    }

    if let Some(code) = read_code(values, ValueType::Mode) {
        match HvacMode::from_code(code) {
            Some(mode) => state.set_mode(mode),
            None => tracing::warn!(code, "Unknown HVAC mode code"),
        }
    }

    if let Some(code) = read_code(values, ValueType::FanSpeed) {
        match FanMode::from_code(code) {
            Some(fan) => state.set_fan_speed(fan),
            None => tracing::warn!(code, "Unknown fan speed code"),
        }
    }

    if let Some(code) = read_code(values, ValueType::SwingFlags) {
        let (swing, preset) = flags.decode(code);
        if let Some(swing) = swing {
            state.set_swing_mode(swing);
        }
        if let Some(preset) = preset {
            state.set_preset_mode(preset);
        }
    }

    state
}

fn read_float(values: &[RawValue], value_type: ValueType) -> Option<f64> {
    find_value(values, value_type).and_then(|text| parse_float(text, &value_type))
}

fn read_code(values: &[RawValue], value_type: ValueType) -> Option<u8> {
    find_value(values, value_type).and_then(|text| parse_code(text, &value_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{PackedFlags, SwingOnlyFlags};
    use crate::types::{PresetMode, SwingMode};

    fn values(pairs: &[(u32, &str)]) -> Vec<RawValue> {
        pairs.iter().map(|&(t, v)| RawValue::new(t, v)).collect()
    }

    #[test]
    fn decodes_full_reading() {
        let state = decode_state(
            &values(&[(13, "23.5"), (14, "2"), (15, "3"), (18, "16"), (20, "26")]),
            &PackedFlags,
        );

        assert_eq!(state.temperature(), Some(23.5));
        assert_eq!(state.mode(), Some(HvacMode::Heat));
        assert_eq!(state.fan_speed(), Some(FanMode::High));
        assert_eq!(state.swing_mode(), Some(SwingMode::Horizontal));
        assert_eq!(state.target_temperature(), Some(26.0));
    }

    #[test]
    fn sensor_fault_temperature_is_unknown() {
        let state = decode_state(&values(&[(13, "-50")]), &PackedFlags);
        assert_eq!(state.temperature(), None);

        let state = decode_state(&values(&[(13, "-49.5")]), &PackedFlags);
        assert_eq!(state.temperature(), Some(-49.5));
    }

    #[test]
    fn unset_setpoint_falls_back_to_twenty() {
        let state = decode_state(&values(&[(20, "255")]), &PackedFlags);
        assert_eq!(state.target_temperature(), Some(20.0));
    }

    #[test]
    fn auto_codes() {
        let state = decode_state(&values(&[(14, "254"), (15, "254")]), &PackedFlags);
        assert_eq!(state.mode(), Some(HvacMode::Auto));
        assert_eq!(state.fan_speed(), Some(FanMode::Auto));
    }

    #[test]
    fn unknown_codes_are_unknown() {
        let state = decode_state(&values(&[(14, "7"), (15, "9"), (18, "2")]), &PackedFlags);
        assert_eq!(state.mode(), None);
        assert_eq!(state.fan_speed(), None);
        assert_eq!(state.swing_mode(), None);
        assert_eq!(state.preset_mode(), None);
    }

    #[test]
    fn garbage_is_unknown() {
        let state = decode_state(&values(&[(13, "n/a"), (14, "cool")]), &PackedFlags);
        assert_eq!(state, ClimateState::new());
    }

    #[test]
    fn missing_readings_are_unknown() {
        let state = decode_state(&[], &PackedFlags);
        assert_eq!(state, ClimateState::new());
    }

    #[test]
    fn first_reading_of_a_type_wins() {
        let state = decode_state(&values(&[(14, "1"), (14, "2")]), &PackedFlags);
        assert_eq!(state.mode(), Some(HvacMode::Cool));
    }

    #[test]
    fn unhandled_reading_types_are_skipped() {
        let state = decode_state(&values(&[(19, "7"), (99, "x"), (14, "1")]), &PackedFlags);
        assert_eq!(state.mode(), Some(HvacMode::Cool));
        assert_eq!(state.temperature(), None);
    }

    #[test]
    fn packed_boost_bit() {
        let state = decode_state(&values(&[(18, "8")]), &PackedFlags);
        assert_eq!(state.swing_mode(), Some(SwingMode::Off));
        assert_eq!(state.preset_mode(), Some(PresetMode::Boost));
    }

    #[test]
    fn swing_only_vertical() {
        let state = decode_state(&values(&[(18, "97")]), &SwingOnlyFlags);
        assert_eq!(state.swing_mode(), Some(SwingMode::Vertical));
        assert_eq!(state.preset_mode(), None);
    }
}
