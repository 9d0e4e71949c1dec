// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types and lookup helpers.

use std::fmt;

use crate::topology::{RawParameter, RawValue};

/// Telemetry value types understood by the decoder.
///
/// Units report many more types; anything not listed here is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Room temperature, °C.
    Temperature,
    /// Operating mode code.
    Mode,
    /// Fan speed code.
    FanSpeed,
    /// Packed swing/preset flags.
    SwingFlags,
    /// Setpoint, °C.
    TargetTemperature,
}

impl ValueType {
    /// Returns the wire discriminator.
    #[must_use]
    pub const fn code(&self) -> u32 {
        match self {
            Self::Temperature => 13,
            Self::Mode => 14,
            Self::FanSpeed => 15,
            Self::SwingFlags => 18,
            Self::TargetTemperature => 20,
        }
    }

    /// Maps a wire discriminator.
    #[must_use]
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            13 => Some(Self::Temperature),
            14 => Some(Self::Mode),
            15 => Some(Self::FanSpeed),
            18 => Some(Self::SwingFlags),
            20 => Some(Self::TargetTemperature),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}({})", self.code())
    }
}

/// Returns the first item accepted by `matches`.
///
/// A miss is normal (offline units, optional parameters) and only logged.
pub(crate) fn find_first<'a, T>(
    items: &'a [T],
    field: &'static str,
    wanted: &dyn fmt::Display,
    matches: impl Fn(&T) -> bool,
) -> Option<&'a T> {
    let found = items.iter().find(|item| matches(item));
    if found.is_none() {
        tracing::debug!(field, wanted = %wanted, "Value not found");
    }
    found
}

/// Returns the text of the first reading of the given type.
pub(crate) fn find_value(values: &[RawValue], value_type: ValueType) -> Option<&str> {
    find_first(values, "ValueType", &value_type, |v| {
        v.value_type == value_type.code()
    })?
    .value
    .as_deref()
    .map(str::trim)
    .filter(|text| !text.is_empty())
}

/// Returns the text of the first parameter with the given name.
pub(crate) fn find_parameter<'a>(parameters: &'a [RawParameter], name: &str) -> Option<&'a str> {
    find_first(parameters, "Name", &name, |p| p.name.as_deref() == Some(name))?
        .value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

/// Parses a decimal reading.
pub(crate) fn parse_float(text: &str, what: &dyn fmt::Display) -> Option<f64> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            tracing::warn!(value = text, field = %what, "Unparseable reading, treating as unknown");
            None
        }
    }
}

/// Parses an integer code; integral decimals such as `"254.0"` are accepted.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn parse_code(text: &str, what: &dyn fmt::Display) -> Option<u8> {
    if let Ok(code) = text.parse::<u8>() {
        return Some(code);
    }
    match text.parse::<f64>() {
        Ok(value) if value.fract().abs() < f64::EPSILON && (0.0..=255.0).contains(&value) => {
            Some(value as u8)
        }
        _ => {
            tracing::warn!(value = text, field = %what, "Unparseable code, treating as unknown");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_type_codes() {
        for code in [13, 14, 15, 18, 20] {
            assert_eq!(ValueType::from_code(code).unwrap().code(), code);
        }
        assert_eq!(ValueType::from_code(19), None);
    }

    #[test]
    fn first_match_wins() {
        let values = vec![RawValue::new(14, "1"), RawValue::new(14, "2")];
        assert_eq!(find_value(&values, ValueType::Mode), Some("1"));
    }

    #[test]
    fn miss_is_none() {
        let values = vec![RawValue::new(13, "21")];
        assert_eq!(find_value(&values, ValueType::TargetTemperature), None);
        assert_eq!(find_value(&[], ValueType::Temperature), None);
    }

    #[test]
    fn empty_text_is_none() {
        let values = vec![RawValue::new(13, " ")];
        assert_eq!(find_value(&values, ValueType::Temperature), None);
    }

    #[test]
    fn parameter_lookup() {
        let parameters = vec![RawParameter {
            name: Some("SetpointMaxC".to_string()),
            value: Some("32".to_string()),
        }];
        assert_eq!(find_parameter(&parameters, "SetpointMaxC"), Some("32"));
        assert_eq!(find_parameter(&parameters, "SetpointMinC"), None);
    }

    #[test]
    fn codes_accept_integral_decimals() {
        let what = ValueType::Mode;
        assert_eq!(parse_code("254", &what), Some(254));
        assert_eq!(parse_code("2.0", &what), Some(2));
        assert_eq!(parse_code("2.5", &what), None);
        assert_eq!(parse_code("-1", &what), None);
        assert_eq!(parse_code("cool", &what), None);
    }

    #[test]
    fn floats_reject_garbage() {
        let what = ValueType::Temperature;
        assert_eq!(parse_float("23.5", &what), Some(23.5));
        assert_eq!(parse_float("NaN", &what), None);
        assert_eq!(parse_float("abc", &what), None);
    }
}
