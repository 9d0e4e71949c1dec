// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan speed.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Fan speed of an indoor unit.
///
/// # Examples
///
/// ```
/// use solidmation_lib::types::FanMode;
///
/// assert_eq!(FanMode::High.code(), 3);
/// assert_eq!(FanMode::from_code(254), Some(FanMode::Auto));
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FanMode {
    /// Low speed.
    Low,
    /// Medium speed.
    Medium,
    /// High speed.
    High,
    /// Speed chosen by the unit.
    #[default]
    Auto,
}

impl FanMode {
    /// Code sent in place of a fan speed to leave the current one untouched.
    pub const NO_CHANGE_CODE: u8 = 255;

    /// All fan speeds.
    pub const ALL: [Self; 4] = [Self::Auto, Self::Low, Self::Medium, Self::High];

    /// Returns the numeric code used by the cloud.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Auto => 254,
        }
    }

    /// Maps a numeric code reported by the cloud.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Low),
            2 => Some(Self::Medium),
            3 => Some(Self::High),
            254 => Some(Self::Auto),
            _ => None,
        }
    }

    /// Returns the normalized name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for FanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FanMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "auto" => Ok(Self::Auto),
            _ => Err(ValueError::InvalidFanMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_round_trip() {
        for fan in FanMode::ALL {
            assert_eq!(FanMode::from_code(fan.code()), Some(fan));
        }
    }

    #[test]
    fn zero_is_not_a_fan_speed() {
        assert_eq!(FanMode::from_code(0), None);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Medium".parse::<FanMode>().unwrap(), FanMode::Medium);
        assert!("turbo".parse::<FanMode>().is_err());
    }
}
