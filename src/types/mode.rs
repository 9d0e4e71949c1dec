// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HVAC operating mode.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Operating mode of an air conditioner.
///
/// # Examples
///
/// ```
/// use solidmation_lib::types::HvacMode;
///
/// assert_eq!(HvacMode::Cool.code(), 1);
/// assert_eq!(HvacMode::from_code(254), Some(HvacMode::Auto));
/// assert_eq!("fan_only".parse::<HvacMode>().unwrap(), HvacMode::FanOnly);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HvacMode {
    /// Unit is off.
    Off,
    /// Cooling.
    Cool,
    /// Heating.
    Heat,
    /// Dehumidifying.
    Dry,
    /// Ventilation only.
    FanOnly,
    /// The unit picks heating or cooling on its own.
    Auto,
}

impl HvacMode {
    /// Code sent in place of a mode to leave the current one untouched.
    pub const NO_CHANGE_CODE: u8 = 255;

    /// All modes, in the order a host usually lists them.
    pub const ALL: [Self; 6] = [
        Self::Auto,
        Self::Cool,
        Self::Heat,
        Self::Dry,
        Self::FanOnly,
        Self::Off,
    ];

    /// Returns the numeric code used by the cloud.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Cool => 1,
            Self::Heat => 2,
            Self::Dry => 3,
            Self::FanOnly => 4,
            Self::Auto => 254,
        }
    }

    /// Maps a numeric code reported by the cloud.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Off),
            1 => Some(Self::Cool),
            2 => Some(Self::Heat),
            3 => Some(Self::Dry),
            4 => Some(Self::FanOnly),
            254 => Some(Self::Auto),
            _ => None,
        }
    }

    /// Returns the normalized name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Cool => "cool",
            Self::Heat => "heat",
            Self::Dry => "dry",
            Self::FanOnly => "fan_only",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for HvacMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HvacMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "cool" => Ok(Self::Cool),
            "heat" => Ok(Self::Heat),
            "dry" => Ok(Self::Dry),
            "fan_only" => Ok(Self::FanOnly),
            "auto" => Ok(Self::Auto),
            _ => Err(ValueError::InvalidMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_round_trip() {
        for code in [0u8, 1, 2, 3, 4, 254] {
            let mode = HvacMode::from_code(code).unwrap();
            assert_eq!(mode.code(), code);
        }
    }

    #[test]
    fn name_round_trip() {
        for mode in HvacMode::ALL {
            assert_eq!(mode.as_str().parse::<HvacMode>().unwrap(), mode);
        }
    }

    #[test]
    fn unknown_code_is_none() {
        assert_eq!(HvacMode::from_code(5), None);
        assert_eq!(HvacMode::from_code(HvacMode::NO_CHANGE_CODE), None);
    }

    #[test]
    fn unknown_name_fails() {
        assert_eq!(
            "heat_cool".parse::<HvacMode>(),
            Err(ValueError::InvalidMode("heat_cool".to_string()))
        );
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&HvacMode::FanOnly).unwrap();
        assert_eq!(json, "\"fan_only\"");
    }
}
