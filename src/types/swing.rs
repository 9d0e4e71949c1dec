// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Swing and preset types.
//!
//! Both settings travel in one packed command byte. The values below are the
//! contributions each setting makes to that byte; how they are combined and
//! how the status byte is read back depends on the backend, see
//! [`FlagCodec`](crate::command::FlagCodec).

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Louver swing position.
///
/// # Examples
///
/// ```
/// use solidmation_lib::types::SwingMode;
///
/// assert_eq!(SwingMode::Vertical.command_code(), 0x61);
/// // "on" is accepted as an alias for horizontal swing
/// assert_eq!("on".parse::<SwingMode>().unwrap(), SwingMode::Horizontal);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SwingMode {
    /// Louvers fixed.
    #[default]
    Off,
    /// Horizontal swing.
    Horizontal,
    /// Vertical swing.
    Vertical,
}

impl SwingMode {
    /// Returns this setting's contribution to the packed command byte.
    #[must_use]
    pub const fn command_code(&self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Horizontal => 0x51,
            Self::Vertical => 0x61,
        }
    }

    /// Returns the normalized name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

impl fmt::Display for SwingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwingMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "on" | "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            _ => Err(ValueError::InvalidSwingMode(s.to_string())),
        }
    }
}

/// Operating preset.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PresetMode {
    /// Normal operation.
    #[default]
    None,
    /// Maximum power for a limited time ("turbo").
    Boost,
}

impl PresetMode {
    /// Returns this setting's contribution to the packed command byte.
    #[must_use]
    pub const fn command_code(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::Boost => 0x71,
        }
    }

    /// Returns the normalized name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Boost => "boost",
        }
    }
}

impl fmt::Display for PresetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "boost" => Ok(Self::Boost),
            _ => Err(ValueError::InvalidPresetMode(s.to_string())),
        }
    }
}
