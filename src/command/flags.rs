// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Packed swing/preset byte encodings.
//!
//! Swing position and the boost preset reach the unit as a single command
//! byte, and the unit reports them back in a single status value (value type
//! 18). The two backend deployments disagree on both directions, so each
//! [`Backend`](crate::Backend) picks a [`FlagCodec`].
//!
//! | Codec | Command byte | Status value |
//! |-------|--------------|--------------|
//! | [`PackedFlags`] | `preset_code \| swing_code` | bit `0x10` swing, bit `0x08` boost |
//! | [`SwingOnlyFlags`] | `swing_code`, preset dropped | plain swing value, no preset |

use std::fmt;

use crate::types::{PresetMode, SwingMode};

/// Status bit reporting horizontal swing.
const STATUS_SWING_BIT: u8 = 0x10;
/// Status bit reporting the boost preset.
const STATUS_BOOST_BIT: u8 = 0x08;

/// Encoding of swing and preset into the packed byte.
pub trait FlagCodec: fmt::Debug + Send + Sync {
    /// Returns a short name for diagnostics.
    fn name(&self) -> &'static str;

    /// Returns the command byte for the requested settings.
    ///
    /// `None` means no command must be sent. Sending one for default
    /// settings would reset whatever the unit is doing.
    fn encode(&self, swing: SwingMode, preset: PresetMode) -> Option<u8>;

    /// Splits a reported status value into swing and preset.
    ///
    /// Either half is `None` when the value does not say.
    fn decode(&self, raw: u8) -> (Option<SwingMode>, Option<PresetMode>);
}

/// Both settings OR'd into one byte (BGH deployment).
///
/// # Examples
///
/// ```
/// use solidmation_lib::command::{FlagCodec, PackedFlags};
/// use solidmation_lib::types::{PresetMode, SwingMode};
///
/// assert_eq!(PackedFlags.encode(SwingMode::Off, PresetMode::None), None);
/// assert_eq!(
///     PackedFlags.encode(SwingMode::Horizontal, PresetMode::Boost),
///     Some(0x71 | 0x51)
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PackedFlags;

impl FlagCodec for PackedFlags {
    fn name(&self) -> &'static str {
        "packed"
    }

    fn encode(&self, swing: SwingMode, preset: PresetMode) -> Option<u8> {
        if swing == SwingMode::Off && preset == PresetMode::None {
            return None;
        }
        Some(preset.command_code() | swing.command_code())
    }

    fn decode(&self, raw: u8) -> (Option<SwingMode>, Option<PresetMode>) {
        if raw & !(STATUS_SWING_BIT | STATUS_BOOST_BIT) != 0 {
            tracing::debug!(raw, codec = self.name(), "Unrecognized swing/preset flags");
            return (None, None);
        }

        let swing = if raw & STATUS_SWING_BIT == 0 {
            SwingMode::Off
        } else {
            SwingMode::Horizontal
        };
        let preset = if raw & STATUS_BOOST_BIT == 0 {
            PresetMode::None
        } else {
            PresetMode::Boost
        };
        (Some(swing), Some(preset))
    }
}

/// Swing as the only setting (MyHabeetat deployment).
///
/// The preset is not transmitted and not reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwingOnlyFlags;

impl FlagCodec for SwingOnlyFlags {
    fn name(&self) -> &'static str {
        "swing-only"
    }

    fn encode(&self, swing: SwingMode, preset: PresetMode) -> Option<u8> {
        if preset != PresetMode::None {
            tracing::debug!(%preset, codec = self.name(), "Preset not supported, ignoring");
        }
        if swing == SwingMode::Off {
            return None;
        }
        Some(swing.command_code())
    }

    fn decode(&self, raw: u8) -> (Option<SwingMode>, Option<PresetMode>) {
        let swing = match raw {
            0 | 0x08 => Some(SwingMode::Off),
            0x10 | 0x18 | 0x51 => Some(SwingMode::Horizontal),
            0x61 => Some(SwingMode::Vertical),
            _ => {
                tracing::debug!(raw, codec = self.name(), "Unrecognized swing value");
                None
            }
        };
        (swing, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_encodes_or_of_both() {
        assert_eq!(
            PackedFlags.encode(SwingMode::Vertical, PresetMode::None),
            Some(0x61)
        );
        assert_eq!(
            PackedFlags.encode(SwingMode::Off, PresetMode::Boost),
            Some(0x71)
        );
        assert_eq!(
            PackedFlags.encode(SwingMode::Vertical, PresetMode::Boost),
            Some(0x71)
        );
        assert_eq!(
            PackedFlags.encode(SwingMode::Horizontal, PresetMode::Boost),
            Some(0x71)
        );
    }

    #[test]
    fn packed_skips_defaults() {
        assert_eq!(PackedFlags.encode(SwingMode::Off, PresetMode::None), None);
    }

    #[test]
    fn packed_decodes_status_bits() {
        assert_eq!(
            PackedFlags.decode(0),
            (Some(SwingMode::Off), Some(PresetMode::None))
        );
        assert_eq!(
            PackedFlags.decode(8),
            (Some(SwingMode::Off), Some(PresetMode::Boost))
        );
        assert_eq!(
            PackedFlags.decode(16),
            (Some(SwingMode::Horizontal), Some(PresetMode::None))
        );
        assert_eq!(
            PackedFlags.decode(24),
            (Some(SwingMode::Horizontal), Some(PresetMode::Boost))
        );
        assert_eq!(PackedFlags.decode(0x51), (None, None));
    }

    #[test]
    fn swing_only_drops_preset() {
        assert_eq!(
            SwingOnlyFlags.encode(SwingMode::Off, PresetMode::Boost),
            None
        );
        assert_eq!(
            SwingOnlyFlags.encode(SwingMode::Horizontal, PresetMode::Boost),
            Some(0x51)
        );
    }

    #[test]
    fn swing_only_decodes_plain_values() {
        assert_eq!(SwingOnlyFlags.decode(0), (Some(SwingMode::Off), None));
        assert_eq!(
            SwingOnlyFlags.decode(0x61),
            (Some(SwingMode::Vertical), None)
        );
        assert_eq!(
            SwingOnlyFlags.decode(24),
            (Some(SwingMode::Horizontal), None)
        );
        assert_eq!(SwingOnlyFlags.decode(3), (None, None));
    }
}
