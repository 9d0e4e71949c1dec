// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoded device and climate state types.
//!
//! [`Device`] combines an endpoint's identity and static metadata with its
//! live [`ClimateState`]. [`DeviceSet`] holds the devices of one home, indexed
//! by identifier when the data packet is decoded.
//!
//! # Examples
//!
//! ```
//! use solidmation_lib::state::ClimateState;
//! use solidmation_lib::types::FanMode;
//!
//! let mut state = ClimateState::new();
//! state.set_fan_speed(FanMode::Auto);
//!
//! assert_eq!(state.fan_speed(), Some(FanMode::Auto));
//! assert_eq!(state.temperature(), None);
//! ```

mod climate_state;
mod device;

pub use climate_state::ClimateState;
pub use device::{Device, DeviceMetadata, DeviceSet, DeviceSnapshot};
