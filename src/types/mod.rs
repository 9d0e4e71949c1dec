// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for climate control.
//!
//! Each enumeration maps bidirectionally between the small integer code used
//! by the cloud and a normalized name. Codes that have no mapping decode to
//! `None`; names that have no mapping fail to parse with a
//! [`ValueError`](crate::error::ValueError).
//!
//! # Types
//!
//! - [`HvacMode`] - off, cool, heat, dry, `fan_only`, auto
//! - [`FanMode`] - low, medium, high, auto
//! - [`SwingMode`] / [`PresetMode`] - settings sharing the packed command byte
//! - [`DeviceId`] - endpoint identifier

mod device_id;
mod fan;
mod mode;
mod swing;

pub use device_id::DeviceId;
pub use fan::FanMode;
pub use mode::HvacMode;
pub use swing::{PresetMode, SwingMode};
