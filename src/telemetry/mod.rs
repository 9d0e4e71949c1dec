// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Telemetry decoding.
//!
//! A unit reports its state as a list of `(ValueType, Value)` readings inside
//! the home's data packet. This module turns a [`RawPacket`] into a
//! [`DeviceSet`] of normalized devices:
//!
//! - [`decode_devices`] walks the positionally correlated packet arrays
//! - [`decode_state`] maps one unit's readings to a [`ClimateState`]
//!
//! Decoding is lenient per value: an absent or unrecognized reading leaves the
//! field unknown and is logged, it never fails the packet. Only a structurally
//! broken packet (misaligned arrays) is an error.
//!
//! [`RawPacket`]: crate::topology::RawPacket
//! [`DeviceSet`]: crate::state::DeviceSet
//! [`ClimateState`]: crate::state::ClimateState

mod packet;
mod state_decoder;
mod values;

pub use packet::decode_devices;
pub use state_decoder::decode_state;
pub use values::ValueType;
