// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Account topology as reported by the cloud.
//!
//! An account owns [`Home`]s; each home's units are described by one
//! [`RawPacket`], fetched in full on every poll.

mod home;
mod packet;

pub use home::Home;
pub use packet::{RawDevice, RawEndpoint, RawEndpointValues, RawPacket, RawParameter, RawValue};

pub(crate) use home::EnumHomesResponse;
pub(crate) use packet::{DataPacketResponse, data_packet_payload};
