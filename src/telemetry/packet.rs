// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoding of a data packet into the devices of a home.

use crate::command::FlagCodec;
use crate::error::ParseError;
use crate::state::{Device, DeviceMetadata, DeviceSet};
use crate::topology::{RawDevice, RawEndpoint, RawEndpointValues, RawPacket};
use crate::types::DeviceId;

use super::decode_state;
use super::values::{find_parameter, parse_float};

const SETPOINT_MIN_PARAM: &str = "SetpointMinC";
const SETPOINT_MAX_PARAM: &str = "SetpointMaxC";

/// Decodes every unit of a data packet.
///
/// Entry `i` of `Endpoints`, `Devices` and `EndpointValues` describe the same
/// unit. A packet without endpoints decodes to an empty set.
///
/// `home_id` is the home the packet was requested for; it is used for units
/// whose hardware record does not name a home.
///
/// # Errors
///
/// Returns [`ParseError::MisalignedArrays`] if `Devices` or `EndpointValues`
/// is missing or differs in length from `Endpoints`.
///
/// # Examples
///
/// ```
/// use solidmation_lib::command::PackedFlags;
/// use solidmation_lib::telemetry::decode_devices;
/// use solidmation_lib::topology::RawPacket;
///
/// let packet: RawPacket = serde_json::from_str(r#"{
///     "Endpoints": [{"EndpointID": 7, "Description": "Bedroom"}],
///     "Devices": [{"HomeID": 42, "IsOnline": true}],
///     "EndpointValues": [{"Values": [{"ValueType": 14, "Value": "0"}]}]
/// }"#).unwrap();
///
/// let devices = decode_devices(&packet, 42, &PackedFlags).unwrap();
/// assert_eq!(devices.len(), 1);
/// assert_eq!(devices.iter().next().unwrap().name(), "Bedroom");
/// ```
pub fn decode_devices(
    packet: &RawPacket,
    home_id: u64,
    flags: &dyn FlagCodec,
) -> Result<DeviceSet, ParseError> {
    let Some(endpoints) = packet.endpoints.as_deref() else {
        tracing::debug!(home_id, "Data packet without endpoints");
        return Ok(DeviceSet::new());
    };
    let devices = packet.devices.as_deref().unwrap_or(&[]);
    let values = packet.endpoint_values.as_deref().unwrap_or(&[]);

    if devices.len() != endpoints.len() || values.len() != endpoints.len() {
        return Err(ParseError::MisalignedArrays {
            endpoints: endpoints.len(),
            devices: devices.len(),
            values: values.len(),
        });
    }

    let set: DeviceSet = endpoints
        .iter()
        .zip(devices)
        .zip(values)
        .map(|((endpoint, device), values)| decode_device(endpoint, device, values, home_id, flags))
        .collect();

    tracing::debug!(home_id, devices = set.len(), "Decoded data packet");
    Ok(set)
}

fn decode_device(
    endpoint: &RawEndpoint,
    device: &RawDevice,
    values: &RawEndpointValues,
    home_id: u64,
    flags: &dyn FlagCodec,
) -> Device {
    let device_id = DeviceId::new(endpoint.endpoint_id);
    let state = values.values.as_deref().map(|v| decode_state(v, flags));

    if state.is_none() {
        tracing::debug!(%device_id, "No telemetry for endpoint");
    }

    Device::new(
        device_id,
        endpoint.description.clone().unwrap_or_default(),
        device.home_id.unwrap_or(home_id),
        decode_metadata(endpoint, device),
        device.is_online.unwrap_or(false),
        state,
    )
}

fn decode_metadata(endpoint: &RawEndpoint, device: &RawDevice) -> DeviceMetadata {
    let parameters = endpoint.parameters.as_deref().unwrap_or(&[]);
    let setpoint = |name: &str, default: f64| {
        find_parameter(parameters, name)
            .and_then(|text| parse_float(text, &name))
            .unwrap_or(default)
    };

    DeviceMetadata {
        model: device.model.clone(),
        serial_address: device.address.clone(),
        min_temp: setpoint(SETPOINT_MIN_PARAM, DeviceMetadata::DEFAULT_MIN_TEMP),
        max_temp: setpoint(SETPOINT_MAX_PARAM, DeviceMetadata::DEFAULT_MAX_TEMP),
    }
}
