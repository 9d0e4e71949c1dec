// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw `GetDataPacket` payload.
//!
//! The packet carries three arrays correlated by position: entry `i` of
//! `Endpoints`, `Devices` and `EndpointValues` describe the same unit. These
//! types keep the wire shape as-is; [`decode_devices`](crate::telemetry::decode_devices)
//! is the only place that interprets the positions.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value, json};

/// Timeout the service is asked to honour while assembling a packet, in ms.
const PACKET_TIMEOUT_MS: u64 = 10_000;

/// Data packet of one home, as sent by the cloud.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPacket {
    /// Addressable units and their parameters.
    #[serde(rename = "Endpoints", default)]
    pub endpoints: Option<Vec<RawEndpoint>>,

    /// Hardware records, positionally matching `endpoints`.
    #[serde(rename = "Devices", default)]
    pub devices: Option<Vec<RawDevice>>,

    /// Telemetry, positionally matching `endpoints`.
    #[serde(rename = "EndpointValues", default)]
    pub endpoint_values: Option<Vec<RawEndpointValues>>,
}

/// One endpoint entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEndpoint {
    /// Endpoint identifier.
    #[serde(rename = "EndpointID")]
    pub endpoint_id: u64,

    /// Display name.
    #[serde(rename = "Description", default, deserialize_with = "loose_string")]
    pub description: Option<String>,

    /// Named configuration parameters (setpoint limits among others).
    #[serde(rename = "Parameters", default)]
    pub parameters: Option<Vec<RawParameter>>,
}

/// A named endpoint parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct RawParameter {
    /// Parameter name, e.g. `SetpointMinC`.
    #[serde(rename = "Name", default, deserialize_with = "loose_string")]
    pub name: Option<String>,

    /// Parameter value as text.
    #[serde(rename = "Value", default, deserialize_with = "loose_string")]
    pub value: Option<String>,
}

/// One hardware entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDevice {
    /// Owning home.
    #[serde(rename = "HomeID", default, deserialize_with = "loose_u64")]
    pub home_id: Option<u64>,

    /// Hardware model.
    #[serde(rename = "DeviceModel", default, deserialize_with = "loose_string")]
    pub model: Option<String>,

    /// Hardware address.
    #[serde(rename = "Address", default, deserialize_with = "loose_string")]
    pub address: Option<String>,

    /// Whether the unit is connected to the cloud, when reported.
    #[serde(rename = "IsOnline", default, deserialize_with = "loose_bool")]
    pub is_online: Option<bool>,
}

/// Telemetry of one endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEndpointValues {
    /// Readings, or `null` when the unit is unreachable.
    #[serde(rename = "Values", default)]
    pub values: Option<Vec<RawValue>>,
}

/// A single telemetry reading tagged by value type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawValue {
    /// Discriminator, see [`ValueType`](crate::telemetry::ValueType).
    #[serde(rename = "ValueType")]
    pub value_type: u32,

    /// Reading as text.
    #[serde(rename = "Value", default, deserialize_with = "loose_string")]
    pub value: Option<String>,
}

impl RawValue {
    /// Creates a reading.
    #[must_use]
    pub fn new(value_type: u32, value: impl Into<String>) -> Self {
        Self {
            value_type,
            value: Some(value.into()),
        }
    }
}

/// Body of the `GetDataPacket` response.
#[derive(Debug, Deserialize)]
pub(crate) struct DataPacketResponse {
    #[serde(rename = "GetDataPacketResult", default)]
    pub result: Option<RawPacket>,
}

/// Builds the `GetDataPacket` request payload.
///
/// All serials are sent as zero, which asks for a full snapshot instead of an
/// incremental update.
pub(crate) fn data_packet_payload(home_id: u64) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert("homeID".to_string(), json!(home_id));
    payload.insert(
        "serials".to_string(),
        json!({
            "Home": 0,
            "Groups": 0,
            "Devices": 0,
            "Endpoints": 0,
            "EndpointValues": 0,
            "Scenes": 0,
            "Macros": 0,
            "Alarms": 0
        }),
    );
    payload.insert("timeOut".to_string(), json!(PACKET_TIMEOUT_MS));
    payload
}

/// Accepts strings, numbers and booleans as text; `null` as `None`.
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Accepts booleans, `"true"`/`"false"` and `0`/`1`; anything else as `None`.
fn loose_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => s.trim().parse().ok(),
        Some(Value::Number(n)) => n.as_u64().map(|n| n != 0),
        _ => None,
    })
}

/// Accepts unsigned numbers and numeric strings; anything else as `None`.
fn loose_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
