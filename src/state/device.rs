// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decoded HVAC devices.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::types::DeviceId;

use super::ClimateState;

/// Static description of a unit.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DeviceMetadata {
    /// Hardware model reported by the cloud.
    pub model: Option<String>,
    /// Hardware address (serial) of the unit.
    pub serial_address: Option<String>,
    /// Lowest accepted setpoint in °C.
    pub min_temp: f64,
    /// Highest accepted setpoint in °C.
    pub max_temp: f64,
}

impl DeviceMetadata {
    /// Setpoint floor used when the unit does not report one.
    pub const DEFAULT_MIN_TEMP: f64 = 17.0;
    /// Setpoint ceiling used when the unit does not report one.
    pub const DEFAULT_MAX_TEMP: f64 = 30.0;
}

impl Default for DeviceMetadata {
    fn default() -> Self {
        Self {
            model: None,
            serial_address: None,
            min_temp: Self::DEFAULT_MIN_TEMP,
            max_temp: Self::DEFAULT_MAX_TEMP,
        }
    }
}

/// One HVAC unit of a home.
///
/// [`state`](Self::state) is `None` when the cloud sent no telemetry for the
/// unit (typically because it is offline). That is different from a state
/// whose individual values are unknown.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Device {
    device_id: DeviceId,
    name: String,
    home_id: u64,
    metadata: DeviceMetadata,
    available: bool,
    state: Option<ClimateState>,
}

impl Device {
    pub(crate) fn new(
        device_id: DeviceId,
        name: String,
        home_id: u64,
        metadata: DeviceMetadata,
        available: bool,
        state: Option<ClimateState>,
    ) -> Self {
        Self {
            device_id,
            name,
            home_id,
            metadata,
            available,
            state,
        }
    }

    /// Returns the endpoint identifier.
    #[must_use]
    pub fn device_id(&self) -> DeviceId {
        self.device_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the owning home.
    #[must_use]
    pub fn home_id(&self) -> u64 {
        self.home_id
    }

    /// Returns the static metadata.
    #[must_use]
    pub fn metadata(&self) -> &DeviceMetadata {
        &self.metadata
    }

    /// Returns whether the cloud reports the unit online.
    #[must_use]
    pub fn available(&self) -> bool {
        self.available
    }

    /// Returns the live state, if the cloud sent telemetry.
    #[must_use]
    pub fn state(&self) -> Option<&ClimateState> {
        self.state.as_ref()
    }
}

/// Devices of one home, addressable by identifier.
///
/// Devices are stored in the order the cloud listed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceSet {
    devices: Vec<Device>,
    index: HashMap<DeviceId, usize>,
}

impl DeviceSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a device, replacing any device with the same identifier in place.
    pub fn insert(&mut self, device: Device) {
        if let Some(&slot) = self.index.get(&device.device_id) {
            tracing::warn!(device_id = %device.device_id, "Duplicate endpoint in data packet");
            self.devices[slot] = device;
        } else {
            self.index.insert(device.device_id, self.devices.len());
            self.devices.push(device);
        }
    }

    /// Returns the device with the given identifier.
    #[must_use]
    pub fn get(&self, device_id: DeviceId) -> Option<&Device> {
        self.index.get(&device_id).map(|&slot| &self.devices[slot])
    }

    /// Returns `true` if the set holds the identifier.
    #[must_use]
    pub fn contains(&self, device_id: DeviceId) -> bool {
        self.index.contains_key(&device_id)
    }

    /// Removes and returns the device with the given identifier.
    pub fn take(&mut self, device_id: DeviceId) -> Option<Device> {
        let slot = self.index.remove(&device_id)?;
        let device = self.devices.remove(slot);
        for position in self.index.values_mut() {
            if *position > slot {
                *position -= 1;
            }
        }
        Some(device)
    }

    /// Returns the number of devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Returns `true` if there are no devices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Iterates over the devices in listing order.
    pub fn iter(&self) -> std::slice::Iter<'_, Device> {
        self.devices.iter()
    }

    /// Returns the identifiers in listing order.
    #[must_use]
    pub fn ids(&self) -> Vec<DeviceId> {
        self.devices.iter().map(Device::device_id).collect()
    }

    /// Converts into a map keyed by identifier.
    #[must_use]
    pub fn into_map(self) -> HashMap<DeviceId, Device> {
        self.devices
            .into_iter()
            .map(|device| (device.device_id, device))
            .collect()
    }
}

impl<'a> IntoIterator for &'a DeviceSet {
    type Item = &'a Device;
    type IntoIter = std::slice::Iter<'a, Device>;

    fn into_iter(self) -> Self::IntoIter {
        self.devices.iter()
    }
}

impl IntoIterator for DeviceSet {
    type Item = Device;
    type IntoIter = std::vec::IntoIter<Device>;

    fn into_iter(self) -> Self::IntoIter {
        self.devices.into_iter()
    }
}

impl FromIterator<Device> for DeviceSet {
    fn from_iter<I: IntoIterator<Item = Device>>(iter: I) -> Self {
        let mut set = Self::new();
        for device in iter {
            set.insert(device);
        }
        set
    }
}

impl serde::Serialize for DeviceSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.devices)
    }
}

impl<'de> serde::Deserialize<'de> for DeviceSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Vec<Device> as serde::Deserialize>::deserialize(deserializer).map(Self::from_iter)
    }
}

/// The most recently fetched devices of one home.
///
/// Serializes with an RFC 3339 `fetched_at`, so a host can persist the last
/// known state across restarts.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DeviceSnapshot {
    /// The home the devices belong to.
    pub home_id: u64,
    /// When the data packet was received.
    pub fetched_at: DateTime<Utc>,
    /// The decoded devices.
    pub devices: DeviceSet,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn device(id: u64, name: &str) -> Device {
        Device::new(
            DeviceId::new(id),
            name.to_string(),
            1,
            DeviceMetadata::default(),
            true,
            None,
        )
    }

    #[test]
    fn metadata_defaults() {
        let metadata = DeviceMetadata::default();
        assert!((metadata.min_temp - 17.0).abs() < f64::EPSILON);
        assert!((metadata.max_temp - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn set_keeps_listing_order() {
        let set: DeviceSet = [device(9, "a"), device(3, "b"), device(5, "c")]
            .into_iter()
            .collect();
        assert_eq!(
            set.ids(),
            vec![DeviceId::new(9), DeviceId::new(3), DeviceId::new(5)]
        );
        assert_eq!(set.get(DeviceId::new(3)).unwrap().name(), "b");
    }

    #[test]
    fn duplicate_replaces_in_place() {
        let set: DeviceSet = [device(1, "first"), device(2, "x"), device(1, "second")]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(DeviceId::new(1)).unwrap().name(), "second");
        assert_eq!(set.ids()[0], DeviceId::new(1));
    }

    #[test]
    fn take_reindexes() {
        let mut set: DeviceSet = [device(1, "a"), device(2, "b"), device(3, "c")]
            .into_iter()
            .collect();
        let taken = set.take(DeviceId::new(1)).unwrap();
        assert_eq!(taken.name(), "a");
        assert!(!set.contains(DeviceId::new(1)));
        assert_eq!(set.get(DeviceId::new(3)).unwrap().name(), "c");
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn into_map_keys_by_id() {
        let set: DeviceSet = [device(7, "a")].into_iter().collect();
        let map = set.into_map();
        assert_eq!(map[&DeviceId::new(7)].name(), "a");
    }

    #[test]
    fn snapshot_serializes_devices_as_list() {
        let snapshot = DeviceSnapshot {
            home_id: 42,
            fetched_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            devices: [device(1, "a"), device(2, "b")].into_iter().collect(),
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["fetched_at"], "2024-01-02T03:04:05Z");
        assert_eq!(json["devices"].as_array().unwrap().len(), 2);

        let restored: DeviceSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(restored, snapshot);
        assert!(restored.devices.contains(DeviceId::new(2)));
    }
}
