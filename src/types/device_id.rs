// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device identifier type.

use std::fmt;

/// Identifier of an HVAC endpoint, unique within an account.
///
/// The cloud calls these `EndpointID`; the same number addresses the unit
/// in status packets and in control commands.
///
/// # Examples
///
/// ```
/// use solidmation_lib::types::DeviceId;
///
/// let id = DeviceId::new(4242);
/// assert_eq!(id.value(), 4242);
/// assert_eq!(id.unique_id(), "bgh_smart_1092");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct DeviceId(u64);

impl DeviceId {
    /// Wraps a raw endpoint identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw endpoint identifier.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Returns a stable identifier suitable for a host entity registry.
    #[must_use]
    pub fn unique_id(&self) -> String {
        format!("bgh_smart_{:x}", self.0)
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for DeviceId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<DeviceId> for u64 {
    fn from(id: DeviceId) -> Self {
        id.0
    }
}
