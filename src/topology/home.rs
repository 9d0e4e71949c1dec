// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Homes of an account.

use serde::Deserialize;

/// A physical installation grouping the units of an account.
///
/// # Examples
///
/// ```
/// use solidmation_lib::topology::Home;
///
/// let home: Home = serde_json::from_str(r#"{"HomeID": 42, "Description": "Casa"}"#).unwrap();
/// assert_eq!(home.home_id, 42);
/// assert_eq!(home.description.as_deref(), Some("Casa"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, serde::Serialize)]
pub struct Home {
    /// Identifier used to fetch the home's data packet.
    #[serde(rename = "HomeID")]
    pub home_id: u64,

    /// Display name, when set by the user.
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
}

/// Body of the `EnumHomes` response.
#[derive(Debug, Deserialize)]
pub(crate) struct EnumHomesResponse {
    #[serde(rename = "EnumHomesResult", default)]
    pub result: Option<EnumHomesResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EnumHomesResult {
    #[serde(rename = "Homes", default)]
    pub homes: Option<Vec<Home>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_enum_homes() {
        let json = r#"{"EnumHomesResult":{"Homes":[{"HomeID":1,"Description":"A"},{"HomeID":2}]}}"#;
        let response: EnumHomesResponse = serde_json::from_str(json).unwrap();
        let homes = response.result.unwrap().homes.unwrap();
        assert_eq!(homes.len(), 2);
        assert_eq!(homes[1].home_id, 2);
        assert_eq!(homes[1].description, None);
    }

    #[test]
    fn null_homes() {
        let json = r#"{"EnumHomesResult":{"Homes":null}}"#;
        let response: EnumHomesResponse = serde_json::from_str(json).unwrap();
        assert!(response.result.unwrap().homes.is_none());
    }
}
