// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests against a real cloud account.
//!
//! These tests require valid credentials and network access and are ignored
//! by default.
//! Run with: `cargo test --test real_account -- --ignored --test-threads=1`
//!
//! # Environment Variables
//!
//! - `SOLIDMATION_USERNAME` - Account e-mail
//! - `SOLIDMATION_PASSWORD` - Account password
//! - `SOLIDMATION_BACKEND` - `bgh` or `myhabeetat` (default: `bgh`)
//! - `SOLIDMATION_DEVICE_ID` - Unit to write to (write tests only)
//!
//! Write tests change the unit's settings; pick a unit nobody is using.
//!
//! # Example
//!
//! ```bash
//! export SOLIDMATION_USERNAME=me@example.com
//! export SOLIDMATION_PASSWORD=secret
//! export SOLIDMATION_BACKEND=bgh
//! cargo test --test real_account -- --ignored --test-threads=1
//! ```

use std::env;
use std::time::Duration;

use solidmation_lib::types::{DeviceId, FanMode, HvacMode, PresetMode, SwingMode};
use solidmation_lib::{Backend, ClientConfig, Home, SolidmationClient};
use tokio::time::sleep;

// =============================================================================
// Test Configuration from Environment Variables
// =============================================================================

fn config() -> ClientConfig {
    let username = env::var("SOLIDMATION_USERNAME").expect("SOLIDMATION_USERNAME not set");
    let password = env::var("SOLIDMATION_PASSWORD").expect("SOLIDMATION_PASSWORD not set");
    let backend = env::var("SOLIDMATION_BACKEND")
        .map(|b| b.parse::<Backend>().expect("invalid SOLIDMATION_BACKEND"))
        .unwrap_or_default();

    ClientConfig::new(username, password).with_backend(backend)
}

fn device_id() -> DeviceId {
    env::var("SOLIDMATION_DEVICE_ID")
        .expect("SOLIDMATION_DEVICE_ID not set")
        .parse::<u64>()
        .expect("invalid SOLIDMATION_DEVICE_ID")
        .into()
}

fn client() -> SolidmationClient {
    SolidmationClient::from_config(&config()).expect("failed to create client")
}

async fn first_home(client: &SolidmationClient) -> Home {
    client
        .list_homes()
        .await
        .expect("failed to list homes")
        .into_iter()
        .next()
        .expect("account has no homes")
}

// =============================================================================
// Reads
// =============================================================================

#[tokio::test]
#[ignore]
async fn login_with_credentials() {
    let client = client();

    let token = client.login().await.expect("login failed");

    assert!(!token.is_empty());
    assert!(client.session().is_authenticated());
}

#[tokio::test]
#[ignore]
async fn rejects_wrong_password() {
    let config = config();
    let wrong = ClientConfig::new(config.username(), "definitely-not-the-password")
        .with_backend(config.backend());
    let client = SolidmationClient::from_config(&wrong).unwrap();

    let err = client.login().await.expect_err("login should fail");

    assert!(err.requires_reauth(), "unexpected error: {err}");
}

#[tokio::test]
#[ignore]
async fn list_homes_and_devices() {
    let client = client();
    let home = first_home(&client).await;

    let devices = client
        .list_devices(home.home_id)
        .await
        .expect("failed to list devices");

    for device in &devices {
        println!(
            "{} [{}] available={} state={:?}",
            device.name(),
            device.device_id(),
            device.available(),
            device.state()
        );
        assert!(device.metadata().min_temp <= device.metadata().max_temp);
    }

    let snapshot = client.snapshot().expect("snapshot not stored");
    assert_eq!(snapshot.devices.len(), devices.len());
}

// =============================================================================
// Writes
// =============================================================================

#[tokio::test]
#[ignore]
async fn set_mode_and_read_back() {
    let client = client();
    let home = first_home(&client).await;
    let device_id = device_id();

    client
        .set_mode(
            device_id,
            HvacMode::Cool,
            24.0,
            FanMode::Auto,
            SwingMode::Off,
            PresetMode::None,
        )
        .await
        .expect("set_mode failed");

    // The cloud relays the write to the unit asynchronously
    sleep(Duration::from_secs(5)).await;

    let device = client
        .get_device_status(home.home_id, device_id)
        .await
        .expect("failed to read device");
    let state = device.state().expect("unit reported no state");

    assert_eq!(state.mode(), Some(HvacMode::Cool));
    assert_eq!(state.target_temperature(), Some(24.0));

    client
        .set_mode(
            device_id,
            HvacMode::Off,
            24.0,
            FanMode::Auto,
            SwingMode::Off,
            PresetMode::None,
        )
        .await
        .expect("failed to turn unit off");
}
