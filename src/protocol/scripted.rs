// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory transport for unit tests.

use std::collections::VecDeque;

use parking_lot::Mutex;
use serde_json::Value;

use crate::error::ProtocolError;
use crate::protocol::{CommandResponse, Protocol};

/// Transport answering from a script and recording every request.
#[derive(Debug, Default)]
pub(crate) struct ScriptedProtocol {
    replies: Mutex<VecDeque<Result<String, ProtocolError>>>,
    requests: Mutex<Vec<(String, Value)>>,
}

impl ScriptedProtocol {
    /// Queues the next reply.
    pub(crate) fn reply(self, reply: Result<&str, ProtocolError>) -> Self {
        self.replies
            .lock()
            .push_back(reply.map(ToString::to_string));
        self
    }

    /// Returns the recorded `(path, body)` pairs.
    pub(crate) fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().clone()
    }

    /// Returns the recorded paths.
    pub(crate) fn paths(&self) -> Vec<String> {
        self.requests.lock().iter().map(|(p, _)| p.clone()).collect()
    }
}

impl Protocol for ScriptedProtocol {
    async fn post(&self, path: &str, body: &Value) -> Result<CommandResponse, ProtocolError> {
        self.requests.lock().push((path.to_string(), body.clone()));
        self.replies
            .lock()
            .pop_front()
            .expect("unexpected request")
            .map(CommandResponse::new)
    }
}
