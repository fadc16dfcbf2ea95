// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use irseq_lib::table::{CommandTable, DeviceClass};
use irseq_lib::{CodeToken, TransmitError, Transmitter};
use parking_lot::Mutex;

/// Records every code it is asked to send.
///
/// Optionally fails the send with the given zero-based index.
#[derive(Debug, Default)]
pub struct Recorder {
    sent: Mutex<Vec<CodeToken>>,
    attempts: Mutex<usize>,
    fail_at: Option<usize>,
}

impl Recorder {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A recorder whose send number `index` (zero-based) fails.
    pub fn failing_at(index: usize) -> Arc<Self> {
        Arc::new(Self {
            fail_at: Some(index),
            ..Self::default()
        })
    }

    /// Returns the successfully sent codes.
    pub fn sent(&self) -> Vec<String> {
        self.sent
            .lock()
            .iter()
            .map(|code| code.as_str().to_string())
            .collect()
    }

    pub fn clear(&self) {
        self.sent.lock().clear();
    }
}

impl Transmitter for Recorder {
    async fn send(&self, code: &CodeToken) -> Result<(), TransmitError> {
        let attempt = {
            let mut attempts = self.attempts.lock();
            *attempts += 1;
            *attempts - 1
        };
        if self.fail_at == Some(attempt) {
            return Err(TransmitError::Failed(format!("send {attempt} rejected")));
        }
        self.sent.lock().push(code.clone());
        Ok(())
    }
}

pub fn fan_table() -> CommandTable {
    CommandTable::from_json(
        DeviceClass::Fan,
        r#"{
            "manufacturer": "Acme",
            "supportedModels": ["AF-3"],
            "supportedController": "Broadlink",
            "commandsEncoding": "Base64",
            "speed": ["low", "medium", "high"],
            "commands": {
                "off": "OFF",
                "oscillate": "OSC",
                "forward": { "low": "F1", "medium": "F2", "high": "F3" },
                "reverse": { "low": "R1", "medium": "R2", "high": "R3" }
            }
        }"#,
    )
    .unwrap()
}

pub fn basic_fan_table() -> CommandTable {
    CommandTable::from_json(
        DeviceClass::Fan,
        r#"{
            "manufacturer": "Acme",
            "speed": ["low", "high"],
            "commands": {
                "off": "OFF",
                "default": { "low": "L", "high": "H" }
            }
        }"#,
    )
    .unwrap()
}

/// Relative brightness ladder `[10, 50, 100, 255]`, color temperature
/// `[2700, 4000, 6500]`, distinct on/off codes and a night light.
pub fn light_table() -> CommandTable {
    CommandTable::from_json(
        DeviceClass::Light,
        r#"{
            "manufacturer": "Acme",
            "brightness": [10, 50, 100, 255],
            "colorTemperature": [2700, 4000, 6500],
            "commands": {
                "on": "ON", "off": "OFF", "night": "NIGHT",
                "dim": "DIM", "brighten": "UP",
                "warmer": "WARM", "colder": "COLD"
            }
        }"#,
    )
    .unwrap()
}

/// Relative brightness ladder `[10, 50, 100, 255]` with a night light and
/// no color temperature.
pub fn dimmer_table() -> CommandTable {
    CommandTable::from_json(
        DeviceClass::Light,
        r#"{
            "manufacturer": "Acme",
            "brightness": [10, 50, 100, 255],
            "commands": {
                "on": "ON", "off": "OFF", "night": "NIGHT",
                "dim": "DIM", "brighten": "UP"
            }
        }"#,
    )
    .unwrap()
}

/// A light with one shared power code and nothing else.
pub fn toggle_light_table() -> CommandTable {
    CommandTable::from_json(
        DeviceClass::Light,
        r#"{
            "manufacturer": "Acme",
            "commands": { "on": "PWR", "off": "PWR" }
        }"#,
    )
    .unwrap()
}
