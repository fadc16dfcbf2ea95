// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw device data as stored in code files.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The kind of appliance a table describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    /// A fan with discrete speeds.
    Fan,
    /// A light, optionally dimmable and with color temperature.
    Light,
}

impl DeviceClass {
    /// Returns the directory name used for this class in code storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fan => "fan",
            Self::Light => "light",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unvalidated device data, deserialized from a code file.
///
/// Commands are kept as raw JSON values; their shape is checked when the
/// data is turned into a [`CommandTable`](super::CommandTable).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceData {
    /// Appliance manufacturer.
    pub manufacturer: String,
    /// Models the codes are known to work with.
    #[serde(default)]
    pub supported_models: Vec<String>,
    /// Transmitter family the codes were recorded for.
    #[serde(default)]
    pub supported_controller: String,
    /// Encoding of the code strings (e.g. `Base64`, `Hex`, `Pronto`).
    #[serde(default)]
    pub commands_encoding: String,
    /// Ordered fan speed names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<Vec<String>>,
    /// Ascending brightness ladder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<Vec<u32>>,
    /// Ascending color temperature ladder in Kelvin.
    #[serde(
        default,
        alias = "colorTemperatures",
        skip_serializing_if = "Option::is_none"
    )]
    pub color_temperature: Option<Vec<u32>>,
    /// Command entries keyed by name.
    pub commands: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fan_data() {
        let json = r#"{
            "manufacturer": "Acme",
            "supportedModels": ["F-1", "F-2"],
            "supportedController": "MQTT",
            "commandsEncoding": "Raw",
            "speed": ["low", "high"],
            "commands": {
                "off": "0",
                "default": { "low": "1", "high": "2" }
            }
        }"#;
        let data: DeviceData = serde_json::from_str(json).unwrap();
        assert_eq!(data.supported_models.len(), 2);
        assert_eq!(data.speed.as_deref(), Some(&["low".to_string(), "high".to_string()][..]));
        assert!(data.brightness.is_none());
        assert!(data.commands["default"].is_object());
    }

    #[test]
    fn accepts_plural_color_temperature_key() {
        let json = r#"{
            "manufacturer": "Acme",
            "colorTemperatures": [2700, 6500],
            "commands": {}
        }"#;
        let data: DeviceData = serde_json::from_str(json).unwrap();
        assert_eq!(data.color_temperature, Some(vec![2700, 6500]));
    }

    #[test]
    fn rejects_missing_commands() {
        let json = r#"{ "manufacturer": "Acme" }"#;
        assert!(serde_json::from_str::<DeviceData>(json).is_err());
    }
}
