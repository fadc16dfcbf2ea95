// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extra attributes published next to the device state.

use serde::Serialize;

use crate::config::DeviceConfig;
use crate::state::DeviceState;
use crate::table::CommandTable;

/// Static and tracked details a presentation layer may display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attributes {
    /// The appliance was last switched on outside the engine.
    pub on_by_remote: bool,
    /// Code of the loaded device table.
    pub device_code: u32,
    /// Appliance manufacturer.
    pub manufacturer: String,
    /// Models the table is known to work with.
    pub supported_models: Vec<String>,
    /// Transmitter family the codes were recorded for.
    pub supported_controller: String,
    /// Encoding of the codes.
    pub commands_encoding: String,
    /// Current fan speed name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<String>,
}

impl Attributes {
    pub(crate) fn new(config: &DeviceConfig, table: &CommandTable, state: &DeviceState) -> Self {
        Self {
            on_by_remote: state.on_by_remote(),
            device_code: config.device_code,
            manufacturer: table.manufacturer().to_string(),
            supported_models: table.supported_models().to_vec(),
            supported_controller: table.supported_controller().to_string(),
            commands_encoding: table.commands_encoding().to_string(),
            speed: state.speed().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::DeviceClass;

    #[test]
    fn fan_attributes_include_speed() {
        let table = CommandTable::from_json(
            DeviceClass::Fan,
            r#"{"manufacturer": "Acme", "supportedModels": ["F-100"],
                "supportedController": "Broadlink", "commandsEncoding": "Base64",
                "speed": ["low", "high"],
                "commands": {"off": "0", "default": {"low": "1", "high": "2"}}}"#,
        )
        .unwrap();
        let state = DeviceState::initial(&table);
        let attributes = Attributes::new(&DeviceConfig::new("Fan", 1020), &table, &state);

        let json = serde_json::to_value(&attributes).unwrap();
        assert_eq!(json["device_code"], 1020);
        assert_eq!(json["manufacturer"], "Acme");
        assert_eq!(json["supported_models"][0], "F-100");
        assert_eq!(json["speed"], "low");
        assert_eq!(json["on_by_remote"], false);
    }

    #[test]
    fn light_attributes_omit_speed() {
        let table = CommandTable::from_json(
            DeviceClass::Light,
            r#"{"manufacturer": "Acme", "commands": {"on": "1", "off": "0"}}"#,
        )
        .unwrap();
        let state = DeviceState::initial(&table);
        let attributes = Attributes::new(&DeviceConfig::new("Lamp", 1000), &table, &state);
        let json = serde_json::to_value(&attributes).unwrap();
        assert!(json.get("speed").is_none());
    }
}
