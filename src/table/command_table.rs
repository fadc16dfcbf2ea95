// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The validated command table.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde_json::Value;

use crate::error::TableError;
use crate::types::{CodeToken, Direction, ValueKind};

use super::{DeviceClass, DeviceData, ValueLadder};

/// Symbolic names of the standalone commands the engine sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscreteCommand {
    /// Power off.
    Off,
    /// Power on.
    On,
    /// Night light (lowest brightness).
    Night,
    /// Oscillation toggle.
    Oscillate,
    /// One step warmer (color temperature down).
    Warmer,
    /// One step colder (color temperature up).
    Colder,
    /// One step dimmer.
    Dim,
    /// One step brighter.
    Brighten,
}

impl DiscreteCommand {
    /// Returns the key of this command in device tables.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
            Self::Night => "night",
            Self::Oscillate => "oscillate",
            Self::Warmer => "warmer",
            Self::Colder => "colder",
            Self::Dim => "dim",
            Self::Brighten => "brighten",
        }
    }

    /// Returns the `(decrease, increase)` step commands for a ladder kind.
    #[must_use]
    pub const fn steps_for(kind: ValueKind) -> (Self, Self) {
        match kind {
            ValueKind::Brightness => (Self::Dim, Self::Brighten),
            ValueKind::ColorTemperature => (Self::Warmer, Self::Colder),
        }
    }
}

impl fmt::Display for DiscreteCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable, validated view over a device's commands and ladders.
///
/// Built once per device with [`CommandTable::from_device_data`]; lookups
/// return `None` when a code is not present.
#[derive(Debug, Clone)]
pub struct CommandTable {
    class: DeviceClass,
    manufacturer: String,
    supported_models: Vec<String>,
    supported_controller: String,
    commands_encoding: String,
    discrete: HashMap<String, CodeToken>,
    directional: BTreeMap<Direction, HashMap<String, CodeToken>>,
    absolute: HashMap<ValueKind, HashMap<u32, CodeToken>>,
    speeds: Vec<String>,
    brightness: Option<ValueLadder>,
    color_temperature: Option<ValueLadder>,
}

impl CommandTable {
    /// Validates raw device data for the given device class.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] if a command entry is malformed, a ladder is
    /// empty or unordered, a relative ladder lacks one of its step commands,
    /// an absolute value table does not cover its ladder, or a fan table
    /// lacks speeds.
    pub fn from_device_data(class: DeviceClass, data: DeviceData) -> Result<Self, TableError> {
        let mut discrete = HashMap::new();
        let mut directional = BTreeMap::new();
        let mut absolute = HashMap::new();

        for (name, entry) in data.commands {
            match entry {
                Value::String(code) => {
                    discrete.insert(name, CodeToken::new(code));
                }
                Value::Object(map) => {
                    if let Some(kind) = value_kind_for(&name) {
                        absolute.insert(kind, parse_absolute(&name, map)?);
                    } else {
                        let speeds = map
                            .into_iter()
                            .map(|(speed, code)| Ok((speed, code_string(&name, code)?)))
                            .collect::<Result<HashMap<_, _>, TableError>>()?;
                        directional.insert(Direction::new(name), speeds);
                    }
                }
                other => {
                    return Err(TableError::MalformedCommand {
                        name,
                        reason: format!("expected a code string or a table, found {other}"),
                    });
                }
            }
        }

        let brightness = data
            .brightness
            .map(|values| ValueLadder::new("brightness", values))
            .transpose()?;
        let color_temperature = data
            .color_temperature
            .map(|values| ValueLadder::new("colorTemperature", values))
            .transpose()?;

        let speeds = match class {
            DeviceClass::Fan => {
                let speeds = data.speed.unwrap_or_default();
                if speeds.is_empty() {
                    return Err(TableError::MissingSpeedLadder);
                }
                if directional.is_empty() {
                    return Err(TableError::MissingSpeedCommands);
                }
                speeds
            }
            DeviceClass::Light => Vec::new(),
        };

        let table = Self {
            class,
            manufacturer: data.manufacturer,
            supported_models: data.supported_models,
            supported_controller: data.supported_controller,
            commands_encoding: data.commands_encoding,
            discrete,
            directional,
            absolute,
            speeds,
            brightness,
            color_temperature,
        };
        table.check_value_commands(ValueKind::Brightness)?;
        table.check_value_commands(ValueKind::ColorTemperature)?;
        Ok(table)
    }

    /// Parses and validates a JSON code file.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Json`] for invalid JSON and another
    /// [`TableError`] for a structurally invalid table.
    pub fn from_json(class: DeviceClass, json: &str) -> Result<Self, TableError> {
        let data: DeviceData =
            serde_json::from_str(json).map_err(|e| TableError::Json(e.to_string()))?;
        Self::from_device_data(class, data)
    }

    fn check_value_commands(&self, kind: ValueKind) -> Result<(), TableError> {
        let ladder = self.ladder(kind);
        match (self.absolute.get(&kind), ladder) {
            (Some(_), None) => Err(TableError::AbsoluteWithoutLadder(kind)),
            (Some(codes), Some(ladder)) => {
                match ladder.values().iter().find(|v| !codes.contains_key(v)) {
                    Some(&value) => Err(TableError::MissingAbsoluteCode { kind, value }),
                    None => Ok(()),
                }
            }
            (None, Some(_)) => {
                let (decrease, increase) = DiscreteCommand::steps_for(kind);
                for command in [decrease, increase] {
                    if !self.discrete.contains_key(command.as_str()) {
                        return Err(TableError::MissingStepCommand {
                            kind,
                            command: command.as_str(),
                        });
                    }
                }
                Ok(())
            }
            (None, None) => Ok(()),
        }
    }

    // ========== Lookups ==========

    /// Returns the code for a standalone command.
    #[must_use]
    pub fn resolve_discrete(&self, command: DiscreteCommand) -> Option<&CodeToken> {
        self.discrete.get(command.as_str())
    }

    /// Returns the code for a speed in a direction.
    #[must_use]
    pub fn resolve_directional(&self, direction: &Direction, speed: &str) -> Option<&CodeToken> {
        self.directional.get(direction)?.get(speed)
    }

    /// Returns the absolute code for an exact ladder value.
    #[must_use]
    pub fn resolve_absolute_value(&self, kind: ValueKind, value: u32) -> Option<&CodeToken> {
        self.absolute.get(&kind)?.get(&value)
    }

    /// Returns `true` if `kind` is driven by absolute per-value codes.
    #[must_use]
    pub fn has_absolute_values(&self, kind: ValueKind) -> bool {
        self.absolute.contains_key(&kind)
    }

    /// Returns `true` if `"on"` and `"off"` exist and share one code.
    ///
    /// Such devices toggle on every press, so repeating a state is unsafe.
    #[must_use]
    pub fn has_toggle_power_code(&self) -> bool {
        match (
            self.resolve_discrete(DiscreteCommand::On),
            self.resolve_discrete(DiscreteCommand::Off),
        ) {
            (Some(on), Some(off)) => on == off,
            _ => false,
        }
    }

    // ========== Ladders ==========

    /// Returns the ladder for a value kind, if the device supports it.
    #[must_use]
    pub fn ladder(&self, kind: ValueKind) -> Option<&ValueLadder> {
        match kind {
            ValueKind::Brightness => self.brightness.as_ref(),
            ValueKind::ColorTemperature => self.color_temperature.as_ref(),
        }
    }

    /// Returns the ordered fan speeds (empty for lights).
    #[must_use]
    pub fn speeds(&self) -> &[String] {
        &self.speeds
    }

    // ========== Capabilities ==========

    /// Returns `true` if both `forward` and `reverse` speed tables exist.
    #[must_use]
    pub fn supports_direction(&self) -> bool {
        self.directional.contains_key(&Direction::forward())
            && self.directional.contains_key(&Direction::reverse())
    }

    /// Returns `true` if an `oscillate` code exists.
    #[must_use]
    pub fn supports_oscillation(&self) -> bool {
        self.resolve_discrete(DiscreteCommand::Oscillate).is_some()
    }

    /// Returns the direction a fresh device starts in.
    #[must_use]
    pub fn initial_direction(&self) -> Direction {
        if self.supports_direction() {
            Direction::forward()
        } else {
            Direction::default()
        }
    }

    /// Returns the direction keys present in the speed matrix.
    pub fn directions(&self) -> impl Iterator<Item = &Direction> {
        self.directional.keys()
    }

    // ========== Metadata ==========

    /// Returns the device class the table was validated for.
    #[must_use]
    pub fn class(&self) -> DeviceClass {
        self.class
    }

    /// Returns the manufacturer.
    #[must_use]
    pub fn manufacturer(&self) -> &str {
        &self.manufacturer
    }

    /// Returns the supported models.
    #[must_use]
    pub fn supported_models(&self) -> &[String] {
        &self.supported_models
    }

    /// Returns the controller family the codes target.
    #[must_use]
    pub fn supported_controller(&self) -> &str {
        &self.supported_controller
    }

    /// Returns the encoding of the codes.
    #[must_use]
    pub fn commands_encoding(&self) -> &str {
        &self.commands_encoding
    }
}

fn value_kind_for(name: &str) -> Option<ValueKind> {
    [ValueKind::Brightness, ValueKind::ColorTemperature]
        .into_iter()
        .find(|kind| kind.table_key() == name)
}

fn code_string(name: &str, value: Value) -> Result<CodeToken, TableError> {
    match value {
        Value::String(code) => Ok(CodeToken::new(code)),
        other => Err(TableError::MalformedCommand {
            name: name.to_string(),
            reason: format!("expected a code string, found {other}"),
        }),
    }
}

fn parse_absolute(
    name: &str,
    map: serde_json::Map<String, Value>,
) -> Result<HashMap<u32, CodeToken>, TableError> {
    map.into_iter()
        .map(|(key, code)| {
            let value = key
                .trim()
                .parse::<u32>()
                .map_err(|_| TableError::MalformedCommand {
                    name: name.to_string(),
                    reason: format!("'{key}' is not a numeric value"),
                })?;
            Ok((value, code_string(name, code)?))
        })
        .collect()
}
