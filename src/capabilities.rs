// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device capabilities.
//!
//! Capabilities are derived from a validated
//! [`CommandTable`](crate::table::CommandTable): a device supports exactly
//! what its table has codes for.

use crate::table::{CommandTable, DeviceClass, DiscreteCommand};
use crate::types::ValueKind;

/// How a light's color can be controlled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// On and off only.
    OnOff,
    /// Brightness.
    Brightness,
    /// Brightness (if present) and color temperature.
    ColorTemp,
}

/// What a device supports, as advertised to a presentation layer.
///
/// # Examples
///
/// ```
/// use irseq_lib::Capabilities;
/// use irseq_lib::capabilities::ColorMode;
/// use irseq_lib::table::{CommandTable, DeviceClass};
///
/// let table = CommandTable::from_json(
///     DeviceClass::Light,
///     r#"{"manufacturer": "Acme", "brightness": [10, 255],
///         "commands": {"on": "1", "off": "0", "dim": "d", "brighten": "b"}}"#,
/// )
/// .unwrap();
///
/// let caps = Capabilities::from_table(&table);
/// assert_eq!(caps.color_mode, Some(ColorMode::Brightness));
/// assert!(!caps.is_fan());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
// Independent feature flags of one appliance
#[allow(clippy::struct_excessive_bools)]
pub struct Capabilities {
    /// Device class.
    pub class: DeviceClass,
    /// Number of fan speeds.
    pub speed_count: usize,
    /// Fan direction can be set.
    pub direction: bool,
    /// Fan oscillation can be enabled.
    pub oscillate: bool,
    /// Light color control, `None` for fans.
    pub color_mode: Option<ColorMode>,
    /// Light has a night light code.
    pub night_light: bool,
    /// Lowest color temperature in Kelvin.
    pub min_color_temp_kelvin: Option<u32>,
    /// Highest color temperature in Kelvin.
    pub max_color_temp_kelvin: Option<u32>,
}

impl Capabilities {
    /// Derives the capabilities of a table.
    #[must_use]
    pub fn from_table(table: &CommandTable) -> Self {
        let color_temperature = table.ladder(ValueKind::ColorTemperature);
        let color_mode = match table.class() {
            DeviceClass::Fan => None,
            DeviceClass::Light if color_temperature.is_some() => Some(ColorMode::ColorTemp),
            DeviceClass::Light if table.ladder(ValueKind::Brightness).is_some() => {
                Some(ColorMode::Brightness)
            }
            DeviceClass::Light => Some(ColorMode::OnOff),
        };

        Self {
            class: table.class(),
            speed_count: table.speeds().len(),
            direction: table.supports_direction(),
            oscillate: table.supports_oscillation(),
            color_mode,
            night_light: table.resolve_discrete(DiscreteCommand::Night).is_some(),
            min_color_temp_kelvin: color_temperature.map(|ladder| ladder.min()),
            max_color_temp_kelvin: color_temperature.map(|ladder| ladder.max()),
        }
    }

    /// Returns whether the device is a fan.
    #[must_use]
    pub fn is_fan(&self) -> bool {
        self.class == DeviceClass::Fan
    }

    /// Returns whether brightness can be set.
    #[must_use]
    pub fn supports_brightness(&self) -> bool {
        matches!(
            self.color_mode,
            Some(ColorMode::Brightness | ColorMode::ColorTemp)
        )
    }

    /// Returns whether color temperature can be set.
    #[must_use]
    pub fn supports_color_temperature(&self) -> bool {
        self.color_mode == Some(ColorMode::ColorTemp)
    }
}
