// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Analog-like light properties reached through ladders.

use std::fmt;

/// A light property driven by absolute codes or a relative ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueKind {
    /// Brightness (0-255 scale in device tables).
    Brightness,
    /// Color temperature in Kelvin.
    ColorTemperature,
}

impl ValueKind {
    /// Returns the key used for this kind in device tables.
    #[must_use]
    pub const fn table_key(&self) -> &'static str {
        match self {
            Self::Brightness => "brightness",
            Self::ColorTemperature => "colorTemperature",
        }
    }

    /// Returns the step command names as `(decrease, increase)`.
    ///
    /// Ladders are ascending, so `dim` and `warmer` move toward index 0.
    #[must_use]
    pub const fn step_commands(&self) -> (&'static str, &'static str) {
        match self {
            Self::Brightness => ("dim", "brighten"),
            Self::ColorTemperature => ("warmer", "colder"),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Brightness => f.write_str("brightness"),
            Self::ColorTemperature => f.write_str("color temperature"),
        }
    }
}
