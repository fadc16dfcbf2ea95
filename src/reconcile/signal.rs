// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Readings from power and availability signals.

use std::fmt;

use crate::types::PowerState;

/// One observation from a binary sensor or template.
///
/// Sensors report strings; anything other than `on`/`off` (for instance
/// `unavailable` while the sensor itself is offline) is [`Unknown`] and
/// ignored by reconciliation. Templates evaluate to an optional boolean.
///
/// [`Unknown`]: SignalReading::Unknown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SignalReading {
    /// The signal reports on / true.
    On,
    /// The signal reports off / false.
    Off,
    /// The signal has no usable value.
    #[default]
    Unknown,
}

impl SignalReading {
    /// Parses a sensor state string.
    ///
    /// # Examples
    ///
    /// ```
    /// use irseq_lib::reconcile::SignalReading;
    ///
    /// assert_eq!(SignalReading::from_sensor_state("on"), SignalReading::On);
    /// assert_eq!(SignalReading::from_sensor_state("OFF"), SignalReading::Off);
    /// assert_eq!(SignalReading::from_sensor_state("unavailable"), SignalReading::Unknown);
    /// ```
    #[must_use]
    pub fn from_sensor_state(state: &str) -> Self {
        match state.trim().parse::<PowerState>() {
            Ok(PowerState::On) => Self::On,
            Ok(PowerState::Off) => Self::Off,
            Err(_) => Self::Unknown,
        }
    }

    /// Returns the power state this reading stands for.
    #[must_use]
    pub fn power(self) -> Option<PowerState> {
        match self {
            Self::On => Some(PowerState::On),
            Self::Off => Some(PowerState::Off),
            Self::Unknown => None,
        }
    }

    /// Returns `true` if the reading carries a value.
    #[must_use]
    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

impl From<Option<bool>> for SignalReading {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::On,
            Some(false) => Self::Off,
            None => Self::Unknown,
        }
    }
}

impl From<bool> for SignalReading {
    fn from(value: bool) -> Self {
        Self::from(Some(value))
    }
}

impl From<PowerState> for SignalReading {
    fn from(power: PowerState) -> Self {
        match power {
            PowerState::On => Self::On,
            PowerState::Off => Self::Off,
        }
    }
}

impl fmt::Display for SignalReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensor_strings() {
        assert_eq!(SignalReading::from_sensor_state(" On "), SignalReading::On);
        assert_eq!(SignalReading::from_sensor_state("off"), SignalReading::Off);
        assert_eq!(SignalReading::from_sensor_state("unknown"), SignalReading::Unknown);
        assert_eq!(SignalReading::from_sensor_state(""), SignalReading::Unknown);
    }

    #[test]
    fn template_values() {
        assert_eq!(SignalReading::from(Some(true)), SignalReading::On);
        assert_eq!(SignalReading::from(false), SignalReading::Off);
        assert_eq!(SignalReading::from(None), SignalReading::Unknown);
        assert!(!SignalReading::Unknown.is_known());
        assert_eq!(SignalReading::Off.power(), Some(PowerState::Off));
    }
}
