// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-device configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;
use crate::sequencer::DEFAULT_DELAY;

/// Default window for the power sensor to follow a power change.
pub const DEFAULT_POWER_SENSOR_DELAY: Duration = Duration::from_secs(10);

/// Where a binary signal comes from.
///
/// The engine does not evaluate sources itself; the host reads them and
/// feeds [`SignalReading`](crate::reconcile::SignalReading)s into the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalSource {
    /// A binary sensor reporting `on` / `off`.
    Sensor(String),
    /// A template evaluating to a boolean.
    Template(String),
}

/// Configuration of one controlled device.
///
/// Durations are written as (fractional) seconds.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use irseq_lib::config::{DeviceConfig, SignalSource};
///
/// let config = DeviceConfig::from_json(
///     r#"{ "name": "Bedroom fan", "device_code": 1020, "delay": 0.8,
///          "power_sensor": { "sensor": "binary_sensor.fan_power" } }"#,
/// )
/// .unwrap();
/// assert_eq!(config.delay, Duration::from_millis(800));
/// assert_eq!(config.power_sensor_delay, Duration::from_secs(10));
///
/// let built = DeviceConfig::new("Bedroom fan", 1020)
///     .with_delay(Duration::from_millis(800))
///     .with_power_sensor(SignalSource::Sensor("binary_sensor.fan_power".into()));
/// assert_eq!(built, config);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceConfig {
    /// Display name.
    pub name: String,
    /// Optional stable identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,
    /// Code of the device table to load.
    pub device_code: u32,
    /// Pause after each transmitted code.
    #[serde(default = "default_delay", with = "seconds")]
    pub delay: Duration,
    /// Signal reporting whether the appliance is powered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_sensor: Option<SignalSource>,
    /// Window for the power sensor to follow a transmitted power change.
    #[serde(default = "default_power_sensor_delay", with = "seconds")]
    pub power_sensor_delay: Duration,
    /// Show last-known values after the appliance was switched on remotely.
    #[serde(default = "default_true")]
    pub power_restore_state: bool,
    /// Signal gating whether commands may be sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_sensor: Option<SignalSource>,
    /// Report the device unavailable even while it is on.
    #[serde(default)]
    pub availability_when_on: bool,
    /// Trust the tracked power state, so `on` is not resent to a device
    /// tracked as on.
    #[serde(default = "default_true")]
    pub optimistic: bool,
}

impl DeviceConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new(name: impl Into<String>, device_code: u32) -> Self {
        Self {
            name: name.into(),
            unique_id: None,
            device_code,
            delay: DEFAULT_DELAY,
            power_sensor: None,
            power_sensor_delay: DEFAULT_POWER_SENSOR_DELAY,
            power_restore_state: true,
            availability_sensor: None,
            availability_when_on: false,
            optimistic: true,
        }
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidConfig`] for malformed JSON or negative
    /// durations and [`ValueError::InvalidDuration`] for a zero power
    /// sensor window.
    pub fn from_json(json: &str) -> Result<Self, ValueError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ValueError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the power sensor window is positive.
    ///
    /// A zero `delay` is allowed and sends codes back to back.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::InvalidDuration`] naming the offending field.
    pub fn validate(&self) -> Result<(), ValueError> {
        if self.power_sensor_delay.is_zero() {
            return Err(ValueError::InvalidDuration {
                field: "power_sensor_delay",
                value: 0.0,
            });
        }
        Ok(())
    }

    /// Returns `true` if the tracked power state can be trusted.
    ///
    /// That is the case with a power sensor or in optimistic mode.
    #[must_use]
    pub fn trusts_power_state(&self) -> bool {
        self.optimistic || self.power_sensor.is_some()
    }

    /// Sets the stable identifier.
    #[must_use]
    pub fn with_unique_id(mut self, unique_id: impl Into<String>) -> Self {
        self.unique_id = Some(unique_id.into());
        self
    }

    /// Sets the pause after each code.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the power signal.
    #[must_use]
    pub fn with_power_sensor(mut self, source: SignalSource) -> Self {
        self.power_sensor = Some(source);
        self
    }

    /// Sets the power verification window.
    #[must_use]
    pub fn with_power_sensor_delay(mut self, delay: Duration) -> Self {
        self.power_sensor_delay = delay;
        self
    }

    /// Sets whether last-known values stay visible after a remote power-on.
    #[must_use]
    pub fn with_power_restore_state(mut self, restore: bool) -> Self {
        self.power_restore_state = restore;
        self
    }

    /// Sets the availability signal.
    #[must_use]
    pub fn with_availability_sensor(mut self, source: SignalSource) -> Self {
        self.availability_sensor = Some(source);
        self
    }

    /// Sets whether unavailability hides a powered device.
    #[must_use]
    pub fn with_availability_when_on(mut self, when_on: bool) -> Self {
        self.availability_when_on = when_on;
        self
    }

    /// Sets whether the tracked power state is trusted.
    #[must_use]
    pub fn with_optimistic(mut self, optimistic: bool) -> Self {
        self.optimistic = optimistic;
        self
    }
}

fn default_delay() -> Duration {
    DEFAULT_DELAY
}

fn default_power_sensor_delay() -> Duration {
    DEFAULT_POWER_SENSOR_DELAY
}

fn default_true() -> bool {
    true
}

mod seconds {
    use std::time::Duration;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs)
            .map_err(|_| D::Error::custom(format!("invalid duration {secs}")))
    }
}
