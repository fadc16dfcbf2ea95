// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device state tracking.

use crate::table::{CommandTable, ValueLadder};
use crate::types::{Direction, PowerState, ValueKind};

use super::StateChange;

/// Tracked state of an IR/RF controlled appliance.
///
/// Optional fields are `None` when the appliance does not support the
/// property. Values other than `power` are kept while the device is off, so
/// turning it back on can restore them.
///
/// `on_by_remote` is set when the power sensor saw the appliance switched on
/// by something other than this engine. It is cleared by every successful
/// transmission.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DeviceState {
    power: PowerState,
    speed: Option<String>,
    oscillating: Option<bool>,
    direction: Direction,
    brightness: Option<u32>,
    color_temperature: Option<u32>,
    on_by_remote: bool,
}

impl DeviceState {
    /// Creates the state of a freshly set up device.
    ///
    /// Fans start at their lowest speed, lights at the top of their ladders.
    #[must_use]
    pub fn initial(table: &CommandTable) -> Self {
        Self {
            power: PowerState::Off,
            speed: table.speeds().first().cloned(),
            oscillating: table.supports_oscillation().then_some(false),
            direction: table.initial_direction(),
            brightness: table.ladder(ValueKind::Brightness).map(ValueLadder::max),
            color_temperature: table.ladder(ValueKind::ColorTemperature).map(ValueLadder::max),
            on_by_remote: false,
        }
    }

    // ========== Power ==========

    /// Returns the power state.
    #[must_use]
    pub fn power(&self) -> PowerState {
        self.power
    }

    /// Returns `true` if the device is on.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.power.is_on()
    }

    /// Sets the power state.
    pub fn set_power(&mut self, power: PowerState) {
        self.power = power;
    }

    // ========== Fan ==========

    /// Returns the last known speed.
    #[must_use]
    pub fn speed(&self) -> Option<&str> {
        self.speed.as_deref()
    }

    /// Sets the speed.
    pub fn set_speed(&mut self, speed: impl Into<String>) {
        self.speed = Some(speed.into());
    }

    /// Returns the oscillation state, `None` if unsupported.
    #[must_use]
    pub fn oscillating(&self) -> Option<bool> {
        self.oscillating
    }

    /// Sets the oscillation state.
    pub fn set_oscillating(&mut self, oscillating: bool) {
        self.oscillating = Some(oscillating);
    }

    /// Returns the direction.
    #[must_use]
    pub fn direction(&self) -> &Direction {
        &self.direction
    }

    /// Sets the direction.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    // ========== Light ==========

    /// Returns the brightness, `None` if unsupported.
    #[must_use]
    pub fn brightness(&self) -> Option<u32> {
        self.brightness
    }

    /// Sets the brightness.
    pub fn set_brightness(&mut self, brightness: u32) {
        self.brightness = Some(brightness);
    }

    /// Returns the color temperature in Kelvin, `None` if unsupported.
    #[must_use]
    pub fn color_temperature(&self) -> Option<u32> {
        self.color_temperature
    }

    /// Sets the color temperature.
    pub fn set_color_temperature(&mut self, kelvin: u32) {
        self.color_temperature = Some(kelvin);
    }

    // ========== Remote ==========

    /// Returns `true` if the last power change came from another remote.
    #[must_use]
    pub fn on_by_remote(&self) -> bool {
        self.on_by_remote
    }

    /// Sets the remote-control marker.
    pub fn set_on_by_remote(&mut self, on_by_remote: bool) {
        self.on_by_remote = on_by_remote;
    }

    /// Returns `true` if last-known values must not be presented.
    #[must_use]
    pub fn hides_last_known(&self, restore_on_remote: bool) -> bool {
        self.on_by_remote && !restore_on_remote
    }

    // ========== State Changes ==========

    /// Applies a state change and returns whether the state actually changed.
    pub fn apply(&mut self, change: &StateChange) -> bool {
        match change {
            StateChange::Power(power) => replace(&mut self.power, *power),
            StateChange::Speed(speed) => replace(&mut self.speed, Some(speed.clone())),
            StateChange::Direction(direction) => replace(&mut self.direction, direction.clone()),
            StateChange::Oscillating(value) => replace(&mut self.oscillating, Some(*value)),
            StateChange::Brightness(value) => replace(&mut self.brightness, Some(*value)),
            StateChange::ColorTemperature(value) => {
                replace(&mut self.color_temperature, Some(*value))
            }
            StateChange::OnByRemote(value) => replace(&mut self.on_by_remote, *value),
            StateChange::Batch(changes) => changes
                .iter()
                .fold(false, |changed, change| self.apply(change) || changed),
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
