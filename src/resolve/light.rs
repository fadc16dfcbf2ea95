// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light target resolution.

use tracing::debug;

use crate::error::SequenceError;
use crate::state::{DeviceState, StateChange};
use crate::table::{CommandTable, DiscreteCommand};
use crate::types::{PowerState, ValueKind};

use super::action::value_change;
use super::{Action, Plan, PlannedAction, Resolve};

/// Brightness requested for the night light code.
const NIGHT_BRIGHTNESS: u32 = 1;

/// A desired light state.
///
/// An "on" request is resolved as:
///
/// 1. the `on` code, unless the table has no `on` code, or the light is
///    tracked on and either shares one code for on and off or
///    [`assume_power`](Self::assume_power) is set;
/// 2. the color temperature;
/// 3. the brightness. A brightness of 1 selects the `night` code when the
///    table has one.
///
/// Values left as `None` are not sent, unless
/// [`restore_values`](Self::restore_values) is set: then every ladder the
/// table has is sent again at its tracked value. A tracked value at either
/// end of its ladder is sent as a full-length walk, which also corrects a
/// light adjusted with its own remote.
///
/// Values are snapped to the closest ladder rung and sent either as an
/// absolute code or as a ladder walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LightRequest {
    /// Target power state.
    pub power: PowerState,
    /// Target brightness.
    pub brightness: Option<u32>,
    /// Target color temperature in Kelvin.
    pub color_temperature: Option<u32>,
    /// Resend tracked values for ladders without a requested value.
    pub restore_values: bool,
    /// Trust the tracked power state and skip `on` while tracked on.
    pub assume_power: bool,
}

impl LightRequest {
    /// Requests the light on without changing its values.
    #[must_use]
    pub fn on() -> Self {
        Self {
            power: PowerState::On,
            ..Self::default()
        }
    }

    /// Requests the light off.
    #[must_use]
    pub fn off() -> Self {
        Self::default()
    }

    /// Requests a brightness.
    #[must_use]
    pub fn with_brightness(mut self, brightness: u32) -> Self {
        self.brightness = Some(brightness);
        self
    }

    /// Requests a color temperature.
    #[must_use]
    pub fn with_color_temperature(mut self, kelvin: u32) -> Self {
        self.color_temperature = Some(kelvin);
        self
    }

    /// Resends tracked values that are not requested explicitly.
    #[must_use]
    pub fn restoring_values(mut self) -> Self {
        self.restore_values = true;
        self
    }

    /// Sets whether the tracked power state is trusted.
    #[must_use]
    pub fn assuming_power(mut self, assume: bool) -> Self {
        self.assume_power = assume;
        self
    }

    fn value(&self, table: &CommandTable, current: &DeviceState, kind: ValueKind) -> Option<u32> {
        let requested = match kind {
            ValueKind::Brightness => self.brightness,
            ValueKind::ColorTemperature => self.color_temperature,
        };
        requested.or_else(|| {
            if self.restore_values && table.ladder(kind).is_some() {
                let tracked = believed(current, kind);
                debug!(%kind, value = ?tracked, "No value requested, resending tracked value");
                tracked
            } else {
                None
            }
        })
    }
}

impl Resolve for LightRequest {
    fn resolve(
        &self,
        table: &CommandTable,
        current: &DeviceState,
    ) -> Result<Plan, SequenceError> {
        let toggle = table.has_toggle_power_code();
        let mut actions = Vec::new();

        if self.power == PowerState::Off {
            if toggle && current.power() == PowerState::Off {
                debug!("Light already off, skipping shared power code");
            } else {
                actions.push(PlannedAction::new(
                    Action::SendDiscrete(DiscreteCommand::Off),
                    StateChange::Power(PowerState::Off),
                ));
            }
            return Ok(plan(current, actions, StateChange::Power(PowerState::Off)));
        }

        if toggle && current.is_on() {
            debug!("Light already on, skipping shared power code");
        } else if self.assume_power && current.is_on() {
            debug!("Light tracked as on, skipping 'on' code");
        } else if table.resolve_discrete(DiscreteCommand::On).is_none() {
            debug!("No 'on' command in table, sending values only");
        } else {
            actions.push(PlannedAction::new(
                Action::SendDiscrete(DiscreteCommand::On),
                StateChange::Power(PowerState::On),
            ));
        }

        if let Some(kelvin) = self.value(table, current, ValueKind::ColorTemperature) {
            actions.push(value_action(table, current, ValueKind::ColorTemperature, kelvin)?);
        }

        if let Some(brightness) = self.value(table, current, ValueKind::Brightness) {
            let night = brightness == NIGHT_BRIGHTNESS
                && table.resolve_discrete(DiscreteCommand::Night).is_some();
            if night {
                actions.push(PlannedAction::new(
                    Action::SendDiscrete(DiscreteCommand::Night),
                    StateChange::Brightness(NIGHT_BRIGHTNESS),
                ));
            } else {
                actions.push(value_action(table, current, ValueKind::Brightness, brightness)?);
            }
        }

        Ok(plan(current, actions, StateChange::Power(PowerState::On)))
    }
}

fn plan(current: &DeviceState, actions: Vec<PlannedAction>, power: StateChange) -> Plan {
    let mut target = current.clone();
    for planned in &actions {
        target.apply(&planned.effect);
    }
    target.apply(&power);
    Plan::new(current, actions, target)
}

fn value_action(
    table: &CommandTable,
    current: &DeviceState,
    kind: ValueKind,
    requested: u32,
) -> Result<PlannedAction, SequenceError> {
    let ladder = table
        .ladder(kind)
        .ok_or_else(|| SequenceError::MissingCommand(kind.to_string()))?;
    let to = ladder.closest_index(requested);
    let value = ladder.closest_value(requested);

    let action = if table.has_absolute_values(kind) {
        Action::SendAbsoluteValue { kind, value }
    } else {
        let from = ladder.closest_index(believed(current, kind).unwrap_or_else(|| ladder.max()));
        Action::WalkLadder { kind, from, to }
    };

    Ok(PlannedAction::new(action, value_change(kind, value)))
}

fn believed(current: &DeviceState, kind: ValueKind) -> Option<u32> {
    match kind {
        ValueKind::Brightness => current.brightness(),
        ValueKind::ColorTemperature => current.color_temperature(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{DeviceClass, DeviceData};

    fn relative_table() -> CommandTable {
        let data: DeviceData = serde_json::from_value(serde_json::json!({
            "manufacturer": "Acme",
            "brightness": [10, 50, 100, 150, 255],
            "colorTemperature": [2700, 4000, 6500],
            "commands": {
                "on": "ON", "off": "OFF", "night": "NIGHT",
                "dim": "DIM", "brighten": "UP",
                "warmer": "WARM", "colder": "COLD"
            }
        }))
        .unwrap();
        CommandTable::from_device_data(DeviceClass::Light, data).unwrap()
    }

    fn toggle_table() -> CommandTable {
        let data: DeviceData = serde_json::from_value(serde_json::json!({
            "manufacturer": "Acme",
            "commands": { "on": "PWR", "off": "PWR" }
        }))
        .unwrap();
        CommandTable::from_device_data(DeviceClass::Light, data).unwrap()
    }

    fn absolute_table() -> CommandTable {
        let data: DeviceData = serde_json::from_value(serde_json::json!({
            "manufacturer": "Acme",
            "brightness": [25, 50, 100],
            "commands": {
                "on": "ON", "off": "OFF",
                "brightness": { "25": "B25", "50": "B50", "100": "B100" }
            }
        }))
        .unwrap();
        CommandTable::from_device_data(DeviceClass::Light, data).unwrap()
    }

    fn kinds(plan: &Plan) -> Vec<&Action> {
        plan.actions().iter().map(|p| &p.action).collect()
    }

    #[test]
    fn brightness_walk_from_believed_value() {
        let table = relative_table();
        let mut current = DeviceState::initial(&table);
        current.set_power(PowerState::On);
        current.set_brightness(10);

        let plan = LightRequest::on()
            .with_brightness(255)
            .resolve(&table, &current)
            .unwrap();
        assert_eq!(
            kinds(&plan),
            vec![
                &Action::SendDiscrete(DiscreteCommand::On),
                &Action::WalkLadder {
                    kind: ValueKind::Brightness,
                    from: 0,
                    to: 4,
                },
            ]
        );
        assert_eq!(plan.target().brightness(), Some(255));
    }

    #[test]
    fn color_temperature_is_sent_before_brightness() {
        let table = relative_table();
        let current = DeviceState::initial(&table);
        let plan = LightRequest::on()
            .with_brightness(100)
            .with_color_temperature(4100)
            .resolve(&table, &current)
            .unwrap();
        let actions = kinds(&plan);
        assert_eq!(actions.len(), 3);
        assert!(matches!(
            actions[1],
            Action::WalkLadder {
                kind: ValueKind::ColorTemperature,
                to: 1,
                ..
            }
        ));
        assert!(matches!(
            actions[2],
            Action::WalkLadder {
                kind: ValueKind::Brightness,
                ..
            }
        ));
        assert_eq!(plan.target().color_temperature(), Some(4000));
    }

    #[test]
    fn brightness_one_uses_night_code() {
        let table = relative_table();
        let current = DeviceState::initial(&table);
        let plan = LightRequest::on()
            .with_brightness(1)
            .resolve(&table, &current)
            .unwrap();
        assert_eq!(
            kinds(&plan)[1],
            &Action::SendDiscrete(DiscreteCommand::Night)
        );
        assert_eq!(plan.target().brightness(), Some(1));
    }

    #[test]
    fn absolute_codes_snap_to_closest_rung() {
        let table = absolute_table();
        let current = DeviceState::initial(&table);
        let plan = LightRequest::on()
            .with_brightness(60)
            .resolve(&table, &current)
            .unwrap();
        assert_eq!(
            kinds(&plan)[1],
            &Action::SendAbsoluteValue {
                kind: ValueKind::Brightness,
                value: 50,
            }
        );
        assert_eq!(plan.target().brightness(), Some(50));
    }

    #[test]
    fn toggle_code_is_elided_when_already_in_state() {
        let table = toggle_table();
        let mut current = DeviceState::initial(&table);

        let off = LightRequest::off().resolve(&table, &current).unwrap();
        assert!(off.is_empty());

        current.set_power(PowerState::On);
        let on = LightRequest::on().resolve(&table, &current).unwrap();
        assert!(on.is_empty());

        let off = LightRequest::off().resolve(&table, &current).unwrap();
        assert_eq!(kinds(&off), vec![&Action::SendDiscrete(DiscreteCommand::Off)]);
    }

    #[test]
    fn distinct_codes_are_always_sent() {
        let table = relative_table();
        let mut current = DeviceState::initial(&table);
        current.set_power(PowerState::On);
        let plan = LightRequest::on().resolve(&table, &current).unwrap();
        assert_eq!(kinds(&plan), vec![&Action::SendDiscrete(DiscreteCommand::On)]);
    }

    #[test]
    fn assumed_power_skips_on_code() {
        let table = relative_table();
        let mut current = DeviceState::initial(&table);
        current.set_power(PowerState::On);
        let plan = LightRequest::on()
            .with_brightness(50)
            .assuming_power(true)
            .resolve(&table, &current)
            .unwrap();
        assert!(matches!(kinds(&plan)[..], [Action::WalkLadder { .. }]));

        current.set_power(PowerState::Off);
        let plan = LightRequest::on()
            .assuming_power(true)
            .resolve(&table, &current)
            .unwrap();
        assert_eq!(kinds(&plan), vec![&Action::SendDiscrete(DiscreteCommand::On)]);
    }

    #[test]
    fn restoring_values_resends_tracked_ladders() {
        let table = relative_table();
        let mut current = DeviceState::initial(&table);
        current.set_brightness(100);

        let plan = LightRequest::on()
            .restoring_values()
            .resolve(&table, &current)
            .unwrap();
        assert_eq!(
            kinds(&plan),
            vec![
                &Action::SendDiscrete(DiscreteCommand::On),
                &Action::WalkLadder {
                    kind: ValueKind::ColorTemperature,
                    from: 2,
                    to: 2,
                },
                &Action::WalkLadder {
                    kind: ValueKind::Brightness,
                    from: 2,
                    to: 2,
                },
            ]
        );
        let mut expected = current.clone();
        expected.set_power(PowerState::On);
        assert_eq!(plan.target(), &expected);
    }

    #[test]
    fn restoring_values_skips_missing_ladders() {
        let table = toggle_table();
        let current = DeviceState::initial(&table);
        let plan = LightRequest::on()
            .restoring_values()
            .resolve(&table, &current)
            .unwrap();
        assert_eq!(kinds(&plan), vec![&Action::SendDiscrete(DiscreteCommand::On)]);
    }

    #[test]
    fn value_without_ladder_is_missing_command() {
        let table = toggle_table();
        let current = DeviceState::initial(&table);
        let err = LightRequest::on()
            .with_brightness(100)
            .resolve(&table, &current)
            .unwrap_err();
        assert_eq!(err, SequenceError::MissingCommand("brightness".to_string()));
    }

    #[test]
    fn missing_on_code_sends_values_only() {
        let data: DeviceData = serde_json::from_value(serde_json::json!({
            "manufacturer": "Acme",
            "brightness": [10, 255],
            "commands": { "off": "OFF", "dim": "DIM", "brighten": "UP" }
        }))
        .unwrap();
        let table = CommandTable::from_device_data(DeviceClass::Light, data).unwrap();
        let current = DeviceState::initial(&table);
        let plan = LightRequest::on()
            .with_brightness(10)
            .resolve(&table, &current)
            .unwrap();
        assert_eq!(plan.actions().len(), 1);
        assert_eq!(plan.target().power(), PowerState::On);
    }
}
