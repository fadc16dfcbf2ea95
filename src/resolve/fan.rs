// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan target resolution.

use crate::error::SequenceError;
use crate::state::{DeviceState, StateChange};
use crate::table::{CommandTable, DiscreteCommand};
use crate::types::percentage::percentage_to_ordered_item;
use crate::types::{Direction, PowerState};

use super::{Action, Plan, PlannedAction, Resolve};

/// A desired fan state.
///
/// Fields left as `None` keep their current value. A percentage of `0`
/// turns the fan off; any other percentage turns it on.
///
/// A fan code carries power, speed and direction at once, so an "on"
/// request always sends exactly one code:
///
/// - off: the `off` code;
/// - on and oscillating: the `oscillate` code;
/// - on otherwise: the code for the target speed in the target direction.
///
/// The target speed and direction are tracked in both "on" cases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FanRequest {
    /// Target power state.
    pub power: Option<PowerState>,
    /// Target speed as a percentage.
    pub percentage: Option<u8>,
    /// Target oscillation.
    pub oscillating: Option<bool>,
    /// Target direction.
    pub direction: Option<Direction>,
}

impl FanRequest {
    /// Creates an empty request (resend the current state).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a power state.
    #[must_use]
    pub fn with_power(mut self, power: PowerState) -> Self {
        self.power = Some(power);
        self
    }

    /// Requests a speed percentage.
    #[must_use]
    pub fn with_percentage(mut self, percentage: u8) -> Self {
        self.percentage = Some(percentage);
        self
    }

    /// Requests oscillation on or off.
    #[must_use]
    pub fn with_oscillating(mut self, oscillating: bool) -> Self {
        self.oscillating = Some(oscillating);
        self
    }

    /// Requests a direction.
    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    fn target_power(&self, current: &DeviceState) -> PowerState {
        match (self.percentage, self.power) {
            (Some(0), _) => PowerState::Off,
            (_, Some(power)) => power,
            (Some(_), None) => PowerState::On,
            (None, None) => current.power(),
        }
    }
}

impl Resolve for FanRequest {
    fn resolve(
        &self,
        table: &CommandTable,
        current: &DeviceState,
    ) -> Result<Plan, SequenceError> {
        let mut target = current.clone();

        if self.target_power(current) == PowerState::Off {
            let effect = StateChange::Power(PowerState::Off);
            target.apply(&effect);
            let action = PlannedAction::new(Action::SendDiscrete(DiscreteCommand::Off), effect);
            return Ok(Plan::new(current, vec![action], target));
        }

        let speed = self
            .percentage
            .and_then(|pct| percentage_to_ordered_item(table.speeds(), pct))
            .map(String::as_str)
            .or(current.speed())
            .or(table.speeds().first().map(String::as_str))
            .unwrap_or_default()
            .to_string();
        let direction = self
            .direction
            .clone()
            .unwrap_or_else(|| current.direction().clone());
        let mut changes = vec![
            StateChange::Power(PowerState::On),
            StateChange::Speed(speed.clone()),
            StateChange::Direction(direction.clone()),
        ];

        let oscillating = self.oscillating.or(current.oscillating()).unwrap_or(false);
        let action = if oscillating {
            changes.push(StateChange::Oscillating(true));
            PlannedAction::new(
                Action::SendDiscrete(DiscreteCommand::Oscillate),
                StateChange::Batch(changes),
            )
        } else {
            if current.oscillating().is_some() {
                changes.push(StateChange::Oscillating(false));
            }
            PlannedAction::new(
                Action::SendDirectionalSpeed { direction, speed },
                StateChange::Batch(changes),
            )
        };

        target.apply(&action.effect);
        Ok(Plan::new(current, vec![action], target))
    }
}
