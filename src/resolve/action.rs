// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Logical actions, plans and transmit steps.

use std::fmt;
use std::time::Duration;

use crate::error::SequenceError;
use crate::state::{DeviceState, StateChange};
use crate::table::{CommandTable, DiscreteCommand};
use crate::types::{CodeToken, Direction, PowerState, ValueKind};

use super::stepper;

/// One logical action of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send a standalone command.
    SendDiscrete(DiscreteCommand),
    /// Send the code for a speed in a direction.
    SendDirectionalSpeed {
        /// Direction key.
        direction: Direction,
        /// Speed name.
        speed: String,
    },
    /// Send the absolute code for a ladder value.
    SendAbsoluteValue {
        /// Property being set.
        kind: ValueKind,
        /// Exact ladder value.
        value: u32,
    },
    /// Walk a relative ladder between two indices.
    WalkLadder {
        /// Property being walked.
        kind: ValueKind,
        /// Believed current index.
        from: usize,
        /// Target index.
        to: usize,
    },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SendDiscrete(command) => write!(f, "'{command}'"),
            Self::SendDirectionalSpeed { direction, speed } => {
                write!(f, "direction '{direction}' speed '{speed}'")
            }
            Self::SendAbsoluteValue { kind, value } => write!(f, "{kind} {value}"),
            Self::WalkLadder { kind, from, to } => {
                write!(f, "{kind} ladder walk {from} -> {to}")
            }
        }
    }
}

/// An action together with the state change it causes once sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedAction {
    /// The action.
    pub action: Action,
    /// Its effect after complete transmission.
    pub effect: StateChange,
}

impl PlannedAction {
    /// Pairs an action with its effect.
    #[must_use]
    pub fn new(action: Action, effect: StateChange) -> Self {
        Self { action, effect }
    }

    /// Resolves the action into codes to transmit.
    ///
    /// Every returned step carries the effect of having sent it, so a walk
    /// interrupted halfway leaves the state at the rung actually reached.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::MissingCommand`] if a code is not in the table.
    pub fn transmit_steps(
        &self,
        table: &CommandTable,
        delay: Duration,
    ) -> Result<Vec<TransmitStep>, SequenceError> {
        let missing = || SequenceError::MissingCommand(self.action.to_string());

        let code = match &self.action {
            Action::SendDiscrete(command) => table.resolve_discrete(*command),
            Action::SendDirectionalSpeed { direction, speed } => {
                table.resolve_directional(direction, speed)
            }
            Action::SendAbsoluteValue { kind, value } => {
                table.resolve_absolute_value(*kind, *value)
            }
            Action::WalkLadder { kind, from, to } => {
                let ladder = table.ladder(*kind).ok_or_else(missing)?;
                let walk = stepper::walk(ladder, *kind, *from, *to);
                let code = table.resolve_discrete(walk.command).ok_or_else(missing)?;
                return Ok(walk
                    .positions
                    .iter()
                    .filter_map(|&index| ladder.get(index))
                    .map(|value| TransmitStep {
                        label: walk.command.as_str().to_string(),
                        code: code.clone(),
                        delay,
                        effect: value_change(*kind, value),
                    })
                    .collect());
            }
        };

        let code = code.ok_or_else(missing)?;
        Ok(vec![TransmitStep {
            label: self.action.to_string(),
            code: code.clone(),
            delay,
            effect: self.effect.clone(),
        }])
    }
}

/// A single code to send, the delay to wait after it, and its effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransmitStep {
    /// Human-readable name for logs.
    pub label: String,
    /// The code.
    pub code: CodeToken,
    /// Pause after sending.
    pub delay: Duration,
    /// State change once sent.
    pub effect: StateChange,
}

/// The resolved result of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    actions: Vec<PlannedAction>,
    target: DeviceState,
    expected_power: Option<PowerState>,
}

impl Plan {
    /// Creates a plan that moves `current` to `target` through `actions`.
    #[must_use]
    pub fn new(current: &DeviceState, actions: Vec<PlannedAction>, target: DeviceState) -> Self {
        let expected_power = (target.power() != current.power()).then_some(target.power());
        Self {
            actions,
            target,
            expected_power,
        }
    }

    /// Returns the planned actions in transmission order.
    #[must_use]
    pub fn actions(&self) -> &[PlannedAction] {
        &self.actions
    }

    /// Returns the state after all actions were sent.
    #[must_use]
    pub fn target(&self) -> &DeviceState {
        &self.target
    }

    /// Returns the new power state if the plan changes it.
    #[must_use]
    pub fn expected_power(&self) -> Option<PowerState> {
        self.expected_power
    }

    /// Returns `true` if nothing needs to be sent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

pub(super) fn value_change(kind: ValueKind, value: u32) -> StateChange {
    match kind {
        ValueKind::Brightness => StateChange::Brightness(value),
        ValueKind::ColorTemperature => StateChange::ColorTemperature(value),
    }
}
