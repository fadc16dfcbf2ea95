// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! State change representation.
//!
//! A state change is the effect of one transmitted code (or of one
//! externally observed signal) on a [`DeviceState`](super::DeviceState).

use crate::types::{Direction, PowerState};

/// Represents a change in device state.
///
/// # Examples
///
/// ```
/// use irseq_lib::state::StateChange;
/// use irseq_lib::types::PowerState;
///
/// let fan_speed = StateChange::Batch(vec![
///     StateChange::Power(PowerState::On),
///     StateChange::Speed("high".to_string()),
/// ]);
/// assert!(fan_speed.affects_power());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StateChange {
    /// Power state changed.
    Power(PowerState),

    /// Fan speed changed.
    Speed(String),

    /// Fan direction changed.
    Direction(Direction),

    /// Oscillation changed.
    Oscillating(bool),

    /// Brightness changed.
    Brightness(u32),

    /// Color temperature changed.
    ColorTemperature(u32),

    /// The remote-control marker was set or cleared.
    OnByRemote(bool),

    /// Multiple changes caused by one code.
    Batch(Vec<StateChange>),
}

impl StateChange {
    /// Returns `true` if the change touches the power state.
    #[must_use]
    pub fn affects_power(&self) -> bool {
        match self {
            Self::Power(_) => true,
            Self::Batch(changes) => changes.iter().any(Self::affects_power),
            _ => false,
        }
    }

    /// Returns the resulting power state if this change sets one.
    ///
    /// For batches the last power change wins.
    #[must_use]
    pub fn power(&self) -> Option<PowerState> {
        match self {
            Self::Power(state) => Some(*state),
            Self::Batch(changes) => changes.iter().rev().find_map(Self::power),
            _ => None,
        }
    }
}
